//! T-SQL statement front-end.
//!
//! Splits a raw batch into statements and parses each one just far enough
//! for backup synthesis, on top of the `sqlparser` tokenizer.

mod splitter;
mod statement_parser;
mod token_cursor;

pub use splitter::split_statements;
pub use statement_parser::parse_statement;
pub use token_cursor::TokenCursor;
