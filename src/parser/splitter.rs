//! Batch splitting.
//!
//! Splits free-form multi-statement SQL text into individual statements on
//! top-level semicolons. Splitting runs over the token stream, so semicolons
//! inside string literals, comments, or bracketed identifiers never split.
//! Each returned statement owns its text starting at its first token, with
//! the trailing semicolon kept when present.

use sqlparser::dialect::MsSqlDialect;
use sqlparser::tokenizer::{Token, Tokenizer};

use crate::error::BackupSynthError;
use crate::util::offset_at;

/// Split a batch into per-statement text fragments, in document order.
pub fn split_statements(sql: &str) -> Result<Vec<String>, BackupSynthError> {
    let dialect = MsSqlDialect {};
    let tokens = Tokenizer::new(&dialect, sql).tokenize_with_location()?;

    let mut statements = Vec::new();
    let mut current_start: Option<usize> = None;

    for token in &tokens {
        match &token.token {
            Token::Whitespace(_) => {}
            Token::SemiColon => {
                let end = offset_at(sql, token.span.start.line, token.span.start.column) + 1;
                // A stray semicolon with no statement in front of it is dropped.
                if let Some(start) = current_start.take() {
                    statements.push(sql[start..end].to_string());
                }
            }
            _ => {
                if current_start.is_none() {
                    current_start =
                        Some(offset_at(sql, token.span.start.line, token.span.start.column));
                }
            }
        }
    }

    // Trailing statement without a terminating semicolon.
    if let Some(start) = current_start {
        statements.push(sql[start..].trim_end().to_string());
    }

    Ok(statements)
}
