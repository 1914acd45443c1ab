//! DML statement parsing.
//!
//! Extracts, from one statement's own text, exactly what backup synthesis
//! needs: the statement kind, the target named after DELETE/UPDATE, the
//! table references of an explicit FROM/JOIN clause, and the verbatim
//! FROM/WHERE clause text. Everything else (SET assignments, join
//! conditions) is skipped structurally, tracking parenthesis depth.
//!
//! Supported target shapes:
//! ```sql
//! DELETE FROM test WHERE ...
//! DELETE FROM t_alias FROM test AS t_alias WHERE ...
//! DELETE FROM test FROM test JOIN test2 ON ... WHERE ...
//! UPDATE test SET ... WHERE ...
//! UPDATE t_alias SET ... FROM test t_alias WHERE ...
//! ```

use sqlparser::keywords::Keyword;
use sqlparser::tokenizer::{Token, Word};

use super::token_cursor::TokenCursor;
use crate::error::BackupSynthError;
use crate::model::{SourcePosition, SourceStatement, StatementKind, TableReference};
use crate::util::final_char_position;

/// Parse one statement's text into a [`SourceStatement`].
///
/// Token positions are relative to `text` itself, so callers must pass each
/// statement's own text (see [`super::split_statements`]), not the whole
/// batch.
pub fn parse_statement(text: &str) -> Result<SourceStatement, BackupSynthError> {
    let mut cursor = TokenCursor::new(text)?;
    cursor.skip_whitespace();

    let start = cursor.position().unwrap_or(SourcePosition::new(1, 0));
    let stop = final_char_position(text).unwrap_or(start);

    let kind = if cursor.check_keyword(Keyword::DELETE) {
        StatementKind::Delete
    } else if cursor.check_keyword(Keyword::UPDATE) {
        StatementKind::Update
    } else {
        StatementKind::Other
    };

    let mut statement = SourceStatement {
        text: text.to_string(),
        kind,
        target: None,
        from_tables: Vec::new(),
        from_text: None,
        where_text: None,
        start,
        stop,
    };

    match kind {
        StatementKind::Delete => parse_delete(&mut cursor, &mut statement),
        StatementKind::Update => parse_update(&mut cursor, &mut statement),
        StatementKind::Other => {}
    }

    Ok(statement)
}

fn parse_delete(cursor: &mut TokenCursor, statement: &mut SourceStatement) {
    cursor.advance(); // DELETE
    cursor.skip_whitespace();
    // T-SQL allows DELETE <target> without the first FROM.
    if cursor.check_keyword(Keyword::FROM) {
        cursor.advance();
        cursor.skip_whitespace();
    }
    statement.target = parse_object_name(cursor);
    parse_tail_clauses(cursor, statement);
}

fn parse_update(cursor: &mut TokenCursor, statement: &mut SourceStatement) {
    cursor.advance(); // UPDATE
    cursor.skip_whitespace();
    statement.target = parse_object_name(cursor);
    cursor.skip_whitespace();
    if cursor.check_keyword(Keyword::SET) {
        cursor.advance();
        skip_set_assignments(cursor);
    }
    parse_tail_clauses(cursor, statement);
}

/// Parse the optional explicit FROM/JOIN clause and the optional WHERE
/// clause, capturing both verbatim by byte offset.
fn parse_tail_clauses(cursor: &mut TokenCursor, statement: &mut SourceStatement) {
    cursor.skip_whitespace();
    if cursor.check_keyword(Keyword::FROM) {
        cursor.advance();
        cursor.skip_whitespace();
        let from_start = cursor.start_offset();
        statement.from_tables = parse_from_tables(cursor);
        let from_end = cursor.start_offset();
        statement.from_text = Some(cursor.text_between(from_start, from_end).to_string());
    }

    cursor.skip_whitespace();
    if cursor.check_keyword(Keyword::WHERE) {
        cursor.advance();
        cursor.skip_whitespace();
        let where_start = cursor.start_offset();
        while let Some(token) = cursor.current() {
            if matches!(token.token, Token::SemiColon) {
                break;
            }
            cursor.advance();
        }
        let where_end = cursor.start_offset();
        statement.where_text = Some(cursor.text_between(where_start, where_end).to_string());
    }
}

/// Skip the SET assignment list of an UPDATE, stopping before a top-level
/// FROM or WHERE keyword, the statement terminator, or end of input.
fn skip_set_assignments(cursor: &mut TokenCursor) {
    let mut depth = 0i32;
    while let Some(token) = cursor.current() {
        match &token.token {
            Token::LParen => depth += 1,
            Token::RParen => depth -= 1,
            Token::SemiColon if depth == 0 => break,
            Token::Word(w)
                if depth == 0 && matches!(w.keyword, Keyword::FROM | Keyword::WHERE) =>
            {
                break
            }
            _ => {}
        }
        cursor.advance();
    }
}

/// Walk a FROM/JOIN list, collecting every table reference with its alias.
///
/// Leaves the cursor on the WHERE keyword, the statement terminator, or at
/// end of input, so callers can capture the clause text up to that point.
fn parse_from_tables(cursor: &mut TokenCursor) -> Vec<TableReference> {
    let mut tables = Vec::new();
    if let Some(table) = parse_table_reference(cursor) {
        tables.push(table);
    }

    loop {
        cursor.skip_whitespace();
        let Some(token) = cursor.current() else { break };
        match &token.token {
            Token::SemiColon => break,
            Token::Comma => {
                cursor.advance();
                cursor.skip_whitespace();
                if let Some(table) = parse_table_reference(cursor) {
                    tables.push(table);
                }
            }
            Token::Word(w) => match w.keyword {
                Keyword::WHERE => break,
                Keyword::JOIN
                | Keyword::INNER
                | Keyword::LEFT
                | Keyword::RIGHT
                | Keyword::FULL
                | Keyword::OUTER
                | Keyword::CROSS => {
                    skip_join_keywords(cursor);
                    cursor.skip_whitespace();
                    if let Some(table) = parse_table_reference(cursor) {
                        tables.push(table);
                    }
                    cursor.skip_whitespace();
                    if cursor.check_keyword(Keyword::ON) {
                        skip_join_condition(cursor);
                    }
                }
                _ => cursor.advance(),
            },
            _ => cursor.advance(),
        }
    }

    tables
}

/// Consume join modifier keywords (INNER, LEFT OUTER, ...) up to and
/// including the JOIN keyword itself.
fn skip_join_keywords(cursor: &mut TokenCursor) {
    while let Some(word) = cursor.current_word() {
        let keyword = word.keyword;
        match keyword {
            Keyword::INNER
            | Keyword::LEFT
            | Keyword::RIGHT
            | Keyword::FULL
            | Keyword::OUTER
            | Keyword::CROSS => {
                cursor.advance();
                cursor.skip_whitespace();
            }
            Keyword::JOIN => {
                cursor.advance();
                break;
            }
            _ => break,
        }
    }
}

/// Skip an ON condition, stopping before the next join keyword, WHERE,
/// comma, the statement terminator, or end of input.
fn skip_join_condition(cursor: &mut TokenCursor) {
    cursor.advance(); // ON
    let mut depth = 0i32;
    while let Some(token) = cursor.current() {
        match &token.token {
            Token::LParen => depth += 1,
            Token::RParen => depth -= 1,
            Token::SemiColon | Token::Comma if depth == 0 => break,
            Token::Word(w) if depth == 0 && is_from_boundary(w.keyword) => break,
            _ => {}
        }
        cursor.advance();
    }
}

fn is_from_boundary(keyword: Keyword) -> bool {
    matches!(
        keyword,
        Keyword::WHERE
            | Keyword::JOIN
            | Keyword::INNER
            | Keyword::LEFT
            | Keyword::RIGHT
            | Keyword::FULL
            | Keyword::OUTER
            | Keyword::CROSS
    )
}

/// Keywords that can never serve as a table name or alias in the clauses we
/// parse. Most `Keyword` values are fine as identifiers (NAME, DATA, ...),
/// so only clause-structural ones are rejected.
fn is_reserved(keyword: Keyword) -> bool {
    matches!(
        keyword,
        Keyword::SELECT
            | Keyword::INSERT
            | Keyword::DELETE
            | Keyword::UPDATE
            | Keyword::FROM
            | Keyword::WHERE
            | Keyword::SET
            | Keyword::AS
            | Keyword::ON
            | Keyword::JOIN
            | Keyword::INNER
            | Keyword::LEFT
            | Keyword::RIGHT
            | Keyword::FULL
            | Keyword::OUTER
            | Keyword::CROSS
            | Keyword::GROUP
            | Keyword::ORDER
    )
}

/// A word counts as an identifier when it is quoted/bracketed or not a
/// reserved clause keyword.
fn is_identifier(word: &Word) -> bool {
    word.quote_style.is_some() || !is_reserved(word.keyword)
}

/// Parse a possibly multipart object name (`table`, `schema.table`,
/// `catalog.schema.table`) without consuming a trailing alias.
fn parse_object_name(cursor: &mut TokenCursor) -> Option<TableReference> {
    let first = cursor
        .current_word()
        .filter(|w| is_identifier(w))
        .map(|w| w.value.clone())?;
    cursor.advance();

    let mut parts = vec![first];
    while cursor.check_token(&Token::Period) {
        cursor.advance();
        let next = cursor.current_word().map(|w| w.value.clone());
        match next {
            Some(part) => {
                parts.push(part);
                cursor.advance();
            }
            None => break,
        }
    }

    Some(reference_from_parts(parts))
}

/// Parse one FROM-clause entry: an object name plus its optional alias
/// (`AS alias` or the implicit `name alias` form).
fn parse_table_reference(cursor: &mut TokenCursor) -> Option<TableReference> {
    let mut reference = parse_object_name(cursor)?;
    cursor.skip_whitespace();

    if cursor.check_keyword(Keyword::AS) {
        cursor.advance();
        cursor.skip_whitespace();
        let alias = cursor.current_word().map(|w| w.value.clone());
        if let Some(alias) = alias {
            reference.alias = Some(alias);
            cursor.advance();
        }
    } else {
        let alias = cursor
            .current_word()
            .filter(|w| is_identifier(w))
            .map(|w| w.value.clone());
        if let Some(alias) = alias {
            reference.alias = Some(alias);
            cursor.advance();
        }
    }

    Some(reference)
}

/// Map 1-3 (or more) name parts onto catalog/schema/table, keeping the
/// rightmost three when a server part is present.
fn reference_from_parts(parts: Vec<String>) -> TableReference {
    let n = parts.len();
    let mut iter = parts.into_iter().skip(n.saturating_sub(3));
    match n {
        1 => TableReference::bare(iter.next().unwrap_or_default()),
        2 => TableReference {
            catalog: None,
            schema: iter.next(),
            table: iter.next().unwrap_or_default(),
            alias: None,
        },
        _ => TableReference {
            catalog: iter.next(),
            schema: iter.next(),
            table: iter.next().unwrap_or_default(),
            alias: None,
        },
    }
}
