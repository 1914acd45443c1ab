//! Token cursor over one statement's text.
//!
//! Thin navigation layer over the `sqlparser` tokenizer (MsSqlDialect). The
//! cursor keeps the original text alongside the token stream so clause text
//! can be copied back out by byte offset, verbatim, instead of being
//! re-printed from parsed structure.

use sqlparser::dialect::MsSqlDialect;
use sqlparser::keywords::Keyword;
use sqlparser::tokenizer::{Token, TokenWithSpan, Tokenizer, Word};

use crate::error::BackupSynthError;
use crate::model::SourcePosition;
use crate::util::offset_at;

pub struct TokenCursor<'a> {
    sql: &'a str,
    tokens: Vec<TokenWithSpan>,
    pos: usize,
}

impl<'a> TokenCursor<'a> {
    /// Tokenize `sql` with location tracking.
    pub fn new(sql: &'a str) -> Result<Self, BackupSynthError> {
        let dialect = MsSqlDialect {};
        let tokens = Tokenizer::new(&dialect, sql).tokenize_with_location()?;
        Ok(Self {
            sql,
            tokens,
            pos: 0,
        })
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    #[inline]
    pub fn current(&self) -> Option<&TokenWithSpan> {
        self.tokens.get(self.pos)
    }

    #[inline]
    pub fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }

    /// Skip whitespace tokens.
    pub fn skip_whitespace(&mut self) {
        while let Some(token) = self.current() {
            match &token.token {
                Token::Whitespace(_) => self.advance(),
                _ => break,
            }
        }
    }

    /// Check if the current token is a specific keyword.
    #[inline]
    pub fn check_keyword(&self, keyword: Keyword) -> bool {
        matches!(self.current(), Some(t) if matches!(&t.token, Token::Word(w) if w.keyword == keyword))
    }

    /// Check if the current token matches a token type (by discriminant).
    #[inline]
    pub fn check_token(&self, expected: &Token) -> bool {
        matches!(self.current(), Some(t) if std::mem::discriminant(&t.token) == std::mem::discriminant(expected))
    }

    /// The current token as a `Word`, if it is one.
    #[inline]
    pub fn current_word(&self) -> Option<&Word> {
        match self.current() {
            Some(t) => match &t.token {
                Token::Word(w) => Some(w),
                _ => None,
            },
            None => None,
        }
    }

    /// Byte offset of the current token's first character, or the text
    /// length at end of stream.
    pub fn start_offset(&self) -> usize {
        match self.current() {
            Some(t) => offset_at(self.sql, t.span.start.line, t.span.start.column),
            None => self.sql.len(),
        }
    }

    /// Position of the current token's first character, as a 1-indexed line
    /// and 0-indexed column.
    pub fn position(&self) -> Option<SourcePosition> {
        self.current().map(|t| {
            SourcePosition::new(
                t.span.start.line as usize,
                t.span.start.column.saturating_sub(1) as usize,
            )
        })
    }

    /// The verbatim source text between two byte offsets, with boundary
    /// whitespace trimmed. The interior is never touched.
    pub fn text_between(&self, start: usize, end: usize) -> &'a str {
        self.sql[start.min(end)..end.min(self.sql.len())].trim_end()
    }
}
