//! Core data model for backup synthesis.
//!
//! These types describe one parsed statement of a batch (as produced by the
//! front-end in [`crate::parser`]) and the backup entry synthesized for it.

/// A position within a statement's own text.
///
/// Lines are 1-indexed, columns 0-indexed. Positions are always relative to
/// the statement they belong to, never to the surrounding batch text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePosition {
    pub line: usize,
    pub column: usize,
}

impl SourcePosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Statement classification for backup purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Delete,
    Update,
    /// Anything that does not mutate rows in place (SELECT, INSERT, DDL, ...).
    Other,
}

impl StatementKind {
    /// True for statements that mutate rows in place and therefore need a
    /// backup entry.
    pub fn is_mutation(&self) -> bool {
        matches!(self, StatementKind::Delete | StatementKind::Update)
    }
}

/// A (possibly partial) reference to a physical table.
///
/// `catalog` and `schema` are `None` when the source text omitted them; the
/// resolver substitutes the session catalog and `dbo` respectively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableReference {
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub table: String,
    /// Alias bound in the FROM/JOIN list, if any.
    pub alias: Option<String>,
}

impl TableReference {
    /// A bare single-part reference with no catalog, schema, or alias.
    pub fn bare(table: impl Into<String>) -> Self {
        Self {
            catalog: None,
            schema: None,
            table: table.into(),
            alias: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

/// One statement of a batch, parsed just far enough for backup synthesis.
#[derive(Debug, Clone)]
pub struct SourceStatement {
    /// The statement's own text, starting at its first token.
    pub text: String,
    pub kind: StatementKind,
    /// The identifier named directly after DELETE/UPDATE. `None` when the
    /// statement has no target at all (malformed input).
    pub target: Option<TableReference>,
    /// Table references named in the explicit FROM/JOIN clause, in order.
    pub from_tables: Vec<TableReference>,
    /// Verbatim FROM/JOIN clause text, excluding the FROM keyword itself.
    pub from_text: Option<String>,
    /// Verbatim WHERE predicate text, excluding the WHERE keyword itself.
    pub where_text: Option<String>,
    /// Position of the statement's first token.
    pub start: SourcePosition,
    /// Position of the statement's final non-whitespace character
    /// (typically its semicolon), inclusive.
    pub stop: SourcePosition,
}

/// The identifier used in the synthesized `SELECT <x>.*` clause.
///
/// Kept as a tagged two-case decision so the alias-vs-qualified choice stays
/// an explicit branch rather than string matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// The mutation target was written as a FROM-clause alias; project
    /// through the bare alias.
    Alias(String),
    /// The mutation target was written as a table name; project through the
    /// fully-qualified triple to avoid ambiguity inside a JOIN.
    FullyQualified {
        catalog: String,
        schema: String,
        table: String,
    },
}

/// The physical table a DELETE/UPDATE mutates, plus everything the
/// synthesizer needs to rebuild its row set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMutationTarget {
    pub catalog: String,
    pub schema: String,
    pub table: String,
    pub projection: Projection,
    /// FROM clause body, verbatim from the source, or just the bare table
    /// name when the source had no FROM clause.
    pub from_text: String,
    /// WHERE predicate, verbatim from the source. `None` means the mutation
    /// affects the whole table and the backup does too.
    pub where_text: Option<String>,
}

/// One synthesized backup entry, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupResult {
    /// The synthesized `SELECT ... INTO` statement text.
    pub statement: String,
    pub source_schema: String,
    pub source_table_name: String,
    /// `rollback_<index>_<table>`, always using the bare table name.
    pub target_table_name: String,
    pub start_position: SourcePosition,
    pub end_position: SourcePosition,
}
