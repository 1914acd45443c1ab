//! Error types for rust-sqlbackup

use thiserror::Error;

use crate::model::SourcePosition;

/// Errors that can occur while preparing a raw batch for analysis.
#[derive(Error, Debug)]
pub enum BackupSynthError {
    #[error("failed to tokenize SQL at line {line}, column {column}: {message}")]
    Tokenize {
        line: u64,
        column: u64,
        message: String,
    },
}

impl From<sqlparser::tokenizer::TokenizerError> for BackupSynthError {
    fn from(err: sqlparser::tokenizer::TokenizerError) -> Self {
        BackupSynthError::Tokenize {
            line: err.location.line,
            column: err.location.column,
            message: err.message,
        }
    }
}

/// Why a single statement could not be turned into a backup entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatementErrorKind {
    #[error("target '{identifier}' matches no alias or table name in its FROM clause")]
    UnresolvedTarget { identifier: String },

    #[error("statement is missing data required for backup synthesis: {reason}")]
    MalformedStatement { reason: String },
}

/// A per-statement analysis failure, attached to the statement's position.
///
/// Failures are reported alongside the results of the remaining statements;
/// one bad statement never aborts the batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} (at line {}, column {})", .position.line, .position.column)]
pub struct StatementError {
    pub kind: StatementErrorKind,
    pub position: SourcePosition,
}
