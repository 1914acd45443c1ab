//! rust-sqlbackup: pre-mutation row backup synthesis for T-SQL batches.
//!
//! Given a batch of one or more SQL statements, this library finds every
//! statement that mutates rows in place (DELETE, UPDATE) and synthesizes a
//! companion read-only `SELECT ... INTO` statement that snapshots the
//! about-to-be-affected rows into a backup table before the mutation runs —
//! the basis for later rollback.
//!
//! The library never executes anything: it is a pure function from parsed
//! statements to backup statement text plus source spans. Executing either
//! the original or the generated SQL, and managing the backup catalog
//! itself, belong to the host process.

pub mod analyzer;
pub mod error;
pub mod model;
pub mod parser;
pub mod util;

pub use analyzer::{analyze, BackupIndexAllocator, BatchAnalysis, BACKUP_CATALOG};
pub use error::{BackupSynthError, StatementError, StatementErrorKind};
pub use model::{
    BackupResult, Projection, ResolvedMutationTarget, SourcePosition, SourceStatement,
    StatementKind, TableReference,
};

/// Split, parse, and analyze a raw multi-statement SQL batch.
///
/// `current_catalog` is the session's current database, used whenever a
/// table reference omits its catalog. Fails only when the batch cannot be
/// tokenized; per-statement resolution failures are reported inside the
/// returned [`BatchAnalysis`] alongside the successful results.
pub fn analyze_sql(sql: &str, current_catalog: &str) -> Result<BatchAnalysis, BackupSynthError> {
    let pieces = parser::split_statements(sql)?;
    let statements = pieces
        .iter()
        .map(|text| parser::parse_statement(text))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(analyze(&statements, current_catalog))
}
