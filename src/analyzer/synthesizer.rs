//! Backup statement synthesis.
//!
//! Renders the `SELECT ... INTO` statement that snapshots a mutation's row
//! set. Identifiers produced here (projection triple, INTO target) are
//! individually double-quoted; the FROM and WHERE text is emitted exactly as
//! it was sourced, so the backup statement selects precisely the rows the
//! original statement is about to touch.

use std::fmt::Write as _;

use crate::model::{Projection, ResolvedMutationTarget};

/// Catalog that receives every backup table.
pub const BACKUP_CATALOG: &str = "backupDB";

/// Backup table name for the given batch index, always built from the bare
/// table name.
pub fn backup_table_name(index: usize, table: &str) -> String {
    format!("rollback_{}_{}", index, table)
}

/// Render the backup statement for a resolved target and its batch index.
pub fn render_backup_statement(target: &ResolvedMutationTarget, index: usize) -> String {
    let projection = match &target.projection {
        Projection::Alias(alias) => quote_identifier(alias),
        Projection::FullyQualified {
            catalog,
            schema,
            table,
        } => format!(
            "{}.{}.{}",
            quote_identifier(catalog),
            quote_identifier(schema),
            quote_identifier(table)
        ),
    };

    let mut sql = format!(
        "SELECT {}.* INTO {}.{}.{} FROM {}",
        projection,
        quote_identifier(BACKUP_CATALOG),
        quote_identifier(&target.schema),
        quote_identifier(&backup_table_name(index, &target.table)),
        target.from_text
    );
    if let Some(where_text) = &target.where_text {
        let _ = write!(sql, " WHERE {}", where_text);
    }
    sql
}

fn quote_identifier(identifier: &str) -> String {
    format!("\"{}\"", identifier)
}
