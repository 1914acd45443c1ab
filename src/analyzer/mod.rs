//! Batch analysis: classify, resolve, synthesize, span.
//!
//! Walks a batch's statements in document order. Each DELETE/UPDATE is
//! resolved to its physical target, allocated the next backup index, and
//! rendered into a backup entry; everything else is skipped without
//! advancing the index. A statement that fails to resolve is reported as a
//! positioned error and never aborts the rest of the batch.

mod resolver;
mod span;
mod synthesizer;

use tracing::debug;

pub use resolver::{resolve_mutation_target, DEFAULT_SCHEMA};
pub use span::statement_span;
pub use synthesizer::{backup_table_name, render_backup_statement, BACKUP_CATALOG};

use crate::error::StatementError;
use crate::model::{BackupResult, SourceStatement};

/// Per-batch backup index counter.
///
/// One allocator instance lives for exactly one batch, owned by the
/// analysis loop; independent batches therefore never interfere. Indices
/// start at 0 and increase by one per allocation.
#[derive(Debug, Default)]
pub struct BackupIndexAllocator {
    next: usize,
}

impl BackupIndexAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the current index and advance the counter.
    pub fn allocate(&mut self) -> usize {
        let index = self.next;
        self.next += 1;
        index
    }
}

/// Outcome of analyzing one batch: results for the statements that could be
/// backed up, positioned errors for those that could not.
#[derive(Debug, Default)]
pub struct BatchAnalysis {
    /// One entry per successfully handled DELETE/UPDATE, in document order.
    pub results: Vec<BackupResult>,
    /// Per-statement failures, in document order.
    pub errors: Vec<StatementError>,
}

/// Analyze a batch of parsed statements in document order.
///
/// `current_catalog` is the session's current database, substituted into
/// every table reference that omits a catalog.
pub fn analyze(statements: &[SourceStatement], current_catalog: &str) -> BatchAnalysis {
    let mut allocator = BackupIndexAllocator::new();
    let mut analysis = BatchAnalysis::default();
    let last_index = statements.len().saturating_sub(1);

    for (position_in_stream, statement) in statements.iter().enumerate() {
        if !statement.kind.is_mutation() {
            continue;
        }
        match resolve_mutation_target(statement, current_catalog) {
            Ok(target) => {
                let index = allocator.allocate();
                let (start_position, end_position) =
                    statement_span(statement, position_in_stream == last_index);
                debug!(index, table = %target.table, "synthesized backup entry");
                analysis.results.push(BackupResult {
                    statement: render_backup_statement(&target, index),
                    source_schema: target.schema,
                    source_table_name: target.table.clone(),
                    target_table_name: backup_table_name(index, &target.table),
                    start_position,
                    end_position,
                });
            }
            Err(kind) => {
                analysis.errors.push(StatementError {
                    kind,
                    position: statement.start,
                });
            }
        }
    }

    analysis
}
