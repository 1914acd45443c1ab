//! Result span calculation.
//!
//! Maps a statement's own token positions onto the start/end positions
//! reported for its backup entry. The start is the first-token position,
//! unchanged. The end is the exact inclusive position of the statement's
//! final character (typically its semicolon) — except for the stream's last
//! statement, which has no following token to bound it, so its end is pushed
//! to the start of an implicit next line: (final line + 1, column 0).
//! Downstream text splicing depends on this asymmetry.

use crate::model::{SourcePosition, SourceStatement};

/// Compute the (start, end) span for one statement's backup entry.
pub fn statement_span(
    statement: &SourceStatement,
    is_last_in_stream: bool,
) -> (SourcePosition, SourcePosition) {
    let start = statement.start;
    let end = if is_last_in_stream {
        SourcePosition::new(statement.stop.line + 1, 0)
    } else {
        statement.stop
    };
    (start, end)
}
