//! Unit tests for batch orchestration: index allocation, skipping, spans,
//! and partial-success error reporting.

use pretty_assertions::assert_eq;

use rust_sqlbackup::{analyze, parser, BackupIndexAllocator, SourcePosition};

fn parse_batch(sql: &str) -> Vec<rust_sqlbackup::SourceStatement> {
    parser::split_statements(sql)
        .unwrap()
        .iter()
        .map(|text| parser::parse_statement(text).unwrap())
        .collect()
}

#[test]
fn allocator_counts_from_zero() {
    let mut allocator = BackupIndexAllocator::new();
    assert_eq!(allocator.allocate(), 0);
    assert_eq!(allocator.allocate(), 1);
    assert_eq!(allocator.allocate(), 2);
}

#[test]
fn indices_are_contiguous_in_document_order() {
    let statements = parse_batch(
        "DELETE FROM t1 WHERE a = 1;\n\
         UPDATE t2 SET b = 2 WHERE b = 1;\n\
         DELETE FROM t3 WHERE c = 3;",
    );
    let analysis = analyze(&statements, "db");
    assert!(analysis.errors.is_empty());
    let names: Vec<_> = analysis
        .results
        .iter()
        .map(|r| r.target_table_name.as_str())
        .collect();
    assert_eq!(names, vec!["rollback_0_t1", "rollback_1_t2", "rollback_2_t3"]);
}

#[test]
fn non_eligible_statements_do_not_advance_the_index() {
    let statements = parse_batch(
        "SELECT * FROM t1;\n\
         DELETE FROM t1 WHERE a = 1;\n\
         INSERT INTO t1 VALUES (1);\n\
         UPDATE t1 SET a = 2 WHERE a = 1;",
    );
    let analysis = analyze(&statements, "db");
    assert_eq!(analysis.results.len(), 2);
    assert_eq!(analysis.results[0].target_table_name, "rollback_0_t1");
    assert_eq!(analysis.results[1].target_table_name, "rollback_1_t1");
}

#[test]
fn repeated_table_still_gets_fresh_indices() {
    let statements = parse_batch(
        "DELETE FROM test WHERE a = 1;\n\
         DELETE FROM test WHERE a = 2;\n\
         DELETE FROM test WHERE a = 3;",
    );
    let analysis = analyze(&statements, "db");
    let names: Vec<_> = analysis
        .results
        .iter()
        .map(|r| r.target_table_name.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["rollback_0_test", "rollback_1_test", "rollback_2_test"]
    );
}

#[test]
fn failed_statement_reports_error_and_batch_continues() {
    let statements = parse_batch(
        "DELETE FROM missing FROM test AS t WHERE t.c1 = 1;\n\
         DELETE FROM test WHERE c1 = 1;",
    );
    let analysis = analyze(&statements, "db");
    assert_eq!(analysis.errors.len(), 1);
    assert_eq!(analysis.errors[0].position, SourcePosition::new(1, 0));
    assert_eq!(analysis.results.len(), 1);
    // The failed statement consumed no index.
    assert_eq!(analysis.results[0].target_table_name, "rollback_0_test");
}

#[test]
fn last_statement_end_is_pushed_to_next_line() {
    let statements = parse_batch("DELETE FROM test WHERE c1 = 1;");
    let analysis = analyze(&statements, "db");
    let result = &analysis.results[0];
    assert_eq!(result.start_position, SourcePosition::new(1, 0));
    assert_eq!(result.end_position, SourcePosition::new(2, 0));
}

#[test]
fn non_last_statement_end_is_its_own_terminator() {
    let statements = parse_batch(
        "DELETE FROM test WHERE c1 = 1;\n\
         SELECT * FROM test;",
    );
    let analysis = analyze(&statements, "db");
    // The DELETE is not the last statement of the stream, even though the
    // trailing SELECT produces no backup entry.
    assert_eq!(
        analysis.results[0].end_position,
        SourcePosition::new(1, 29)
    );
}

#[test]
fn empty_batch_produces_nothing() {
    let analysis = analyze(&[], "db");
    assert!(analysis.results.is_empty());
    assert!(analysis.errors.is_empty());
}

#[test]
fn separate_batches_restart_the_index() {
    let statements = parse_batch("DELETE FROM test WHERE c1 = 1;");
    let first = analyze(&statements, "db");
    let second = analyze(&statements, "db");
    assert_eq!(first.results[0].target_table_name, "rollback_0_test");
    assert_eq!(second.results[0].target_table_name, "rollback_0_test");
}
