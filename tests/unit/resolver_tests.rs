//! Unit tests for mutation target resolution.

use pretty_assertions::assert_eq;

use rust_sqlbackup::analyzer::resolve_mutation_target;
use rust_sqlbackup::{
    Projection, SourcePosition, SourceStatement, StatementErrorKind, StatementKind,
    TableReference,
};

fn mutation_statement(
    target: Option<TableReference>,
    from_tables: Vec<TableReference>,
    from_text: Option<&str>,
    where_text: Option<&str>,
) -> SourceStatement {
    SourceStatement {
        text: String::new(),
        kind: StatementKind::Delete,
        target,
        from_tables,
        from_text: from_text.map(str::to_string),
        where_text: where_text.map(str::to_string),
        start: SourcePosition::new(1, 0),
        stop: SourcePosition::new(1, 0),
    }
}

#[test]
fn alias_target_projects_through_bare_alias() {
    let stmt = mutation_statement(
        Some(TableReference::bare("t_alias")),
        vec![TableReference::bare("test").with_alias("t_alias")],
        Some("test AS t_alias"),
        Some("t_alias.c1 = 1"),
    );
    let resolved = resolve_mutation_target(&stmt, "db").unwrap();
    assert_eq!(resolved.projection, Projection::Alias("t_alias".to_string()));
    assert_eq!(resolved.catalog, "db");
    assert_eq!(resolved.schema, "dbo");
    assert_eq!(resolved.table, "test");
    assert_eq!(resolved.from_text, "test AS t_alias");
    assert_eq!(resolved.where_text.as_deref(), Some("t_alias.c1 = 1"));
}

#[test]
fn alias_match_is_case_insensitive() {
    let stmt = mutation_statement(
        Some(TableReference::bare("T_ALIAS")),
        vec![TableReference::bare("test").with_alias("t_alias")],
        Some("test AS t_alias"),
        None,
    );
    let resolved = resolve_mutation_target(&stmt, "db").unwrap();
    assert_eq!(resolved.projection, Projection::Alias("T_ALIAS".to_string()));
    assert_eq!(resolved.table, "test");
}

#[test]
fn bare_table_in_join_projects_fully_qualified() {
    let stmt = mutation_statement(
        Some(TableReference::bare("test")),
        vec![TableReference::bare("test"), TableReference::bare("test2")],
        Some("test JOIN test2 ON test.c1 = test2.c1"),
        Some("test.c1 = 1"),
    );
    let resolved = resolve_mutation_target(&stmt, "db").unwrap();
    assert_eq!(
        resolved.projection,
        Projection::FullyQualified {
            catalog: "db".to_string(),
            schema: "dbo".to_string(),
            table: "test".to_string(),
        }
    );
    assert_eq!(resolved.from_text, "test JOIN test2 ON test.c1 = test2.c1");
}

#[test]
fn missing_from_clause_synthesizes_bare_table_from() {
    let stmt = mutation_statement(Some(TableReference::bare("test")), Vec::new(), None, None);
    let resolved = resolve_mutation_target(&stmt, "db").unwrap();
    assert_eq!(resolved.from_text, "test");
    assert_eq!(
        resolved.projection,
        Projection::FullyQualified {
            catalog: "db".to_string(),
            schema: "dbo".to_string(),
            table: "test".to_string(),
        }
    );
}

#[test]
fn explicit_catalog_and_schema_are_respected() {
    let target = TableReference {
        catalog: Some("other".to_string()),
        schema: Some("sales".to_string()),
        table: "orders".to_string(),
        alias: None,
    };
    let stmt = mutation_statement(Some(target), Vec::new(), None, Some("id = 1"));
    let resolved = resolve_mutation_target(&stmt, "db").unwrap();
    assert_eq!(resolved.catalog, "other");
    assert_eq!(resolved.schema, "sales");
    assert_eq!(
        resolved.projection,
        Projection::FullyQualified {
            catalog: "other".to_string(),
            schema: "sales".to_string(),
            table: "orders".to_string(),
        }
    );
}

#[test]
fn schema_bound_in_from_clause_flows_into_resolution() {
    let bound = TableReference {
        catalog: None,
        schema: Some("sales".to_string()),
        table: "orders".to_string(),
        alias: Some("o".to_string()),
    };
    let stmt = mutation_statement(
        Some(TableReference::bare("o")),
        vec![bound],
        Some("sales.orders AS o"),
        None,
    );
    let resolved = resolve_mutation_target(&stmt, "db").unwrap();
    assert_eq!(resolved.schema, "sales");
    assert_eq!(resolved.table, "orders");
    assert_eq!(resolved.projection, Projection::Alias("o".to_string()));
}

#[test]
fn dangling_alias_is_unresolved() {
    let stmt = mutation_statement(
        Some(TableReference::bare("missing")),
        vec![TableReference::bare("test").with_alias("t_alias")],
        Some("test AS t_alias"),
        None,
    );
    let err = resolve_mutation_target(&stmt, "db").unwrap_err();
    assert_eq!(
        err,
        StatementErrorKind::UnresolvedTarget {
            identifier: "missing".to_string(),
        }
    );
}

#[test]
fn missing_target_is_malformed() {
    let stmt = mutation_statement(None, Vec::new(), None, Some("c1 = 1"));
    let err = resolve_mutation_target(&stmt, "db").unwrap_err();
    assert!(matches!(err, StatementErrorKind::MalformedStatement { .. }));
}

#[test]
fn absent_where_propagates_as_empty_predicate() {
    let stmt = mutation_statement(Some(TableReference::bare("test")), Vec::new(), None, None);
    let resolved = resolve_mutation_target(&stmt, "db").unwrap();
    assert_eq!(resolved.where_text, None);
}
