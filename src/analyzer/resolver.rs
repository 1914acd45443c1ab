//! Mutation target resolution.
//!
//! Decides which physical table a DELETE/UPDATE mutates and how the backup
//! statement must project its rows. The target identifier written after
//! DELETE/UPDATE is matched first against the aliases bound in the
//! statement's own FROM/JOIN list, then against the bare table names there;
//! with no FROM clause the identifier is taken as the table itself.
//!
//! The two match cases drive the projection choice: an alias target projects
//! through the bare alias, a bare table target projects through the
//! fully-qualified `catalog.schema.table` triple so a JOIN repeating the
//! same table name stays unambiguous.

use tracing::debug;

use crate::error::StatementErrorKind;
use crate::model::{
    Projection, ResolvedMutationTarget, SourceStatement, TableReference,
};

/// Schema substituted when a table reference names none.
pub const DEFAULT_SCHEMA: &str = "dbo";

/// How the target identifier matched against the statement's FROM clause.
enum TargetMatch<'a> {
    /// The identifier is an alias; the bound reference is the physical table.
    Alias(&'a TableReference),
    /// The identifier names the table directly; the reference carries any
    /// explicit qualification from the source.
    BareTable(&'a TableReference),
}

/// Resolve the physical table mutated by `statement` and everything the
/// synthesizer needs to snapshot its rows.
///
/// `current_catalog` fills in for table references that omit a catalog.
pub fn resolve_mutation_target(
    statement: &SourceStatement,
    current_catalog: &str,
) -> Result<ResolvedMutationTarget, StatementErrorKind> {
    let target = statement
        .target
        .as_ref()
        .ok_or_else(|| StatementErrorKind::MalformedStatement {
            reason: "mutation statement names no target table".to_string(),
        })?;

    match classify_target(target, &statement.from_tables)? {
        TargetMatch::Alias(bound) => {
            let Some(from_text) = statement.from_text.clone() else {
                return Err(StatementErrorKind::MalformedStatement {
                    reason: format!(
                        "alias '{}' is bound but the statement has no FROM clause text",
                        target.table
                    ),
                });
            };
            let resolved = ResolvedMutationTarget {
                catalog: qualified_catalog(bound, current_catalog),
                schema: qualified_schema(bound),
                table: bound.table.clone(),
                projection: Projection::Alias(target.table.clone()),
                from_text,
                where_text: statement.where_text.clone(),
            };
            debug!(
                alias = %target.table,
                table = %resolved.table,
                "resolved mutation target via alias binding"
            );
            Ok(resolved)
        }
        TargetMatch::BareTable(reference) => {
            // Explicit qualification written on the target wins over whatever
            // the FROM entry carries.
            let catalog = target
                .catalog
                .clone()
                .unwrap_or_else(|| qualified_catalog(reference, current_catalog));
            let schema = target
                .schema
                .clone()
                .unwrap_or_else(|| qualified_schema(reference));
            let table = reference.table.clone();
            let from_text = statement
                .from_text
                .clone()
                .unwrap_or_else(|| table.clone());
            let resolved = ResolvedMutationTarget {
                projection: Projection::FullyQualified {
                    catalog: catalog.clone(),
                    schema: schema.clone(),
                    table: table.clone(),
                },
                catalog,
                schema,
                table,
                from_text,
                where_text: statement.where_text.clone(),
            };
            debug!(table = %resolved.table, "resolved mutation target as bare table");
            Ok(resolved)
        }
    }
}

/// Match the target identifier against the FROM-clause bindings.
///
/// Identifier comparison is ASCII-case-insensitive, matching the SQL Server
/// default collation.
fn classify_target<'a>(
    target: &'a TableReference,
    from_tables: &'a [TableReference],
) -> Result<TargetMatch<'a>, StatementErrorKind> {
    // Only a single-part target can be an alias.
    if target.catalog.is_none() && target.schema.is_none() {
        if let Some(bound) = from_tables.iter().find(|t| {
            t.alias
                .as_deref()
                .is_some_and(|a| a.eq_ignore_ascii_case(&target.table))
        }) {
            return Ok(TargetMatch::Alias(bound));
        }
    }

    if from_tables.is_empty() {
        return Ok(TargetMatch::BareTable(target));
    }

    // Prefer an unaliased FROM entry with the same table name; fall back to
    // an aliased one naming the same table.
    let named = from_tables
        .iter()
        .find(|t| t.alias.is_none() && t.table.eq_ignore_ascii_case(&target.table))
        .or_else(|| {
            from_tables
                .iter()
                .find(|t| t.table.eq_ignore_ascii_case(&target.table))
        });
    match named {
        Some(reference) => Ok(TargetMatch::BareTable(reference)),
        None => Err(StatementErrorKind::UnresolvedTarget {
            identifier: target.table.clone(),
        }),
    }
}

fn qualified_catalog(reference: &TableReference, current_catalog: &str) -> String {
    reference
        .catalog
        .clone()
        .unwrap_or_else(|| current_catalog.to_string())
}

fn qualified_schema(reference: &TableReference) -> String {
    reference
        .schema
        .clone()
        .unwrap_or_else(|| DEFAULT_SCHEMA.to_string())
}
