//! Canonical query evaluation
//!
//! Resolves one canonical query against the scope's single active data
//! context: attribute-form bodies walk the cached attribute document,
//! anything else executes as read-only SQL. Results are memoized per
//! scope so the same canonical body is evaluated at most once per
//! expansion.

use super::scope::EvaluationScope;
use super::segment::CanonicalQuery;
use crate::error::{Error, Result};
use crate::interfaces::RelationalConnection;
use crate::types::TabularResult;

/// Evaluate one canonical query to its scalar string results.
pub fn evaluate_query(
    query: &CanonicalQuery,
    scope: &mut EvaluationScope<'_>,
) -> Result<Vec<String>> {
    if let Some(values) = scope.cached(query.body()) {
        return Ok(values.clone());
    }

    let values = match query.as_attribute_path() {
        Some(path) => {
            let path = path.to_string();
            evaluate_attribute(query, &path, scope)?
        }
        None => evaluate_sql(query, scope)?,
    };

    tracing::debug!(query = %query.canonical_text(), count = values.len(), "query evaluated");
    scope.remember(query.body().to_string(), values.clone());
    Ok(values)
}

/// Resolve an attribute-path query against the scope's document. A
/// missing backing file substitutes the configured fallback replacement
/// or fails with a data-unavailable error.
fn evaluate_attribute(
    query: &CanonicalQuery,
    path: &str,
    scope: &mut EvaluationScope<'_>,
) -> Result<Vec<String>> {
    if scope.document()?.is_none() {
        if let Some(fallback) = scope.fallback() {
            tracing::warn!(
                query = %query.canonical_text(),
                "attribute data missing; substituting fallback replacement"
            );
            return Ok(vec![fallback.to_string()]);
        }
        return Err(Error::DataUnavailable {
            path: scope
                .document_path()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            query: query.canonical_text(),
            source_doc: scope.source().to_string(),
        });
    }

    Ok(scope
        .document()?
        .map(|doc| doc.query_path(path))
        .unwrap_or_default())
}

/// Execute a SQL-form query read-only and render its first column.
fn evaluate_sql(query: &CanonicalQuery, scope: &mut EvaluationScope<'_>) -> Result<Vec<String>> {
    let sql = query.body().trim().to_string();
    let source = scope.source().to_string();
    let table = scope
        .connection()
        .and_then(|conn| execute_read_only(conn, &sql))
        .map_err(|e| match e {
            Error::Execution(msg) => Error::Execution(format!(
                "query '{}' failed (source: {}): {}",
                query.canonical_text(),
                source,
                msg
            )),
            other => other,
        })?;

    Ok(table
        .rows
        .iter()
        .filter_map(|row| row.first())
        .map(|v| v.to_string())
        .collect())
}

/// Run one statement inside a transaction that is always rolled back,
/// success and error path alike, so condition evaluation never mutates
/// state even for arbitrary configured SQL.
pub(crate) fn execute_read_only(
    conn: &mut dyn RelationalConnection,
    sql: &str,
) -> Result<TabularResult> {
    conn.begin()?;
    let result = conn.execute(sql);
    let rollback = conn.rollback();
    let table = result?;
    rollback?;
    Ok(table)
}
