//! Database-contents condition driver
//!
//! Ties the configuration surface to the expansion and matching cores:
//! derive the statement, execute it read-only, then run the configured
//! field checks and quantifiers over the result. Every evaluation builds
//! a fresh `EvaluationScope`; nothing is shared across documents or
//! threads.

use crate::error::{Error, Result};
use crate::expand::query::execute_read_only;
use crate::expand::{expand, expand_single, DataContextSpec, EvaluationScope, Expanded};
use crate::interfaces::{AttributeLoader, ConnectionFactory, ConnectionTarget, PathTagExpander};
use crate::matching::{
    evaluate_row_count, evaluate_rows, FieldDefinition, RowCountQuantifier, SearchModifier,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration of one database-contents condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionConfig {
    /// Use the host's current database; otherwise `connection_string`
    /// must be configured.
    pub use_live_connection: bool,
    #[serde(default)]
    pub connection_string: Option<String>,
    /// Scan a whole table (`SELECT *`); exclusive with `query`.
    #[serde(default)]
    pub table: Option<String>,
    /// Run a configured statement; exclusive with `table`.
    #[serde(default)]
    pub query: Option<String>,
    /// When false, only the row count is checked.
    pub check_fields: bool,
    pub row_quantifier: RowCountQuantifier,
    pub field_quantifier: SearchModifier,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    /// Template path to the document's attribute file; when configured,
    /// expansions resolve shorthand references against it.
    #[serde(default)]
    pub data_file_name: Option<String>,
    /// Substituted for missing data instead of failing the evaluation.
    #[serde(default)]
    pub fallback_replacement: Option<String>,
}

impl ConditionConfig {
    fn validate(&self) -> Result<()> {
        match (&self.table, &self.query) {
            (Some(_), Some(_)) => {
                return Err(Error::Config(
                    "configure either a table or a query, not both".to_string(),
                ));
            }
            (None, None) => {
                return Err(Error::Config(
                    "either a table or a query must be configured".to_string(),
                ));
            }
            _ => {}
        }
        if !self.use_live_connection && self.connection_string.is_none() {
            return Err(Error::Config(
                "a connection string is required without the live connection".to_string(),
            ));
        }
        if self.check_fields && self.fields.is_empty() {
            return Err(Error::Config(
                "field checking is enabled but no fields are configured".to_string(),
            ));
        }
        Ok(())
    }

    fn connection_target(&self) -> ConnectionTarget {
        if self.use_live_connection {
            ConnectionTarget::HostDatabase
        } else {
            // validate() guarantees the connection string is present
            ConnectionTarget::ConnectionString(
                self.connection_string.clone().unwrap_or_default(),
            )
        }
    }
}

/// The host-supplied collaborators for one evaluation
pub struct Collaborators<'a> {
    pub path_tags: &'a dyn PathTagExpander,
    pub attribute_loader: &'a dyn AttributeLoader,
    pub connections: &'a dyn ConnectionFactory,
    /// Identity of the document under evaluation, for diagnostics
    pub source: &'a str,
}

/// Evaluate the condition for one document.
pub fn evaluate(config: &ConditionConfig, collab: &Collaborators<'_>) -> Result<bool> {
    config.validate()?;
    let target = config.connection_target();

    // Expansions use the attribute document when one is configured;
    // statement execution always uses the relational side.
    let context = match &config.data_file_name {
        Some(template) if !template.trim().is_empty() => {
            let path = collab.path_tags.expand(template)?;
            DataContextSpec::Attribute(PathBuf::from(path))
        }
        _ => DataContextSpec::Relational(target.clone()),
    };

    let mut scope = EvaluationScope::new(
        context,
        collab.path_tags,
        collab.attribute_loader,
        collab.connections,
        config.fallback_replacement.clone(),
        collab.source,
    );

    let sql = match (&config.table, &config.query) {
        (Some(table), None) => format!("SELECT * FROM {}", expand_single(table, &mut scope)?),
        // A query-only configured query contributes every value; the
        // statement must be a single string, so the values are joined.
        (None, Some(query)) => match expand(query, &mut scope)? {
            Expanded::Literal(sql) => sql,
            Expanded::Values(values) => values.join("\n"),
        },
        _ => return Err(Error::Config("statement derivation failed".to_string())),
    };
    tracing::debug!(%sql, source = collab.source, "executing condition statement");

    let table = scope
        .statement_connection(&target)
        .and_then(|conn| execute_read_only(conn, &sql))
        .map_err(|e| match e {
            Error::Execution(msg) => Error::Execution(format!(
                "statement '{}' failed (source: {}): {}",
                sql, collab.source, msg
            )),
            other => other,
        })?;

    let outcome = if config.check_fields {
        let mut prepared = Vec::with_capacity(config.fields.len());
        for field in &config.fields {
            prepared.push(field.prepare(&table, &mut scope)?);
        }
        evaluate_rows(
            &prepared,
            &table.rows,
            config.field_quantifier,
            config.row_quantifier,
        )
    } else {
        evaluate_row_count(table.rows.len(), config.row_quantifier)
    };

    scope.close();
    tracing::debug!(outcome, source = collab.source, "condition evaluated");
    Ok(outcome)
}
