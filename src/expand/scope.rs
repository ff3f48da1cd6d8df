//! Per-evaluation state
//!
//! One `EvaluationScope` is built fresh for every condition evaluation and
//! never shared across threads. It selects the single active data context,
//! lazily loads the attribute document / opens the relational connection at
//! most once, and memoizes query results within one expansion call (the
//! expander clears the cache at entry). Dropping the scope closes the
//! connection, on the error path included.

use crate::error::{Error, Result};
use crate::interfaces::{
    AttributeLoader, ConnectionFactory, ConnectionTarget, PathTagExpander, RelationalConnection,
};
use crate::types::AttributeTree;
use std::collections::HashMap;
use std::path::PathBuf;

/// The single backing store a scope resolves canonical queries against
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataContextSpec {
    /// A live relational connection (SQL queries)
    Relational(ConnectionTarget),
    /// A cached hierarchical attribute document (attribute-path queries)
    Attribute(PathBuf),
}

/// Mutable per-evaluation state threaded through every expansion call
pub struct EvaluationScope<'a> {
    context: DataContextSpec,
    path_tags: &'a dyn PathTagExpander,
    attribute_loader: &'a dyn AttributeLoader,
    connections: &'a dyn ConnectionFactory,
    fallback: Option<String>,
    source: String,
    /// Memoized attribute document; inner `None` records a missing file.
    document: Option<Option<AttributeTree>>,
    connection: Option<Box<dyn RelationalConnection>>,
    cache: HashMap<String, Vec<String>>,
}

impl<'a> EvaluationScope<'a> {
    pub fn new(
        context: DataContextSpec,
        path_tags: &'a dyn PathTagExpander,
        attribute_loader: &'a dyn AttributeLoader,
        connections: &'a dyn ConnectionFactory,
        fallback: Option<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            context,
            path_tags,
            attribute_loader,
            connections,
            fallback,
            source: source.into(),
            document: None,
            connection: None,
            cache: HashMap::new(),
        }
    }

    pub fn context(&self) -> &DataContextSpec {
        &self.context
    }

    pub fn path_tags(&self) -> &dyn PathTagExpander {
        self.path_tags
    }

    /// Caller-supplied replacement used instead of failing on missing data
    pub fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }

    /// Identity of the document under evaluation, for diagnostics
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The attribute document backing this scope, loaded at most once.
    /// Returns `Ok(None)` when the backing file does not exist.
    pub(crate) fn document(&mut self) -> Result<Option<&AttributeTree>> {
        if self.document.is_none() {
            let path = match &self.context {
                DataContextSpec::Attribute(path) => path.clone(),
                DataContextSpec::Relational(_) => {
                    return Err(Error::Config(
                        "attribute query requires an attribute data context".to_string(),
                    ));
                }
            };
            tracing::debug!(path = %path.display(), "loading attribute document");
            self.document = Some(self.attribute_loader.load(&path)?);
        }
        Ok(self.document.as_ref().and_then(|doc| doc.as_ref()))
    }

    /// Path of the attribute document, when this is an attribute scope
    pub(crate) fn document_path(&self) -> Option<&PathBuf> {
        match &self.context {
            DataContextSpec::Attribute(path) => Some(path),
            DataContextSpec::Relational(_) => None,
        }
    }

    /// The relational connection backing this scope, opened at most once
    pub(crate) fn connection(&mut self) -> Result<&mut dyn RelationalConnection> {
        let target = match &self.context {
            DataContextSpec::Relational(target) => target.clone(),
            DataContextSpec::Attribute(_) => {
                return Err(Error::Config(
                    "SQL query requires a relational data context".to_string(),
                ));
            }
        };
        self.statement_connection(&target)
    }

    /// Open a relational connection regardless of the expansion context.
    /// Statement execution uses the relational side even when expansions
    /// run against the attribute document.
    pub(crate) fn statement_connection(
        &mut self,
        target: &ConnectionTarget,
    ) -> Result<&mut dyn RelationalConnection> {
        let conn = match &mut self.connection {
            Some(conn) => conn,
            slot => {
                tracing::debug!("opening relational connection");
                slot.insert(self.connections.connect(target)?)
            }
        };
        Ok(conn.as_mut())
    }

    /// Query results are memoized per expansion call, not across calls;
    /// the expander clears the cache at entry.
    pub(crate) fn reset_query_cache(&mut self) {
        self.cache.clear();
    }

    pub(crate) fn cached(&self, body: &str) -> Option<&Vec<String>> {
        self.cache.get(body)
    }

    pub(crate) fn remember(&mut self, body: String, values: Vec<String>) {
        self.cache.insert(body, values);
    }

    /// Release the connection. Also run by `Drop`, so the error path
    /// never leaks one past the end of the evaluation.
    pub fn close(&mut self) {
        if let Some(mut conn) = self.connection.take() {
            conn.close();
        }
    }
}

impl Drop for EvaluationScope<'_> {
    fn drop(&mut self) {
        self.close();
    }
}
