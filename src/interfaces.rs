//! Boundary traits for external collaborators
//!
//! The evaluator core stays host-agnostic: path-tag substitution, attribute
//! file loading, and relational access are supplied by the host through
//! these traits. The core drives every relational statement through
//! `begin` → `execute` → `rollback` so condition evaluation never mutates
//! state, even for arbitrary configured SQL.

use crate::error::Result;
use crate::types::{AttributeTree, TabularResult};
use std::path::Path;

/// Substitutes environment-like tags (document name, action name, server
/// name, ...) and call-like functions over an expanded string. Invoked
/// once per expansion, after query expansion.
pub trait PathTagExpander {
    fn expand(&self, text: &str) -> Result<String>;
}

/// A tag expander for hosts without a tag library: passes text through.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTags;

impl PathTagExpander for NoTags {
    fn expand(&self, text: &str) -> Result<String> {
        Ok(text.to_string())
    }
}

/// Loads a document's attribute file. `Ok(None)` means the backing file
/// does not exist, which drives the data-unavailable/fallback behavior.
pub trait AttributeLoader {
    fn load(&self, path: &Path) -> Result<Option<AttributeTree>>;
}

/// One open relational connection. The core never commits.
pub trait RelationalConnection {
    fn begin(&mut self) -> Result<()>;
    fn execute(&mut self, sql: &str) -> Result<TabularResult>;
    fn rollback(&mut self) -> Result<()>;
    fn close(&mut self);
}

/// Where a relational connection should point
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionTarget {
    /// The host's current database
    HostDatabase,
    /// An explicitly configured connection string
    ConnectionString(String),
}

/// Opens relational connections; the core treats them as opaque and
/// scopes each one to a single evaluation.
pub trait ConnectionFactory {
    fn connect(&self, target: &ConnectionTarget) -> Result<Box<dyn RelationalConnection>>;
}
