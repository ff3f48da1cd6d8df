//! rowcond — query/text expansion and row-matching condition evaluator
//!
//! Decides whether a database-contents condition holds for a document.
//! Configuration text may interleave literal text, shorthand attribute
//! references (`</Name>`) and embedded queries (`<Query>...</Query>`);
//! the expansion pipeline normalizes and resolves these against either a
//! live relational connection or the document's cached attribute file,
//! the statement result is read back read-only, and configured field
//! checks plus quantifiers reduce it to a boolean.

pub mod coercion;
pub mod condition;
pub mod error;
pub mod expand;
pub mod interfaces;
pub mod matching;
pub mod types;

pub use condition::{evaluate, Collaborators, ConditionConfig};
pub use error::{Error, Result};
pub use expand::{expand, expand_single, DataContextSpec, EvaluationScope, Expanded};
pub use interfaces::{
    AttributeLoader, ConnectionFactory, ConnectionTarget, NoTags, PathTagExpander,
    RelationalConnection,
};
pub use matching::{FieldDefinition, RowCountQuantifier, SearchModifier};
pub use types::{AttributeNode, AttributeTree, Column, DataType, Row, TabularResult, Value};
