//! Error types for condition evaluation

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Text/query parsing errors
    #[error("Malformed query text in '{text}': {reason}")]
    Parse { text: String, reason: String },

    #[error("Database unavailable for expansion of '{placeholder}' in '{text}' (source: {source_doc})")]
    UnresolvedPlaceholder {
        placeholder: String,
        text: String,
        source_doc: String,
    },

    #[error("Embedded element '{query}' expanded into multiple results {values:?} (source: {source_doc})")]
    MultiResult {
        query: String,
        values: Vec<String>,
        source_doc: String,
    },

    #[error("Attribute data unavailable at '{path}' for query '{query}' (source: {source_doc})")]
    DataUnavailable {
        path: String,
        query: String,
        source_doc: String,
    },

    // Schema errors
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    // Type errors
    #[error("Cannot convert '{value}' to {target}")]
    Conversion { value: String, target: String },

    // SQL/connection errors
    #[error("Execution error: {0}")]
    Execution(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}
