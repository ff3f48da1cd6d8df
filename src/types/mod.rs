//! Core data model: cell values, column types, tabular results, and
//! the cached attribute document.

pub mod attribute;
pub mod data_type;
pub mod table;
pub mod value;

pub use attribute::{AttributeNode, AttributeTree};
pub use data_type::DataType;
pub use table::{Column, TabularResult};
pub use value::{Row, Value};
