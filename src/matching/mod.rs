//! Field matching and row aggregation

pub mod field;
pub mod fuzzy;
pub mod row;

pub use field::{FieldDefinition, PreparedField};
pub use fuzzy::FuzzyPattern;
pub use row::{evaluate_row_count, evaluate_rows, row_matches, RowCountQuantifier, SearchModifier};
