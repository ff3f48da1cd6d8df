//! Tabular results read back from a statement

use super::data_type::DataType;
use super::value::Row;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A named, typed result-set column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data_type: DataType,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// An ordered set of columns plus the rows read back from one statement
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TabularResult {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl TabularResult {
    /// Build a result, validating that every row has one cell per column.
    pub fn new(columns: Vec<Column>, rows: Vec<Row>) -> Result<Self> {
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(Error::Execution(format!(
                    "Row {} has {} cells, result set has {} columns",
                    i,
                    row.len(),
                    columns.len()
                )));
            }
        }
        Ok(Self { columns, rows })
    }

    /// Case-insensitive column lookup by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))
    }
}
