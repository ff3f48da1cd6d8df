//! Declared column types

use serde::{Deserialize, Serialize};
use std::fmt;

/// The declared type of a result-set column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Bool,
    I64,
    F64,
    Decimal,
    Str,
    Date,
    Time,
    Timestamp,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Bool => write!(f, "BOOLEAN"),
            DataType::I64 => write!(f, "BIGINT"),
            DataType::F64 => write!(f, "DOUBLE PRECISION"),
            DataType::Decimal => write!(f, "DECIMAL"),
            DataType::Str => write!(f, "TEXT"),
            DataType::Date => write!(f, "DATE"),
            DataType::Time => write!(f, "TIME"),
            DataType::Timestamp => write!(f, "TIMESTAMP"),
        }
    }
}
