//! Cell values for tabular results
//!
//! A `Value` is one dynamically typed cell read back from a statement,
//! with a distinguished SQL NULL marker. The `Display` rendering is the
//! raw cell text that string comparison and fuzzy matching operate on.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A row of cell values
pub type Row = Vec<Value>;

/// A dynamically typed cell value
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    I64(i64),
    F64(f64),
    Decimal(Decimal),
    Str(String),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
}

impl Value {
    /// True for the SQL NULL marker
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Convert any numeric variant to Decimal for cross-type equality
    fn to_decimal(&self) -> Option<Decimal> {
        match self {
            Value::I64(n) => Some(Decimal::from(*n)),
            Value::F64(n) => Decimal::from_f64(*n),
            Value::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    /// Equality across numeric representations; falls back to strict
    /// equality for non-numeric variants. NULL never equals anything,
    /// including another NULL.
    pub fn matches_value(&self, other: &Value) -> bool {
        if self.is_null() || other.is_null() {
            return false;
        }
        if let (Some(a), Some(b)) = (self.to_decimal(), other.to_decimal()) {
            return a == b;
        }
        self == other
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::I64(i) => write!(f, "{}", i),
            Value::F64(v) => write!(f, "{}", v),
            Value::Decimal(d) => write!(f, "{}", d),
            Value::Str(s) => write!(f, "{}", s),
            Value::Date(d) => write!(f, "{}", d),
            Value::Time(t) => write!(f, "{}", t),
            Value::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}
