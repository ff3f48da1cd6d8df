//! Literal-to-typed-value coercion
//!
//! Expanded field values arrive as text and must be coerced to the
//! declared type of the column they are compared against. Coercion
//! failures are reported as `Error::Conversion`; field preparation
//! downgrades them to a never-matching comparison.

mod temporal;

use crate::error::{Error, Result};
use crate::types::{DataType, Value};
use rust_decimal::Decimal;

pub use temporal::{parse_date, parse_time, parse_timestamp};

/// Coerce a literal string to the given column type.
pub fn coerce_literal(s: &str, target: DataType) -> Result<Value> {
    match target {
        DataType::Bool => parse_bool(s),
        DataType::I64 => s
            .trim()
            .parse::<i64>()
            .map(Value::I64)
            .map_err(|_| conversion_error(s, target)),
        DataType::F64 => s
            .trim()
            .parse::<f64>()
            .map(Value::F64)
            .map_err(|_| conversion_error(s, target)),
        DataType::Decimal => s
            .trim()
            .parse::<Decimal>()
            .map(Value::Decimal)
            .map_err(|_| conversion_error(s, target)),
        DataType::Str => Ok(Value::Str(s.to_string())),
        DataType::Date => parse_date(s),
        DataType::Time => parse_time(s),
        DataType::Timestamp => parse_timestamp(s),
    }
}

/// Parse a boolean literal
fn parse_bool(s: &str) -> Result<Value> {
    match s.trim().to_uppercase().as_str() {
        "TRUE" | "T" | "YES" | "Y" | "1" => Ok(Value::Bool(true)),
        "FALSE" | "F" | "NO" | "N" | "0" => Ok(Value::Bool(false)),
        _ => Err(conversion_error(s, DataType::Bool)),
    }
}

pub(crate) fn conversion_error(s: &str, target: DataType) -> Error {
    Error::Conversion {
        value: s.to_string(),
        target: target.to_string(),
    }
}
