//! Temporal coercions (Date, Time, Timestamp)

use super::conversion_error;
use crate::error::Result;
use crate::types::{DataType, Value};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%b %d, %Y", "%B %d, %Y"];

/// Parse a date literal, trying several common renderings so that
/// `1/1/2001` and `Jan 1, 2001` both coerce to a DATE cell.
pub fn parse_date(s: &str) -> Result<Value> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .map(Value::Date)
        .ok_or_else(|| conversion_error(s, DataType::Date))
}

/// Parse a time literal
pub fn parse_time(s: &str) -> Result<Value> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S%.f"))
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map(Value::Time)
        .map_err(|_| conversion_error(s, DataType::Time))
}

/// Parse a timestamp literal; a bare date reads as midnight.
pub fn parse_timestamp(s: &str) -> Result<Value> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%m/%d/%Y %H:%M:%S"))
        .map(Value::Timestamp)
        .map_err(|_| conversion_error(s, DataType::Timestamp))
        .or_else(|err| match parse_date(s) {
            Ok(Value::Date(d)) => Ok(Value::Timestamp(d.and_hms_opt(0, 0, 0).unwrap())),
            _ => Err(err),
        })
}
