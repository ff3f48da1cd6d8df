//! Row-level and result-level aggregation
//!
//! Combines per-field matches within one row using a field quantifier,
//! then maps the count of qualifying rows to the overall boolean using a
//! row-count quantifier.

use super::field::PreparedField;
use crate::types::Row;
use serde::{Deserialize, Serialize};

/// How multiple field checks combine within one row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchModifier {
    /// Every field must match
    All,
    /// At least one field must match
    Any,
    /// No field may match
    None,
}

/// How the count of qualifying rows becomes the condition outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowCountQuantifier {
    Zero,
    ExactlyOne,
    AtLeastOne,
}

/// Does one row satisfy the configured fields under the modifier?
pub fn row_matches(fields: &[PreparedField], row: &Row, modifier: SearchModifier) -> bool {
    match modifier {
        SearchModifier::All => fields.iter().all(|f| f.matches(row)),
        SearchModifier::Any => fields.iter().any(|f| f.matches(row)),
        SearchModifier::None => !fields.iter().any(|f| f.matches(row)),
    }
}

/// Apply the row-count quantifier to a count of qualifying rows.
pub fn evaluate_row_count(count: usize, quantifier: RowCountQuantifier) -> bool {
    match quantifier {
        RowCountQuantifier::Zero => count == 0,
        RowCountQuantifier::ExactlyOne => count == 1,
        RowCountQuantifier::AtLeastOne => count > 0,
    }
}

/// Count qualifying rows and apply the row-count quantifier.
pub fn evaluate_rows(
    fields: &[PreparedField],
    rows: &[Row],
    modifier: SearchModifier,
    quantifier: RowCountQuantifier,
) -> bool {
    let count = rows
        .iter()
        .filter(|row| row_matches(fields, row, modifier))
        .count();
    tracing::debug!(count, total = rows.len(), "rows qualified");
    evaluate_row_count(count, quantifier)
}
