//! Field definitions and per-cell match strategies
//!
//! A `FieldDefinition` is configuration: which column to check and what
//! its value should be. Preparation runs once per evaluation against a
//! specific result-set schema: the raw value is expanded, the column is
//! resolved by ordinal or name, and the right comparison strategy is
//! synthesized (null sentinel, fuzzy pattern, native-typed equality, or
//! string comparison).

use super::fuzzy::FuzzyPattern;
use crate::coercion::coerce_literal;
use crate::error::{Error, Result};
use crate::expand::{expand_single, EvaluationScope};
use crate::types::{Row, TabularResult, Value};
use serde::{Deserialize, Serialize};

/// One configured field check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Column name, or a 1-based ordinal encoded as a digit string.
    /// A digit string that is not a valid ordinal for the schema falls
    /// back to name lookup.
    pub selector: String,
    /// Comparison value; may contain shorthand references and embedded
    /// queries, expanded at preparation time.
    pub raw_value: String,
    #[serde(default)]
    pub case_sensitive: bool,
    #[serde(default)]
    pub fuzzy: bool,
}

impl FieldDefinition {
    pub fn new(selector: impl Into<String>, raw_value: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            raw_value: raw_value.into(),
            case_sensitive: false,
            fuzzy: false,
        }
    }

    pub fn case_sensitive(mut self, yes: bool) -> Self {
        self.case_sensitive = yes;
        self
    }

    pub fn fuzzy(mut self, yes: bool) -> Self {
        self.fuzzy = yes;
        self
    }

    /// Resolve the selector against a result-set schema.
    fn resolve_column(&self, schema: &TabularResult) -> Result<usize> {
        if let Ok(ordinal) = self.selector.trim().parse::<usize>() {
            if ordinal >= 1 && ordinal <= schema.columns.len() {
                return Ok(ordinal - 1);
            }
        }
        schema
            .column_index(&self.selector)
            .ok_or_else(|| Error::ColumnNotFound(self.selector.clone()))
    }

    /// Prepare this field against a specific schema. Prepared state is
    /// tied to that schema and to one evaluation; it is not reused.
    pub fn prepare(
        &self,
        schema: &TabularResult,
        scope: &mut EvaluationScope<'_>,
    ) -> Result<PreparedField> {
        let column = self.resolve_column(schema)?;
        let expanded = expand_single(&self.raw_value, scope)?;

        let strategy = if expanded.eq_ignore_ascii_case("NULL") {
            MatchStrategy::Null
        } else if self.fuzzy {
            MatchStrategy::Fuzzy(FuzzyPattern::compile(&expanded, self.case_sensitive)?)
        } else {
            let target = schema.columns[column].data_type;
            match coerce_literal(&expanded, target) {
                Ok(Value::Str(s)) => MatchStrategy::Text {
                    expected: s,
                    case_sensitive: self.case_sensitive,
                },
                Ok(value) if self.case_sensitive => MatchStrategy::Text {
                    expected: value.to_string(),
                    case_sensitive: true,
                },
                Ok(value) => MatchStrategy::Native(value),
                Err(err) => {
                    // A type mismatch must not abort the other fields or
                    // rows; the field simply never matches.
                    tracing::warn!(
                        selector = %self.selector,
                        value = %expanded,
                        %err,
                        "field value failed coercion; field will not match"
                    );
                    MatchStrategy::Never
                }
            }
        };

        Ok(PreparedField { column, strategy })
    }
}

/// A comparison strategy bound to one column of one schema
#[derive(Debug, Clone)]
enum MatchStrategy {
    /// Cell must be SQL NULL (raw value was the NULL sentinel)
    Null,
    /// Error-tolerant pattern over the cell's string rendering
    Fuzzy(FuzzyPattern),
    /// Equality on the coerced native value
    Native(Value),
    /// String-rendering comparison under a case mode
    Text {
        expected: String,
        case_sensitive: bool,
    },
    /// Coercion failed; never matches
    Never,
}

/// A field prepared against one result-set schema
#[derive(Debug, Clone)]
pub struct PreparedField {
    column: usize,
    strategy: MatchStrategy,
}

impl PreparedField {
    /// Does this field match the given row?
    ///
    /// A SQL-NULL cell matches only the null-sentinel strategy.
    pub fn matches(&self, row: &Row) -> bool {
        let Some(cell) = row.get(self.column) else {
            return false;
        };
        match &self.strategy {
            MatchStrategy::Null => cell.is_null(),
            _ if cell.is_null() => false,
            MatchStrategy::Fuzzy(pattern) => pattern.matches(&cell.to_string()),
            MatchStrategy::Native(expected) => expected.matches_value(cell),
            MatchStrategy::Text {
                expected,
                case_sensitive,
            } => text_eq(expected, &cell.to_string(), *case_sensitive),
            MatchStrategy::Never => false,
        }
    }
}

fn text_eq(a: &str, b: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        a == b
    } else {
        a.to_lowercase() == b.to_lowercase()
    }
}
