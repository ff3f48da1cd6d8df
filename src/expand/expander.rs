//! Whole-string expansion
//!
//! Drives the segmenter and query evaluator across one configuration
//! string: query-only inputs short-circuit to the raw result list (so a
//! query can feed multi-value SQL parameters), mixed inputs enforce
//! single-result per embedded query and concatenate back to one literal,
//! which then receives the path-tag substitution pass and the reserved
//! database-identity placeholder check.

use super::query::evaluate_query;
use super::scope::EvaluationScope;
use super::segment::{segment, Segment};
use crate::error::{Error, Result};

/// Database-identity tags that must not survive expansion; their
/// presence in the output means no relational connection was available
/// to resolve them.
const RESERVED_PLACEHOLDERS: &[&str] = &["<DatabaseServer>", "<DatabaseName>", "<ActionName>"];

/// The outcome of expanding one configuration string
#[derive(Debug, Clone, PartialEq)]
pub enum Expanded {
    /// The fully expanded literal text
    Literal(String),
    /// The raw result list of a query-only input
    Values(Vec<String>),
}

impl Expanded {
    /// Collapse to a single scalar string, failing on multi-value
    /// query-only results (a comparison or statement needs one value).
    pub fn into_single(self, origin: &str, source: &str) -> Result<String> {
        match self {
            Expanded::Literal(s) => Ok(s),
            Expanded::Values(mut values) => match values.len() {
                0 => Ok(String::new()),
                1 => Ok(values.remove(0)),
                _ => Err(Error::MultiResult {
                    query: origin.to_string(),
                    values,
                    source_doc: source.to_string(),
                }),
            },
        }
    }
}

/// Expand one configuration string against the scope's data context.
///
/// Blank input expands to an empty literal without touching the context.
pub fn expand(text: &str, scope: &mut EvaluationScope<'_>) -> Result<Expanded> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Expanded::Literal(String::new()));
    }

    scope.reset_query_cache();
    let segments = segment(trimmed)?;

    // Query-only fast path: return the raw result list.
    if let [Segment::Query(query)] = segments.as_slice() {
        return Ok(Expanded::Values(evaluate_query(query, scope)?));
    }

    let mut out = String::new();
    for seg in &segments {
        match seg {
            Segment::Literal(lit) => out.push_str(lit),
            Segment::Query(query) => {
                let values = evaluate_query(query, scope)?;
                match values.len() {
                    0 => {}
                    1 => out.push_str(&values[0]),
                    _ if scope.fallback().is_some() => out.push_str(&values.join("\n")),
                    _ => {
                        return Err(Error::MultiResult {
                            query: query.canonical_text(),
                            values,
                            source_doc: scope.source().to_string(),
                        });
                    }
                }
            }
        }
    }

    let substituted = scope.path_tags().expand(&out)?;
    let checked = check_placeholders(substituted, scope)?;
    Ok(Expanded::Literal(checked))
}

/// Expand and collapse to one scalar string.
pub fn expand_single(text: &str, scope: &mut EvaluationScope<'_>) -> Result<String> {
    let source = scope.source().to_string();
    expand(text, scope)?.into_single(text.trim(), &source)
}

/// Fail on reserved database-identity placeholders left verbatim in the
/// output; with a fallback replacement configured they substitute
/// instead.
fn check_placeholders(mut text: String, scope: &EvaluationScope<'_>) -> Result<String> {
    for placeholder in RESERVED_PLACEHOLDERS {
        if !text.contains(placeholder) {
            continue;
        }
        match scope.fallback() {
            Some(fallback) => {
                let fallback = fallback.to_string();
                text = text.replace(placeholder, &fallback);
            }
            None => {
                return Err(Error::UnresolvedPlaceholder {
                    placeholder: (*placeholder).to_string(),
                    text,
                    source_doc: scope.source().to_string(),
                });
            }
        }
    }
    Ok(text)
}
