//! Text segmentation and shorthand canonicalization
//!
//! Raw configuration text interleaves literal text, explicit query
//! envelopes (`<Query>...</Query>`) and shorthand attribute references
//! (`</Name>`). The segmenter partitions an input into an ordered
//! sequence of literal/query segments, rewriting each shorthand hit into
//! the canonical envelope form so the rest of the system never re-parses
//! raw text.

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::OnceLock;

const QUERY_OPEN: &str = "<Query>";
const QUERY_CLOSE: &str = "</Query>";

fn envelope_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<Query>(.*?)</Query>").unwrap())
}

fn shorthand_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // A closing-tag-like attribute reference: `</Name>` or a deeper
    // path `</Name/Child>`; `*` is allowed as a path segment.
    RE.get_or_init(|| {
        Regex::new(r"</([A-Za-z_][A-Za-z0-9_]*(?:/(?:[A-Za-z_][A-Za-z0-9_]*|\*))*)>").unwrap()
    })
}

fn attribute_body_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)^\s*<Attribute>(.*)</Attribute>\s*$").unwrap())
}

/// The normalized, envelope-wrapped form of one embedded data reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalQuery {
    body: String,
}

impl CanonicalQuery {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    /// The text between the envelope tags
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The full canonical rendering, envelope included
    pub fn canonical_text(&self) -> String {
        format!("{QUERY_OPEN}{}{QUERY_CLOSE}", self.body)
    }

    /// If the body is the attribute form `<Attribute>PATH</Attribute>`,
    /// return the path expression.
    pub fn as_attribute_path(&self) -> Option<&str> {
        attribute_body_re()
            .captures(&self.body)
            .map(|c| c.get(1).unwrap().as_str())
    }
}

/// One parsed span of configuration text
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Literal(String),
    Query(CanonicalQuery),
}

impl Segment {
    /// The text this segment contributes when re-concatenated
    pub fn rendered(&self) -> String {
        match self {
            Segment::Literal(s) => s.clone(),
            Segment::Query(q) => q.canonical_text(),
        }
    }
}

/// Split raw text into alternating literal/query segments.
///
/// The whole input is trimmed first; an empty or whitespace-only input
/// segments to a single empty literal. Explicit envelopes are scanned
/// greedily and non-overlapping; shorthand references inside literal
/// spans are rewritten to canonical form and the span is re-scanned so
/// each hit becomes its own query segment.
pub fn segment(text: &str) -> Result<Vec<Segment>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(vec![Segment::Literal(String::new())]);
    }

    let mut segments = Vec::new();
    for piece in scan_envelopes(text)? {
        match piece {
            Segment::Query(q) => segments.push(Segment::Query(q)),
            Segment::Literal(lit) => {
                let rewritten = rewrite_shorthand(&lit);
                if rewritten == lit {
                    segments.push(Segment::Literal(lit));
                } else {
                    // Rewriting introduced envelopes; re-partition the span.
                    segments.extend(scan_envelopes(&rewritten)?);
                }
            }
        }
    }

    Ok(segments)
}

/// Greedy non-overlapping envelope scan. Literal spans between envelopes
/// are preserved verbatim; empty literals between adjacent envelopes are
/// dropped.
fn scan_envelopes(text: &str) -> Result<Vec<Segment>> {
    let mut pieces = Vec::new();
    let mut last = 0;
    for caps in envelope_re().captures_iter(text) {
        let whole = caps.get(0).unwrap();
        if whole.start() > last {
            pieces.push(Segment::Literal(text[last..whole.start()].to_string()));
        }
        pieces.push(Segment::Query(CanonicalQuery::new(
            caps.get(1).unwrap().as_str(),
        )));
        last = whole.end();
    }
    if last < text.len() {
        pieces.push(Segment::Literal(text[last..].to_string()));
    }

    // Any envelope tag left in a literal span is unbalanced nesting.
    for piece in &pieces {
        if let Segment::Literal(lit) = piece {
            if lit.contains(QUERY_OPEN) || lit.contains(QUERY_CLOSE) {
                return Err(Error::Parse {
                    text: text.to_string(),
                    reason: "unbalanced query envelope".to_string(),
                });
            }
        }
    }

    Ok(pieces)
}

/// Rewrite shorthand attribute references (`</Name>`) into the canonical
/// envelope form wrapping an attribute-path expression.
fn rewrite_shorthand(lit: &str) -> String {
    let mut out = String::with_capacity(lit.len());
    let mut last = 0;
    for caps in shorthand_re().captures_iter(lit) {
        let whole = caps.get(0).unwrap();
        let name = caps.get(1).unwrap().as_str();
        out.push_str(&lit[last..whole.start()]);
        out.push_str(&format!(
            "{QUERY_OPEN}<Attribute>/{name}</Attribute>{QUERY_CLOSE}"
        ));
        last = whole.end();
    }
    out.push_str(&lit[last..]);
    out
}
