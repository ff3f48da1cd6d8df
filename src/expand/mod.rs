//! Text-to-value expansion pipeline
//!
//! Segmentation, canonical query evaluation, and whole-string expansion,
//! threaded through a per-evaluation `EvaluationScope`.

pub mod expander;
pub mod query;
pub mod scope;
pub mod segment;

pub use expander::{expand, expand_single, Expanded};
pub use query::evaluate_query;
pub use scope::{DataContextSpec, EvaluationScope};
pub use segment::{segment, CanonicalQuery, Segment};
