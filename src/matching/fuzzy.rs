//! Error-tolerant match patterns
//!
//! A fuzzy field compiles its expanded value into a bounded-error
//! substring matcher: one character error (substitution, insertion or
//! deletion) is allowed per 3 characters of the value, plus one extra
//! whitespace character per 2 characters. Budgets and distances are
//! computed over Unicode scalar values. Values of length 0 or 1
//! degenerate to an anchored literal pattern, since error tolerance is
//! meaningless on targets that short.

use crate::error::{Error, Result};
use regex::RegexBuilder;

#[derive(Debug, Clone)]
pub enum FuzzyPattern {
    /// Anchored literal match for 0/1-character values
    Exact(regex::Regex),
    /// Bounded-error substring matcher
    Tolerant {
        target: Vec<char>,
        max_errors: usize,
        max_whitespace: usize,
        case_sensitive: bool,
    },
}

impl FuzzyPattern {
    /// Compile an expanded field value into a match pattern.
    pub fn compile(value: &str, case_sensitive: bool) -> Result<Self> {
        let length = value.chars().count();
        if length <= 1 {
            let pattern = format!("^{}$", regex::escape(value));
            let re = RegexBuilder::new(&pattern)
                .case_insensitive(!case_sensitive)
                .build()
                .map_err(|e| Error::Execution(format!("invalid literal pattern: {e}")))?;
            return Ok(FuzzyPattern::Exact(re));
        }

        let folded = if case_sensitive {
            value.to_string()
        } else {
            value.to_lowercase()
        };
        Ok(FuzzyPattern::Tolerant {
            target: folded.chars().collect(),
            max_errors: length / 3,
            max_whitespace: length / 2,
            case_sensitive,
        })
    }

    /// Compare the pattern against a cell's string rendering.
    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            FuzzyPattern::Exact(re) => re.is_match(candidate),
            FuzzyPattern::Tolerant {
                target,
                max_errors,
                max_whitespace,
                case_sensitive,
            } => {
                let folded;
                let candidate = if *case_sensitive {
                    candidate
                } else {
                    folded = candidate.to_lowercase();
                    &folded
                };
                tolerant_match(target, candidate, *max_errors, *max_whitespace)
            }
        }
    }
}

const INF: usize = usize::MAX / 2;

/// Approximate substring search: does `candidate` contain a span within
/// `max_errors` edits of `target`, where up to `max_whitespace` inserted
/// whitespace characters are charged to a separate budget?
///
/// `dp[i][w]` is the minimum error count aligning the first `i` target
/// characters against a span ending at the current candidate position
/// using `w` whitespace insertions; the leading row stays zero so the
/// span may start anywhere, and acceptance is checked after every
/// candidate character so it may end anywhere.
fn tolerant_match(target: &[char], candidate: &str, max_errors: usize, max_whitespace: usize) -> bool {
    let n = target.len();
    let width = max_whitespace + 1;

    // Column for the empty candidate prefix: i deletions, no whitespace.
    let mut dp: Vec<Vec<usize>> = (0..=n)
        .map(|i| {
            let mut row = vec![INF; width];
            row[0] = i;
            row
        })
        .collect();

    let accepts = |dp: &Vec<Vec<usize>>| dp[n].iter().any(|&e| e <= max_errors);
    if accepts(&dp) {
        return true;
    }

    for c in candidate.chars() {
        let mut next: Vec<Vec<usize>> = vec![vec![INF; width]; n + 1];
        next[0] = vec![0; width];
        for i in 1..=n {
            for w in 0..width {
                let subst_cost = usize::from(target[i - 1] != c);
                let mut best = dp[i - 1][w].saturating_add(subst_cost);
                // Insert c as a plain error
                best = best.min(dp[i][w].saturating_add(1));
                // Insert c against the whitespace budget
                if c.is_whitespace() && w > 0 {
                    best = best.min(dp[i][w - 1]);
                }
                // Delete target[i - 1]
                best = best.min(next[i - 1][w].saturating_add(1));
                next[i][w] = best;
            }
        }
        dp = next;
        if accepts(&dp) {
            return true;
        }
    }

    false
}
