//! Cached hierarchical attribute documents
//!
//! An `AttributeTree` is the in-memory form of a document's attribute
//! file: a forest of named nodes, each carrying a scalar value and any
//! number of children. Attribute-path queries (`/Invoice/Date`) walk the
//! forest by name, case-insensitively, and return matching values in
//! document order.

use serde::{Deserialize, Serialize};

/// One attribute node: a name, a scalar value, and child attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeNode {
    pub name: String,
    pub value: String,
    pub children: Vec<AttributeNode>,
}

impl AttributeNode {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<AttributeNode>) -> Self {
        self.children = children;
        self
    }
}

/// A loaded attribute document (the top-level attribute forest)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AttributeTree {
    pub roots: Vec<AttributeNode>,
}

impl AttributeTree {
    pub fn new(roots: Vec<AttributeNode>) -> Self {
        Self { roots }
    }

    /// Evaluate an attribute path like `/Invoice/Date` against the tree.
    ///
    /// Segments match node names case-insensitively; `*` matches any name
    /// at that level. Returns the values of every node the full path
    /// reaches, in document order.
    pub fn query_path(&self, path: &str) -> Vec<String> {
        let segments: Vec<&str> = path
            .trim()
            .trim_start_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        if segments.is_empty() {
            return Vec::new();
        }

        let mut level: Vec<&AttributeNode> = self.roots.iter().collect();
        for (depth, segment) in segments.iter().enumerate() {
            let matched: Vec<&AttributeNode> = level
                .into_iter()
                .filter(|n| *segment == "*" || n.name.eq_ignore_ascii_case(segment))
                .collect();
            if depth == segments.len() - 1 {
                return matched.into_iter().map(|n| n.value.clone()).collect();
            }
            level = matched.into_iter().flat_map(|n| n.children.iter()).collect();
        }

        Vec::new()
    }
}
