//! Weighted frame tree produced by the aggregator.
//!
//! Each node stands for one distinct combination of group-by values seen
//! at its depth. The renderer only ever borrows this tree.

use crate::utils::config::{MISSING_VALUE, ROOT_LABEL, UNGROUPED_LABEL};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Ordered `(field, value)` pairs that decide whether two rows merge
///
/// A `None` value means the row lacks the field. It never equals a row
/// whose field holds the sentinel text itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    pairs: Vec<(String, Option<String>)>,
}

impl GroupKey {
    /// Key made of a single `field=value` pair
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            pairs: vec![(field.into(), Some(value.into()))],
        }
    }

    /// Key for a row that does not carry `field`
    pub fn missing(field: impl Into<String>) -> Self {
        Self {
            pairs: vec![(field.into(), None)],
        }
    }

    pub fn from_pairs(pairs: Vec<(String, Option<String>)>) -> Self {
        Self { pairs }
    }

    pub fn pairs(&self) -> &[(String, Option<String>)] {
        &self.pairs
    }

    /// Display form, e.g. `type=admin` or `type=admin, role=owner`
    pub fn label(&self) -> String {
        self.pairs
            .iter()
            .map(|(field, value)| {
                format!("{}={}", field, value.as_deref().unwrap_or(MISSING_VALUE))
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Identity of a frame among its siblings
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "key", rename_all = "snake_case")]
pub enum FrameKey {
    /// Synthetic marker for depth 0
    Root,
    /// Rows sharing the same group values
    Group(GroupKey),
    /// Catch-all for rows that cannot be grouped
    Ungrouped,
}

impl FrameKey {
    pub fn label(&self) -> String {
        match self {
            FrameKey::Root => ROOT_LABEL.to_string(),
            FrameKey::Group(key) => key.label(),
            FrameKey::Ungrouped => UNGROUPED_LABEL.to_string(),
        }
    }
}

/// A node of the weighted frame tree
///
/// Invariant: when `children` is non-empty, `weight` is the sum of the
/// children's weights. Children keep the order in which their keys were
/// first seen in the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameNode {
    pub key: FrameKey,
    pub label: String,
    pub weight: u64,
    pub depth: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FrameNode>,
}

impl FrameNode {
    /// Create a childless node whose label is derived from its key
    pub fn new(key: FrameKey, depth: usize, weight: u64) -> Self {
        let label = key.label();
        Self {
            key,
            label,
            weight,
            depth,
            children: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.key == FrameKey::Root
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of rows the tree occupies, counting the root row
    pub fn levels(&self) -> usize {
        1 + self.children.iter().map(FrameNode::levels).max().unwrap_or(0)
    }

    /// Direct child with the given label
    pub fn child(&self, label: &str) -> Option<&FrameNode> {
        self.children.iter().find(|c| c.label == label)
    }

    /// Pre-order traversal over this node and all of its descendants
    pub fn iter(&self) -> Frames<'_> {
        Frames { stack: vec![self] }
    }
}

/// Pre-order iterator returned by [`FrameNode::iter`]
pub struct Frames<'a> {
    stack: Vec<&'a FrameNode>,
}

impl<'a> Iterator for Frames<'a> {
    type Item = &'a FrameNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Stringify a group-by field value
///
/// Strings are used verbatim; every other value uses its canonical JSON
/// text, so `1`, `true` and `null` read naturally and nested objects
/// compare equal regardless of key order.
pub fn stringify_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => canonical_json(other),
    }
}

/// Compact JSON with object keys sorted
pub fn canonical_json(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => Value::String(s.clone()).to_string(),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(canonical_json).collect();
            format!("[{}]", items.join(","))
        }
        Value::Object(map) => {
            let sorted: BTreeMap<&String, String> =
                map.iter().map(|(k, v)| (k, canonical_json(v))).collect();
            let items: Vec<String> = sorted
                .into_iter()
                .map(|(k, v)| format!("{}:{}", Value::String(k.clone()), v))
                .collect();
            format!("{{{}}}", items.join(","))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_group_key_label() {
        assert_eq!(GroupKey::new("type", "admin").label(), "type=admin");

        let key = GroupKey::from_pairs(vec![
            ("type".to_string(), Some("admin".to_string())),
            ("role".to_string(), None),
        ]);
        assert_eq!(key.label(), "type=admin, role=∅");
    }

    #[test]
    fn test_missing_value_is_not_sentinel_text() {
        let missing = GroupKey::missing("type");
        let literal = GroupKey::new("type", "∅");

        assert_eq!(missing.label(), literal.label());
        assert_ne!(missing, literal);
        assert_ne!(FrameKey::Group(missing), FrameKey::Group(literal));
    }

    #[test]
    fn test_frame_key_labels() {
        assert_eq!(FrameKey::Root.label(), "all");
        assert_eq!(FrameKey::Ungrouped.label(), "(ungrouped)");
    }

    #[test]
    fn test_stringify_scalars() {
        assert_eq!(stringify_value(&json!("admin")), "admin");
        assert_eq!(stringify_value(&json!(42)), "42");
        assert_eq!(stringify_value(&json!(1.5)), "1.5");
        assert_eq!(stringify_value(&json!(true)), "true");
        assert_eq!(stringify_value(&json!(null)), "null");
    }

    #[test]
    fn test_canonical_json_sorts_keys() {
        let a = json!({"b": 1, "a": [true, "x"]});
        let b = json!({"a": [true, "x"], "b": 1});
        assert_eq!(canonical_json(&a), r#"{"a":[true,"x"],"b":1}"#);
        assert_eq!(canonical_json(&a), canonical_json(&b));
    }

    #[test]
    fn test_levels_and_iter() {
        let mut root = FrameNode::new(FrameKey::Root, 0, 3);
        let mut admin = FrameNode::new(FrameKey::Group(GroupKey::new("type", "admin")), 1, 2);
        admin
            .children
            .push(FrameNode::new(FrameKey::Group(GroupKey::new("dept", "ops")), 2, 2));
        root.children.push(admin);
        root.children
            .push(FrameNode::new(FrameKey::Group(GroupKey::new("type", "editor")), 1, 1));

        assert_eq!(root.levels(), 3);

        let labels: Vec<&str> = root.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["all", "type=admin", "dept=ops", "type=editor"]);
    }
}
