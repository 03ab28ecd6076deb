//! Build the weighted frame tree from a JSON document.
//!
//! Arrays of objects are where grouping happens: every element of such an
//! array is a row, and rows that are objects carrying a group-by field are
//! bucketed by the value of the field that is active at the current level.
//! Arrays of scalars are plain values and weigh 1, like any other leaf.
//!
//! Example: with `group_by = ["type"]`,
//! `{"users": [{"type": "admin"}, {"type": "editor"}, {"type": "admin"}]}`
//! becomes `all(3) -> [type=admin(2), type=editor(1)]`.

use super::frame::{stringify_value, FrameKey, FrameNode, GroupKey};
use crate::parser::{ensure_container, validate_group_fields};
use crate::utils::error::FlameError;
use log::debug;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;

/// Options controlling how a document is folded into frames
#[derive(Debug, Clone, Default)]
pub struct AggregateOptions {
    /// Fields used to group array rows, consumed one per tree level.
    /// If empty, the whole document collapses into the root frame.
    pub group_by: Vec<String>,

    /// Traverse strings whose content is itself a JSON object or array
    pub expand_embedded_json: bool,
}

impl AggregateOptions {
    pub fn new(group_by: Vec<String>) -> Self {
        Self {
            group_by,
            expand_embedded_json: false,
        }
    }

    pub fn with_expand_embedded_json(mut self, expand: bool) -> Self {
        self.expand_embedded_json = expand;
        self
    }
}

/// Aggregate a document into a frame tree
///
/// **Public** - main entry point for aggregation
///
/// # Errors
/// * `FlameError::NotAContainer` - root is not an object or array
/// * `FlameError::EmptyField` / `FlameError::DuplicateField` - bad field list
pub fn aggregate(root: &Value, group_by: &[String]) -> Result<FrameNode, FlameError> {
    aggregate_with(root, &AggregateOptions::new(group_by.to_vec()))
}

/// Aggregate a document into a frame tree with explicit options
pub fn aggregate_with(root: &Value, options: &AggregateOptions) -> Result<FrameNode, FlameError> {
    ensure_container(root)?;
    validate_group_fields(&options.group_by)?;

    debug!(
        "Aggregating document by {:?} (embedded JSON: {})",
        options.group_by, options.expand_embedded_json
    );

    let walker = Walker {
        fields: &options.group_by,
        expand: options.expand_embedded_json,
    };

    let mut root_frame = PendingFrame::new(FrameKey::Root, 0);
    walker.distribute(root, &mut root_frame, 0);
    let tree = root_frame.finish();

    debug!(
        "Aggregated {} terminal items into {} frames",
        tree.weight,
        tree.iter().count()
    );

    Ok(tree)
}

/// Count the terminal items of a document
///
/// This is the weight the root frame carries after aggregation, whatever
/// the grouping configuration.
pub fn count_terminal_items(value: &Value, expand_embedded_json: bool) -> u64 {
    let walker = Walker {
        fields: &[],
        expand: expand_embedded_json,
    };
    walker.terminals(&walker.resolve(value))
}

/// Frame under construction; children are indexed by key so that rows
/// merge in O(1) while the vector keeps first-seen order.
struct PendingFrame {
    key: FrameKey,
    depth: usize,
    own: u64,
    children: Vec<PendingFrame>,
    index: HashMap<FrameKey, usize>,
}

impl PendingFrame {
    fn new(key: FrameKey, depth: usize) -> Self {
        Self {
            key,
            depth,
            own: 0,
            children: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn child_mut(&mut self, key: FrameKey) -> &mut PendingFrame {
        let idx = match self.index.get(&key) {
            Some(&idx) => idx,
            None => {
                let idx = self.children.len();
                self.children.push(PendingFrame::new(key.clone(), self.depth + 1));
                self.index.insert(key, idx);
                idx
            }
        };
        &mut self.children[idx]
    }

    fn finish(self) -> FrameNode {
        let mut children: Vec<FrameNode> =
            self.children.into_iter().map(PendingFrame::finish).collect();
        let weight = self.own + children.iter().map(|c| c.weight).sum::<u64>();

        // A lone catch-all child says nothing its parent does not
        if children.len() == 1 && children[0].key == FrameKey::Ungrouped {
            children.clear();
        }

        let mut node = FrameNode::new(self.key, self.depth, weight);
        node.children = children;
        node
    }
}

/// How a single array element is placed in the tree
enum Row {
    /// Object carrying a group-by field
    Grouped(GroupKey),
    /// Anything else, including objects with none of the fields
    Ungrouped,
}

struct Walker<'a> {
    fields: &'a [String],
    expand: bool,
}

impl Walker<'_> {
    /// Push all terminal items of `value` into `node`'s subtree
    fn distribute(&self, value: &Value, node: &mut PendingFrame, level: usize) {
        let value = self.resolve(value);

        if level >= self.fields.len() {
            node.own += self.terminals(&value);
        } else if !self.has_rows(&value) {
            node.child_mut(FrameKey::Ungrouped).own += 1;
        } else {
            self.visit_rows(&value, node, level);
        }
    }

    /// Place every element of the outermost row arrays reachable in `value`
    ///
    /// Objects on the way down are wrappers; only array elements are rows.
    fn visit_rows(&self, value: &Value, node: &mut PendingFrame, level: usize) {
        match value {
            Value::Array(items) if self.is_row_array(items) => {
                for item in items {
                    self.place_row(item, node, level);
                }
            }
            Value::Object(map) => {
                for field_value in map.values() {
                    self.visit_rows(&self.resolve(field_value), node, level);
                }
            }
            _ => {}
        }
    }

    fn place_row(&self, item: &Value, node: &mut PendingFrame, level: usize) {
        let item = self.resolve(item);

        match self.classify(&item, level) {
            Row::Grouped(key) => {
                let child = node.child_mut(FrameKey::Group(key));
                self.distribute(&item, child, level + 1);
            }
            Row::Ungrouped => {
                node.child_mut(FrameKey::Ungrouped).own += self.terminals(&item);
            }
        }
    }

    fn classify(&self, item: &Value, level: usize) -> Row {
        match item {
            Value::Object(map) if self.fields.iter().any(|f| map.contains_key(f)) => {
                let field = &self.fields[level];
                let key = match map.get(field) {
                    Some(value) => GroupKey::new(field.clone(), stringify_value(value)),
                    None => GroupKey::missing(field.clone()),
                };
                Row::Grouped(key)
            }
            _ => Row::Ungrouped,
        }
    }

    /// Terminal items in `value`: its nested rows, or itself when it has none
    fn terminals(&self, value: &Value) -> u64 {
        match self.nested(value) {
            0 => 1,
            n => n,
        }
    }

    fn nested(&self, value: &Value) -> u64 {
        match value {
            Value::Array(items) if self.is_row_array(items) => items
                .iter()
                .map(|item| self.terminals(&self.resolve(item)))
                .sum(),
            Value::Object(map) => map.values().map(|v| self.nested(&self.resolve(v))).sum(),
            _ => 0,
        }
    }

    fn has_rows(&self, value: &Value) -> bool {
        match value {
            Value::Array(items) => self.is_row_array(items),
            Value::Object(map) => map.values().any(|v| self.has_rows(&self.resolve(v))),
            _ => false,
        }
    }

    /// An array holding objects, directly or through nested arrays.
    /// Arrays of scalars are plain values and count once.
    fn is_row_array(&self, items: &[Value]) -> bool {
        items.iter().any(|item| match &*self.resolve(item) {
            Value::Object(_) => true,
            Value::Array(inner) => self.is_row_array(inner),
            _ => false,
        })
    }

    fn resolve<'v>(&self, value: &'v Value) -> Cow<'v, Value> {
        if self.expand {
            if let Value::String(text) = value {
                if let Some(embedded) = parse_embedded(text) {
                    return Cow::Owned(embedded);
                }
            }
        }
        Cow::Borrowed(value)
    }
}

/// Parse a string that holds a JSON object or array
fn parse_embedded(text: &str) -> Option<Value> {
    let trimmed = text.trim_start();
    if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
        return None;
    }

    serde_json::from_str::<Value>(text)
        .ok()
        .filter(|v| v.is_object() || v.is_array())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn child_labels(node: &FrameNode) -> Vec<&str> {
        node.children.iter().map(|c| c.label.as_str()).collect()
    }

    #[test]
    fn test_groups_users_by_type() {
        let doc = json!({"users": [
            {"type": "admin", "name": "Ada"},
            {"type": "editor", "name": "Lee"},
            {"type": "admin", "name": "Bo"}
        ]});

        let tree = aggregate(&doc, &fields(&["type"])).unwrap();

        assert_eq!(tree.weight, 3);
        assert_eq!(child_labels(&tree), vec!["type=admin", "type=editor"]);
        assert_eq!(tree.children[0].weight, 2);
        assert_eq!(tree.children[1].weight, 1);
        assert!(tree.children.iter().all(FrameNode::is_leaf));
    }

    #[test]
    fn test_empty_group_by_is_single_node() {
        let doc = json!({"users": [{"type": "a"}, {"type": "b"}], "tags": [1, 2, 3]});
        let tree = aggregate(&doc, &[]).unwrap();

        assert_eq!(tree.weight, 2);
        assert!(tree.is_leaf());
    }

    #[test]
    fn test_missing_field_uses_sentinel() {
        let doc = json!([
            {"type": "a", "role": "x"},
            {"role": "y"}
        ]);
        let tree = aggregate(&doc, &fields(&["type", "role"])).unwrap();

        assert_eq!(child_labels(&tree), vec!["type=a", "type=∅"]);
    }

    #[test]
    fn test_scalars_fall_into_ungrouped() {
        let doc = json!([{"type": "a"}, 7, "x", {"name": "no fields"}]);
        let tree = aggregate(&doc, &fields(&["type"])).unwrap();

        assert_eq!(tree.weight, 4);
        assert_eq!(child_labels(&tree), vec!["type=a", "(ungrouped)"]);
        assert_eq!(tree.children[1].weight, 3);
    }

    #[test]
    fn test_lone_ungrouped_child_collapses() {
        let tree = aggregate(&json!([1, {"name": "x"}, 3]), &fields(&["type"])).unwrap();
        assert_eq!(tree.weight, 3);
        assert!(tree.is_leaf());

        let tree = aggregate(&json!({"a": 1}), &fields(&["type"])).unwrap();
        assert_eq!(tree.weight, 1);
        assert!(tree.is_leaf());
    }

    #[test]
    fn test_nested_arrays_use_next_field() {
        let doc = json!({"teams": [
            {"kind": "eng", "members": [{"role": "dev"}, {"role": "dev"}, {"role": "lead"}]},
            {"kind": "ops", "members": [{"role": "sre"}]},
            {"kind": "eng", "members": [{"role": "lead"}]}
        ]});
        let tree = aggregate(&doc, &fields(&["kind", "role"])).unwrap();

        assert_eq!(tree.weight, 5);
        let eng = tree.child("kind=eng").unwrap();
        assert_eq!(eng.weight, 4);
        assert_eq!(eng.depth, 1);
        assert_eq!(child_labels(eng), vec!["role=dev", "role=lead"]);
        assert_eq!(eng.child("role=dev").unwrap().weight, 2);
        assert_eq!(eng.child("role=lead").unwrap().weight, 2);
        assert_eq!(eng.child("role=lead").unwrap().depth, 2);
        assert_eq!(tree.child("kind=ops").unwrap().weight, 1);
    }

    #[test]
    fn test_rows_without_nested_arrays_become_ungrouped_siblings() {
        let doc = json!([
            {"kind": "eng", "members": [{"role": "dev"}]},
            {"kind": "eng"}
        ]);
        let tree = aggregate(&doc, &fields(&["kind", "role"])).unwrap();

        let eng = tree.child("kind=eng").unwrap();
        assert_eq!(eng.weight, 2);
        assert_eq!(child_labels(eng), vec!["role=dev", "(ungrouped)"]);
    }

    #[test]
    fn test_wrapper_fields_are_searched_for_rows() {
        let doc = json!({
            "page": 1,
            "items": [{"type": "a"}, {"type": "b"}],
            "more": {"items": [{"type": "a"}]}
        });
        let tree = aggregate(&doc, &fields(&["type"])).unwrap();

        assert_eq!(tree.weight, 3);
        assert_eq!(child_labels(&tree), vec!["type=a", "type=b"]);
        assert_eq!(tree.child("type=a").unwrap().weight, 2);
    }

    #[test]
    fn test_rows_without_fields_are_not_searched() {
        let doc = json!([
            {"type": "a"},
            {"name": "wrapper", "items": [{"type": "a"}]},
            [{"type": "a"}]
        ]);
        let tree = aggregate(&doc, &fields(&["type"])).unwrap();

        assert_eq!(tree.weight, 3);
        assert_eq!(child_labels(&tree), vec!["type=a", "(ungrouped)"]);
        assert_eq!(tree.child("type=a").unwrap().weight, 1);
        assert_eq!(tree.child("(ungrouped)").unwrap().weight, 2);
    }

    #[test]
    fn test_scalar_arrays_count_once() {
        let doc = json!({"users": [
            {"type": "admin", "name": "Ada", "tags": ["a", "b", "c"]},
            {"type": "editor", "name": "Lee"}
        ]});
        let tree = aggregate(&doc, &fields(&["type"])).unwrap();

        assert_eq!(tree.weight, 2);
        assert_eq!(tree.child("type=admin").unwrap().weight, 1);
        assert_eq!(tree.child("type=editor").unwrap().weight, 1);
    }

    #[test]
    fn test_missing_field_does_not_merge_with_sentinel_text() {
        let doc = json!([{"type": "∅"}, {"type": "a", "x": 1}, {"role": "r"}]);
        let tree = aggregate(&doc, &fields(&["type", "role"])).unwrap();

        assert_eq!(tree.children.len(), 3);
        assert_eq!(tree.children[0].key, FrameKey::Group(GroupKey::new("type", "∅")));
        assert_eq!(tree.children[2].key, FrameKey::Group(GroupKey::missing("type")));
        assert_eq!(tree.children[2].label, "type=∅");
    }

    #[test]
    fn test_object_group_values_are_canonical() {
        let doc = json!([
            {"meta": {"b": 1, "a": 2}},
            {"meta": {"a": 2, "b": 1}}
        ]);
        let tree = aggregate(&doc, &fields(&["meta"])).unwrap();

        assert_eq!(child_labels(&tree), vec![r#"meta={"a":2,"b":1}"#]);
        assert_eq!(tree.children[0].weight, 2);
    }

    #[test]
    fn test_embedded_json_is_opt_in() {
        let doc = json!({"payload": "[{\"type\": \"a\"}, {\"type\": \"b\"}]"});

        let plain = aggregate(&doc, &fields(&["type"])).unwrap();
        assert_eq!(plain.weight, 1);
        assert!(plain.is_leaf());

        let options = AggregateOptions::new(fields(&["type"])).with_expand_embedded_json(true);
        let expanded = aggregate_with(&doc, &options).unwrap();
        assert_eq!(expanded.weight, 2);
        assert_eq!(child_labels(&expanded), vec!["type=a", "type=b"]);
    }

    #[test]
    fn test_count_terminal_items() {
        assert_eq!(count_terminal_items(&json!({}), false), 1);
        assert_eq!(count_terminal_items(&json!([]), false), 1);
        assert_eq!(count_terminal_items(&json!([[], [1, 2]]), false), 1);
        assert_eq!(count_terminal_items(&json!({"tags": [1, 2, 3]}), false), 1);
        assert_eq!(count_terminal_items(&json!([{"a": 1}, {"b": [1, 2]}]), false), 2);
        assert_eq!(count_terminal_items(&json!([[{"a": 1}, {"a": 2}], 5]), false), 3);
        assert_eq!(
            count_terminal_items(&json!({"a": [{"x": 1}], "b": {"c": [{"y": 1}, {"y": 2}]}}), false),
            3
        );
    }

    #[test]
    fn test_rejects_scalar_root() {
        let err = aggregate(&json!("text"), &[]).unwrap_err();
        assert_eq!(err, FlameError::NotAContainer("a string"));
    }

    #[test]
    fn test_rejects_duplicate_fields() {
        let err = aggregate(&json!([]), &fields(&["type", "type"])).unwrap_err();
        assert_eq!(err, FlameError::DuplicateField("type".to_string()));
    }
}
