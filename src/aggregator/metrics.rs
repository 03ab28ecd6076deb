//! Calculate statistics and hot frames from an aggregated tree.
//!
//! Hot frames are the leaf paths carrying the most weight: the groups
//! that dominate the document.

use super::frame::{FrameKey, FrameNode};
use log::debug;

/// A leaf path in the frame tree with its share of the total weight
#[derive(Debug, Clone, PartialEq)]
pub struct HotFrame {
    /// Labels from the root down, joined with `;` (e.g. `all;type=admin`)
    pub path: String,

    /// Terminal items under this leaf
    pub weight: u64,

    /// Percentage of the root weight
    pub percentage: f64,
}

/// Calculate hot frames from a frame tree
///
/// **Public** - main entry point for metrics calculation
///
/// # Arguments
/// * `tree` - Root frame from the aggregator
/// * `top_n` - Number of leaf paths to return
///
/// # Returns
/// Leaf paths sorted by weight (descending). Equal weights keep tree order.
pub fn hot_frames(tree: &FrameNode, top_n: usize) -> Vec<HotFrame> {
    let mut leaves = Vec::new();
    let mut path = Vec::new();
    collect_leaves(tree, &mut path, &mut leaves);

    debug!("Ranking {} leaf frames, keeping top {}", leaves.len(), top_n);

    // Stable sort keeps first-seen order between equal weights
    leaves.sort_by(|a, b| b.1.cmp(&a.1));

    leaves
        .into_iter()
        .take(top_n)
        .map(|(path, weight)| create_hot_frame(path, weight, tree.weight))
        .collect()
}

fn collect_leaves<'a>(
    node: &'a FrameNode,
    path: &mut Vec<&'a str>,
    out: &mut Vec<(String, u64)>,
) {
    path.push(&node.label);
    if node.is_leaf() {
        out.push((path.join(";"), node.weight));
    } else {
        for child in &node.children {
            collect_leaves(child, path, out);
        }
    }
    path.pop();
}

/// Create a HotFrame from a leaf path
///
/// **Public** - also used by the text summary for the root row
pub fn create_hot_frame(path: String, weight: u64, total_weight: u64) -> HotFrame {
    let percentage = if total_weight > 0 {
        (weight as f64 / total_weight as f64) * 100.0
    } else {
        0.0
    };

    HotFrame {
        path,
        weight,
        percentage,
    }
}

/// Shape statistics of a frame tree
///
/// **Public** - returned from calculate_tree_stats
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeStats {
    /// Root weight (terminal items in the document)
    pub total_weight: u64,

    /// Frames in the tree, root included
    pub node_count: usize,

    /// Frames without children
    pub leaf_count: usize,

    /// Rows the flamegraph needs, root row included
    pub levels: usize,

    /// Weight that landed in `(ungrouped)` frames
    pub ungrouped_weight: u64,
}

impl TreeStats {
    /// Percentage of the total weight that could not be grouped
    pub fn ungrouped_percentage(&self) -> f64 {
        if self.total_weight > 0 {
            (self.ungrouped_weight as f64 / self.total_weight as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Weight: {} | Frames: {} | Leaves: {} | Levels: {} | Ungrouped: {:.1}%",
            self.total_weight,
            self.node_count,
            self.leaf_count,
            self.levels,
            self.ungrouped_percentage()
        )
    }
}

/// Calculate shape statistics for a frame tree
pub fn calculate_tree_stats(tree: &FrameNode) -> TreeStats {
    let mut stats = TreeStats {
        total_weight: tree.weight,
        levels: tree.levels(),
        ..TreeStats::default()
    };

    for node in tree.iter() {
        stats.node_count += 1;
        if node.is_leaf() {
            stats.leaf_count += 1;
        }
        if node.key == FrameKey::Ungrouped {
            stats.ungrouped_weight += node.weight;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::frame::GroupKey;

    fn group(field: &str, value: &str, depth: usize, weight: u64) -> FrameNode {
        FrameNode::new(FrameKey::Group(GroupKey::new(field, value)), depth, weight)
    }

    fn sample_tree() -> FrameNode {
        let mut root = FrameNode::new(FrameKey::Root, 0, 10);
        let mut eng = group("kind", "eng", 1, 7);
        eng.children.push(group("role", "dev", 2, 5));
        eng.children.push(FrameNode::new(FrameKey::Ungrouped, 2, 2));
        root.children.push(eng);
        root.children.push(group("kind", "ops", 1, 3));
        root
    }

    #[test]
    fn test_hot_frames_sorted_by_weight() {
        let hot = hot_frames(&sample_tree(), 10);

        let paths: Vec<&str> = hot.iter().map(|h| h.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["all;kind=eng;role=dev", "all;kind=ops", "all;kind=eng;(ungrouped)"]
        );
        assert_eq!(hot[0].weight, 5);
        assert_eq!(hot[0].percentage, 50.0);
    }

    #[test]
    fn test_hot_frames_top_n() {
        assert_eq!(hot_frames(&sample_tree(), 1).len(), 1);
    }

    #[test]
    fn test_hot_frames_ties_keep_tree_order() {
        let mut root = FrameNode::new(FrameKey::Root, 0, 2);
        root.children.push(group("t", "b", 1, 1));
        root.children.push(group("t", "a", 1, 1));

        let hot = hot_frames(&root, 2);
        assert_eq!(hot[0].path, "all;t=b");
        assert_eq!(hot[1].path, "all;t=a");
    }

    #[test]
    fn test_calculate_tree_stats() {
        let stats = calculate_tree_stats(&sample_tree());

        assert_eq!(stats.total_weight, 10);
        assert_eq!(stats.node_count, 5);
        assert_eq!(stats.leaf_count, 3);
        assert_eq!(stats.levels, 3);
        assert_eq!(stats.ungrouped_weight, 2);
        assert_eq!(stats.ungrouped_percentage(), 20.0);
        assert!(stats.summary().contains("Frames: 5"));
    }

    #[test]
    fn test_create_hot_frame_zero_total() {
        let hot = create_hot_frame("all".to_string(), 0, 0);
        assert_eq!(hot.percentage, 0.0);
    }
}
