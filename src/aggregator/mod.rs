//! Aggregation of JSON documents into weighted frame trees.
//!
//! This module transforms a parsed document into:
//! - A frame tree (for flamegraph generation)
//! - Hot frame analysis (heaviest groups)
//! - Tree shape statistics

pub mod frame;
pub mod metrics;
pub mod tree_builder;

// Re-export main types and functions
pub use frame::{canonical_json, stringify_value, FrameKey, FrameNode, GroupKey};
pub use metrics::{calculate_tree_stats, hot_frames, HotFrame, TreeStats};
pub use tree_builder::{aggregate, aggregate_with, count_terminal_items, AggregateOptions};
