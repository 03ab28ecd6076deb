//! Inspect command: check and describe a saved frame tree.

use crate::aggregator::{calculate_tree_stats, TreeStats};
use crate::flamegraph::{generate_text_summary, validate_tree};
use crate::output::read_tree;
use anyhow::{Context, Result};
use std::path::Path;

/// Load a frame tree file, re-check its invariants and return its stats
pub fn inspect_tree(file_path: &Path) -> Result<TreeStats> {
    let tree = read_tree(file_path)
        .with_context(|| format!("Failed to read frame tree {}", file_path.display()))?;

    validate_tree(&tree).context("Frame tree is inconsistent")?;

    Ok(calculate_tree_stats(&tree))
}

/// Inspect a frame tree file and print a report
pub fn inspect_tree_file(file_path: &Path, show_frames: bool) -> Result<()> {
    println!("Inspecting frame tree: {}", file_path.display());

    let stats = inspect_tree(file_path)?;

    println!("✓ Valid frame tree");
    println!("  Total weight: {}", stats.total_weight);
    println!("  Frames:       {}", stats.node_count);
    println!("  Leaves:       {}", stats.leaf_count);
    println!("  Levels:       {}", stats.levels);
    println!("  Ungrouped:    {:.1}%", stats.ungrouped_percentage());

    if show_frames {
        let tree = read_tree(file_path)?;
        println!("\n{}", generate_text_summary(&tree, 20));
    }

    Ok(())
}
