//! Render command implementation.
//!
//! The render command:
//! 1. Reads the input JSON file
//! 2. Parses the document
//! 3. Aggregates it into a frame tree
//! 4. Generates the flamegraph
//! 5. Writes output files

use crate::aggregator::{aggregate_with, calculate_tree_stats, hot_frames, AggregateOptions};
use crate::flamegraph::{generate_flamegraph, generate_text_summary, FlamegraphConfig};
use crate::output::{write_svg, write_tree};
use crate::parser::parse_document;
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the render command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct RenderArgs {
    /// Input JSON file
    pub input: PathBuf,

    /// Output path for the SVG flamegraph
    pub output_svg: PathBuf,

    /// Output path for the aggregated tree (optional)
    pub output_tree: Option<PathBuf>,

    /// Aggregation options (group-by fields, embedded JSON)
    pub aggregate: AggregateOptions,

    /// Flamegraph configuration
    pub flamegraph_config: FlamegraphConfig,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for RenderArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output_svg: PathBuf::from("flamegraph.svg"),
            output_tree: None,
            aggregate: AggregateOptions::default(),
            flamegraph_config: FlamegraphConfig::default(),
            print_summary: false,
        }
    }
}

/// Execute the render command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Input file read failures
/// * Parse, config and render errors from the core
/// * File write errors
pub fn execute_render(args: RenderArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Rendering flamegraph for: {}", args.input.display());

    info!("Step 1/4: Reading input...");
    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    info!("Step 2/4: Aggregating document...");
    let document = parse_document(&text).context("Failed to parse input document")?;
    let tree = aggregate_with(&document, &args.aggregate).context("Failed to aggregate document")?;

    let stats = calculate_tree_stats(&tree);
    info!("Tree: {}", stats.summary());

    debug!("Top 3 frames:");
    for (i, frame) in hot_frames(&tree, 3).iter().enumerate() {
        debug!(
            "  {}. {} items ({:.1}%): {}",
            i + 1,
            frame.weight,
            frame.percentage,
            frame.path
        );
    }

    info!("Step 3/4: Generating flamegraph...");
    let svg = generate_flamegraph(&tree, &args.flamegraph_config)
        .context("Failed to generate flamegraph")?;
    info!("Flamegraph has {} frames ({} bytes)", stats.node_count, svg.len());

    info!("Step 4/4: Writing output files...");
    write_svg(&svg, &args.output_svg).context("Failed to write flamegraph SVG")?;
    info!("✓ Flamegraph written to: {}", args.output_svg.display());

    if let Some(tree_path) = &args.output_tree {
        write_tree(&tree, tree_path).context("Failed to write frame tree JSON")?;
        info!("✓ Frame tree written to: {}", tree_path.display());
    }

    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("FLAMEGRAPH SUMMARY");
        println!("{}", "=".repeat(80));
        println!("Input:       {}", args.input.display());
        println!("Group by:    {}", args.aggregate.group_by.join(", "));
        println!("Total items: {}", tree.weight);
        println!("Frames:      {}", stats.node_count);
        println!("\n{}", generate_text_summary(&tree, 10));
        println!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!("Render completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Validate render arguments
///
/// **Public** - can be called before execute_render for early validation
pub fn validate_args(args: &RenderArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if !args.input.exists() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }

    if args.output_svg.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    crate::parser::validate_group_fields(&args.aggregate.group_by)?;

    let config = &args.flamegraph_config;
    if config.width < 100 {
        anyhow::bail!("Width must be at least 100");
    }

    if config.width > 100_000 {
        anyhow::bail!("Width is too large (max 100000)");
    }

    if config.row_height == 0 {
        anyhow::bail!("Row height must be greater than 0");
    }

    Ok(())
}
