//! engulf CLI
//!
//! Creates flamegraphs from JSON documents, grouping array rows by
//! object fields.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use engulf::aggregator::AggregateOptions;
use engulf::commands::{execute_render, inspect_tree_file, validate_args, RenderArgs};
use engulf::flamegraph::FlamegraphConfig;
use engulf::utils::config::{DEFAULT_TITLE, DEFAULT_WIDTH};

/// engulf - create flamegraphs from JSON
#[derive(Parser, Debug)]
#[command(name = "engulf")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a JSON file as an SVG flamegraph
    Render {
        /// Input JSON file
        input: PathBuf,

        /// Output path for the SVG flamegraph
        #[arg(short, long, default_value = "flamegraph.svg")]
        output: PathBuf,

        /// Group array elements (objects) by one or more keys, one key per level
        #[arg(long = "group-by", num_args = 1.., value_name = "KEY")]
        group_by: Vec<String>,

        /// Flamegraph title
        #[arg(long, default_value = DEFAULT_TITLE)]
        title: String,

        /// Flamegraph width in SVG units
        #[arg(long, default_value_t = DEFAULT_WIDTH)]
        width: usize,

        /// Treat strings containing JSON objects or arrays as nested documents
        #[arg(long)]
        expand_strings: bool,

        /// Also write the aggregated frame tree as JSON
        #[arg(long, value_name = "PATH")]
        tree: Option<PathBuf>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Check a frame tree JSON file written by `render --tree`
    Inspect {
        /// Path to frame tree JSON file
        file: PathBuf,

        /// Print the hot frame table as well
        #[arg(long)]
        frames: bool,
    },
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Render {
            input,
            output,
            group_by,
            title,
            width,
            expand_strings,
            tree,
            summary,
        } => {
            let args = RenderArgs {
                input,
                output_svg: output,
                output_tree: tree,
                aggregate: AggregateOptions::new(group_by)
                    .with_expand_embedded_json(expand_strings),
                flamegraph_config: FlamegraphConfig::new().with_title(title).with_width(width),
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            execute_render(args)?;
        }

        Commands::Inspect { file, frames } => {
            inspect_tree_file(&file, frames)?;
        }
    }

    Ok(())
}
