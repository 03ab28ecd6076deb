//! engulf
//!
//! Flamegraphs from arbitrary JSON documents. Array rows are grouped by
//! the values of chosen object fields, one field per level, and the
//! resulting weighted tree is drawn as a static SVG flamegraph.
//!
//! ```ignore
//! let json = r#"{"users": [{"type": "admin"}, {"type": "editor"}, {"type": "admin"}]}"#;
//! let svg = engulf::render_flamegraph(json, "Users", &["type".to_string()])?;
//! ```
//!
//! The core is pure: no I/O, no global state, identical input gives
//! identical output bytes. File writers and the `engulf` CLI live in
//! [`output`] and [`commands`].

pub mod aggregator;
pub mod commands;
pub mod flamegraph;
pub mod output;
pub mod parser;
pub mod utils;

pub use aggregator::{aggregate, aggregate_with, AggregateOptions, FrameKey, FrameNode, GroupKey};
pub use flamegraph::{generate_flamegraph, render, FlamegraphConfig};
pub use utils::error::{ErrorKind, FlameError};

/// Render JSON text as an SVG flamegraph
///
/// # Errors
/// * `ErrorKind::Parse` - invalid JSON, or a scalar document root
/// * `ErrorKind::Config` - empty or duplicate group-by field
/// * `ErrorKind::Render` - internal invariant violation
pub fn render_flamegraph(json_text: &str, title: &str, group_by: &[String]) -> Result<String, FlameError> {
    let options = AggregateOptions::new(group_by.to_vec());
    let config = FlamegraphConfig::new().with_title(title);
    render_flamegraph_with(json_text, &options, &config)
}

/// Render JSON text as an SVG flamegraph with explicit options
pub fn render_flamegraph_with(
    json_text: &str,
    options: &AggregateOptions,
    config: &FlamegraphConfig,
) -> Result<String, FlameError> {
    let document = parser::parse_document(json_text)?;
    let tree = aggregate_with(&document, options)?;
    generate_flamegraph(&tree, config)
}
