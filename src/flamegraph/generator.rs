//! SVG flamegraph generation.
//!
//! Writes a self-contained SVG document by hand:
//! - Title band on top, root row directly under it (icicle layout)
//! - Colors derived from frame labels
//! - No scripts, timestamps or generated IDs, so output is reproducible

use super::layout::{canvas_height, compute_layout, PlacedFrame};
use crate::aggregator::FrameNode;
use crate::utils::config::{
    CHAR_WIDTH, DEFAULT_HEADER_HEIGHT, DEFAULT_ROW_HEIGHT, DEFAULT_TITLE, DEFAULT_WIDTH,
    MIN_LABEL_WIDTH,
};
use crate::utils::error::FlameError;
use log::debug;

/// Flamegraph configuration
#[derive(Debug, Clone)]
pub struct FlamegraphConfig {
    pub title: String,
    pub width: usize,
    pub row_height: usize,
    pub header_height: usize,
}

impl Default for FlamegraphConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            width: DEFAULT_WIDTH,
            row_height: DEFAULT_ROW_HEIGHT,
            header_height: DEFAULT_HEADER_HEIGHT,
        }
    }
}

impl FlamegraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn with_row_height(mut self, row_height: usize) -> Self {
        self.row_height = row_height;
        self
    }
}

/// Render a frame tree with default geometry and the given title
pub fn render(tree: &FrameNode, title: &str) -> Result<String, FlameError> {
    generate_flamegraph(tree, &FlamegraphConfig::new().with_title(title))
}

/// Generate SVG flamegraph from a frame tree
///
/// # Errors
/// * `FlameError::MalformedTree` - the tree breaks an aggregator invariant
pub fn generate_flamegraph(tree: &FrameNode, config: &FlamegraphConfig) -> Result<String, FlameError> {
    validate_tree(tree)?;

    let frames = compute_layout(tree, config);
    debug!("Generating flamegraph with {} frames", frames.len());

    let width = config.width;
    let height = canvas_height(tree, config);
    let mut svg_content = String::new();

    // Header
    svg_content.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        width, height, width, height
    ));
    svg_content.push('\n');

    // Styles
    svg_content.push_str(
        r#"<style>.title { font: bold 16px sans-serif; } .frame text { font: 12px sans-serif; fill: rgb(0, 0, 0); }</style>"#,
    );
    svg_content.push('\n');

    // Title
    svg_content.push_str(&format!(
        r#"<text class="title" x="{}" y="{}" text-anchor="middle">{}</text>"#,
        width / 2,
        config.header_height * 2 / 3,
        escape_xml(&config.title)
    ));
    svg_content.push('\n');

    for frame in &frames {
        render_frame(frame, tree.weight, &mut svg_content);
    }

    svg_content.push_str("</svg>\n");

    debug!("Flamegraph generated ({} bytes)", svg_content.len());
    Ok(svg_content)
}

fn render_frame(frame: &PlacedFrame, total_weight: u64, out: &mut String) {
    let node = frame.node;
    let rect = &frame.rect;

    out.push_str(&format!(
        r#"<g class="frame"><title>{}</title>"#,
        escape_xml(&format_tooltip(node, total_weight))
    ));
    out.push_str(&format!(
        r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" stroke="white" stroke-width="0.5"/>"#,
        rect.x, rect.y, rect.width, rect.height, rect.fill
    ));

    if let Some(display_name) = get_truncated_name(&node.label, rect.width) {
        out.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}">{}</text>"#,
            rect.x + 3.0,
            rect.y + rect.height - 5.0,
            escape_xml(&display_name)
        ));
    }

    out.push_str("</g>\n");
}

/// Tooltip text: label, weight and share of the whole document
fn format_tooltip(node: &FrameNode, total_weight: u64) -> String {
    let percentage = if total_weight > 0 {
        (node.weight as f64 / total_weight as f64) * 100.0
    } else {
        0.0
    };
    format!("{} (weight {}, {:.2}%)", node.label, node.weight, percentage)
}

/// Calculate truncated name for a frame based on width
///
/// Returns `None` when the rectangle is too narrow for readable text.
pub fn get_truncated_name(name: &str, width: f64) -> Option<String> {
    if width <= MIN_LABEL_WIDTH || name.is_empty() {
        return None;
    }

    let max_chars = (width / CHAR_WIDTH) as usize;
    let len = name.chars().count();

    if len <= max_chars {
        Some(name.to_string())
    } else if max_chars > 3 {
        let head: String = name.chars().take(max_chars - 3).collect();
        Some(format!("{}...", head))
    } else {
        None
    }
}

/// Check the invariants the layout relies on
///
/// A violation means the tree did not come from the aggregator as-is;
/// it is reported, never patched.
pub fn validate_tree(tree: &FrameNode) -> Result<(), FlameError> {
    if tree.weight == 0 {
        return Err(FlameError::MalformedTree(
            "root frame has zero weight".to_string(),
        ));
    }
    validate_frame(tree, true)
}

fn validate_frame(node: &FrameNode, is_root: bool) -> Result<(), FlameError> {
    if !is_root {
        if node.label.is_empty() {
            return Err(FlameError::MalformedTree(format!(
                "frame at depth {} has an empty label",
                node.depth
            )));
        }
        if node.weight == 0 {
            return Err(FlameError::MalformedTree(format!(
                "frame \"{}\" has zero weight",
                node.label
            )));
        }
    }

    if !node.children.is_empty() {
        let sum: u128 = node.children.iter().map(|c| c.weight as u128).sum();
        if sum != node.weight as u128 {
            return Err(FlameError::MalformedTree(format!(
                "frame \"{}\" has weight {} but its children add up to {}",
                node.label, node.weight, sum
            )));
        }
    }

    node.children
        .iter()
        .try_for_each(|child| validate_frame(child, false))
}

/// Escape text for use in SVG content and attributes
pub fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
