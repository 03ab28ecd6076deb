//! Flamegraph layout: one rectangle per frame.
//!
//! Depth maps to a horizontal band below the title; a child's width is
//! its share of the parent's weight. Children are placed left to right in
//! tree order, so positions never depend on weights being sorted.

use super::generator::FlamegraphConfig;
use super::palette::get_node_color;
use crate::aggregator::FrameNode;

/// Position and fill of a single frame in SVG user units
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: &'static str,
}

/// A frame paired with the rectangle it occupies
#[derive(Debug, Clone)]
pub struct PlacedFrame<'a> {
    pub node: &'a FrameNode,
    pub level: usize,
    pub rect: LayoutRect,
}

/// Total canvas height: title band plus one row per level
pub fn canvas_height(tree: &FrameNode, config: &FlamegraphConfig) -> usize {
    config.header_height + tree.levels() * config.row_height
}

/// Lay out every frame of the tree, in pre-order
///
/// Every frame gets a rectangle, however narrow, so that the weight of
/// the whole tree stays accounted for in the picture.
pub fn compute_layout<'a>(tree: &'a FrameNode, config: &FlamegraphConfig) -> Vec<PlacedFrame<'a>> {
    let mut frames = Vec::new();
    place_frame(tree, 0, 0.0, config.width as f64, config, &mut frames);
    frames
}

fn place_frame<'a>(
    node: &'a FrameNode,
    level: usize,
    x: f64,
    width: f64,
    config: &FlamegraphConfig,
    out: &mut Vec<PlacedFrame<'a>>,
) {
    let row_height = config.row_height as f64;
    let y = config.header_height as f64 + level as f64 * row_height;

    out.push(PlacedFrame {
        node,
        level,
        rect: LayoutRect {
            x,
            y,
            width,
            height: row_height,
            fill: get_node_color(&node.label),
        },
    });

    if node.weight == 0 {
        return;
    }

    // Offsets come from cumulative weights so the last child ends exactly
    // at the parent's right edge.
    let total = node.weight as f64;
    let mut cumulative = 0u64;
    for child in &node.children {
        let start = x + width * (cumulative as f64 / total);
        cumulative += child.weight;
        let end = x + width * (cumulative as f64 / total);
        place_frame(child, level + 1, start, end - start, config, out);
    }
}
