//! Flamegraph layout and SVG rendering.
//!
//! This module converts a frame tree into a static SVG flamegraph.
//! Width encodes weight, vertical position encodes depth.

pub mod generator;
pub mod layout;
pub mod palette;
pub mod summary;

// Re-export main types
pub use generator::{generate_flamegraph, render, validate_tree, FlamegraphConfig};
pub use layout::{canvas_height, compute_layout, LayoutRect, PlacedFrame};
pub use summary::generate_text_summary;
