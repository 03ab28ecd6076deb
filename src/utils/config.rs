//! Configuration and constants shared by the aggregator and the renderer.

/// Default canvas width in SVG user units
pub const DEFAULT_WIDTH: usize = 1200;

/// Height of one flamegraph level
pub const DEFAULT_ROW_HEIGHT: usize = 18;

/// Height of the band reserved for the title above the root row
pub const DEFAULT_HEADER_HEIGHT: usize = 36;

/// Title used by the CLI when none is given
pub const DEFAULT_TITLE: &str = "JSON Flame Graph";

// Label fitting: rectangles narrower than MIN_LABEL_WIDTH get no text,
// CHAR_WIDTH approximates a 12px sans-serif glyph.
pub const MIN_LABEL_WIDTH: f64 = 35.0;
pub const CHAR_WIDTH: f64 = 7.0;

/// Label of the synthetic root frame
pub const ROOT_LABEL: &str = "all";

/// Label of the catch-all bucket for rows that carry no group-by field
pub const UNGROUPED_LABEL: &str = "(ungrouped)";

/// Stringified value of a group-by field that a row does not carry
pub const MISSING_VALUE: &str = "∅";
