//! Plain-text summary of a frame tree for terminal output.

use crate::aggregator::metrics::{hot_frames, HotFrame};
use crate::aggregator::FrameNode;

const PATH_COLUMN: usize = 44;
const BAR_WIDTH: usize = 50;

/// Create a text summary: hot frame table followed by percentage bars
pub fn generate_text_summary(tree: &FrameNode, max_lines: usize) -> String {
    let hot = hot_frames(tree, max_lines);
    let mut lines = Vec::new();

    lines.extend(render_hot_frame_table(&hot));
    lines.push(String::new());
    lines.extend(render_ascii_flamegraph(tree));

    let leaf_count = tree.iter().filter(|n| n.is_leaf()).count();
    if leaf_count > max_lines {
        lines.push(String::new());
        lines.push(format!(
            "   (Showing top {} of {} leaf frames)",
            max_lines, leaf_count
        ));
    }

    lines.join("\n")
}

fn render_hot_frame_table(hot: &[HotFrame]) -> Vec<String> {
    let rule = format!(
        "  +{}+{}+{}+",
        "-".repeat(PATH_COLUMN + 2),
        "-".repeat(14),
        "-".repeat(9)
    );

    let mut lines = vec![
        "  HOT FRAMES".to_string(),
        rule.clone(),
        format!(
            "  | {:<width$} | {:>12} | {:>7} |",
            "Frame path (heaviest first)",
            "WEIGHT",
            "%",
            width = PATH_COLUMN
        ),
        rule.clone(),
    ];

    for frame in hot {
        lines.push(format!(
            "  | {:<width$} | {:>12} | {:>6.1}% |",
            truncate_path(&frame.path, PATH_COLUMN),
            frame.weight,
            frame.percentage,
            width = PATH_COLUMN
        ));
    }

    lines.push(rule);
    lines
}

/// First two levels of the tree as horizontal bars
fn render_ascii_flamegraph(tree: &FrameNode) -> Vec<String> {
    let mut lines = vec![
        "  FLAMEGRAPH".to_string(),
        format!(
            "  {:<24} {} 100.0%",
            truncate_path(&tree.label, 24),
            "█".repeat(BAR_WIDTH)
        ),
    ];

    for child in &tree.children {
        let percentage = if tree.weight > 0 {
            (child.weight as f64 / tree.weight as f64) * 100.0
        } else {
            0.0
        };
        let bar_width = (percentage / 100.0 * BAR_WIDTH as f64).round() as usize;

        lines.push(format!(
            "  └─ {:<21} {:<bar$} {:>5.1}%",
            truncate_path(&child.label, 21),
            "█".repeat(bar_width),
            percentage,
            bar = BAR_WIDTH
        ));
    }

    lines
}

/// Keep the tail of long paths, where the distinguishing labels are
fn truncate_path(s: &str, max_len: usize) -> String {
    let len = s.chars().count();
    if len > max_len {
        let tail: String = s.chars().skip(len - (max_len - 3)).collect();
        format!("...{}", tail)
    } else {
        s.to_string()
    }
}
