//! Frame tree JSON writer and reader.
//!
//! Saves the aggregated tree so it can be inspected or re-rendered
//! without the source document.

use crate::aggregator::FrameNode;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Write a frame tree to a pretty-printed JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_tree(tree: &FrameNode, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing frame tree to: {}", output_path.display());

    let mut writer = super::create_output(output_path)?;

    serde_json::to_writer_pretty(&mut writer, tree).map_err(OutputError::SerializationFailed)?;
    writer.write_all(b"\n").map_err(OutputError::WriteFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    info!("Frame tree written successfully (weight {})", tree.weight);

    Ok(())
}

/// Serialize a frame tree to a JSON string
pub fn tree_to_string(tree: &FrameNode) -> Result<String, OutputError> {
    serde_json::to_string_pretty(tree).map_err(OutputError::SerializationFailed)
}

/// Read a frame tree from a JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_tree(input_path: impl AsRef<Path>) -> Result<FrameNode, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading frame tree from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let tree: FrameNode =
        serde_json::from_reader(BufReader::new(file)).map_err(OutputError::SerializationFailed)?;

    debug!("Frame tree loaded: weight {}", tree.weight);

    Ok(tree)
}
