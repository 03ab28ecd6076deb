//! Output writers for flamegraphs and frame trees.
//!
//! This module handles writing data to disk in various formats:
//! - SVG flamegraphs
//! - JSON frame trees (and reading them back)

pub mod json;
pub mod svg;

// Re-export main functions
pub use json::{read_tree, tree_to_string, write_tree};
pub use svg::write_svg;

use crate::utils::error::OutputError;
use log::debug;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Create the parent directories of an output path if needed
fn ensure_parent_dir(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}

/// Validate `path`, create its parent directories and open it for writing
fn create_output(path: &Path) -> Result<BufWriter<File>, OutputError> {
    validate_path(path)?;
    ensure_parent_dir(path)?;
    let file = File::create(path).map_err(OutputError::WriteFailed)?;
    Ok(BufWriter::new(file))
}
