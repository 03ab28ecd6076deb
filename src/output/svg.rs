//! SVG file writer.

use crate::utils::error::OutputError;
use log::{debug, info};
use std::io::Write;
use std::path::Path;

/// Write a rendered flamegraph to `output_path`, creating parent directories
pub fn write_svg(svg_content: &str, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    if output_path.extension().map_or(true, |ext| ext != "svg") {
        debug!("Output has no .svg extension: {}", output_path.display());
    }

    let mut writer = super::create_output(output_path)?;
    writer
        .write_all(svg_content.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(OutputError::WriteFailed)?;

    info!("Wrote {} ({} bytes)", output_path.display(), svg_content.len());
    Ok(())
}
