//! Text diagram output writer.
//!
//! Writes encoded diagram source (e.g. PlantUML) to files.

use crate::utils::error::OutputError;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write encoded diagram text to a file
///
/// **Public** - main entry point for text output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is invalid
pub fn write_text(content: &str, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing diagram source to: {}", output_path.display());

    super::validate_path(output_path)?;
    super::ensure_parent_dir(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    writer
        .write_all(content.as_bytes())
        .map_err(OutputError::WriteFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    info!(
        "Diagram source written successfully ({} bytes, {:.2} KB)",
        content.len(),
        content.len() as f64 / 1024.0
    );

    Ok(())
}
