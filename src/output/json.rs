//! JSON diagram output writer.
//!
//! Writes Diagram structs to JSON files with proper formatting.

use crate::reconstruct::Diagram;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write a diagram to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
///
/// # Example
/// ```ignore
/// let diagram = build_diagram(&document, &options)?;
/// write_diagram(&diagram, "sequence.json")?;
/// ```
pub fn write_diagram(diagram: &Diagram, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing diagram to: {}", output_path.display());

    super::validate_path(output_path)?;
    super::ensure_parent_dir(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, diagram).map_err(OutputError::SerializationFailed)?;

    info!(
        "Diagram written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Read a diagram from a JSON file
///
/// **Public** - useful for re-encoding a saved diagram and for testing
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_diagram(input_path: impl AsRef<Path>) -> Result<Diagram, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading diagram from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;

    let diagram: Diagram =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Diagram loaded: version {}, {} instructions",
        diagram.version,
        diagram.instructions.len()
    );

    Ok(diagram)
}
