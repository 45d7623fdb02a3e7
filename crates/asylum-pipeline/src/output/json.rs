//! JSON chart deck writer.
//!
//! Writes ChartDeck structs to JSON files with proper formatting.

use crate::parser::schema::ChartDeck;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write a chart deck to a JSON file
///
/// # Arguments
/// * `deck` - Chart data to write
/// * `output_path` - Path to output JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_deck(deck: &ChartDeck, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing chart deck to: {}", output_path.display());

    super::validate_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
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

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, deck).map_err(OutputError::SerializationFailed)?;

    info!(
        "Chart deck written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Calculate file size in bytes
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Read a chart deck from a JSON file
///
/// # Errors
/// * `OutputError::ReadFailed` - File cannot be opened
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_deck(input_path: impl AsRef<Path>) -> Result<ChartDeck, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading chart deck from: {}", input_path.display());

    let file = File::open(input_path).map_err(|source| OutputError::ReadFailed {
        path: input_path.to_path_buf(),
        source,
    })?;
    let deck: ChartDeck =
        serde_json::from_reader(std::io::BufReader::new(file)).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Chart deck loaded: version {}, generated {}",
        deck.version, deck.generated_at
    );

    Ok(deck)
}
