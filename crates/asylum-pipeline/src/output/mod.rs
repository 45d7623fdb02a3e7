//! Output writers for chart data.
//!
//! This module handles:
//! - JSON chart decks (write and read back)
//! - Human-readable terminal summaries

pub mod json;
pub mod summary;

// Re-export main functions
pub use json::{read_deck, write_deck};
pub use summary::{render_deck_summary, render_period_listing, render_ranking};

use crate::utils::error::OutputError;
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
