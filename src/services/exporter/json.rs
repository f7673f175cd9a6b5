//! Plain JSON fallback
//!
//! Without the `xlsx` feature there is no spreadsheet capability: each
//! run overwrites a single JSON artifact with the current merged batch
//! only. No date column and no history accumulation in this mode.

use crate::types::{NumexError, Record, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::FILE_STEM;

/// Fallback artifact path: one file, overwritten every run
pub fn fallback_path(dir: &Path) -> PathBuf {
    dir.join(format!("{}.json", FILE_STEM))
}

/// Overwrite the fallback artifact with the merged batch
pub fn export(records: &[Record], dir: &Path) -> Result<PathBuf> {
    let path = fallback_path(dir);
    let body = serde_json::to_string_pretty(records)
        .map_err(|e| NumexError::Export(format!("serialization failed: {}", e)))?;
    fs::write(&path, body)?;
    Ok(path)
}
