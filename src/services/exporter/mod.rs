//! Snapshot export
//!
//! One snapshot file per calendar day, named for the run date and
//! written next to the executable, so same-day runs accumulate rows
//! and a new day starts a new file. Styled spreadsheet output is the
//! primary path; a build without the `xlsx` feature degrades to a
//! plain JSON dump of the current batch.

use crate::types::Result;
use chrono::Local;
use std::path::PathBuf;

pub mod json;
#[cfg(feature = "xlsx")]
pub mod xlsx;

/// Base name shared by the spreadsheet and fallback artifacts
const FILE_STEM: &str = "merged_numberland";

/// Timestamps captured once per run: the human-readable label used for
/// the date column and banner, and the date-only filename component.
pub struct RunStamp {
    pub timestamp: String,
    pub date: String,
}

impl RunStamp {
    /// Capture the local wall clock
    pub fn now() -> Self {
        let now = Local::now();
        Self {
            timestamp: now.format("%Y-%m-%d %H:%M").to_string(),
            date: now.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Directory the artifacts land in: next to the executable itself
pub fn output_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    Ok(exe
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".")))
}
