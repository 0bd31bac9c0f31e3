//! Utility functions for text normalization, log truncation, and file system checks.

use crate::error::{Error, Result};
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Collapse every run of whitespace into a single space and trim the ends.
///
/// Applied to every title, date string and description pulled out of the page,
/// since the court's markup spreads text over indented lines.
///
/// # Arguments
///
/// * `text` - Raw text gathered from one or more HTML text nodes
///
/// # Returns
///
/// The text with spaces, tabs, newlines and other Unicode whitespace runs
/// replaced by one space, with no leading or trailing space. Blank input
/// yields an empty string.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_space("  15\n\tJanuary   2026 "), "15 January 2026");
/// assert_eq!(normalize_space(""), "");
/// ```
pub fn normalize_space(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` bytes (backed off to a char boundary) with an
/// ellipsis and a count of the dropped bytes appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then creates and removes a probe file.
/// Run before any network work so a bad output path fails fast.
///
/// # Errors
///
/// Returns [`Error::Io`] if the directory cannot be created or written to.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .await
        .map_err(|e| Error::io(path, e))?;
    // Sync probe keeps the error surface simple
    let probe_path = path.join("..__probe_write__");
    stdfs::File::create(&probe_path).map_err(|e| Error::io(&probe_path, e))?;
    let _ = stdfs::remove_file(&probe_path);
    info!("Output directory is writable");
    Ok(())
}
