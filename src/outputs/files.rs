//! Feed file output.
//!
//! Each feed is written to `<file>.tmp` next to its destination and renamed
//! into place, so a reader polling the output directory sees either the
//! previous feed or the new one, never a truncated file.

use crate::error::{Error, Result};
use crate::pipeline::RenderedFeed;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Write `feed` into `output_dir`, replacing any previous version.
///
/// # Returns
///
/// The final path of the written file.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir.display(), file = feed.file_name))]
pub async fn write_feed(output_dir: &Path, feed: &RenderedFeed) -> Result<PathBuf> {
    let path = output_dir.join(feed.file_name);
    let tmp_path = output_dir.join(format!("{}.tmp", feed.file_name));

    fs::write(&tmp_path, feed.xml.as_bytes())
        .await
        .map_err(|e| Error::io(&tmp_path, e))?;
    fs::rename(&tmp_path, &path)
        .await
        .map_err(|e| Error::io(&path, e))?;

    info!(path = %path.display(), items = feed.item_count, "Wrote feed");
    Ok(path)
}
