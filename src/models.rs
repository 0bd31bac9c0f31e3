//! Data models shared by the extractor and the feed assembler.
//!
//! - [`CandidateItem`]: one judgment entry scraped from a listing page
//! - [`FeedChannelMeta`]: channel-level metadata for one generated feed
//!
//! Nothing here outlives a single run; there is no persistence.

use chrono::{DateTime, Utc};

/// A normalized feed entry produced from one matched page element.
///
/// `identity` is derived from `link`, `title` and `raw_date_text` by
/// [`crate::identity::identity`], so the same element yields the same
/// identity on every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateItem {
    /// Normalized anchor text, or the strategy's default title.
    pub title: String,
    /// Absolute URL of the linked page.
    pub link: String,
    /// Date text as found on the page, before interpretation. May be empty.
    pub raw_date_text: String,
    /// Midnight UTC of the parsed date, or the run-start time when unparseable.
    pub published_at: DateTime<Utc>,
    /// Category label or the strategy's default description.
    pub description: String,
    /// 64-character hex digest used as guid and dedup key.
    pub identity: String,
}

/// Channel metadata for one feed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedChannelMeta {
    pub title: String,
    /// Canonical page on the court website the feed mirrors.
    pub link: String,
    pub description: String,
    /// Rendered as `<lastBuildDate>`.
    pub generated_at: DateTime<Utc>,
}
