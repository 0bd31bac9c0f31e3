//! Error taxonomy for a feed generation run.
//!
//! Only failures that should abort the run live here: network and HTTP
//! failures, bad configuration, and output-sink failures. Markup that does not
//! look the way the extractor expects is never an error; it degrades to the
//! documented defaults in [`crate::scrapers::extract`].

use std::path::PathBuf;

/// Everything that can abort a run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request never produced a response (DNS, TLS, timeout, body read).
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("invalid URL `{url}`: {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },

    /// The XML writer rejected an event or produced invalid UTF-8.
    #[error("failed to render feed: {0}")]
    Render(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
