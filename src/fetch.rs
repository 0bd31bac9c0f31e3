//! Page retrieval.
//!
//! The pipeline only needs "give me the parsed page at this URL". That seam is
//! the [`PageSource`] trait: [`HttpFetcher`] implements it over `reqwest` for
//! real runs, and tests substitute canned HTML.

use crate::error::{Error, Result};
use scraper::Html;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};
use url::Url;

/// Anything that can turn a URL into a parsed HTML document.
pub(crate) trait PageSource {
    /// Fetch and parse the page at `url`.
    ///
    /// # Errors
    ///
    /// Transport failures and non-success HTTP statuses are errors; the caller
    /// treats them as fatal for the run.
    async fn fetch(&self, url: &Url) -> Result<Html>;
}

/// [`PageSource`] backed by a `reqwest::Client` with a fixed User-Agent and
/// request timeout.
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|source| Error::Http {
                url: "(client setup)".to_string(),
                source,
            })?;
        Ok(Self { client, timeout })
    }
}

impl fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpFetcher")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl PageSource for HttpFetcher {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch(&self, url: &Url) -> Result<Html> {
        let t0 = Instant::now();
        let http_err = |source: reqwest::Error| Error::Http {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(http_err)?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Source page returned an error status");
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(http_err)?;
        info!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched source page"
        );
        Ok(Html::parse_document(&body))
    }
}
