//! Feed pipelines: fetch → extract → assemble, entirely in memory.
//!
//! Nothing here touches the filesystem. [`build_all`] returns every rendered
//! feed or the first error, so the caller can decide to write files only once
//! all feeds are ready.

use crate::error::Result;
use crate::fetch::PageSource;
use crate::models::FeedChannelMeta;
use crate::outputs::rss::assemble;
use crate::scrapers::extract::{extract, ExtractionContext, Strategy};
use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use tracing::{info, instrument};
use url::Url;

/// Everything that distinguishes one feed from another.
#[derive(Debug, Clone)]
pub struct FeedJob {
    /// Output file name, e.g. `latest-judgments.xml`.
    pub file_name: &'static str,
    /// Listing page to scrape; also used as the channel link.
    pub source_url: Url,
    pub strategy: Strategy,
    pub title: &'static str,
    pub description: &'static str,
}

/// A feed document ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFeed {
    pub file_name: &'static str,
    pub xml: String,
    pub item_count: usize,
}

/// Build one feed.
///
/// `run_started` is both the channel's build time and the date stamped on
/// items whose listing date cannot be read.
#[instrument(level = "info", skip_all, fields(feed = job.file_name, url = %job.source_url))]
pub(crate) async fn build_feed<S: PageSource>(
    source: &S,
    job: &FeedJob,
    base: &Url,
    run_started: DateTime<Utc>,
) -> Result<RenderedFeed> {
    let document = source.fetch(&job.source_url).await?;
    let items = extract(&ExtractionContext {
        document: &document,
        strategy: &job.strategy,
        base,
        run_started,
    });

    let meta = FeedChannelMeta {
        title: job.title.to_string(),
        link: job.source_url.to_string(),
        description: job.description.to_string(),
        generated_at: run_started,
    };
    let xml = assemble(&meta, &items)?;

    info!(items = items.len(), "Built feed");
    Ok(RenderedFeed {
        file_name: job.file_name,
        xml,
        item_count: items.len(),
    })
}

/// Build every feed concurrently; any failure fails the whole run.
pub(crate) async fn build_all<S: PageSource>(
    source: &S,
    jobs: &[FeedJob],
    base: &Url,
    run_started: DateTime<Utc>,
) -> Result<Vec<RenderedFeed>> {
    try_join_all(
        jobs.iter()
            .map(|job| build_feed(source, job, base, run_started)),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::scrapers::supremecourt::{feed_jobs, DEFAULT_BASE_URL};
    use chrono::TimeZone;
    use scraper::Html;
    use std::collections::HashMap;

    /// Serves canned HTML; unknown URLs answer 404.
    struct CannedPages(HashMap<String, &'static str>);

    impl PageSource for CannedPages {
        async fn fetch(&self, url: &Url) -> Result<Html> {
            match self.0.get(url.as_str()) {
                Some(body) => Ok(Html::parse_document(body)),
                None => Err(Error::Status {
                    url: url.to_string(),
                    status: 404,
                }),
            }
        }
    }

    const LATEST_PAGE: &str = r#"
        <html><body>
          <nav><a href="/about">About</a></nav>
          <div class="grid">
            <div class="card">
              <a href="/cases/miller">R (Miller) v Secretary of State</a>
              <time>15 January 2026</time>
              <span class="category">UKSC</span>
            </div>
            <div class="card">
              <a href="/cases/uksc-2025-0042">Smith &amp; Co v Jones</a>
              <time>8 January 2026</time>
            </div>
          </div>
        </body></html>"#;

    const NEWS_PAGE: &str = r#"
        <html><body>
          <article>
            <a href="/news/future-judgments-w-c-19-january">Future judgments: w/c 19 January 2026</a>
            <span class="category">Future judgments</span>
            <time>12 January 2026</time>
          </article>
          <article>
            <a href="/news/court-sitting-in-belfast">Court to sit in Belfast</a>
            <span class="category">Press release</span>
            <time>9 January 2026</time>
          </article>
        </body></html>"#;

    fn run_start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap()
    }

    fn site(pages: &[(&str, &'static str)]) -> CannedPages {
        CannedPages(
            pages
                .iter()
                .map(|(url, body)| (url.to_string(), *body))
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_build_all_renders_both_feeds() {
        let base = Url::parse(DEFAULT_BASE_URL).unwrap();
        let jobs = feed_jobs(&base).unwrap();
        let source = site(&[
            ("https://www.supremecourt.uk/news/latest-judgments", LATEST_PAGE),
            ("https://www.supremecourt.uk/news", NEWS_PAGE),
        ]);

        let feeds = build_all(&source, &jobs, &base, run_start()).await.unwrap();
        assert_eq!(feeds.len(), 2);

        let latest = &feeds[0];
        assert_eq!(latest.file_name, "latest-judgments.xml");
        assert_eq!(latest.item_count, 2);
        assert!(latest.xml.contains("<title>R (Miller) v Secretary of State</title>"));
        assert!(latest.xml.contains("<title>Smith &amp; Co v Jones</title>"));
        assert!(latest.xml.contains("<pubDate>Thu, 15 Jan 2026 00:00:00 +0000</pubDate>"));
        // No category on the second card
        assert!(latest.xml.contains("<![CDATA[Latest judgments]]>"));
        assert!(latest.xml.contains("<lastBuildDate>Fri, 16 Oct 2026 09:30:00 +0000</lastBuildDate>"));

        let future = &feeds[1];
        assert_eq!(future.file_name, "future-judgments.xml");
        assert_eq!(future.item_count, 1);
        assert!(future.xml.contains("future-judgments-w-c-19-january"));
        assert!(!future.xml.contains("Belfast"));
        assert!(future.xml.contains("<link>https://www.supremecourt.uk/news</link>"));
    }

    #[tokio::test]
    async fn test_missing_page_fails_the_run() {
        let base = Url::parse(DEFAULT_BASE_URL).unwrap();
        let jobs = feed_jobs(&base).unwrap();
        let source = site(&[("https://www.supremecourt.uk/news/latest-judgments", LATEST_PAGE)]);

        let err = build_all(&source, &jobs, &base, run_start()).await.unwrap_err();
        assert!(matches!(err, Error::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_empty_page_yields_empty_feed() {
        let base = Url::parse(DEFAULT_BASE_URL).unwrap();
        let jobs = feed_jobs(&base).unwrap();
        let source = site(&[(
            "https://www.supremecourt.uk/news/latest-judgments",
            "<html><body><p>Nothing yet</p></body></html>",
        )]);

        let feed = build_feed(&source, &jobs[0], &base, run_start()).await.unwrap();
        assert_eq!(feed.item_count, 0);
        assert!(!feed.xml.contains("<item>"));
        assert!(feed.xml.contains("<channel>"));
    }
}
