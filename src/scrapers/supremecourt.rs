//! UK Supreme Court listing pages.
//!
//! Two feeds are built from the court's website:
//!
//! - **Latest judgments**: every card on `/news/latest-judgments`.
//! - **Future judgments**: cards on the `/news` hub whose text mentions
//!   "Future judgments". The match is a plain substring test over the whole
//!   card, so a card that merely mentions the phrase is also kept.

use crate::error::{Error, Result};
use crate::pipeline::FeedJob;
use crate::scrapers::extract::{Strategy, CARD_SELECTOR};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://www.supremecourt.uk";

const LATEST_PATH: &str = "/news/latest-judgments";
const NEWS_PATH: &str = "/news";

const LATEST_LABEL: &str = "Latest judgments";
const FUTURE_LABEL: &str = "Future judgments";

/// Every card on the latest judgments page; no category filter.
pub fn latest_judgments() -> Result<Strategy> {
    Strategy::new("latest-judgments", CARD_SELECTOR, LATEST_LABEL, LATEST_LABEL)
}

/// News hub cards mentioning "Future judgments".
pub fn future_judgments() -> Result<Strategy> {
    Ok(Strategy::new("future-judgments", CARD_SELECTOR, FUTURE_LABEL, FUTURE_LABEL)?
        .with_category_filter(FUTURE_LABEL))
}

fn page(base: &Url, path: &str) -> Result<Url> {
    base.join(path).map_err(|source| Error::Url {
        url: format!("{base}{path}"),
        source,
    })
}

/// Both feeds, with pages resolved against `base`.
pub fn feed_jobs(base: &Url) -> Result<Vec<FeedJob>> {
    Ok(vec![
        FeedJob {
            file_name: "latest-judgments.xml",
            source_url: page(base, LATEST_PATH)?,
            strategy: latest_judgments()?,
            title: "UK Supreme Court – Latest judgments",
            description: "Auto-generated RSS of the Supreme Court's 'Latest judgments' updates.",
        },
        FeedJob {
            file_name: "future-judgments.xml",
            source_url: page(base, NEWS_PATH)?,
            strategy: future_judgments()?,
            title: "UK Supreme Court – Future judgments",
            description: "Auto-generated RSS of the Supreme Court's 'Future judgments' updates.",
        },
    ])
}
