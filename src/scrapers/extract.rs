//! Card extraction: turn a loosely structured listing page into feed items.
//!
//! The court's listing pages are not semantic, and their markup drifts, so
//! selection is deliberately generous: anything that looks like an article,
//! list entry or card is a candidate. Precision comes afterwards from three
//! hard skips (no link, category filter not matched, duplicate identity) and
//! from short fallback chains for title, date and description that always end
//! in a defined default.

use crate::dates::interpret;
use crate::error::{Error, Result};
use crate::identity::identity;
use crate::models::CandidateItem;
use crate::utils::{normalize_space, truncate_for_log};
use chrono::{DateTime, Utc};
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument};
use url::Url;

/// Maximum number of items emitted per feed.
pub const RESULT_CAP: usize = 25;

/// Elements that look like one listing entry.
pub const CARD_SELECTOR: &str = "article, li, div.card, .grid .card";

static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static DATE: Lazy<Selector> = Lazy::new(|| Selector::parse("time, .date, .meta time").unwrap());
static CATEGORY: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".category, .meta, .tags").unwrap());
static DATE_IN_TEXT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{1,2}\s+\w+\s+\d{4})").unwrap());

/// Extraction parameters distinguishing one feed from another.
#[derive(Debug, Clone)]
pub struct Strategy {
    /// Short label used in logs.
    pub name: &'static str,
    cards: Selector,
    /// Lowercase phrase that must appear in a card's text for it to be kept.
    pub category_filter: Option<String>,
    pub cap: usize,
    /// Used when a card's link has no visible text.
    pub default_title: &'static str,
    /// Used when a card has no category element at all.
    pub default_description: &'static str,
}

impl Strategy {
    /// Build a strategy matching cards with `card_selector`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Selector`] if `card_selector` is not valid CSS.
    pub fn new(
        name: &'static str,
        card_selector: &str,
        default_title: &'static str,
        default_description: &'static str,
    ) -> Result<Self> {
        let cards = Selector::parse(card_selector).map_err(|e| Error::Selector {
            selector: card_selector.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            name,
            cards,
            category_filter: None,
            cap: RESULT_CAP,
            default_title,
            default_description,
        })
    }

    /// Only keep cards whose text contains `phrase`, ignoring case.
    pub fn with_category_filter(mut self, phrase: &str) -> Self {
        self.category_filter = Some(phrase.to_lowercase());
        self
    }

    fn accepts(&self, card_text: &str) -> bool {
        match &self.category_filter {
            Some(phrase) => card_text.to_lowercase().contains(phrase.as_str()),
            None => true,
        }
    }
}

/// A parsed page plus everything needed to turn its cards into items.
#[derive(Clone, Copy)]
pub struct ExtractionContext<'a> {
    pub document: &'a Html,
    pub strategy: &'a Strategy,
    /// Site origin that relative links are resolved against.
    pub base: &'a Url,
    /// Stamped on items whose date cannot be read.
    pub run_started: DateTime<Utc>,
}

/// One attempt in a fallback chain.
#[derive(Debug, Clone, Copy)]
enum Lookup {
    /// Normalized text of the first descendant matching the selector; an
    /// empty text counts as a miss.
    FirstMatch(&'static Lazy<Selector>),
    /// Like `FirstMatch`, but an element that exists with empty text is a hit.
    FirstElement(&'static Lazy<Selector>),
    /// First match of the pattern in the card's normalized text.
    Pattern(&'static Lazy<Regex>),
}

impl Lookup {
    fn attempt(self, card: ElementRef<'_>, card_text: &str) -> Option<String> {
        match self {
            Lookup::FirstMatch(selector) => {
                first_text(card, selector).filter(|text| !text.is_empty())
            }
            Lookup::FirstElement(selector) => first_text(card, selector),
            Lookup::Pattern(pattern) => pattern
                .captures(card_text)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string()),
        }
    }
}

fn first_text(card: ElementRef<'_>, selector: &Selector) -> Option<String> {
    card.select(selector)
        .next()
        .map(|el| normalize_space(&el.text().collect::<String>()))
}

/// Run `chain` in order; the first hit wins.
fn first_success(chain: &[Lookup], card: ElementRef<'_>, card_text: &str) -> Option<String> {
    chain.iter().find_map(|lookup| lookup.attempt(card, card_text))
}

static DATE_CHAIN: [Lookup; 2] = [Lookup::FirstMatch(&DATE), Lookup::Pattern(&DATE_IN_TEXT)];
static DESCRIPTION_CHAIN: [Lookup; 1] = [Lookup::FirstElement(&CATEGORY)];

/// Resolve `href` against the site origin unless it is already absolute.
fn resolve_link(base: &Url, href: &str) -> String {
    match Url::parse(href) {
        // Kept verbatim: the link feeds the item identity
        Ok(_) => href.to_string(),
        Err(_) => match base.join(href) {
            Ok(joined) => joined.to_string(),
            Err(e) => {
                debug!(%href, error = %e, "Could not join href onto base; prefixing");
                format!("{}{}", base.as_str().trim_end_matches('/'), href)
            }
        },
    }
}

/// Turn one card into an item, or `None` if it must be skipped.
fn card_to_item(ctx: &ExtractionContext<'_>, card: ElementRef<'_>) -> Option<CandidateItem> {
    let strategy = ctx.strategy;
    let card_text = normalize_space(&card.text().collect::<String>());

    if !strategy.accepts(&card_text) {
        return None;
    }

    let Some(anchor) = card.select(&LINK).next() else {
        debug!(
            strategy = strategy.name,
            text = %truncate_for_log(&card_text, 80),
            "Card has no link; skipping"
        );
        return None;
    };
    let href = anchor.value().attr("href").unwrap_or_default();
    let link = resolve_link(ctx.base, href);

    let title = Some(normalize_space(&anchor.text().collect::<String>()))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| strategy.default_title.to_string());

    let raw_date_text = first_success(&DATE_CHAIN, card, &card_text).unwrap_or_default();
    let published_at = interpret(&raw_date_text, ctx.run_started);

    let description = first_success(&DESCRIPTION_CHAIN, card, &card_text)
        .unwrap_or_else(|| strategy.default_description.to_string());

    let identity = identity(&link, &title, &raw_date_text);

    Some(CandidateItem {
        title,
        link,
        raw_date_text,
        published_at,
        description,
        identity,
    })
}

/// Extract up to `strategy.cap` unique items, in document order.
///
/// An item whose identity was already emitted by this call is dropped and
/// does not count towards the cap.
#[instrument(level = "info", skip_all, fields(strategy = ctx.strategy.name))]
pub fn extract(ctx: &ExtractionContext<'_>) -> Vec<CandidateItem> {
    let items: Vec<CandidateItem> = ctx
        .document
        .select(&ctx.strategy.cards)
        .filter_map(|card| card_to_item(ctx, card))
        .unique_by(|item| item.identity.clone())
        .take(ctx.strategy.cap)
        .collect();

    info!(count = items.len(), "Extracted feed items");
    items
}
