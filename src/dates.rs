//! Date interpretation for judgment listings.
//!
//! The court prints dates as "15 January 2026" with no time of day, so a
//! successful parse yields midnight UTC. Anything else falls back to the
//! caller-supplied timestamp (the run start): an unrecognized date stamps the
//! item "now" rather than dropping it.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

/// Day-of-month, full English month name, four-digit year.
const LISTING_DATE_FORMAT: &str = "%d %B %Y";

/// `<pubDate>` / `<lastBuildDate>` layout with a fixed UTC offset.
const RFC2822_FORMAT: &str = "%a, %d %b %Y %H:%M:%S +0000";

/// Parse `date_text` as a listing date, or return `fallback` unchanged.
pub fn interpret(date_text: &str, fallback: DateTime<Utc>) -> DateTime<Utc> {
    if date_text.is_empty() {
        return fallback;
    }
    match NaiveDate::parse_from_str(date_text, LISTING_DATE_FORMAT) {
        Ok(date) => date
            .and_hms_opt(0, 0, 0)
            .map(|midnight| midnight.and_utc())
            .unwrap_or(fallback),
        Err(e) => {
            debug!(%date_text, error = %e, "Unparseable listing date; using fallback");
            fallback
        }
    }
}

/// Render a timestamp the way RSS 2.0 readers expect.
pub fn rfc2822(at: DateTime<Utc>) -> String {
    at.format(RFC2822_FORMAT).to_string()
}
