//! Listing-page scrapers.
//!
//! [`extract`] holds the site-agnostic card extractor and its [`Strategy`]
//! type; [`supremecourt`] supplies the two concrete strategies and pages.
//!
//! | Feed | Page | Filter |
//! |------|------|--------|
//! | Latest judgments | `/news/latest-judgments` | none |
//! | Future judgments | `/news` | card text contains "future judgments" |
//!
//! Adding a feed means adding a [`Strategy`] and a [`crate::pipeline::FeedJob`];
//! the extractor itself does not change.
//!
//! [`Strategy`]: extract::Strategy

pub mod extract;
pub mod supremecourt;
