//! # uksc-feeds
//!
//! Builds two RSS 2.0 feeds from the UK Supreme Court website, which offers no
//! subscription filtered to judgments:
//!
//! - `latest-judgments.xml` from <https://www.supremecourt.uk/news/latest-judgments>
//! - `future-judgments.xml` from the "Future judgments" entries on
//!   <https://www.supremecourt.uk/news>
//!
//! ## Usage
//!
//! ```sh
//! uksc_feeds -o ./public
//! ```
//!
//! ## Architecture
//!
//! 1. **Fetching**: download each listing page ([`fetch`])
//! 2. **Extraction**: turn cards into deduplicated, capped items ([`scrapers`])
//! 3. **Rendering**: assemble an RSS document per feed ([`outputs::rss`])
//! 4. **Output**: write both files, only after both feeds are built ([`outputs::files`])

use chrono::Utc;
use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod config;
mod dates;
mod error;
mod fetch;
mod identity;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;

use cli::Cli;
use config::Settings;
use error::Result;
use fetch::HttpFetcher;
use outputs::files::write_feed;
use pipeline::{build_all, RenderedFeed};
use utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> ExitCode {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();
    info!("uksc-feeds starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    match run(args).await {
        Ok(feeds) => {
            for feed in &feeds {
                println!("Wrote {} ({} items)", feed.file_name, feed.item_count);
            }
            let elapsed = start_time.elapsed();
            info!(?elapsed, feeds = feeds.len(), "Execution complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Run failed");
            eprintln!("ERROR: {e}");
            ExitCode::FAILURE
        }
    }
}

#[instrument(level = "info", skip_all)]
async fn run(args: Cli) -> Result<Vec<RenderedFeed>> {
    let settings = Settings::load(args.config.as_deref()).await?.with_cli(&args);
    info!(
        base_url = %settings.base_url,
        output_dir = %settings.output_dir.display(),
        timeout_secs = settings.timeout_secs,
        "Resolved settings"
    );

    // Early check: fail on a bad output path before touching the network
    ensure_writable_dir(&settings.output_dir).await?;

    let base = settings.base_url()?;
    let jobs = scrapers::supremecourt::feed_jobs(&base)?;
    let fetcher = HttpFetcher::new(&settings.user_agent, settings.timeout())?;

    let run_started = Utc::now();
    let feeds = build_all(&fetcher, &jobs, &base, run_started).await?;

    // Every feed is fully built before the first file is touched
    for feed in &feeds {
        write_feed(&settings.output_dir, feed).await?;
    }
    Ok(feeds)
}
