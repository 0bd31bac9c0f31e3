//! Command-line interface definitions for uksc-feeds.
//!
//! Every option is optional: unset flags fall back to the YAML config file (if
//! given) and then to built-in defaults. See [`crate::config::Settings`].

use clap::Parser;
use std::path::PathBuf;

/// Generate RSS feeds of the UK Supreme Court's latest and future judgments.
///
/// # Examples
///
/// ```sh
/// # Write both feeds into the current directory
/// uksc_feeds
///
/// # Write into ./public with settings from a file
/// uksc_feeds -o ./public -c feeds.yaml
///
/// # Point at a staging mirror of the site
/// uksc_feeds --base-url http://localhost:8080
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory the feed files are written to
    #[arg(short, long, env = "UKSC_FEEDS_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Optional path to a YAML settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Site origin the listing pages and relative links are resolved against
    #[arg(long, env = "UKSC_FEEDS_BASE_URL")]
    pub base_url: Option<String>,

    /// User-Agent header sent with every request
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_are_unset() {
        let cli = Cli::try_parse_from(["uksc_feeds"]).unwrap();
        assert!(cli.config.is_none());
        assert!(cli.user_agent.is_none());
        assert!(cli.timeout_secs.is_none());
    }

    #[test]
    fn test_cli_long_flags() {
        let cli = Cli::parse_from([
            "uksc_feeds",
            "--output-dir",
            "./public",
            "--config",
            "feeds.yaml",
            "--base-url",
            "http://localhost:8080",
            "--user-agent",
            "test-agent/0.1",
            "--timeout-secs",
            "5",
        ]);

        assert_eq!(cli.output_dir, Some(PathBuf::from("./public")));
        assert_eq!(cli.config, Some(PathBuf::from("feeds.yaml")));
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(cli.user_agent.as_deref(), Some("test-agent/0.1"));
        assert_eq!(cli.timeout_secs, Some(5));
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["uksc_feeds", "-o", "/tmp/feeds", "-c", "/etc/uksc.yaml"]);

        assert_eq!(cli.output_dir, Some(PathBuf::from("/tmp/feeds")));
        assert_eq!(cli.config, Some(PathBuf::from("/etc/uksc.yaml")));
    }

    #[test]
    fn test_cli_rejects_bad_timeout() {
        assert!(Cli::try_parse_from(["uksc_feeds", "--timeout-secs", "soon"]).is_err());
    }
}
