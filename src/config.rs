//! Run settings.
//!
//! Resolved in three layers, later layers winning:
//!
//! 1. Built-in defaults ([`Settings::default`])
//! 2. An optional YAML file passed with `--config`
//! 3. Command-line flags / environment variables ([`crate::cli::Cli`])
//!
//! ```yaml
//! base_url: https://www.supremecourt.uk
//! output_dir: ./public
//! user_agent: uksc-feeds/1.0 (+https://github.com/your-org/uksc-feeds)
//! timeout_secs: 30
//! ```

use crate::cli::Cli;
use crate::error::{Error, Result};
use crate::scrapers::supremecourt::DEFAULT_BASE_URL;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, instrument};
use url::Url;

pub const DEFAULT_USER_AGENT: &str = "uksc-feeds/1.0 (+https://github.com/your-org/uksc-feeds)";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub base_url: String,
    pub output_dir: PathBuf,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from("."),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    /// Parse settings from YAML text; missing keys keep their defaults.
    pub fn from_yaml(text: &str, origin: &Path) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|source| Error::Config {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Read settings from `path`, or return defaults when no file is given.
    #[instrument(level = "info", skip_all)]
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::io(path, e))?;
        let settings = Self::from_yaml(&text, path)?;
        info!(path = %path.display(), "Loaded settings file");
        Ok(settings)
    }

    /// Overlay any flags the user passed on the command line.
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if let Some(dir) = &cli.output_dir {
            self.output_dir = dir.clone();
        }
        if let Some(base_url) = &cli.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(user_agent) = &cli.user_agent {
            self.user_agent = user_agent.clone();
        }
        if let Some(timeout_secs) = cli.timeout_secs {
            self.timeout_secs = timeout_secs;
        }
        self
    }

    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.base_url).map_err(|source| Error::Url {
            url: self.base_url.clone(),
            source,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
