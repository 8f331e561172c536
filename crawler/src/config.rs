use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub user_agent: String,
    /// Per-request timeout. Requests may take as long as they need when
    /// unset or zero.
    pub request_timeout_secs: Option<u64>,
    /// Upper bound on child pages fetched at once. Unbounded when unset.
    pub max_concurrency: Option<usize>,
    /// Treat responses without a `text/html` content type as failed fetches.
    pub html_only: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: concat!("wordcrawl/", env!("CARGO_PKG_VERSION")).to_string(),
            request_timeout_secs: None,
            max_concurrency: None,
            html_only: false,
        }
    }
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}
