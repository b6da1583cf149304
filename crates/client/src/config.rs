use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use url::Url;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";
const DEFAULT_CONNECT_TIMEOUT_SECONDS: u64 = 6;
const DEFAULT_TIMEOUT_SECONDS: u64 = 20;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub backend_url: Url,
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(backend_url: &str) -> Result<Self> {
        let backend_url = Url::parse(backend_url)
            .with_context(|| format!("invalid backend url {backend_url}"))?;
        anyhow::ensure!(
            !backend_url.cannot_be_a_base(),
            "backend url {backend_url} cannot carry a path"
        );

        Ok(Self {
            backend_url,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECONDS),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        })
    }

    /// Reads `PAPER_BACKEND_URL`, `PAPER_CONNECT_TIMEOUT_SECONDS` and
    /// `PAPER_FETCH_TIMEOUT_SECONDS`, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        let backend_url =
            env::var("PAPER_BACKEND_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
        let mut config = Self::new(&backend_url)?;
        config.connect_timeout = Duration::from_secs(seconds_from_env(
            "PAPER_CONNECT_TIMEOUT_SECONDS",
            DEFAULT_CONNECT_TIMEOUT_SECONDS,
        ));
        config.timeout = Duration::from_secs(seconds_from_env(
            "PAPER_FETCH_TIMEOUT_SECONDS",
            DEFAULT_TIMEOUT_SECONDS,
        ));
        Ok(config)
    }

    /// `{backend}/view/{data_id}`, with `data_id` as a single path segment.
    pub fn view_url(&self, data_id: &str) -> Url {
        let mut url = self.backend_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("view").push(data_id);
        }
        url
    }
}

fn seconds_from_env(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(default)
}
