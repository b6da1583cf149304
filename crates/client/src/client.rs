use anyhow::{Context, Result};
use paper_core::{StructuredData, Unit, ViewError};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::config::ClientConfig;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("backend answered {status} for {url}")]
    Status { status: StatusCode, url: String },
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("response from {url} is not structured data: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// The flat message a view shows for this failure.
    pub fn view_error(&self) -> ViewError {
        match self {
            Self::Status { .. } => ViewError::NotFound,
            Self::Transport { .. } | Self::Decode { .. } => ViewError::Transport,
        }
    }
}

/// Fetches structured question data from the backend.
#[derive(Debug, Clone)]
pub struct DataClient {
    http: Client,
    config: ClientConfig,
}

impl DataClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[instrument(skip(self))]
    pub async fn fetch_units(&self, data_id: &str) -> Result<Vec<Unit>, FetchError> {
        let url = self.config.view_url(data_id);
        let url_text = url.to_string();

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url_text.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, url = %url_text, "backend rejected structured data request");
            return Err(FetchError::Status {
                status,
                url: url_text,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Transport {
                url: url_text.clone(),
                source,
            })?;
        let units = StructuredData::from_json_slice(&body).map_err(|source| FetchError::Decode {
            url: url_text.clone(),
            source,
        })?;

        info!(units = units.len(), "structured data fetched");
        Ok(units)
    }
}
