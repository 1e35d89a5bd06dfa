use std::time::Duration;

use reqwest::{StatusCode, Url};

use super::domain::{ApplicationId, ApplicationRecord};
use super::source::{ApplicationSource, SourceError};
use crate::config::ChecklistConfig;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Fetches records with a GET to `{base_url}/{application_id}`.
#[derive(Debug, Clone)]
pub struct HttpApplicationSource {
    base_url: Url,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpApplicationSource {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn from_config(config: &ChecklistConfig) -> Self {
        Self::new(config.source_url.clone()).with_timeout(config.fetch_timeout)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The id always lands in a single percent-encoded path segment under the base URL.
    pub fn record_url(&self, id: &ApplicationId) -> Result<Url, SourceError> {
        if matches!(id.0.as_str(), "" | "." | "..") {
            return Err(SourceError::InvalidId(id.clone()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SourceError::InvalidId(id.clone()))?
            .pop_if_empty()
            .push(&id.0);
        Ok(url)
    }
}

impl ApplicationSource for HttpApplicationSource {
    async fn fetch(&self, id: &ApplicationId) -> Result<ApplicationRecord, SourceError> {
        let url = self.record_url(id)?;

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(id.clone()));
        }
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(transport_error)?;
        serde_json::from_slice::<ApplicationRecord>(&body)
            .map_err(|err| SourceError::Decode(err.to_string()))
    }
}

fn transport_error(err: reqwest::Error) -> SourceError {
    if err.is_timeout() {
        SourceError::Timeout
    } else {
        SourceError::Transport(err.to_string())
    }
}
