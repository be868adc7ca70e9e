//! Shared outbound HTTP client.
//!
//! Transport failures (connect errors and timeouts) are retried; any HTTP
//! response, including error statuses, is handed back to the caller as is.

use crate::config::AppConfig;
use crate::errors::ServiceError;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use std::time::Duration;
use tracing::{instrument, warn};

const DEFAULT_BACKOFF: Duration = Duration::from_millis(200);

#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
    retries: u32,
    backoff: Duration,
}

impl HttpClient {
    pub fn new(timeout: Duration, retries: u32) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::InternalError(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            retries,
            backoff: DEFAULT_BACKOFF,
        })
    }

    pub fn from_app_config(cfg: &AppConfig) -> Result<Self, ServiceError> {
        Self::new(cfg.http_client_timeout(), cfg.http_client_retries)
    }

    /// Base delay between attempts; attempt `n` waits `n * backoff`.
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    #[instrument(skip(self))]
    pub async fn get(&self, url: &str) -> Result<Response, ServiceError> {
        self.send_with_retry(url, || self.client.get(url)).await
    }

    #[instrument(skip(self, body))]
    pub async fn post_json<B>(&self, url: &str, body: &B) -> Result<Response, ServiceError>
    where
        B: Serialize + ?Sized,
    {
        self.send_with_retry(url, || self.client.post(url).json(body))
            .await
    }

    async fn send_with_retry<F>(&self, url: &str, build: F) -> Result<Response, ServiceError>
    where
        F: Fn() -> RequestBuilder,
    {
        let attempts = self.retries + 1;
        let mut attempt = 1;

        loop {
            match build().send().await {
                Ok(response) => return Ok(response),
                Err(err) if is_transient(&err) && attempt < attempts => {
                    warn!(
                        "Request to {} failed: {} (attempt {}/{})",
                        url, err, attempt, attempts
                    );
                    tokio::time::sleep(self.backoff * attempt).await;
                    attempt += 1;
                }
                Err(err) => {
                    return Err(ServiceError::ExternalServiceError(format!(
                        "request to {url} failed after {attempt} attempt(s): {err}"
                    )));
                }
            }
        }
    }
}

fn is_transient(err: &reqwest::Error) -> bool {
    err.is_connect() || err.is_timeout()
}
