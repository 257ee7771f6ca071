//! HTTP content store client.
//!
//! Talks to a REST blob gateway:
//!
//! - `PUT  /blobs`            → `{"address": "<cid>"}`
//! - `GET  /blobs/{address}`  → raw bytes
//! - `HEAD /blobs/{address}`  → 200 / 404
//! - `POST /pins/{address}`   → 200
//!
//! The gateway shape is a deployment detail; the rest of the system only
//! sees the [`ContentStore`] trait.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;
use tracing::debug;

use opus8_core::ContentAddress;

use crate::error::{Result, StoreError};
use crate::retry::{with_retry, RetryPolicy};
use crate::traits::ContentStore;

/// Configuration for the HTTP store client.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Gateway base URL, e.g. `http://127.0.0.1:8090`.
    pub base_url: String,
    /// Retry and timeout policy for publish/fetch.
    pub retry: RetryPolicy,
}

impl StoreConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            retry: RetryPolicy::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PublishResponse {
    address: String,
}

/// Content store client over HTTP.
pub struct HttpStore {
    client: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl HttpStore {
    /// Build a client from config. Fails only if the underlying HTTP
    /// client cannot be constructed.
    pub fn new(config: StoreConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.retry.attempt_timeout)
            .build()
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            retry: config.retry,
        })
    }

    fn blobs_url(&self) -> String {
        format!("{}/blobs", self.base_url)
    }

    fn blob_url(&self, address: &ContentAddress) -> String {
        format!("{}/blobs/{}", self.base_url, address)
    }

    fn pin_url(&self, address: &ContentAddress) -> String {
        format!("{}/pins/{}", self.base_url, address)
    }
}

/// Map a client-level error, attributing timeouts to the configured
/// per-attempt budget (reqwest does not carry the duration itself).
fn request_error(e: reqwest::Error, attempt_timeout: Duration) -> StoreError {
    if e.is_timeout() {
        StoreError::Timeout(attempt_timeout)
    } else {
        StoreError::Transport(e.to_string())
    }
}

fn check_status(resp: reqwest::Response, what: &str) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else if status == reqwest::StatusCode::NOT_FOUND {
        Err(StoreError::NotFound(what.to_string()))
    } else {
        Err(StoreError::Server(status.as_u16()))
    }
}

#[async_trait]
impl ContentStore for HttpStore {
    async fn publish(&self, bytes: Bytes) -> Result<ContentAddress> {
        let url = self.blobs_url();
        let timeout = self.retry.attempt_timeout;
        with_retry(&self.retry, || {
            let client = self.client.clone();
            let url = url.clone();
            let body = bytes.clone();
            async move {
                let resp = client
                    .put(&url)
                    .body(body)
                    .send()
                    .await
                    .map_err(|e| request_error(e, timeout))?;
                let resp = check_status(resp, &url)?;
                let parsed: PublishResponse = resp
                    .json()
                    .await
                    .map_err(|e| StoreError::MalformedResponse(e.to_string()))?;
                let address = ContentAddress::parse(&parsed.address)
                    .map_err(|e| StoreError::MalformedResponse(e.to_string()))?;
                debug!(%address, "published");
                Ok(address)
            }
        })
        .await
    }

    async fn fetch(&self, address: &ContentAddress) -> Result<Bytes> {
        let url = self.blob_url(address);
        let what = address.to_string();
        let timeout = self.retry.attempt_timeout;
        with_retry(&self.retry, || {
            let client = self.client.clone();
            let url = url.clone();
            let what = what.clone();
            async move {
                let resp = client
                    .get(&url)
                    .send()
                    .await
                    .map_err(|e| request_error(e, timeout))?;
                let resp = check_status(resp, &what)?;
                let bytes = resp
                    .bytes()
                    .await
                    .map_err(|e| request_error(e, timeout))?;
                Ok(bytes)
            }
        })
        .await
    }

    async fn exists(&self, address: &ContentAddress) -> Result<bool> {
        // Single attempt; any failure is "not known to exist".
        match self.client.head(self.blob_url(address)).send().await {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(e) => {
                debug!(%address, error = %e, "existence probe failed");
                Ok(false)
            }
        }
    }

    async fn pin(&self, address: &ContentAddress) -> Result<()> {
        let resp = self
            .client
            .post(self.pin_url(address))
            .send()
            .await
            .map_err(|e| request_error(e, self.retry.attempt_timeout))?;
        check_status(resp, address.as_str())?;
        Ok(())
    }
}
