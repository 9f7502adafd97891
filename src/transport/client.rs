//! Outbound peer client.

use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

use crate::group::types::PeerFetch;

use super::protocol::PeerResponse;

const FETCH_TIMEOUT: Duration = Duration::from_millis(500);
const FETCH_ATTEMPTS: usize = 3;

/// Fetches cache values from one remote peer.
///
/// `base_url` already carries the peer's host and base path, so a fetch only
/// appends `{group}/{key}`. Transient transport errors are retried with
/// exponential backoff and jitter; whatever error remains is the caller's to
/// downgrade (the group falls back to its loader).
pub struct HttpClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_with_retry(
        &self,
        url: String,
        timeout: Duration,
        attempts: usize,
    ) -> Result<reqwest::Response> {
        let mut delay_ms = 150u64;

        for attempt in 0..attempts {
            let response = self.http.get(url.clone()).timeout(timeout).send().await;

            match response {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    if attempt + 1 == attempts {
                        return Err(anyhow::anyhow!(e));
                    }
                    let jitter = rand::random::<u64>() % 50;
                    tokio::time::sleep(Duration::from_millis(delay_ms + jitter)).await;
                    delay_ms = (delay_ms * 2).min(1200);
                }
            }
        }

        Err(anyhow::anyhow!("Retry attempts exhausted"))
    }
}

#[async_trait]
impl PeerFetch for HttpClient {
    async fn fetch(&self, group: &str, key: &str) -> Result<Vec<u8>> {
        let url = format!("{}{}/{}", self.base_url, group, key);

        let response = self
            .get_with_retry(url, FETCH_TIMEOUT, FETCH_ATTEMPTS)
            .await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!("Peer returned {}", response.status()));
        }

        let body = response.bytes().await?;
        let envelope: PeerResponse = bincode::deserialize(&body)?;
        Ok(envelope.value)
    }
}
