// src/ingest/providers/http.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::histogram;
use std::time::Duration;

use crate::ingest::providers::rss::parse_feed;
use crate::ingest::types::{FeedFetcher, RawFeed};

const USER_AGENT: &str = "Mozilla/5.0";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Fetches feeds over HTTP(S). One attempt per call, no retries.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("building http client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FeedFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<RawFeed> {
        let t0 = std::time::Instant::now();
        let resp = match self.client.get(url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(error = ?e, %url, "feed http error");
                return Err(e).context("feed http get()");
            }
        };
        let body = resp
            .error_for_status()
            .context("feed http status")?
            .text()
            .await
            .context("feed http .text()")?;

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("ingest_fetch_ms").record(ms);
        parse_feed(&body)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
