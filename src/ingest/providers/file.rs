// src/ingest/providers/file.rs
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::ingest::providers::rss::parse_feed;
use crate::ingest::types::{FeedFetcher, RawFeed};

/// Reads a feed document from disk. Accepts plain paths and `file://` URLs.
pub struct FileFetcher;

fn to_path(url: &str) -> PathBuf {
    PathBuf::from(url.strip_prefix("file://").unwrap_or(url))
}

#[async_trait]
impl FeedFetcher for FileFetcher {
    async fn fetch(&self, url: &str) -> Result<RawFeed> {
        let path = to_path(url);
        let body = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("reading feed from {}", path.display()))?;
        parse_feed(&body)
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

/// In-memory fetcher keyed by URL. Unknown URLs fail like an unreachable host.
#[derive(Default)]
pub struct StaticFetcher {
    feeds: HashMap<String, RawFeed>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_feed(mut self, url: impl Into<String>, feed: RawFeed) -> Self {
        self.feeds.insert(url.into(), feed);
        self
    }

    /// Register a feed from its XML document.
    pub fn with_xml(self, url: impl Into<String>, xml: &str) -> Result<Self> {
        let feed = parse_feed(xml)?;
        Ok(self.with_feed(url, feed))
    }
}

#[async_trait]
impl FeedFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<RawFeed> {
        self.feeds
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow!("no feed registered for {url}"))
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_urls_strip_scheme() {
        assert_eq!(to_path("file:///tmp/a.xml"), PathBuf::from("/tmp/a.xml"));
        assert_eq!(to_path("feeds/a.xml"), PathBuf::from("feeds/a.xml"));
    }

    #[tokio::test]
    async fn static_fetcher_unknown_url_fails() {
        let f = StaticFetcher::new().with_feed("a", RawFeed::default());
        assert!(f.fetch("a").await.is_ok());
        assert!(f.fetch("b").await.is_err());
    }
}
