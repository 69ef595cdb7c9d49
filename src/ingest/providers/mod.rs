// src/ingest/providers/mod.rs
pub mod file;
pub mod http;
pub mod rss;

use anyhow::Result;
use async_trait::async_trait;

use crate::ingest::types::{FeedFetcher, RawFeed};

pub use file::{FileFetcher, StaticFetcher};
pub use http::HttpFetcher;

/// Routes `http(s)://` sources to [`HttpFetcher`] and everything else
/// (plain paths, `file://` URLs) to [`FileFetcher`].
pub struct DefaultFetcher {
    http: HttpFetcher,
    file: FileFetcher,
}

impl DefaultFetcher {
    pub fn new() -> Result<Self> {
        Ok(Self {
            http: HttpFetcher::new()?,
            file: FileFetcher,
        })
    }
}

fn is_remote(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[async_trait]
impl FeedFetcher for DefaultFetcher {
    async fn fetch(&self, url: &str) -> Result<RawFeed> {
        if is_remote(url) {
            self.http.fetch(url).await
        } else {
            self.file.fetch(url).await
        }
    }

    fn name(&self) -> &'static str {
        "default"
    }
}
