// src/ingest/types.rs
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One item as delivered by a feed, before any cleaning.
/// Every field is optional; timestamps stay as the raw strings from the feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub summary: Option<String>,
    pub published: Option<String>,
    pub updated: Option<String>,
}

/// A parsed feed: optional channel title plus its entries in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFeed {
    pub title: Option<String>,
    pub entries: Vec<RawEntry>,
}

/// A cleaned, timestamped entry that survived aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub title: String,
    pub link: String,
    pub source: String,
    #[serde(with = "crate::ingest::timestamp::rfc3339")]
    pub published: DateTime<Utc>,
    pub summary: String,
}

impl Entry {
    /// Lowercased `(title, link)` pair used for deduplication.
    pub fn dedup_key(&self) -> (String, String) {
        (self.title.to_lowercase(), self.link.to_lowercase())
    }
}

/// Supplies raw entries for a source URL. Fails on transport or parse errors;
/// retries, if any, belong to the implementation.
#[async_trait::async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<RawFeed>;
    fn name(&self) -> &'static str;
}
