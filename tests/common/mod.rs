// tests/common/mod.rs
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use feed_sentiment_analyzer::ingest::providers::StaticFetcher;

pub const ALPHA_XML: &str = include_str!("../fixtures/alpha_rss.xml");
pub const BETA_XML: &str = include_str!("../fixtures/beta_atom.xml");
pub const GAMMA_XML: &str = include_str!("../fixtures/gamma_rss.xml");

pub const ALPHA_URL: &str = "https://alpha.example/rss";
pub const BETA_URL: &str = "https://beta.example/atom.xml";
pub const GAMMA_URL: &str = "https://gamma.example/rss";

/// Fixed clock the fixtures are dated against.
pub fn fixture_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 17, 12, 0, 0).unwrap()
}

pub fn sources() -> Vec<String> {
    vec![ALPHA_URL.into(), BETA_URL.into(), GAMMA_URL.into()]
}

/// Three feeds with 5, 3 and 4 raw entries: two cross-source duplicates and
/// one stale item, leaving nine.
pub fn fixture_fetcher() -> StaticFetcher {
    StaticFetcher::new()
        .with_xml(ALPHA_URL, ALPHA_XML)
        .unwrap()
        .with_xml(BETA_URL, BETA_XML)
        .unwrap()
        .with_xml(GAMMA_URL, GAMMA_XML)
        .unwrap()
}
