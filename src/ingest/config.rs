// src/ingest/config.rs
//! Where the list of feeds comes from.
//!
//! Precedence: `--feeds` on the command line, then the file named by
//! `$FEEDS_CONFIG_PATH`, then `config/feeds.toml`, then `config/feeds.json`,
//! then [`DEFAULT_FEEDS`].

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_PATH: &str = "FEEDS_CONFIG_PATH";

const CONFIG_CANDIDATES: &[&str] = &["config/feeds.toml", "config/feeds.json"];

/// Feeds used when neither the CLI nor a config file names any.
pub const DEFAULT_FEEDS: &[&str] = &[
    "https://news.google.com/rss/search?q=%22OpenAI%22+when:1m&hl=en-US&gl=US&ceid=US:en",
    "https://news.google.com/rss/search?q=%22OpenAI%22+review&hl=en-US&gl=US&ceid=US:en",
    "https://www.bing.com/news/search?q=\"OpenAI\"&format=RSS",
];

pub fn default_feeds() -> Vec<String> {
    DEFAULT_FEEDS.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedOrigin {
    Cli,
    Env(PathBuf),
    File(PathBuf),
    BuiltIn,
}

impl fmt::Display for FeedOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedOrigin::Cli => f.write_str("command line"),
            FeedOrigin::Env(p) => write!(f, "${ENV_PATH} ({})", p.display()),
            FeedOrigin::File(p) => write!(f, "{}", p.display()),
            FeedOrigin::BuiltIn => f.write_str("built-in defaults"),
        }
    }
}

/// Resolved, cleaned feed list plus where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedList {
    pub sources: Vec<String>,
    pub origin: FeedOrigin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FeedFileFormat {
    Toml,
    Json,
}

impl FeedFileFormat {
    /// Extension first; otherwise a leading `[` means a JSON array.
    fn detect(path: &Path, content: &str) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(e) if e.eq_ignore_ascii_case("toml") => FeedFileFormat::Toml,
            Some(e) if e.eq_ignore_ascii_case("json") => FeedFileFormat::Json,
            _ if content.trim_start().starts_with('[') => FeedFileFormat::Json,
            _ => FeedFileFormat::Toml,
        }
    }
}

#[derive(Deserialize)]
struct TomlFeeds {
    feeds: Vec<String>,
}

fn parse_feed_file(content: &str, format: FeedFileFormat) -> Result<Vec<String>> {
    let raw = match format {
        FeedFileFormat::Toml => {
            toml::from_str::<TomlFeeds>(content)
                .context("expected `feeds = [...]`")?
                .feeds
        }
        FeedFileFormat::Json => serde_json::from_str::<Vec<String>>(content)
            .context("expected a JSON array of strings")?,
    };
    Ok(clean_list(raw))
}

/// Read a TOML (`feeds = [...]`) or JSON (`[...]`) feed list.
pub fn load_feeds_from(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading feed list from {}", path.display()))?;
    let feeds = parse_feed_file(&content, FeedFileFormat::detect(path, &content))
        .with_context(|| format!("parsing feed list {}", path.display()))?;
    if feeds.is_empty() {
        bail!("feed list {} names no feeds", path.display());
    }
    Ok(feeds)
}

/// Feed list from the environment, the config directory, or the built-ins.
pub fn load_feeds_default() -> Result<FeedList> {
    if let Ok(p) = std::env::var(ENV_PATH) {
        let path = PathBuf::from(p);
        if !path.exists() {
            bail!("{ENV_PATH} points to non-existent path {}", path.display());
        }
        return Ok(FeedList {
            sources: load_feeds_from(&path)?,
            origin: FeedOrigin::Env(path),
        });
    }
    for candidate in CONFIG_CANDIDATES {
        let path = PathBuf::from(candidate);
        if path.exists() {
            return Ok(FeedList {
                sources: load_feeds_from(&path)?,
                origin: FeedOrigin::File(path),
            });
        }
    }
    Ok(FeedList {
        sources: default_feeds(),
        origin: FeedOrigin::BuiltIn,
    })
}

/// Command-line feeds win when any survive cleaning.
pub fn resolve_feeds(cli: Vec<String>) -> Result<FeedList> {
    let sources = clean_list(cli);
    if sources.is_empty() {
        load_feeds_default()
    } else {
        Ok(FeedList {
            sources,
            origin: FeedOrigin::Cli,
        })
    }
}

/// Trim, drop empties, and drop repeats. Order is kept because it decides
/// which copy of a duplicated entry survives aggregation.
pub fn clean_list(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for it in items {
        let t = it.trim();
        if !t.is_empty() && !out.iter().any(|o| o == t) {
            out.push(t.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_list_keeps_first_occurrence_order() {
        let v = clean_list(vec![
            " https://b.example/rss ".into(),
            "".into(),
            "https://a.example/rss".into(),
            "https://b.example/rss".into(),
        ]);
        assert_eq!(v, vec!["https://b.example/rss", "https://a.example/rss"]);
    }

    #[test]
    fn format_follows_extension_then_content() {
        assert_eq!(FeedFileFormat::detect(Path::new("f.TOML"), "[x]"), FeedFileFormat::Toml);
        assert_eq!(FeedFileFormat::detect(Path::new("f.json"), ""), FeedFileFormat::Json);
        assert_eq!(FeedFileFormat::detect(Path::new("feeds"), "  [\"a\"]"), FeedFileFormat::Json);
        assert_eq!(FeedFileFormat::detect(Path::new("feeds"), "feeds = []"), FeedFileFormat::Toml);
    }

    #[test]
    fn wrong_shape_is_rejected() {
        assert!(parse_feed_file("feeds = 12", FeedFileFormat::Toml).is_err());
        assert!(parse_feed_file("{not json", FeedFileFormat::Json).is_err());
        assert!(parse_feed_file(r#"{"feeds": []}"#, FeedFileFormat::Json).is_err());
    }

    #[test]
    fn cli_feeds_win_when_non_empty() {
        let list = resolve_feeds(vec![" tests/a.xml ".into(), "tests/a.xml".into()]).unwrap();
        assert_eq!(list.origin, FeedOrigin::Cli);
        assert_eq!(list.sources, vec!["tests/a.xml"]);
    }

    #[test]
    fn origin_reads_well_in_logs() {
        assert_eq!(FeedOrigin::BuiltIn.to_string(), "built-in defaults");
        assert_eq!(
            FeedOrigin::File(PathBuf::from("config/feeds.toml")).to_string(),
            "config/feeds.toml"
        );
    }
}
