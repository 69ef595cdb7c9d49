// src/ingest/mod.rs
//! Entry aggregation: fetch every source in order, normalize and filter the
//! raw entries, drop duplicates across sources, and sort newest-first.

pub mod clean;
pub mod config;
pub mod providers;
pub mod timestamp;
pub mod types;

use chrono::{DateTime, Duration, Utc};
use metrics::{counter, describe_counter, describe_histogram, gauge};
use once_cell::sync::OnceCell;
use std::collections::HashSet;

use crate::error::{PipelineError, Result};
use crate::ingest::clean::clean_text;
use crate::ingest::timestamp::normalize_timestamp;
use crate::ingest::types::{Entry, FeedFetcher, RawEntry, RawFeed};

/// One-time metrics registration so the series carry descriptions.
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("ingest_events_total", "Raw entries parsed from feeds.");
        describe_counter!(
            "ingest_kept_total",
            "Entries kept after filtering and deduplication."
        );
        describe_counter!(
            "ingest_filtered_total",
            "Entries dropped as stale, untimestamped, untitled or off-query."
        );
        describe_counter!("ingest_dedup_total", "Entries removed as duplicates.");
        describe_counter!(
            "ingest_provider_errors_total",
            "Feed fetch/parse errors."
        );
        describe_histogram!("ingest_parse_ms", "Feed parse time in milliseconds.");
        describe_histogram!("ingest_fetch_ms", "Feed fetch time in milliseconds.");
    });
}

/// What to do when a single source cannot be fetched or parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceErrorPolicy {
    /// Fail the whole run.
    #[default]
    Abort,
    /// Log, count, and continue with the remaining sources.
    Skip,
}

#[derive(Debug, Clone)]
pub struct AggregateParams {
    pub sources: Vec<String>,
    /// Case-insensitive substring required in title or summary. Empty matches all.
    pub query: String,
    /// Recency window in days.
    pub days: u32,
    pub min_results: usize,
    pub on_source_error: SourceErrorPolicy,
}

/// Per-run counters, mostly for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub raw: usize,
    pub untimestamped: usize,
    pub out_of_window: usize,
    pub untitled: usize,
    pub off_query: usize,
    pub duplicates: usize,
    pub failed_sources: usize,
}

impl IngestStats {
    pub fn filtered(&self) -> usize {
        self.untimestamped + self.out_of_window + self.untitled + self.off_query
    }
}

/// Human-readable origin label: the feed's own title, else its URL.
pub fn source_label(feed: &RawFeed, url: &str) -> String {
    feed.title
        .as_deref()
        .map(clean_text)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| url.to_string())
}

pub fn matches_query(title: &str, summary: &str, query: &str) -> bool {
    let q = query.to_lowercase();
    title.to_lowercase().contains(&q) || summary.to_lowercase().contains(&q)
}

fn admit(
    raw: &RawEntry,
    source: &str,
    query: &str,
    window: (DateTime<Utc>, DateTime<Utc>),
    stats: &mut IngestStats,
) -> Option<Entry> {
    let (cutoff, now) = window;
    let Some(published) = normalize_timestamp(raw) else {
        stats.untimestamped += 1;
        return None;
    };
    if published < cutoff || published > now {
        stats.out_of_window += 1;
        return None;
    }

    let title = raw.title.as_deref().map(clean_text).unwrap_or_default();
    if title.is_empty() {
        stats.untitled += 1;
        return None;
    }
    let summary = raw.summary.as_deref().map(clean_text).unwrap_or_default();
    if !matches_query(&title, &summary, query) {
        stats.off_query += 1;
        return None;
    }

    Some(Entry {
        title,
        link: raw.link.as_deref().map(str::trim).unwrap_or_default().to_string(),
        source: source.to_string(),
        published,
        summary,
    })
}

/// Pure post-fetch stage: `feeds` are `(url, feed)` pairs in source order.
///
/// Keeps entries published within `[now - days, now]` whose cleaned title is
/// non-empty and matches `query`; the first entry per lowercased
/// `(title, link)` wins; output is sorted newest-first with ties in
/// encounter order.
pub fn filter_dedup_sort(
    now: DateTime<Utc>,
    days: u32,
    query: &str,
    feeds: &[(String, RawFeed)],
) -> (Vec<Entry>, IngestStats) {
    let cutoff = now
        .checked_sub_signed(Duration::days(i64::from(days)))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let mut stats = IngestStats::default();
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut keep = Vec::new();

    for (url, feed) in feeds {
        let source = source_label(feed, url);
        for raw in &feed.entries {
            stats.raw += 1;
            let Some(entry) = admit(raw, &source, query, (cutoff, now), &mut stats) else {
                continue;
            };
            if !seen.insert(entry.dedup_key()) {
                stats.duplicates += 1;
                tracing::debug!(target: "ingest", title = %entry.title, %source, "duplicate dropped");
                continue;
            }
            keep.push(entry);
        }
    }

    // `sort_by` is stable, so equal timestamps keep encounter order.
    keep.sort_by(|a, b| b.published.cmp(&a.published));
    (keep, stats)
}

/// Fail with [`PipelineError::InsufficientResults`] when fewer than
/// `required` entries survived.
pub fn ensure_min_results(actual: usize, required: usize) -> Result<()> {
    if actual < required {
        return Err(PipelineError::InsufficientResults { actual, required });
    }
    Ok(())
}

/// Fetch all sources sequentially, in the order given.
async fn fetch_all<F: FeedFetcher + ?Sized>(
    fetcher: &F,
    params: &AggregateParams,
    stats: &mut IngestStats,
) -> Result<Vec<(String, RawFeed)>> {
    let mut feeds = Vec::with_capacity(params.sources.len());
    for url in &params.sources {
        match fetcher.fetch(url).await {
            Ok(feed) => {
                tracing::info!(
                    target: "ingest",
                    %url,
                    fetcher = fetcher.name(),
                    entries = feed.entries.len(),
                    "feed fetched"
                );
                counter!("ingest_events_total").increment(feed.entries.len() as u64);
                feeds.push((url.clone(), feed));
            }
            Err(e) => {
                counter!("ingest_provider_errors_total").increment(1);
                match params.on_source_error {
                    SourceErrorPolicy::Abort => {
                        return Err(PipelineError::Fetch {
                            url: url.clone(),
                            source: e,
                        });
                    }
                    SourceErrorPolicy::Skip => {
                        tracing::warn!(target: "ingest", error = ?e, %url, "feed skipped");
                        stats.failed_sources += 1;
                    }
                }
            }
        }
    }
    Ok(feeds)
}

/// Run the aggregation with an explicit clock.
pub async fn aggregate_at<F: FeedFetcher + ?Sized>(
    fetcher: &F,
    params: &AggregateParams,
    now: DateTime<Utc>,
) -> Result<Vec<Entry>> {
    ensure_metrics_described();

    let mut fetch_stats = IngestStats::default();
    let feeds = fetch_all(fetcher, params, &mut fetch_stats).await?;
    let (entries, mut stats) = filter_dedup_sort(now, params.days, &params.query, &feeds);
    stats.failed_sources = fetch_stats.failed_sources;

    counter!("ingest_kept_total").increment(entries.len() as u64);
    counter!("ingest_filtered_total").increment(stats.filtered() as u64);
    counter!("ingest_dedup_total").increment(stats.duplicates as u64);
    gauge!("ingest_pipeline_last_run_ts").set(now.timestamp() as f64);

    tracing::info!(
        target: "ingest",
        kept = entries.len(),
        raw = stats.raw,
        filtered = stats.filtered(),
        dedup = stats.duplicates,
        failed_sources = stats.failed_sources,
        "aggregation finished"
    );

    ensure_min_results(entries.len(), params.min_results)?;
    Ok(entries)
}

/// Run the aggregation against the wall clock.
pub async fn aggregate<F: FeedFetcher + ?Sized>(
    fetcher: &F,
    params: &AggregateParams,
) -> Result<Vec<Entry>> {
    aggregate_at(fetcher, params, Utc::now()).await
}
