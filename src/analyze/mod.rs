// src/analyze/mod.rs
//! Sentiment classification of aggregated entries.
//!
//! Scoring is delegated to an injected [`PolarityScorer`]; this module owns
//! the label thresholds and the per-run summary.

pub mod wordcloud;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ingest::clean::clean_text;
use crate::ingest::types::Entry;
use crate::sentiment::PolarityScorer;

/// Compound scores at or below this are negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.05;
/// Compound scores at or above this are positive.
pub const POSITIVE_THRESHOLD: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Negative,
    Neutral,
    Positive,
}

impl SentimentLabel {
    pub fn from_compound(compound: f64) -> Self {
        if compound <= NEGATIVE_THRESHOLD {
            SentimentLabel::Negative
        } else if compound >= POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Positive => "positive",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An [`Entry`] enriched with polarity scores. Kept flat so it maps 1:1 onto
/// CSV columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredEntry {
    pub title: String,
    pub link: String,
    pub source: String,
    #[serde(with = "crate::ingest::timestamp::rfc3339")]
    pub published: DateTime<Utc>,
    pub summary: String,
    pub compound: f64,
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
    pub sentiment_label: SentimentLabel,
}

impl ScoredEntry {
    /// Cleaned `title + " " + summary`, the text that was scored.
    pub fn combined_text(&self) -> String {
        combined_text(&self.title, &self.summary)
    }
}

pub fn combined_text(title: &str, summary: &str) -> String {
    clean_text(&format!("{title} {summary}"))
}

/// Label distribution and mean compound for one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub negative: f64,
    pub neutral: f64,
    pub positive: f64,
    /// `None` when there was nothing to average.
    pub average_compound: Option<f64>,
}

impl SentimentSummary {
    pub fn from_scored(entries: &[ScoredEntry]) -> Self {
        let total = entries.len();
        if total == 0 {
            return Self {
                negative: 0.0,
                neutral: 0.0,
                positive: 0.0,
                average_compound: None,
            };
        }

        let count = |label: SentimentLabel| {
            entries.iter().filter(|e| e.sentiment_label == label).count() as f64
        };
        let n = total as f64;
        let sum: f64 = entries.iter().map(|e| e.compound).sum();

        Self {
            negative: count(SentimentLabel::Negative) / n,
            neutral: count(SentimentLabel::Neutral) / n,
            positive: count(SentimentLabel::Positive) / n,
            average_compound: Some(sum / n),
        }
    }

    pub fn fraction(&self, label: SentimentLabel) -> f64 {
        match label {
            SentimentLabel::Negative => self.negative,
            SentimentLabel::Neutral => self.neutral,
            SentimentLabel::Positive => self.positive,
        }
    }
}

pub fn score_entry<S: PolarityScorer + ?Sized>(entry: Entry, scorer: &S) -> ScoredEntry {
    let p = scorer.polarity_scores(&combined_text(&entry.title, &entry.summary));
    ScoredEntry {
        title: entry.title,
        link: entry.link,
        source: entry.source,
        published: entry.published,
        summary: entry.summary,
        compound: p.compound,
        positive: p.pos,
        neutral: p.neu,
        negative: p.neg,
        sentiment_label: SentimentLabel::from_compound(p.compound),
    }
}

/// Score every entry (order preserved) and summarize the run.
pub fn classify<S: PolarityScorer + ?Sized>(
    entries: Vec<Entry>,
    scorer: &S,
) -> (Vec<ScoredEntry>, SentimentSummary) {
    let scored: Vec<ScoredEntry> = entries.into_iter().map(|e| score_entry(e, scorer)).collect();
    let summary = SentimentSummary::from_scored(&scored);

    tracing::info!(
        target: "analyze",
        entries = scored.len(),
        negative = summary.negative,
        neutral = summary.neutral,
        positive = summary.positive,
        average_compound = ?summary.average_compound,
        "sentiment classified"
    );
    (scored, summary)
}
