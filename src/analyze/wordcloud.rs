// src/analyze/wordcloud.rs
//! Word-frequency input for a word-cloud renderer.
//!
//! Image generation is out of scope; the renderer boundary receives term
//! counts and a destination. [`FrequencyTableRenderer`] writes those counts
//! as JSON for an external tool to draw.

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use crate::analyze::ScoredEntry;
use crate::error::Result;

/// Terms that dominate every run because they are the query itself.
pub const QUERY_STOPWORDS: &[&str] = &["openai", "chatgpt"];

const ENGLISH_STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "else",
    "ever", "few", "for", "from", "further", "get", "had", "has", "have", "having", "he", "her",
    "here", "hers", "herself", "him", "himself", "his", "how", "however", "i", "if", "in", "into",
    "is", "it", "its", "itself", "just", "me", "more", "most", "my", "myself", "no", "nor", "not",
    "of", "off", "on", "once", "only", "or", "other", "otherwise", "ought", "our", "ours",
    "ourselves", "out", "over", "own", "same", "she", "should", "since", "so", "some", "such",
    "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there", "these",
    "they", "this", "those", "through", "to", "too", "under", "until", "up", "very", "was", "we",
    "were", "what", "when", "where", "which", "while", "who", "whom", "why", "with", "would",
    "www", "http", "https", "com", "you", "your", "yours", "yourself", "yourselves", "will",
    "says", "said", "new",
];

/// Built-in English stopwords plus [`QUERY_STOPWORDS`].
pub fn default_stopwords() -> HashSet<String> {
    ENGLISH_STOPWORDS
        .iter()
        .chain(QUERY_STOPWORDS)
        .map(|s| s.to_string())
        .collect()
}

/// Every entry's cleaned combined text, joined by single spaces.
pub fn corpus(entries: &[ScoredEntry]) -> String {
    entries
        .iter()
        .map(ScoredEntry::combined_text)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercased word counts, most frequent first (ties alphabetical).
/// Words shorter than two characters, pure numbers and stopwords are skipped.
pub fn term_frequencies(text: &str, stopwords: &HashSet<String>) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for raw in text.split(|c: char| !c.is_alphanumeric() && c != '\'') {
        let w = raw.trim_matches('\'').to_lowercase();
        if w.chars().count() < 2 || w.chars().all(|c| c.is_numeric()) {
            continue;
        }
        let stem = w.strip_suffix("'s").unwrap_or(&w);
        if stopwords.contains(stem) {
            continue;
        }
        *counts.entry(stem.to_string()).or_default() += 1;
    }

    let mut out: Vec<(String, usize)> = counts.into_iter().collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

/// Boundary to whatever turns term counts into a picture.
pub trait CloudRenderer {
    fn render(&self, terms: &[(String, usize)], output: &Path) -> Result<()>;
}

#[derive(Serialize)]
struct TermRow<'a> {
    word: &'a str,
    count: usize,
}

/// Writes the top `limit` terms as a JSON array of `{word, count}`.
#[derive(Debug, Clone, Copy)]
pub struct FrequencyTableRenderer {
    pub limit: usize,
}

impl Default for FrequencyTableRenderer {
    fn default() -> Self {
        Self { limit: 200 }
    }
}

impl CloudRenderer for FrequencyTableRenderer {
    fn render(&self, terms: &[(String, usize)], output: &Path) -> Result<()> {
        let rows: Vec<TermRow<'_>> = terms
            .iter()
            .take(self.limit)
            .map(|(w, c)| TermRow {
                word: w,
                count: *c,
            })
            .collect();
        fs::write(output, serde_json::to_string_pretty(&rows)?)?;
        tracing::info!(target: "analyze", terms = rows.len(), output = %output.display(), "word frequencies written");
        Ok(())
    }
}
