// src/sink.rs
//! Persistence of entries and summaries (CSV / JSON).
//!
//! Records are written in the order given; callers pass the aggregator's
//! newest-first order through untouched.

use serde::{de::DeserializeOwned, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::analyze::{ScoredEntry, SentimentSummary};
use crate::error::{PipelineError, Result};
use crate::ingest::types::Entry;

/// Column order of the collection output.
pub const ENTRY_COLUMNS: &[&str] = &["title", "link", "source", "published", "summary"];
/// Column order of the analysis output.
pub const SCORED_COLUMNS: &[&str] = &[
    "title",
    "link",
    "source",
    "published",
    "summary",
    "compound",
    "positive",
    "neutral",
    "negative",
    "sentiment_label",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Flat table with a header row
    #[default]
    Csv,
    /// Pretty-printed array of objects
    Json,
}

impl OutputFormat {
    /// `.json` → JSON, anything else → CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => OutputFormat::Json,
            _ => OutputFormat::Csv,
        }
    }
}

fn write_records<T: Serialize>(records: &[T], path: &Path, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let mut w = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(&mut w, records)?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        OutputFormat::Csv => {
            let mut w = csv::Writer::from_path(path)?;
            for r in records {
                w.serialize(r)?;
            }
            w.flush()?;
        }
    }
    Ok(())
}

pub fn write_entries(entries: &[Entry], path: &Path, format: OutputFormat) -> Result<()> {
    write_records(entries, path, format)?;
    tracing::info!(target: "sink", count = entries.len(), path = %path.display(), ?format, "entries written");
    Ok(())
}

pub fn write_scored(entries: &[ScoredEntry], path: &Path, format: OutputFormat) -> Result<()> {
    write_records(entries, path, format)?;
    tracing::info!(target: "sink", count = entries.len(), path = %path.display(), ?format, "scored entries written");
    Ok(())
}

/// Flat `{negative, neutral, positive, average_compound}` JSON object.
pub fn write_summary(summary: &SentimentSummary, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    fs::write(path, json)?;
    Ok(())
}

fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Err(PipelineError::InputNotFound(path.to_path_buf()));
    }
    match OutputFormat::from_path(path) {
        OutputFormat::Json => Ok(serde_json::from_str(&fs::read_to_string(path)?)?),
        OutputFormat::Csv => {
            let mut r = csv::Reader::from_path(path)?;
            let mut out: Vec<T> = Vec::new();
            for rec in r.deserialize::<T>() {
                out.push(rec?);
            }
            Ok(out)
        }
    }
}

/// Load entries written by the collection step. Extra columns are ignored.
pub fn read_entries(path: &Path) -> Result<Vec<Entry>> {
    let entries = read_records(path)?;
    tracing::debug!(target: "sink", path = %path.display(), "entries loaded");
    Ok(entries)
}
