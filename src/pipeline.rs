// src/pipeline.rs
//! The two runnable steps: collect (feeds → file) and analyze
//! (file → scored file + summary + word frequencies).

use std::path::PathBuf;

use crate::analyze::wordcloud::{corpus, default_stopwords, term_frequencies, CloudRenderer};
use crate::analyze::{classify, SentimentSummary};
use crate::error::{PipelineError, Result};
use crate::ingest::types::{Entry, FeedFetcher};
use crate::ingest::{aggregate, AggregateParams};
use crate::sentiment::PolarityScorer;
use crate::sink::{self, OutputFormat};

#[derive(Debug, Clone)]
pub struct CollectOptions {
    pub params: AggregateParams,
    pub format: OutputFormat,
    pub output: PathBuf,
}

#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub input: PathBuf,
    pub wordcloud_output: PathBuf,
    pub sentiment_output: PathBuf,
    pub summary_output: PathBuf,
}

/// Aggregate and persist. Nothing is written unless aggregation succeeds.
pub async fn run_collect<F: FeedFetcher + ?Sized>(
    fetcher: &F,
    opts: &CollectOptions,
) -> Result<Vec<Entry>> {
    let entries = aggregate(fetcher, &opts.params).await?;
    sink::write_entries(&entries, &opts.output, opts.format)?;
    Ok(entries)
}

/// Score a collected file and write the three analysis artifacts.
pub fn run_analyze<S, R>(opts: &AnalyzeOptions, scorer: &S, renderer: &R) -> Result<SentimentSummary>
where
    S: PolarityScorer + ?Sized,
    R: CloudRenderer + ?Sized,
{
    if !opts.input.exists() {
        return Err(PipelineError::InputNotFound(opts.input.clone()));
    }
    let entries = sink::read_entries(&opts.input)?;
    let (scored, summary) = classify(entries, scorer);

    let terms = term_frequencies(&corpus(&scored), &default_stopwords());
    renderer.render(&terms, &opts.wordcloud_output)?;

    sink::write_scored(
        &scored,
        &opts.sentiment_output,
        OutputFormat::from_path(&opts.sentiment_output),
    )?;
    sink::write_summary(&summary, &opts.summary_output)?;
    Ok(summary)
}
