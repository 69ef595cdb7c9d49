// tests/pipeline_e2e.rs
mod common;

use common::*;
use feed_sentiment_analyzer::analyze::wordcloud::FrequencyTableRenderer;
use feed_sentiment_analyzer::pipeline::{run_analyze, run_collect, AnalyzeOptions, CollectOptions};
use feed_sentiment_analyzer::sink::{OutputFormat, SCORED_COLUMNS};
use feed_sentiment_analyzer::{AggregateParams, LexiconScorer, PipelineError, SourceErrorPolicy};
use std::fs;

fn collect_opts(dir: &std::path::Path, min_results: usize, format: OutputFormat) -> CollectOptions {
    let file = match format {
        OutputFormat::Csv => "articles.csv",
        OutputFormat::Json => "articles.json",
    };
    CollectOptions {
        params: AggregateParams {
            sources: sources(),
            query: "OpenAI".into(),
            // The fixtures are dated; a wide window keeps them recent on any clock.
            days: 36_500,
            min_results,
            on_source_error: SourceErrorPolicy::Abort,
        },
        format,
        output: dir.join(file),
    }
}

#[tokio::test]
async fn collect_then_analyze_writes_all_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let opts = collect_opts(dir.path(), 5, OutputFormat::Csv);

    let collected = run_collect(&fixture_fetcher(), &opts).await.unwrap();
    // the stale item is only stale relative to a 30-day window
    assert_eq!(collected.len(), 10);

    let analyze = AnalyzeOptions {
        input: opts.output.clone(),
        wordcloud_output: dir.path().join("cloud.json"),
        sentiment_output: dir.path().join("scored.csv"),
        summary_output: dir.path().join("summary.json"),
    };
    let summary = run_analyze(&analyze, &LexiconScorer::new(), &FrequencyTableRenderer::default())
        .unwrap();
    assert!(summary.average_compound.is_some());

    let scored = fs::read_to_string(&analyze.sentiment_output).unwrap();
    assert_eq!(scored.lines().next().unwrap(), SCORED_COLUMNS.join(","));
    assert_eq!(scored.lines().count(), 1 + collected.len());

    let summary_json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&analyze.summary_output).unwrap()).unwrap();
    for key in ["negative", "neutral", "positive", "average_compound"] {
        assert!(summary_json.get(key).is_some(), "missing {key}");
    }

    let cloud: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&analyze.wordcloud_output).unwrap()).unwrap();
    assert!(cloud
        .as_array()
        .unwrap()
        .iter()
        .all(|row| row["word"] != "openai"));
}

#[tokio::test]
async fn json_collection_feeds_analysis_too() {
    let dir = tempfile::tempdir().unwrap();
    let opts = collect_opts(dir.path(), 1, OutputFormat::Json);
    run_collect(&fixture_fetcher(), &opts).await.unwrap();

    let analyze = AnalyzeOptions {
        input: opts.output.clone(),
        wordcloud_output: dir.path().join("cloud.json"),
        sentiment_output: dir.path().join("scored.json"),
        summary_output: dir.path().join("summary.json"),
    };
    run_analyze(&analyze, &LexiconScorer::new(), &FrequencyTableRenderer::default()).unwrap();

    let v: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&analyze.sentiment_output).unwrap()).unwrap();
    let first = &v.as_array().unwrap()[0];
    assert!(first.get("sentiment_label").is_some());
    assert_eq!(first["title"], "OpenAI launches new model");
}

#[tokio::test]
async fn insufficient_results_write_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let opts = collect_opts(dir.path(), 50, OutputFormat::Csv);
    let err = run_collect(&fixture_fetcher(), &opts).await.unwrap_err();
    assert!(matches!(
        err,
        PipelineError::InsufficientResults {
            actual: 10,
            required: 50
        }
    ));
    assert!(!opts.output.exists());
}

#[test]
fn analyze_missing_input_fails_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let analyze = AnalyzeOptions {
        input: dir.path().join("nope.csv"),
        wordcloud_output: dir.path().join("cloud.json"),
        sentiment_output: dir.path().join("scored.csv"),
        summary_output: dir.path().join("summary.json"),
    };
    let err = run_analyze(&analyze, &LexiconScorer::new(), &FrequencyTableRenderer::default())
        .unwrap_err();
    assert!(matches!(err, PipelineError::InputNotFound(_)));
    assert!(!analyze.summary_output.exists());
    assert!(!analyze.wordcloud_output.exists());
}
