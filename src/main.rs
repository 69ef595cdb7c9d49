//! feed-sentiment: collect recent feed entries, then score their sentiment.
//!
//!   feed-sentiment collect --query OpenAI --days 30 --min-results 20
//!   feed-sentiment analyze --input openai_articles.csv

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use feed_sentiment_analyzer::analyze::wordcloud::FrequencyTableRenderer;
use feed_sentiment_analyzer::ingest::config::resolve_feeds;
use feed_sentiment_analyzer::ingest::providers::DefaultFetcher;
use feed_sentiment_analyzer::pipeline::{run_analyze, run_collect, AnalyzeOptions, CollectOptions};
use feed_sentiment_analyzer::sink::OutputFormat;
use feed_sentiment_analyzer::{AggregateParams, LexiconScorer, SourceErrorPolicy};

#[derive(Parser)]
#[command(name = "feed-sentiment")]
#[command(about = "Collect recent feed entries and analyze their sentiment")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Gather recent, unique, query-matching entries across feeds
    Collect(CollectArgs),
    /// Score collected entries and write sentiment + word-frequency outputs
    Analyze(AnalyzeArgs),
}

#[derive(clap::Args)]
struct CollectArgs {
    /// Keyword filter applied to titles and summaries
    #[arg(long, default_value = "OpenAI")]
    query: String,

    /// Minimum number of unique items required for success
    #[arg(long, default_value_t = 20)]
    min_results: usize,

    /// Look-back window in days
    #[arg(long, default_value_t = 30)]
    days: u32,

    /// File format for saved results
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Path to save collected results
    #[arg(long, default_value = "openai_articles.csv")]
    output: PathBuf,

    /// Feed URLs or local paths; overrides the configured feed list
    #[arg(long, num_args = 1..)]
    feeds: Vec<String>,

    /// Continue when a feed fails instead of aborting the run
    #[arg(long, env = "SKIP_FAILED_FEEDS")]
    skip_failed_feeds: bool,
}

#[derive(clap::Args)]
struct AnalyzeArgs {
    /// Collected entries (CSV or JSON)
    #[arg(long, default_value = "openai_articles.csv")]
    input: PathBuf,

    /// Word-frequency table for the word-cloud renderer
    #[arg(long, default_value = "openai_wordcloud.json")]
    wordcloud_output: PathBuf,

    /// Entries with sentiment columns
    #[arg(long, default_value = "openai_articles_with_sentiment.csv")]
    sentiment_output: PathBuf,

    /// Label fractions and average compound score
    #[arg(long, default_value = "sentiment_summary.json")]
    summary_output: PathBuf,

    /// Custom JSON lexicon ({"word": valence})
    #[arg(long, env = "SENTIMENT_LEXICON_PATH")]
    lexicon: Option<PathBuf>,

    /// Number of terms kept in the word-frequency table
    #[arg(long, default_value_t = 200)]
    top_terms: usize,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("feed_sentiment_analyzer=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

async fn collect(args: CollectArgs) -> Result<()> {
    let feeds = resolve_feeds(args.feeds).context("loading feed list")?;
    tracing::info!(count = feeds.sources.len(), origin = %feeds.origin, "feed list resolved");

    let opts = CollectOptions {
        params: AggregateParams {
            sources: feeds.sources,
            query: args.query,
            days: args.days,
            min_results: args.min_results,
            on_source_error: if args.skip_failed_feeds {
                SourceErrorPolicy::Skip
            } else {
                SourceErrorPolicy::Abort
            },
        },
        format: args.format,
        output: args.output,
    };

    let fetcher = DefaultFetcher::new()?;
    let entries = run_collect(&fetcher, &opts)
        .await
        .context("collection failed")?;

    println!(
        "Collected {} items. Saved to {}.",
        entries.len(),
        opts.output.display()
    );
    Ok(())
}

fn analyze(args: AnalyzeArgs) -> Result<()> {
    let scorer = match &args.lexicon {
        Some(p) => LexiconScorer::load_from_file(p)?,
        None => LexiconScorer::new(),
    };
    let renderer = FrequencyTableRenderer {
        limit: args.top_terms,
    };
    let opts = AnalyzeOptions {
        input: args.input,
        wordcloud_output: args.wordcloud_output,
        sentiment_output: args.sentiment_output,
        summary_output: args.summary_output,
    };

    let summary = run_analyze(&opts, &scorer, &renderer).context("analysis failed")?;

    println!("Word frequencies and sentiment analysis complete.");
    println!("- word frequencies: {}", opts.wordcloud_output.display());
    println!("- sentiment table:  {}", opts.sentiment_output.display());
    println!("- summary:          {}", opts.summary_output.display());
    if let Some(avg) = summary.average_compound {
        println!(
            "  positive {:.1}% / neutral {:.1}% / negative {:.1}%, mean compound {avg:+.4}",
            summary.positive * 100.0,
            summary.neutral * 100.0,
            summary.negative * 100.0
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let args = Args::parse();
    match args.command {
        Command::Collect(a) => collect(a).await,
        Command::Analyze(a) => analyze(a),
    }
}
