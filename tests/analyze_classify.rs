// tests/analyze_classify.rs
mod common;

use chrono::{TimeZone, Utc};
use common::*;
use feed_sentiment_analyzer::{
    aggregate_at, classify, AggregateParams, Entry, LexiconScorer, PolarityScorer,
    PolarityScores, SentimentLabel, SourceErrorPolicy,
};

/// Returns a preset compound for every call, regardless of text.
struct Constant(f64);

impl PolarityScorer for Constant {
    fn polarity_scores(&self, _text: &str) -> PolarityScores {
        PolarityScores {
            compound: self.0,
            pos: 0.0,
            neu: 1.0,
            neg: 0.0,
        }
    }
}

fn entry(title: &str, summary: &str) -> Entry {
    Entry {
        title: title.into(),
        link: String::new(),
        source: "unit".into(),
        published: Utc.with_ymd_and_hms(2025, 10, 15, 0, 0, 0).unwrap(),
        summary: summary.into(),
    }
}

#[test]
fn known_compounds_map_to_labels() {
    for (compound, want) in [
        (-0.2, SentimentLabel::Negative),
        (0.0, SentimentLabel::Neutral),
        (0.3, SentimentLabel::Positive),
    ] {
        let (scored, _) = classify(vec![entry("x", "")], &Constant(compound));
        assert_eq!(scored[0].sentiment_label, want, "compound {compound}");
    }
}

#[test]
fn lexicon_scores_stay_in_range_and_labels_follow_compound() {
    let entries = vec![
        entry("OpenAI praised for excellent launch", "Users love the great update!"),
        entry("OpenAI faces lawsuit", "Authors accuse the company of theft and fraud."),
        entry("OpenAI opens office", "The company opened an office on Monday."),
    ];
    let (scored, _) = classify(entries, &LexiconScorer::new());

    for e in &scored {
        assert!((-1.0..=1.0).contains(&e.compound));
        for v in [e.positive, e.neutral, e.negative] {
            assert!((0.0..=1.0).contains(&v));
        }
        assert_eq!(e.sentiment_label, SentimentLabel::from_compound(e.compound));
    }
    assert_eq!(scored[0].sentiment_label, SentimentLabel::Positive);
    assert_eq!(scored[1].sentiment_label, SentimentLabel::Negative);
    assert_eq!(scored[2].sentiment_label, SentimentLabel::Neutral);
}

#[tokio::test]
async fn summary_is_consistent_over_the_fixture_run() {
    let params = AggregateParams {
        sources: sources(),
        query: "OpenAI".into(),
        days: 30,
        min_results: 5,
        on_source_error: SourceErrorPolicy::Abort,
    };
    let entries = aggregate_at(&fixture_fetcher(), &params, fixture_now())
        .await
        .unwrap();
    let titles: Vec<String> = entries.iter().map(|e| e.title.clone()).collect();

    let (scored, summary) = classify(entries, &LexiconScorer::new());

    // enrichment only: same entries, same order
    let after: Vec<String> = scored.iter().map(|e| e.title.clone()).collect();
    assert_eq!(titles, after);

    let total = summary.negative + summary.neutral + summary.positive;
    assert!((total - 1.0).abs() < 1e-9);

    let mean = scored.iter().map(|e| e.compound).sum::<f64>() / scored.len() as f64;
    assert!((summary.average_compound.unwrap() - mean).abs() < 1e-12);
}
