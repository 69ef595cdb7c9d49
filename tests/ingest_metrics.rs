use metrics::{Counter, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use feed_sentiment_analyzer::ingest::providers::HttpFetcher;
use feed_sentiment_analyzer::{aggregate, AggregateParams, SourceErrorPolicy};

/// Records only `ingest_provider_errors_total`.
#[derive(Default)]
struct ProviderErrors(Arc<AtomicU64>);

impl Recorder for ProviderErrors {
    fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
    fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
    fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

    fn register_counter(&self, key: &Key, _: &Metadata<'_>) -> Counter {
        if key.name() == "ingest_provider_errors_total" {
            Counter::from_arc(Arc::clone(&self.0))
        } else {
            Counter::noop()
        }
    }

    fn register_gauge(&self, _: &Key, _: &Metadata<'_>) -> Gauge {
        Gauge::noop()
    }

    fn register_histogram(&self, _: &Key, _: &Metadata<'_>) -> Histogram {
        Histogram::noop()
    }
}

#[test]
fn failed_http_feed_counts_one_provider_error() {
    let recorder = ProviderErrors::default();
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    let params = AggregateParams {
        // Nothing listens on port 1; the connection is refused.
        sources: vec!["http://127.0.0.1:1/feed.xml".to_string()],
        query: String::new(),
        days: 30,
        min_results: 0,
        on_source_error: SourceErrorPolicy::Skip,
    };

    let out = metrics::with_local_recorder(&recorder, || {
        let fetcher = HttpFetcher::new().unwrap();
        rt.block_on(aggregate(&fetcher, &params))
    })
    .unwrap();

    assert!(out.is_empty());
    assert_eq!(recorder.0.load(Ordering::Relaxed), 1);
}
