// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod analyze;
pub mod error;
pub mod ingest;
pub mod pipeline;
pub mod sentiment;
pub mod sink;

// ---- Re-exports for stable public API ----
pub use crate::analyze::{classify, ScoredEntry, SentimentLabel, SentimentSummary};
pub use crate::error::PipelineError;
pub use crate::ingest::types::{Entry, FeedFetcher, RawEntry, RawFeed};
pub use crate::ingest::{aggregate, aggregate_at, AggregateParams, SourceErrorPolicy};
pub use crate::sentiment::{LexiconScorer, PolarityScorer, PolarityScores};
