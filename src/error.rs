// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Terminal failures of a collection or analysis run.
///
/// Per-entry problems (missing timestamp, empty title) never surface here;
/// those entries are dropped during aggregation.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to fetch feed {url}: {source:#}")]
    Fetch {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    #[error(
        "only {actual} unique results collected ({actual} < {required}); \
         consider adding more feeds or adjusting filters"
    )]
    InsufficientResults { actual: usize, required: usize },

    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = PipelineError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_results_reports_actual_vs_required() {
        let e = PipelineError::InsufficientResults {
            actual: 9,
            required: 12,
        };
        assert!(e.to_string().contains("9 < 12"));
    }

    #[test]
    fn fetch_error_names_the_url() {
        let e = PipelineError::Fetch {
            url: "https://example.com/rss".into(),
            source: anyhow::anyhow!("connection refused"),
        };
        let msg = e.to_string();
        assert!(msg.contains("https://example.com/rss"));
        assert!(msg.contains("connection refused"));
    }
}
