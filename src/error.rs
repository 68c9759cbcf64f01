//! Error taxonomy shared by every stage.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[derive(Error, Debug)]
pub enum ScrapeError {
    /// No selector strategy matched a table on the page.
    #[error("no table found for {0}")]
    NotFound(String),

    /// Header layout differs from what the reconciler expects.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Non-success HTTP status or a failed request.
    #[error("transport failure for {url}: {reason}")]
    Transport { url: String, reason: String },

    /// The URL falls under a disallowed path prefix and was never requested.
    #[error("refusing disallowed url {0}")]
    Disallowed(String),

    /// A stage's expected input file is absent.
    #[error("missing input file {}", .0.display())]
    MissingFile(PathBuf),

    /// Invalid year ranges, unknown selectors, unreadable config. Fatal.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ScrapeError {
    /// Everything except configuration errors is skipped and logged by the
    /// batch loops; configuration errors abort before work starts.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ScrapeError::Config(_))
    }

    pub fn schema(msg: impl Into<String>) -> Self {
        ScrapeError::SchemaMismatch(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        ScrapeError::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_config_errors_are_fatal() {
        assert!(!ScrapeError::config("bad range").is_recoverable());
        assert!(ScrapeError::NotFound("div_advanced-team".into()).is_recoverable());
        assert!(ScrapeError::schema("missing 3P").is_recoverable());
        assert!(ScrapeError::MissingFile(PathBuf::from("data/2024/adv_2024.csv")).is_recoverable());
        assert!(ScrapeError::Transport {
            url: "https://example.com".into(),
            reason: "503".into()
        }
        .is_recoverable());
    }
}
