//! Error types for the history pager.
//!
//! Page fetcher failures are deliberately absent: they reach the caller as the
//! fetcher's own error type (see [`crate::pagination::PaginationEngine::fetch_page`]).

use thiserror::Error;

/// Errors originating inside the pager itself
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PagerError {
    #[error("Invalid filter format: {0}")]
    InvalidFilterFormat(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for PagerError {
    fn from(err: config::ConfigError) -> Self {
        PagerError::ConfigError(err.to_string())
    }
}
