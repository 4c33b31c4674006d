//! Configuration System
//!
//! Window and page-size constants shared by every list flavor, plus logging
//! settings. Loaded hierarchically with environment variable overrides and
//! validated before use.

use crate::error::PagerError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Default window width: 30 days
pub const DEFAULT_HORIZON_SECONDS: u64 = 2_592_000;
pub const DEFAULT_FIRST_PAGE_SIZE: u32 = 50;
pub const DEFAULT_SUBSEQUENT_PAGE_SIZE: u32 = 30;
/// Roughly one year of 30-day windows
pub const DEFAULT_MAX_WINDOWS: u32 = 12;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default)]
    pub pagination: PagerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Pagination constants for one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagerConfig {
    /// Width of one window, also the initial look-back from now
    #[serde(default = "default_horizon_seconds")]
    pub horizon_seconds: u64,

    /// Page size of the first request of a session
    #[serde(default = "default_first_page_size")]
    pub first_page_size: u32,

    /// Page size of every later request
    #[serde(default = "default_subsequent_page_size")]
    pub subsequent_page_size: u32,

    /// Windows a session may enter before it is exhausted. 0 means unbounded.
    #[serde(default = "default_max_windows")]
    pub max_windows: u32,
}

fn default_horizon_seconds() -> u64 {
    DEFAULT_HORIZON_SECONDS
}

fn default_first_page_size() -> u32 {
    DEFAULT_FIRST_PAGE_SIZE
}

fn default_subsequent_page_size() -> u32 {
    DEFAULT_SUBSEQUENT_PAGE_SIZE
}

fn default_max_windows() -> u32 {
    DEFAULT_MAX_WINDOWS
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            horizon_seconds: default_horizon_seconds(),
            first_page_size: default_first_page_size(),
            subsequent_page_size: default_subsequent_page_size(),
            max_windows: default_max_windows(),
        }
    }
}

impl PagerConfig {
    /// Page size for a request, given whether it opens the session
    pub fn page_size(&self, first_page: bool) -> u32 {
        if first_page {
            self.first_page_size
        } else {
            self.subsequent_page_size
        }
    }

    /// Window bound, `None` when unbounded
    pub fn window_limit(&self) -> Option<u32> {
        (self.max_windows > 0).then_some(self.max_windows)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.horizon_seconds == 0 {
            return Err("horizon_seconds must be greater than zero".to_string());
        }
        if self.horizon_seconds > i64::MAX as u64 {
            return Err(format!(
                "horizon_seconds {} does not fit a unix timestamp",
                self.horizon_seconds
            ));
        }
        if self.first_page_size == 0 {
            return Err("first_page_size must be greater than zero".to_string());
        }
        if self.subsequent_page_size == 0 {
            return Err("subsequent_page_size must be greater than zero".to_string());
        }
        if self.subsequent_page_size > self.first_page_size {
            return Err(format!(
                "subsequent_page_size ({}) cannot exceed first_page_size ({})",
                self.subsequent_page_size, self.first_page_size
            ));
        }
        Ok(())
    }
}

impl HistoryConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), PagerError> {
        self.pagination
            .validate()
            .map_err(|e| PagerError::ConfigError(format!("pagination: {}", e)))?;

        match self.logging.format.as_str() {
            "json" | "text" => {}
            other => {
                return Err(PagerError::ConfigError(format!(
                    "logging: invalid format '{}' (must be 'json' or 'text')",
                    other
                )))
            }
        }

        Ok(())
    }
}
