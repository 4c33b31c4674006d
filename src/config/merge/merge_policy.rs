//! Merge rules: defaults, override order, conflict handling.

use crate::config::{
    DEFAULT_FIRST_PAGE_SIZE, DEFAULT_HORIZON_SECONDS, DEFAULT_MAX_WINDOWS,
    DEFAULT_SUBSEQUENT_PAGE_SIZE,
};
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("pagination.horizon_seconds", DEFAULT_HORIZON_SECONDS)?
        .set_default("pagination.first_page_size", DEFAULT_FIRST_PAGE_SIZE)?
        .set_default("pagination.subsequent_page_size", DEFAULT_SUBSEQUENT_PAGE_SIZE)?
        .set_default("pagination.max_windows", DEFAULT_MAX_WINDOWS)?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")
}
