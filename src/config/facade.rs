//! Config loading facade: one place that applies the merge order.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::ConfigBuilder;

use super::merge::merge_policy;
use super::sources::{environment, global_file, local_file};
use super::HistoryConfig;
use crate::error::PagerError;

/// Loads [`HistoryConfig`] from layered sources
///
/// Precedence, lowest to highest: built-in defaults, global file,
/// directory or explicit file, `HISTORY_PAGER__*` environment variables.
/// The merged result is validated before it is returned.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load using the global file plus `<config_dir>/config.toml` and its env-specific sibling
    pub fn load(config_dir: &Path) -> Result<HistoryConfig, PagerError> {
        let builder = global_file::add_to_builder(merge_policy::builder_with_defaults()?)?;
        let builder = local_file::add_to_builder(builder, config_dir)?;
        Self::finish(builder)
    }

    /// Load using the global file plus one explicitly named file, which must exist
    pub fn load_from_file(path: &Path) -> Result<HistoryConfig, PagerError> {
        let builder = global_file::add_to_builder(merge_policy::builder_with_defaults()?)?;
        let builder = local_file::add_file(builder, path)?;
        Self::finish(builder)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<HistoryConfig, PagerError> {
        let config: HistoryConfig = environment::add_to_builder(builder)
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Global config file location, whether or not it exists
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    /// Built-in defaults only
    pub fn defaults() -> HistoryConfig {
        HistoryConfig::default()
    }
}
