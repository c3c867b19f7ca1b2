//! Game configuration loader.

use std::path::Path;

use anyhow::Context;
use gridfall_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for `config.toml`.
///
/// Missing keys fall back to the documented defaults of [`GameConfig`].
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse game config {}", path.display()))
    }
}
