//! Balance tables loader.

use std::path::Path;

use anyhow::Context;
use gridfall_core::BalanceTables;

use crate::loaders::{LoadResult, read_file};

/// Loader for `tables.toml`.
///
/// Missing keys fall back to the default multipliers (Basic ×1, Attack ×2,
/// Special ×3).
pub struct TablesLoader;

impl TablesLoader {
    pub fn load(path: &Path) -> LoadResult<BalanceTables> {
        let content = read_file(path)?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse balance tables {}", path.display()))
    }
}
