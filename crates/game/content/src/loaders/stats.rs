//! Stat template loader.

use std::path::Path;

use anyhow::Context;
use gridfall_core::StatBlock;

use crate::loaders::{LoadResult, read_file};

/// Loader for stat templates from a RON file.
///
/// RON format: `Vec<(String, StatBlock)>` — template name to stats. The
/// template named `"player"` supplies the player character; everything else
/// is referenced by enemy spawns.
pub struct StatsLoader;

impl StatsLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<(String, StatBlock)>> {
        let content = read_file(path)?;
        ron::from_str(&content)
            .with_context(|| format!("failed to parse stat templates {}", path.display()))
    }
}
