//! Pattern catalog loader.

use std::path::Path;

use anyhow::Context;
use gridfall_core::Pattern;

use crate::loaders::{LoadResult, read_file};

/// Loader for the pattern catalog from a RON file.
///
/// RON format: `Vec<Pattern>`; catalog order defines the pattern ids.
pub struct PatternLoader;

impl PatternLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<Pattern>> {
        let content = read_file(path)?;
        let patterns: Vec<Pattern> = ron::from_str(&content)
            .with_context(|| format!("failed to parse pattern catalog {}", path.display()))?;

        for pattern in &patterns {
            if pattern.steps.is_empty() {
                tracing::warn!(pattern = %pattern.name, "pattern has no steps");
            }
        }

        Ok(patterns)
    }
}
