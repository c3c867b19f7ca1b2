//! Deck composition loader.

use std::path::Path;

use anyhow::Context;

use crate::loaders::{LoadResult, read_file};

/// Loader for the deck composition from a RON file.
///
/// RON format: `Vec<(String, u32)>` — pattern name and copy count. Names are
/// resolved against the pattern catalog when the content bundle is built;
/// unknown names are skipped there with a warning.
pub struct DeckLoader;

impl DeckLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<(String, u32)>> {
        let content = read_file(path)?;
        ron::from_str(&content)
            .with_context(|| format!("failed to parse deck composition {}", path.display()))
    }
}
