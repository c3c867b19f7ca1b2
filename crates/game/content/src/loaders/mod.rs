//! Data file loaders.
//!
//! Each loader reads one kind of content file (TOML for configuration,
//! RON for catalogs) into core types. Loader failures are `anyhow` errors
//! with file context; individually invalid entries inside an otherwise
//! readable file are skipped with a warning rather than failing the load.

mod config;
mod deck;
mod map;
mod patterns;
mod stats;
mod tables;

pub use config::ConfigLoader;
pub use deck::DeckLoader;
pub use map::{MapLoader, MapSpec, SpawnSpec, StartSpec};
pub use patterns::PatternLoader;
pub use stats::StatsLoader;
pub use tables::TablesLoader;

use std::path::Path;

use anyhow::Context;

/// Result alias shared by all loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Reads a content file into a string with path context on failure.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read content file {}", path.display()))
}
