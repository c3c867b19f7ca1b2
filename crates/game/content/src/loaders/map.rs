//! Map layout loader.

use std::path::Path;

use anyhow::Context;
use gridfall_core::{Facing, GridGeometry, Position};

use crate::loaders::{LoadResult, read_file};

/// Raw map layout as authored in `map.ron`.
///
/// Cells not listed as obstacles or borders are floor. Out-of-range entries
/// are skipped with a warning when the map oracle is built.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct MapSpec {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub geometry: Option<GridGeometry>,
    #[serde(default)]
    pub obstacles: Vec<Position>,
    #[serde(default)]
    pub borders: Vec<Position>,
    pub player_start: StartSpec,
    #[serde(default)]
    pub spawns: Vec<SpawnSpec>,
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct StartSpec {
    pub cell: Position,
    pub facing: Facing,
}

/// One authored enemy spawn: stat template name plus grid position.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SpawnSpec {
    pub stats: String,
    pub position: Position,
}

/// Loader for the map layout from a RON file.
pub struct MapLoader;

impl MapLoader {
    pub fn load(path: &Path) -> LoadResult<MapSpec> {
        let content = read_file(path)?;
        ron::from_str(&content)
            .with_context(|| format!("failed to parse map layout {}", path.display()))
    }
}
