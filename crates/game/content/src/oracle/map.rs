//! Concrete map oracle backed by a loaded layout.

use std::collections::BTreeSet;

use anyhow::bail;
use gridfall_core::{
    EnemySpawn, EntityId, Facing, GridGeometry, MapDimensions, MapOracle, Position, StaticTile,
    TerrainKind,
};

use crate::loaders::MapSpec;
use crate::oracle::CatalogContent;

/// Static board layout plus the initial entity placement.
#[derive(Clone, Debug)]
pub struct MapContent {
    dimensions: MapDimensions,
    geometry: GridGeometry,
    obstacles: BTreeSet<Position>,
    borders: BTreeSet<Position>,
    player_start: (Position, Facing),
    spawns: Vec<EnemySpawn>,
}

impl MapContent {
    /// Builds the oracle from a raw layout, resolving spawn templates
    /// against the catalog.
    ///
    /// Out-of-range obstacles/borders and invalid spawns are skipped with a
    /// warning. An invalid player start aborts the build — nothing sensible
    /// can run without one.
    pub fn build(spec: MapSpec, catalog: &CatalogContent) -> anyhow::Result<Self> {
        let dimensions = MapDimensions::new(spec.width, spec.height);

        let mut obstacles = BTreeSet::new();
        for cell in spec.obstacles {
            if dimensions.contains(cell) {
                obstacles.insert(cell);
            } else {
                tracing::warn!(%cell, "obstacle outside the board, skipping");
            }
        }

        let mut borders = BTreeSet::new();
        for cell in spec.borders {
            if !dimensions.contains(cell) {
                tracing::warn!(%cell, "border outside the board, skipping");
                continue;
            }
            if obstacles.contains(&cell) {
                tracing::warn!(%cell, "border overlaps an obstacle, skipping");
                continue;
            }
            borders.insert(cell);
        }

        let start = spec.player_start.cell;
        if !dimensions.contains(start) || obstacles.contains(&start) || borders.contains(&start) {
            bail!("invalid player start cell {start}");
        }

        let mut spawns = Vec::new();
        let mut occupied: BTreeSet<Position> = BTreeSet::new();
        occupied.insert(start);
        for spawn in spec.spawns {
            let Some(stats) = catalog.stats_id(&spawn.stats) else {
                tracing::warn!(template = %spawn.stats, "spawn references unknown stats, skipping");
                continue;
            };
            let cell = spawn.position;
            if !dimensions.contains(cell)
                || obstacles.contains(&cell)
                || borders.contains(&cell)
                || occupied.contains(&cell)
            {
                tracing::warn!(%cell, "invalid enemy spawn position, skipping");
                continue;
            }
            occupied.insert(cell);
            spawns.push(EnemySpawn {
                // Id 0 is the player; enemies take the following ids.
                id: EntityId(spawns.len() as u32 + 1),
                stats,
                position: cell,
                facing: Facing::Down,
            });
        }

        Ok(Self {
            dimensions,
            geometry: spec.geometry.unwrap_or_default(),
            obstacles,
            borders,
            player_start: (start, spec.player_start.facing),
            spawns,
        })
    }
}

impl MapOracle for MapContent {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn tile(&self, position: Position) -> Option<StaticTile> {
        if !self.dimensions.contains(position) {
            return None;
        }
        let terrain = if self.obstacles.contains(&position) {
            TerrainKind::Obstacle
        } else if self.borders.contains(&position) {
            TerrainKind::Border
        } else {
            TerrainKind::Floor
        };
        Some(StaticTile::new(terrain))
    }

    fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    fn player_start(&self) -> (Position, Facing) {
        self.player_start
    }

    fn enemy_spawns(&self) -> Vec<EnemySpawn> {
        self.spawns.clone()
    }
}
