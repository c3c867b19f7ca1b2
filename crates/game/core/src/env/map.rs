use crate::state::{EntityId, Facing, Position};

use super::StatsId;

/// Static map oracle exposing immutable layout information and initial
/// combatant placement.
pub trait MapOracle: Send + Sync {
    fn dimensions(&self) -> MapDimensions;
    fn tile(&self, position: Position) -> Option<StaticTile>;

    /// Board-to-world mapping parameters consumed by presentation events.
    fn geometry(&self) -> GridGeometry {
        GridGeometry::default()
    }

    /// Cell and facing the player starts the scenario in.
    fn player_start(&self) -> (Position, Facing);

    /// Enemies that should exist when the scenario starts.
    fn enemy_spawns(&self) -> Vec<EnemySpawn> {
        Vec::new()
    }

    fn contains(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }
}

/// Immutable descriptor for a cell in the static layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticTile {
    terrain: TerrainKind,
}

impl StaticTile {
    pub const fn new(terrain: TerrainKind) -> Self {
        Self { terrain }
    }

    pub fn terrain(self) -> TerrainKind {
        self.terrain
    }

    pub fn is_passable(self) -> bool {
        self.terrain.is_passable()
    }
}

/// Canonical terrain classes for static cells.
///
/// Obstacles are permanently impassable and never hold an occupant. Borders
/// are impassable to normal movement and additionally block knockback,
/// producing collision damage instead of relocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    Floor,
    Obstacle,
    Border,
}

impl TerrainKind {
    pub fn is_passable(self) -> bool {
        matches!(self, TerrainKind::Floor)
    }
}

/// Blueprint for an enemy that should exist at the start of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemySpawn {
    pub id: EntityId,
    pub stats: StatsId,
    pub position: Position,
    pub facing: Facing,
}

/// World-space position of a cell center, consumed only by presentation.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

/// Pure board-to-world coordinate mapping.
///
/// The grid is centered on `origin`; a cell center sits at
/// `origin − half_extent + (coord + 0.5) · cell_size` per axis.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridGeometry {
    pub origin_x: f32,
    pub origin_y: f32,
    pub cell_size: f32,
}

impl GridGeometry {
    pub fn world_position(&self, dimensions: MapDimensions, position: Position) -> WorldPos {
        let half_width = dimensions.width as f32 * self.cell_size * 0.5;
        let half_height = dimensions.height as f32 * self.cell_size * 0.5;

        WorldPos {
            x: self.origin_x - half_width + (position.x as f32 + 0.5) * self.cell_size,
            y: self.origin_y - half_height + (position.y as f32 + 0.5) * self.cell_size,
        }
    }

    /// Inverse mapping via floor division; `None` when outside the board.
    pub fn position_from_world(
        &self,
        dimensions: MapDimensions,
        world: WorldPos,
    ) -> Option<Position> {
        let half_width = dimensions.width as f32 * self.cell_size * 0.5;
        let half_height = dimensions.height as f32 * self.cell_size * 0.5;

        let x = ((world.x - (self.origin_x - half_width)) / self.cell_size).floor() as i32;
        let y = ((world.y - (self.origin_y - half_height)) / self.cell_size).floor() as i32;

        let position = Position::new(x, y);
        dimensions.contains(position).then_some(position)
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            cell_size: 1.0,
        }
    }
}
