use std::collections::BTreeMap;

use crate::env::{MapOracle, StaticTile};

use super::{EntityId, Position};

/// Aggregated world-level state layered on top of the static map data.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldState {
    pub tile_map: TileMap,
}

impl WorldState {
    pub fn new(tile_map: TileMap) -> Self {
        Self { tile_map }
    }

    /// Produces a merged view combining static tile data with the dynamic occupant.
    pub fn tile_view<M>(&self, map: &M, position: Position) -> Option<TileView>
    where
        M: MapOracle + ?Sized,
    {
        let static_tile = map.tile(position)?;
        Some(TileView {
            position,
            static_tile,
            occupant: self.tile_map.occupant(&position),
        })
    }
}

/// Dynamic occupancy layered on top of immutable static tiles.
///
/// Invariant: at most one occupant per cell, and a registered entity occupies
/// exactly one cell. All mutation funnels through the movement engine,
/// knockback resolution, and spawn registration.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileMap {
    occupancy: BTreeMap<Position, EntityId>,
}

impl TileMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn occupant(&self, position: &Position) -> Option<EntityId> {
        self.occupancy.get(position).copied()
    }

    pub fn is_occupied(&self, position: &Position) -> bool {
        self.occupancy.contains_key(position)
    }

    /// Unconditional overwrite; callers must have validated legality.
    pub fn set_occupant(&mut self, position: Position, entity: EntityId) {
        self.occupancy.insert(position, entity);
    }

    /// Clears a cell, returning the evicted occupant if any.
    pub fn clear_occupant(&mut self, position: &Position) -> Option<EntityId> {
        self.occupancy.remove(position)
    }

    /// Position currently registered for an entity, if it is on the board.
    pub fn position_of(&self, entity: EntityId) -> Option<Position> {
        self.occupancy
            .iter()
            .find(|(_, occupant)| **occupant == entity)
            .map(|(position, _)| *position)
    }

    pub fn occupied_count(&self) -> usize {
        self.occupancy.len()
    }
}

/// Aggregated tile information used by validation and queries.
pub struct TileView {
    position: Position,
    static_tile: StaticTile,
    occupant: Option<EntityId>,
}

impl TileView {
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn static_tile(&self) -> &StaticTile {
        &self.static_tile
    }

    pub fn occupant(&self) -> Option<EntityId> {
        self.occupant
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn is_passable(&self) -> bool {
        self.static_tile.is_passable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_clear_restores_empty_state() {
        let mut tiles = TileMap::new();
        let cell = Position::new(3, 4);

        tiles.set_occupant(cell, EntityId(7));
        assert_eq!(tiles.occupant(&cell), Some(EntityId(7)));
        assert_eq!(tiles.position_of(EntityId(7)), Some(cell));

        assert_eq!(tiles.clear_occupant(&cell), Some(EntityId(7)));
        assert!(!tiles.is_occupied(&cell));
        assert_eq!(tiles.occupied_count(), 0);
        assert_eq!(tiles, TileMap::new());
    }

    #[test]
    fn at_most_one_occupant_per_cell() {
        let mut tiles = TileMap::new();
        let cell = Position::new(1, 1);

        tiles.set_occupant(cell, EntityId(1));
        tiles.set_occupant(cell, EntityId(2));

        assert_eq!(tiles.occupant(&cell), Some(EntityId(2)));
        assert_eq!(tiles.occupied_count(), 1);
    }
}
