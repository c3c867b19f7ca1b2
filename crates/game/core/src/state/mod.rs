//! Authoritative game state representation.
//!
//! This module owns the data structures that describe combatants, grid
//! occupancy, the deck and hand, and turn bookkeeping. Runtime layers clone
//! or query this state but mutate it exclusively through the engine.

mod turn;
mod types;

use crate::env::MapOracle;
use crate::pattern::DeckState;

pub use turn::{TurnPhase, TurnState};
pub use types::{
    ActorState, CharacterModel, EntitiesState, EntityId, Facing, HandSlot, HandState, Offset,
    Position, StatBlock, TileMap, TileView, WorldState, direction_to,
};

/// Canonical snapshot of the deterministic game state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// RNG seed for deterministic random generation; set once at game
    /// initialization, combined with `turn.nonce` per random event.
    pub game_seed: u64,

    pub turn: TurnState,
    pub entities: EntitiesState,
    pub world: WorldState,
    pub deck: DeckState,
    pub hand: HandState,
}

impl GameState {
    pub fn new(game_seed: u64, entities: EntitiesState, deck: DeckState) -> Self {
        Self {
            game_seed,
            turn: TurnState::new(),
            entities,
            world: WorldState::default(),
            deck,
            hand: HandState::default(),
        }
    }

    /// Returns a merged tile view combining static map data with the runtime
    /// occupant.
    pub fn tile_view<M>(&self, map: &M, position: Position) -> Option<TileView>
    where
        M: MapOracle + ?Sized,
    {
        self.world.tile_view(map, position)
    }

    /// Whether a cell can be entered, considering terrain and occupancy.
    pub fn can_enter<M>(&self, map: &M, position: Position) -> bool
    where
        M: MapOracle + ?Sized,
    {
        self.tile_view(map, position)
            .map(|view| view.is_passable() && !view.is_occupied())
            .unwrap_or(false)
    }

    /// Spawn-time placement of an actor's occupancy.
    ///
    /// Returns false and leaves all state untouched when the target cell is
    /// already occupied — conflicting spawn registrations are a skipped
    /// no-op, not a failure.
    pub fn register_occupant(&mut self, entity: EntityId, position: Position) -> bool {
        if self.world.tile_map.is_occupied(&position) {
            return false;
        }
        self.world.tile_map.set_occupant(position, entity);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_occupant_noops_on_conflict() {
        let player = ActorState::new(
            EntityId::PLAYER,
            Position::ORIGIN,
            Facing::Down,
            &StatBlock::GENERIC,
        );
        let mut state = GameState::new(0, EntitiesState::new(player), DeckState::default());

        assert!(state.register_occupant(EntityId::PLAYER, Position::new(2, 2)));
        assert!(!state.register_occupant(EntityId(1), Position::new(2, 2)));
        assert_eq!(
            state.world.tile_map.occupant(&Position::new(2, 2)),
            Some(EntityId::PLAYER)
        );
    }
}
