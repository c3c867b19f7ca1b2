//! Single-step board movement and directional target queries.
//!
//! [`MoveStepAction`] is the sole gate for all single-step movement, used by
//! both player pattern execution and enemy turns. Rejections are expected
//! control-flow outcomes carrying no partial mutation.

use crate::action::ActionTransition;
use crate::env::{GameEnv, WorldPos};
use crate::state::{EntityId, Facing, GameState, Position, direction_to};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveError {
    #[error("map oracle not available")]
    MissingMap,

    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    #[error("actor {0} is being torn down")]
    ActorDying(EntityId),

    #[error("destination {destination} is out of bounds")]
    OutOfBounds { destination: Position },

    #[error("destination {destination} is blocked")]
    Blocked { destination: Position },

    #[error("destination {destination} is occupied")]
    Occupied { destination: Position },

    #[error("occupancy desync for actor {actor} at {position}")]
    OccupancyDesync { actor: EntityId, position: Position },

    #[error("actor {actor} missing from occupants at {position}")]
    MissingOccupant { actor: EntityId, position: Position },
}

/// Relocation of an actor to an explicit destination cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveStepAction {
    pub actor: EntityId,
    pub to: Position,
}

impl MoveStepAction {
    pub fn new(actor: EntityId, to: Position) -> Self {
        Self { actor, to }
    }
}

/// Facts about a committed move, consumed by the event layer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveRecord {
    pub actor: EntityId,
    pub from: Position,
    pub to: Position,
    /// New facing derived from the move delta; `None` if unchanged.
    pub facing: Option<Facing>,
    /// Destination cell center in world space, for the presentation layer.
    pub world_pos: WorldPos,
}

impl ActionTransition for MoveStepAction {
    type Error = MoveError;
    type Result = MoveRecord;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let actor_state = state
            .entities
            .actor(self.actor)
            .ok_or(MoveError::ActorNotFound(self.actor))?;
        if actor_state.dying {
            return Err(MoveError::ActorDying(self.actor));
        }

        let map = env.map().map_err(|_| MoveError::MissingMap)?;
        let destination = self.to;
        let tile_view = state
            .tile_view(map, destination)
            .ok_or(MoveError::OutOfBounds { destination })?;

        if !tile_view.is_passable() {
            return Err(MoveError::Blocked { destination });
        }

        if tile_view.is_occupied() {
            return Err(MoveError::Occupied { destination });
        }

        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        let actor_state = state
            .entities
            .actor(self.actor)
            .ok_or(MoveError::ActorNotFound(self.actor))?;
        let origin = actor_state.position;
        let previous_facing = actor_state.facing;
        let destination = self.to;

        // Update occupancy
        match state.world.tile_map.clear_occupant(&origin) {
            Some(occupant) if occupant == self.actor => {}
            Some(other) => {
                // Put the evicted occupant back; nothing else was touched.
                state.world.tile_map.set_occupant(origin, other);
                return Err(MoveError::OccupancyDesync {
                    actor: self.actor,
                    position: origin,
                });
            }
            None => {
                return Err(MoveError::OccupancyDesync {
                    actor: self.actor,
                    position: origin,
                });
            }
        }
        state.world.tile_map.set_occupant(destination, self.actor);

        // Update tracked position and facing
        let facing = direction_to(origin, destination);
        let actor_state = state
            .entities
            .actor_mut(self.actor)
            .ok_or(MoveError::ActorNotFound(self.actor))?;
        actor_state.position = destination;
        if let Some(facing) = facing {
            actor_state.facing = facing;
        }

        let map = env.map().map_err(|_| MoveError::MissingMap)?;
        let world_pos = map.geometry().world_position(map.dimensions(), destination);

        Ok(MoveRecord {
            actor: self.actor,
            from: origin,
            to: destination,
            facing: facing.filter(|f| *f != previous_facing),
            world_pos,
        })
    }

    fn post_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let actor_state = state
            .entities
            .actor(self.actor)
            .ok_or(MoveError::ActorNotFound(self.actor))?;
        let is_present = state
            .world
            .tile_map
            .occupant(&actor_state.position)
            .is_some_and(|occupant| occupant == self.actor);

        if is_present {
            Ok(())
        } else {
            Err(MoveError::MissingOccupant {
                actor: self.actor,
                position: actor_state.position,
            })
        }
    }
}

/// Finds an enemy in the forward cell of `facing`, then the two lateral
/// cells in left-of-facing, right-of-facing order.
///
/// Forward always wins; the lateral order is the documented deterministic
/// tie-break. Returns the first enemy occupant together with its cell.
pub fn find_enemy_in_direction(
    state: &GameState,
    origin: Position,
    facing: Facing,
) -> Option<(EntityId, Position)> {
    let forward = origin + facing.delta();
    if let Some(found) = enemy_at(state, forward) {
        return Some(found);
    }

    for side in facing.lateral() {
        let cell = origin + side.delta();
        if let Some(found) = enemy_at(state, cell) {
            return Some(found);
        }
    }

    None
}

fn enemy_at(state: &GameState, position: Position) -> Option<(EntityId, Position)> {
    let occupant = state.world.tile_map.occupant(&position)?;
    state
        .entities
        .is_enemy(occupant)
        .then_some((occupant, position))
}

/// The player's cell when it is one orthogonal step from `origin`.
pub fn player_adjacent_to(state: &GameState, origin: Position) -> Option<Position> {
    let player_pos = state.entities.player.position;
    origin.is_adjacent(player_pos).then_some(player_pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ActorState, EntitiesState, StatBlock};
    use crate::testkit::{TestMap, test_env};

    fn state_with_player_at(position: Position) -> GameState {
        let player = ActorState::new(EntityId::PLAYER, position, Facing::Down, &StatBlock::GENERIC);
        let mut state = GameState::new(0, EntitiesState::new(player), Default::default());
        state.register_occupant(EntityId::PLAYER, position);
        state
    }

    fn add_enemy(state: &mut GameState, id: EntityId, position: Position) {
        state
            .entities
            .enemies
            .push(ActorState::new(id, position, Facing::Down, &StatBlock::GENERIC));
        state.register_occupant(id, position);
    }

    #[test]
    fn rejected_moves_leave_state_untouched() {
        let map = TestMap::empty(9, 9).with_obstacle(Position::new(4, 6));
        let mut state = state_with_player_at(Position::new(4, 4));
        add_enemy(&mut state, EntityId(1), Position::new(4, 3));
        let before = state.clone();

        let (tables, config, rng) = test_env();
        let env = crate::env::Env::with_all(&map, &crate::testkit::EMPTY_CONTENT, &tables, &config, &rng)
            .as_game_env();

        for target in [
            Position::new(4, 9),  // out of bounds
            Position::new(4, 6),  // obstacle
            Position::new(4, 3),  // occupied
        ] {
            let action = MoveStepAction::new(EntityId::PLAYER, target);
            assert!(action.pre_validate(&state, &env).is_err());
            assert_eq!(state, before);
        }
    }

    #[test]
    fn committed_move_updates_occupancy_position_and_facing() {
        let map = TestMap::empty(9, 9);
        let mut state = state_with_player_at(Position::new(4, 4));

        let (tables, config, rng) = test_env();
        let env = crate::env::Env::with_all(&map, &crate::testkit::EMPTY_CONTENT, &tables, &config, &rng)
            .as_game_env();

        let action = MoveStepAction::new(EntityId::PLAYER, Position::new(5, 4));
        action.pre_validate(&state, &env).unwrap();
        let record = action.apply(&mut state, &env).unwrap();
        action.post_validate(&state, &env).unwrap();

        assert_eq!(record.from, Position::new(4, 4));
        assert_eq!(record.to, Position::new(5, 4));
        assert_eq!(record.facing, Some(Facing::Right));
        assert!(!state.world.tile_map.is_occupied(&Position::new(4, 4)));
        assert_eq!(
            state.world.tile_map.occupant(&Position::new(5, 4)),
            Some(EntityId::PLAYER)
        );
        assert_eq!(state.entities.player.position, Position::new(5, 4));
        assert_eq!(state.entities.player.facing, Facing::Right);
    }

    #[test]
    fn directional_search_prefers_forward_then_left() {
        let mut state = state_with_player_at(Position::new(4, 4));
        // Facing up from (4,4): forward (4,5), left (3,4), right (5,4).
        add_enemy(&mut state, EntityId(1), Position::new(3, 4));
        add_enemy(&mut state, EntityId(2), Position::new(5, 4));

        let found = find_enemy_in_direction(&state, Position::new(4, 4), Facing::Up);
        assert_eq!(found, Some((EntityId(1), Position::new(3, 4))));

        add_enemy(&mut state, EntityId(3), Position::new(4, 5));
        let found = find_enemy_in_direction(&state, Position::new(4, 4), Facing::Up);
        assert_eq!(found, Some((EntityId(3), Position::new(4, 5))));
    }
}
