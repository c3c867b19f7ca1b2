//! Enemy turn decisions: attack when adjacent, otherwise wander.
//!
//! An enemy with the player one orthogonal step away faces them and attacks.
//! Otherwise it picks a random reachable cell within its movement range —
//! orthogonal straight-line cells only, destination-validated against the
//! grid. No pathfinding beyond that.

use gridfall_core::{EntityId, GameState, MapOracle, Position, RngOracle, compute_seed, roll};

/// What an enemy chose to do with its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyDecision {
    /// The player is adjacent: face them and strike.
    AttackPlayer,
    /// Step toward a reachable cell.
    MoveTo(Position),
    /// No valid move this turn.
    Hold,
}

/// Decides one enemy's turn against the current board state.
pub fn decide_enemy_turn(
    state: &GameState,
    map: &(impl MapOracle + ?Sized),
    rng: &(impl RngOracle + ?Sized),
    movement_range: u32,
    enemy: EntityId,
) -> EnemyDecision {
    let Some(actor) = state.entities.actor(enemy) else {
        return EnemyDecision::Hold;
    };
    let origin = actor.position;

    // Attack beats movement whenever the player is in reach.
    let player_pos = state.entities.player.position;
    if origin.is_adjacent(player_pos) && state.entities.player.is_alive() {
        return EnemyDecision::AttackPlayer;
    }

    let candidates = reachable_cells(state, map, origin, movement_range);
    if candidates.is_empty() {
        return EnemyDecision::Hold;
    }

    let seed = compute_seed(state.game_seed, state.turn.nonce, enemy.0, roll::ENEMY_MOVE);
    let pick = rng.range(seed, 0, candidates.len() as u32 - 1) as usize;
    EnemyDecision::MoveTo(candidates[pick])
}

/// Orthogonal straight-line cells within range that can be entered.
///
/// Diagonals are excluded; only the destination is validated, matching the
/// single-motion relocation the presentation layer animates.
fn reachable_cells(
    state: &GameState,
    map: &(impl MapOracle + ?Sized),
    origin: Position,
    movement_range: u32,
) -> Vec<Position> {
    let range = movement_range as i32;
    let mut cells = Vec::new();

    for dx in -range..=range {
        for dy in -range..=range {
            if (dx == 0 && dy == 0) || (dx != 0 && dy != 0) {
                continue;
            }
            if dx.abs() + dy.abs() > range {
                continue;
            }
            let target = Position::new(origin.x + dx, origin.y + dy);
            if state.can_enter(map, target) {
                cells.push(target);
            }
        }
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridfall_core::{
        ActorState, DeckState, EntitiesState, Facing, GridGeometry, MapDimensions, PcgRng,
        StatBlock, StaticTile, TerrainKind,
    };

    struct OpenMap(MapDimensions);

    impl MapOracle for OpenMap {
        fn dimensions(&self) -> MapDimensions {
            self.0
        }

        fn tile(&self, position: Position) -> Option<StaticTile> {
            self.0
                .contains(position)
                .then_some(StaticTile::new(TerrainKind::Floor))
        }

        fn geometry(&self) -> GridGeometry {
            GridGeometry::default()
        }

        fn player_start(&self) -> (Position, Facing) {
            (Position::new(0, 0), Facing::Down)
        }
    }

    fn state_with(player: Position, enemy: Position) -> GameState {
        let player_actor =
            ActorState::new(EntityId::PLAYER, player, Facing::Down, &StatBlock::GENERIC);
        let mut state = GameState::new(
            7,
            EntitiesState::new(player_actor),
            DeckState::default(),
        );
        state.register_occupant(EntityId::PLAYER, player);
        state
            .entities
            .enemies
            .push(ActorState::new(EntityId(1), enemy, Facing::Down, &StatBlock::GENERIC));
        state.register_occupant(EntityId(1), enemy);
        state
    }

    #[test]
    fn adjacent_player_means_attack() {
        let map = OpenMap(MapDimensions::new(9, 9));
        let state = state_with(Position::new(4, 4), Position::new(4, 5));
        let decision = decide_enemy_turn(&state, &map, &PcgRng, 1, EntityId(1));
        assert_eq!(decision, EnemyDecision::AttackPlayer);
    }

    #[test]
    fn distant_player_means_a_reachable_move() {
        let map = OpenMap(MapDimensions::new(9, 9));
        let state = state_with(Position::new(0, 0), Position::new(5, 5));
        match decide_enemy_turn(&state, &map, &PcgRng, 1, EntityId(1)) {
            EnemyDecision::MoveTo(cell) => {
                assert_eq!(cell.manhattan_distance(Position::new(5, 5)), 1);
            }
            other => panic!("expected a move, got {other:?}"),
        }
    }

    #[test]
    fn cornered_enemy_holds() {
        let map = OpenMap(MapDimensions::new(1, 2));
        // Enemy at (0,1), player at (0,0): board is full, nothing reachable,
        // but the player is adjacent so the enemy attacks instead.
        let state = state_with(Position::new(0, 0), Position::new(0, 1));
        assert_eq!(
            decide_enemy_turn(&state, &map, &PcgRng, 1, EntityId(1)),
            EnemyDecision::AttackPlayer
        );

        // Same geometry with a dead player: nothing to do.
        let mut state = state_with(Position::new(0, 0), Position::new(0, 1));
        state.entities.player.dying = true;
        assert_eq!(
            decide_enemy_turn(&state, &map, &PcgRng, 1, EntityId(1)),
            EnemyDecision::Hold
        );
    }
}
