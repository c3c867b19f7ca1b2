//! Strike resolution: target search, damage, knockback, and death.

use crate::action::ActionTransition;
use crate::action::movement::{find_enemy_in_direction, player_adjacent_to};
use crate::combat::{
    AttackOutcome, KnockbackOutcome, calculate_damage, check_crit, check_dodge,
    resolve_knockback_destination,
};
use crate::env::{GameEnv, OracleError, WorldPos, compute_seed, roll};
use crate::pattern::PieceType;
use crate::state::{EntityId, Facing, GameState, Position, direction_to};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrikeError {
    #[error("attacker {0} not found")]
    AttackerNotFound(EntityId),

    #[error("target {0} not found")]
    TargetNotFound(EntityId),

    #[error("attacker {0} is being torn down")]
    AttackerDying(EntityId),

    #[error("piece type {0} cannot attack")]
    PieceCannotAttack(PieceType),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

/// Offensive action resolved in the attacker's facing direction.
///
/// The target is located at resolve time (forward cell first, then the
/// lateral cells); a strike that finds no target is a successful no-op, not
/// an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrikeAction {
    pub attacker: EntityId,
    pub piece: PieceType,
}

impl StrikeAction {
    pub fn new(attacker: EntityId, piece: PieceType) -> Self {
        Self { attacker, piece }
    }
}

/// Facts about a resolved strike, consumed by the event layer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrikeRecord {
    pub attacker: EntityId,
    pub piece: PieceType,
    /// Located target; `None` when no enemy was in reach.
    pub target: Option<EntityId>,
    pub target_position: Option<Position>,
    /// New attacker facing after turning toward the target; `None` if
    /// unchanged.
    pub refaced: Option<Facing>,
    pub outcome: Option<AttackOutcome>,
    pub knockback: Option<KnockbackOutcome>,
    /// World-space destination of a knockback relocation.
    pub knockback_world_pos: Option<WorldPos>,
    pub target_died: bool,
    /// True when the death emptied the enemy roster.
    pub roster_cleared: bool,
}

impl ActionTransition for StrikeAction {
    type Error = StrikeError;
    type Result = StrikeRecord;

    fn actor(&self) -> EntityId {
        self.attacker
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if !self.piece.is_attacking() {
            return Err(StrikeError::PieceCannotAttack(self.piece));
        }

        let attacker = state
            .entities
            .actor(self.attacker)
            .ok_or(StrikeError::AttackerNotFound(self.attacker))?;
        if attacker.dying {
            return Err(StrikeError::AttackerDying(self.attacker));
        }

        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        let attacker = state
            .entities
            .actor(self.attacker)
            .ok_or(StrikeError::AttackerNotFound(self.attacker))?;
        let origin = attacker.position;
        let facing = attacker.facing;
        let base_damage = attacker.model.damage();

        // Target search: the player strikes the nearest enemy in its facing;
        // an enemy strikes the player when adjacent.
        let target = if self.attacker.is_player() {
            find_enemy_in_direction(state, origin, facing)
        } else {
            player_adjacent_to(state, origin)
                .filter(|_| state.entities.player.is_alive())
                .map(|cell| (EntityId::PLAYER, cell))
        };

        let Some((target_id, target_position)) = target else {
            return Ok(StrikeRecord {
                attacker: self.attacker,
                piece: self.piece,
                target: None,
                target_position: None,
                refaced: None,
                outcome: None,
                knockback: None,
                knockback_world_pos: None,
                target_died: false,
                roster_cleared: false,
            });
        };

        // Face the attacker toward the target if not already aligned.
        let refaced = direction_to(origin, target_position).filter(|dir| *dir != facing);
        if let Some(new_facing) = refaced {
            if let Some(attacker) = state.entities.actor_mut(self.attacker) {
                attacker.facing = new_facing;
            }
        }
        let strike_facing = refaced.unwrap_or(facing);

        let tables = env.tables()?;
        let rng = env.rng()?;
        let nonce = state.turn.nonce;

        // Dodge roll against the target's stat.
        let target_state = state
            .entities
            .actor(target_id)
            .ok_or(StrikeError::TargetNotFound(target_id))?;
        let dodge_seed = compute_seed(state.game_seed, nonce, self.attacker.0, roll::DODGE);
        let dodged = check_dodge(target_state.model.dodge(), rng.roll_d100(dodge_seed));

        let mut record = StrikeRecord {
            attacker: self.attacker,
            piece: self.piece,
            target: Some(target_id),
            target_position: Some(target_position),
            refaced,
            outcome: Some(AttackOutcome::Dodged),
            knockback: None,
            knockback_world_pos: None,
            target_died: false,
            roster_cleared: false,
        };

        if dodged {
            return Ok(record);
        }

        // Damage from the piece-type multiplier table, with the attacker's
        // crit roll on top.
        let attacker_state = state
            .entities
            .actor(self.attacker)
            .ok_or(StrikeError::AttackerNotFound(self.attacker))?;
        let crit_seed = compute_seed(state.game_seed, nonce, self.attacker.0, roll::CRIT);
        let critical = check_crit(attacker_state.model.crit(), rng.roll_d100(crit_seed));
        let damage = calculate_damage(
            base_damage,
            tables.piece_multiplier(self.piece),
            critical,
            tables.crit_multiplier(),
        );
        record.outcome = Some(AttackOutcome::Hit { damage, critical });

        let target_state = state
            .entities
            .actor_mut(target_id)
            .ok_or(StrikeError::TargetNotFound(target_id))?;
        target_state.model.take_damage(damage);
        let mut died = target_state.model.is_dead() && !target_state.dying;

        // Special pushes the survivor one cell away from the attacker.
        if self.piece == PieceType::Special && !died {
            let map = env.map()?;
            match resolve_knockback_destination(state, map, target_position, strike_facing) {
                Some(destination) => {
                    state.world.tile_map.clear_occupant(&target_position);
                    state.world.tile_map.set_occupant(destination, target_id);
                    if let Some(target_state) = state.entities.actor_mut(target_id) {
                        target_state.position = destination;
                    }
                    record.knockback = Some(KnockbackOutcome::Relocated {
                        from: target_position,
                        to: destination,
                    });
                    record.knockback_world_pos =
                        Some(map.geometry().world_position(map.dimensions(), destination));
                }
                None => {
                    let collision = tables.wall_collision_damage();
                    if let Some(target_state) = state.entities.actor_mut(target_id) {
                        target_state.model.take_damage(collision);
                        died = target_state.model.is_dead() && !target_state.dying;
                    }
                    record.knockback = Some(KnockbackOutcome::Blocked { damage: collision });
                }
            }
        }

        if died {
            record.target_died = true;
            apply_death(state, target_id);
            record.roster_cleared = state.entities.enemies.is_empty() && !target_id.is_player();
        }

        Ok(record)
    }
}

/// Marks an actor as dying exactly once, vacates its cell immediately, and
/// drops enemies from the roster. The player stays in the entity state so the
/// session can observe the defeat.
fn apply_death(state: &mut GameState, target: EntityId) {
    let Some(actor) = state.entities.actor_mut(target) else {
        return;
    };
    if actor.dying {
        return;
    }
    actor.dying = true;

    let position = actor.position;
    state.world.tile_map.clear_occupant(&position);

    if !target.is_player() {
        state.entities.remove_enemy(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Env;
    use crate::state::{ActorState, EntitiesState, StatBlock};
    use crate::testkit::{EMPTY_CONTENT, TestMap, test_env};

    fn setup(player_pos: Position, enemy_pos: Position, enemy_hp: u32) -> GameState {
        let player = ActorState::new(
            EntityId::PLAYER,
            player_pos,
            Facing::Down,
            &StatBlock {
                hp: 100,
                damage: 10,
                defense: 0,
                dodge: 0,
                crit: 0,
            },
        );
        let mut state = GameState::new(0, EntitiesState::new(player), Default::default());
        state.register_occupant(EntityId::PLAYER, player_pos);
        state.entities.enemies.push(ActorState::new(
            EntityId(1),
            enemy_pos,
            Facing::Up,
            &StatBlock {
                hp: enemy_hp,
                damage: 5,
                defense: 0,
                dodge: 0,
                crit: 0,
            },
        ));
        state.register_occupant(EntityId(1), enemy_pos);
        state
    }

    #[test]
    fn attack_piece_doubles_damage_and_kills_exactly_once() {
        let map = TestMap::empty(9, 9);
        let mut state = setup(Position::new(4, 4), Position::new(4, 5), 10);
        state.entities.player.facing = Facing::Up;

        let (tables, config, rng) = test_env();
        let env = Env::with_all(&map, &EMPTY_CONTENT, &tables, &config, &rng).as_game_env();

        let action = StrikeAction::new(EntityId::PLAYER, PieceType::Attack);
        action.pre_validate(&state, &env).unwrap();
        let record = action.apply(&mut state, &env).unwrap();

        assert_eq!(
            record.outcome,
            Some(AttackOutcome::Hit {
                damage: 20,
                critical: false
            })
        );
        assert!(record.target_died);
        assert!(record.roster_cleared);
        assert!(!state.world.tile_map.is_occupied(&Position::new(4, 5)));
        assert!(state.entities.enemies.is_empty());
    }

    #[test]
    fn strike_with_no_target_is_a_noop() {
        let map = TestMap::empty(9, 9);
        let mut state = setup(Position::new(4, 4), Position::new(8, 8), 10);
        state.entities.player.facing = Facing::Up;
        let before = state.clone();

        let (tables, config, rng) = test_env();
        let env = Env::with_all(&map, &EMPTY_CONTENT, &tables, &config, &rng).as_game_env();

        let record = StrikeAction::new(EntityId::PLAYER, PieceType::Basic)
            .apply(&mut state, &env)
            .unwrap();
        assert_eq!(record.target, None);
        assert_eq!(state, before);
    }

    #[test]
    fn special_knockback_relocates_the_survivor() {
        let map = TestMap::empty(9, 9);
        let mut state = setup(Position::new(4, 4), Position::new(4, 5), 100);
        state.entities.player.facing = Facing::Up;

        let (tables, config, rng) = test_env();
        let env = Env::with_all(&map, &EMPTY_CONTENT, &tables, &config, &rng).as_game_env();

        let record = StrikeAction::new(EntityId::PLAYER, PieceType::Special)
            .apply(&mut state, &env)
            .unwrap();

        assert_eq!(
            record.knockback,
            Some(KnockbackOutcome::Relocated {
                from: Position::new(4, 5),
                to: Position::new(4, 6)
            })
        );
        assert_eq!(
            state.world.tile_map.occupant(&Position::new(4, 6)),
            Some(EntityId(1))
        );
        assert_eq!(state.entities.enemies[0].position, Position::new(4, 6));
    }

    #[test]
    fn blocked_knockback_deals_collision_damage_without_relocation() {
        let map = TestMap::empty(9, 9).with_border(Position::new(4, 6));
        let mut state = setup(Position::new(4, 4), Position::new(4, 5), 100);
        state.entities.player.facing = Facing::Up;

        let (tables, config, rng) = test_env();
        let env = Env::with_all(&map, &EMPTY_CONTENT, &tables, &config, &rng).as_game_env();

        let record = StrikeAction::new(EntityId::PLAYER, PieceType::Special)
            .apply(&mut state, &env)
            .unwrap();

        assert_eq!(
            record.knockback,
            Some(KnockbackOutcome::Blocked {
                damage: tables.wall_collision_damage
            })
        );
        assert_eq!(state.entities.enemies[0].position, Position::new(4, 5));
        assert_eq!(
            state.world.tile_map.occupant(&Position::new(4, 5)),
            Some(EntityId(1))
        );
        // 30 from the special strike plus the wall collision.
        assert_eq!(state.entities.enemies[0].model.current_hp(), 100 - 30 - 5);
    }

    #[test]
    fn enemy_strike_hits_the_adjacent_player() {
        let map = TestMap::empty(9, 9);
        let mut state = setup(Position::new(4, 4), Position::new(4, 5), 10);

        let (tables, config, rng) = test_env();
        let env = Env::with_all(&map, &EMPTY_CONTENT, &tables, &config, &rng).as_game_env();

        let record = StrikeAction::new(EntityId(1), PieceType::Basic)
            .apply(&mut state, &env)
            .unwrap();

        assert_eq!(record.target, Some(EntityId::PLAYER));
        assert_eq!(
            record.outcome,
            Some(AttackOutcome::Hit {
                damage: 5,
                critical: false
            })
        );
        assert_eq!(state.entities.player.model.current_hp(), 95);
    }
}
