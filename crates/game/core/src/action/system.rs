//! System actions: turn phase transitions and the player-turn refresh.

use crate::action::ActionTransition;
use crate::env::{GameEnv, OracleError, compute_seed, roll};
use crate::pattern::Card;
use crate::state::{EntityId, GameState, TurnPhase};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnTransitionError {
    #[error("phase transition expected {expected}, found {found}")]
    WrongPhase {
        expected: TurnPhase,
        found: TurnPhase,
    },

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

/// Starts a player turn: resets energy to the base, resets the player's
/// defense buff, and refreshes every hand slot.
///
/// Runs both at game start (from the initial `Processing` phase) and after
/// each enemy phase, so it carries no phase precondition of its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeginPlayerTurnAction;

/// Facts about a player-turn refresh.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnRefreshRecord {
    pub energy: u32,
    /// Card drawn per slot, in slot order; `None` marks an exhausted deck.
    pub drawn: Vec<Option<Card>>,
    /// Number of reshuffles triggered while drawing.
    pub reshuffles: u32,
}

impl ActionTransition for BeginPlayerTurnAction {
    type Error = TurnTransitionError;
    type Result = TurnRefreshRecord;

    fn actor(&self) -> EntityId {
        EntityId::SYSTEM
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        state.turn.phase = TurnPhase::PlayerTurn;
        state.turn.energy = env.config()?.energy_base();
        state.entities.player.model.reset_defense();

        // Discard whatever is still held, then deal a fresh card per slot.
        let rng = env.rng()?;
        let nonce = state.turn.nonce;
        let mut drawn = Vec::with_capacity(state.hand.slots.len());
        let mut reshuffles = 0;

        for index in 0..state.hand.slots.len() {
            if let Some(card) = state.hand.slots[index].take() {
                state.deck.discard(card);
            }

            let seed = compute_seed(
                state.game_seed,
                nonce,
                EntityId::PLAYER.0,
                roll::DRAW_BASE + index as u32,
            );
            let outcome = state.deck.draw(rng, seed);
            if outcome.reshuffled {
                reshuffles += 1;
            }
            state.hand.slots[index].assign(outcome.card);
            drawn.push(outcome.card);
        }

        Ok(TurnRefreshRecord {
            energy: state.turn.energy,
            drawn,
            reshuffles,
        })
    }
}

/// Record of a bare phase change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseRecord {
    pub phase: TurnPhase,
}

/// Hands the turn to the enemies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeginEnemyPhaseAction;

impl ActionTransition for BeginEnemyPhaseAction {
    type Error = TurnTransitionError;
    type Result = PhaseRecord;

    fn actor(&self) -> EntityId {
        EntityId::SYSTEM
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if state.turn.phase != TurnPhase::PlayerTurn {
            return Err(TurnTransitionError::WrongPhase {
                expected: TurnPhase::PlayerTurn,
                found: state.turn.phase,
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        state.turn.phase = TurnPhase::EnemyTurn;
        Ok(PhaseRecord {
            phase: state.turn.phase,
        })
    }
}

/// Enters the transient processing phase in which enemies act sequentially
/// and player input is refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeginProcessingAction;

impl ActionTransition for BeginProcessingAction {
    type Error = TurnTransitionError;
    type Result = PhaseRecord;

    fn actor(&self) -> EntityId {
        EntityId::SYSTEM
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if state.turn.phase != TurnPhase::EnemyTurn {
            return Err(TurnTransitionError::WrongPhase {
                expected: TurnPhase::EnemyTurn,
                found: state.turn.phase,
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        state.turn.phase = TurnPhase::Processing;
        Ok(PhaseRecord {
            phase: state.turn.phase,
        })
    }
}
