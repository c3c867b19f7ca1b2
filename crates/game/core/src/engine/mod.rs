//! Action execution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. All
//! state mutations — player plays, single walk steps, enemy actions, and
//! system actions for turn phase management — flow through the same
//! `execute()` pipeline, which enforces phase gating, drives the three-phase
//! transition, and surfaces the observable events of each action.

mod errors;
mod events;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};
pub use events::GameEvent;

use crate::action::{Action, ActionResult};
use crate::env::GameEnv;
use crate::state::{GameState, TurnPhase};

/// Complete outcome of action execution.
#[derive(Clone, Debug, PartialEq)]
pub struct ExecutionOutcome {
    /// Action-specific execution result (move facts, strike outcome, ...).
    pub result: ActionResult,
    /// Observable events, in occurrence order, for the session queue.
    pub events: Vec<GameEvent>,
}

/// Game engine that executes actions against the state.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    /// Executes an action by routing it through the transition pipeline.
    ///
    /// Phase gating is mandatory: player-initiated actions require
    /// `PlayerTurn`, enemy actions require `Processing`, system actions are
    /// always admissible. Each successful execution advances the action
    /// nonce used for per-event RNG seeds.
    pub fn execute(
        &mut self,
        env: &GameEnv<'_>,
        action: &Action,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        self.validate_phase(action)?;

        let result = transition::execute_transition(action, self.state, env)?;

        self.state.turn.nonce += 1;

        let events = events::collect_events(&result);
        Ok(ExecutionOutcome { result, events })
    }

    fn validate_phase(&self, action: &Action) -> Result<(), ExecuteError> {
        let Some(actor) = action.actor() else {
            // System actions are always valid.
            return Ok(());
        };

        let phase = self.state.turn.phase;
        if actor.is_player() {
            if phase != TurnPhase::PlayerTurn {
                return Err(ExecuteError::PlayerActionOutsideTurn { phase });
            }
        } else if phase != TurnPhase::Processing {
            return Err(ExecuteError::EnemyActionOutsideProcessing { actor, phase });
        }

        Ok(())
    }
}
