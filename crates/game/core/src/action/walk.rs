//! Resumable pattern-walk state machine.
//!
//! A walk is an explicit state object advanced once per scheduler tick:
//! `Idle → Walking(step_index) → Resolved`. Each advance issues at most one
//! single-cell move through the engine, so the caller can hold the walk while
//! a presentation motion is in flight. There are no hidden suspension points.

use crate::action::{Action, MoveStepAction, StrikeAction};
use crate::action::guard::GuardUpAction;
use crate::engine::{ExecuteError, GameEngine, GameEvent};
use crate::env::GameEnv;
use crate::pattern::PieceType;
use crate::state::{EntityId, GameState, Position};

use super::card::PlayRecord;

/// Result of advancing the walk by one tick.
#[derive(Clone, Debug, PartialEq)]
pub enum WalkProgress {
    /// One step was committed; the mover is now heading to `to` and the
    /// caller must wait for the motion completion before advancing again.
    Stepped { to: Position },
    /// The walk is complete — all steps consumed or execution stopped early
    /// at a rejected step. Remaining steps are abandoned, never retried.
    Finished(WalkOutcome),
}

/// Final disposition of a completed walk.
#[derive(Clone, Debug, PartialEq)]
pub struct WalkOutcome {
    /// Piece-type recorded at the last successfully reached step. Starts at
    /// `Basic`, so a fully rejected walk still resolves a basic strike.
    pub final_piece: PieceType,
    pub steps_taken: usize,
    pub stopped_early: bool,
    /// Rejection that ended the walk early, for diagnostics.
    pub rejection: Option<ExecuteError>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WalkState {
    Idle,
    Walking,
    Resolved,
}

/// Pattern execution for one played card.
#[derive(Clone, Debug)]
pub struct PatternWalk {
    actor: EntityId,
    steps: Vec<Position>,
    pieces: Vec<PieceType>,
    index: usize,
    steps_taken: usize,
    last_piece: PieceType,
    state: WalkState,
    outcome: Option<WalkOutcome>,
}

impl PatternWalk {
    pub fn new(actor: EntityId, steps: Vec<Position>, pieces: Vec<PieceType>) -> Self {
        Self {
            actor,
            steps,
            pieces,
            index: 0,
            steps_taken: 0,
            last_piece: PieceType::Basic,
            state: WalkState::Idle,
            outcome: None,
        }
    }

    pub fn from_play(record: &PlayRecord) -> Self {
        Self::new(
            EntityId::PLAYER,
            record.steps.clone(),
            record.pieces.clone(),
        )
    }

    pub fn actor(&self) -> EntityId {
        self.actor
    }

    pub fn is_resolved(&self) -> bool {
        self.state == WalkState::Resolved
    }

    pub fn outcome(&self) -> Option<&WalkOutcome> {
        self.outcome.as_ref()
    }

    /// Advances by at most one committed move.
    ///
    /// Zero-delta steps are consumed silently; the first nonzero step issues
    /// a move through the engine. A rejection finishes the walk early.
    pub fn advance(
        &mut self,
        state: &mut GameState,
        env: &GameEnv<'_>,
    ) -> (WalkProgress, Vec<GameEvent>) {
        if self.state == WalkState::Resolved {
            let outcome = self.outcome.clone().unwrap_or_else(|| self.make_outcome(false, None));
            return (WalkProgress::Finished(outcome), Vec::new());
        }
        self.state = WalkState::Walking;

        while self.index < self.steps.len() {
            let target = self.steps[self.index];
            let current = state
                .entities
                .actor(self.actor)
                .map(|actor| actor.position);

            let Some(current) = current else {
                return (self.finish(true, None), Vec::new());
            };

            if target == current {
                // Stationary step: nothing to move, nothing recorded.
                self.index += 1;
                continue;
            }

            let action = Action::move_step(MoveStepAction::new(self.actor, target));
            let mut engine = GameEngine::new(state);
            return match engine.execute(env, &action) {
                Ok(outcome) => {
                    self.last_piece = self.pieces.get(self.index).copied().unwrap_or(self.last_piece);
                    self.index += 1;
                    self.steps_taken += 1;
                    (WalkProgress::Stepped { to: target }, outcome.events)
                }
                Err(rejection) => (self.finish(true, Some(rejection)), Vec::new()),
            };
        }

        (self.finish(false, None), Vec::new())
    }

    /// The post-walk effect selected by the final piece-type.
    ///
    /// Defense buffs the mover; Basic/Attack/Special strike in the mover's
    /// current facing; Player does nothing.
    pub fn completion_action(&self) -> Option<Action> {
        let outcome = self.outcome.as_ref()?;
        match outcome.final_piece {
            PieceType::Defense => Some(Action::guard_up(GuardUpAction::new(self.actor))),
            piece if piece.is_attacking() => {
                Some(Action::strike(StrikeAction::new(self.actor, piece)))
            }
            _ => None,
        }
    }

    fn finish(&mut self, stopped_early: bool, rejection: Option<ExecuteError>) -> WalkProgress {
        self.state = WalkState::Resolved;
        let outcome = self.make_outcome(stopped_early, rejection);
        self.outcome = Some(outcome.clone());
        WalkProgress::Finished(outcome)
    }

    fn make_outcome(&self, stopped_early: bool, rejection: Option<ExecuteError>) -> WalkOutcome {
        WalkOutcome {
            final_piece: self.last_piece,
            steps_taken: self.steps_taken,
            stopped_early,
            rejection,
        }
    }
}
