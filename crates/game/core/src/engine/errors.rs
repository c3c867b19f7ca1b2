//! Error types for the action execution pipeline.

use crate::action::{
    GuardError, MoveError, PlayError, RotateError, StrikeError, TurnTransitionError,
};
use crate::state::{EntityId, TurnPhase};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors surfaced while executing an action through the game engine.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("move action failed: {0}")]
    Move(TransitionPhaseError<MoveError>),

    #[error("strike action failed: {0}")]
    Strike(TransitionPhaseError<StrikeError>),

    #[error("guard action failed: {0}")]
    Guard(TransitionPhaseError<GuardError>),

    #[error("play card action failed: {0}")]
    Play(TransitionPhaseError<PlayError>),

    #[error("rotate slot action failed: {0}")]
    RotateSlot(TransitionPhaseError<RotateError>),

    #[error("turn transition failed: {0}")]
    TurnTransition(TransitionPhaseError<TurnTransitionError>),

    #[error("player action refused outside the player turn (phase: {phase})")]
    PlayerActionOutsideTurn { phase: TurnPhase },

    #[error("enemy {actor} action refused outside processing (phase: {phase})")]
    EnemyActionOutsideProcessing { actor: EntityId, phase: TurnPhase },
}
