//! Action transition dispatch and execution logic.

use crate::action::{
    Action, ActionResult, ActionTransition, CharacterActionKind, SystemActionKind,
};
use crate::env::GameEnv;
use crate::state::GameState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline and returns the
/// result.
///
/// Phases:
/// 1. `pre_validate` - check preconditions before mutation
/// 2. `apply` - mutate the game state and return the result
/// 3. `post_validate` - verify postconditions after mutation
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<T::Result, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let result = transition
        .apply(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(result)
}

/// Routes each action variant to its transition and wraps the result.
pub(super) fn execute_transition(
    action: &Action,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<ActionResult, ExecuteError> {
    match action {
        Action::Character(kind) => match kind {
            CharacterActionKind::Move(transition) => drive_transition(transition, state, env)
                .map(ActionResult::Move)
                .map_err(ExecuteError::Move),
            CharacterActionKind::Strike(transition) => drive_transition(transition, state, env)
                .map(ActionResult::Strike)
                .map_err(ExecuteError::Strike),
            CharacterActionKind::GuardUp(transition) => drive_transition(transition, state, env)
                .map(ActionResult::Guard)
                .map_err(ExecuteError::Guard),
            CharacterActionKind::PlayCard(transition) => drive_transition(transition, state, env)
                .map(ActionResult::Play)
                .map_err(ExecuteError::Play),
            CharacterActionKind::RotateSlot(transition) => drive_transition(transition, state, env)
                .map(ActionResult::SlotRotated)
                .map_err(ExecuteError::RotateSlot),
        },
        Action::System(kind) => match kind {
            SystemActionKind::BeginPlayerTurn(transition) => {
                drive_transition(transition, state, env)
                    .map(ActionResult::TurnRefresh)
                    .map_err(ExecuteError::TurnTransition)
            }
            SystemActionKind::BeginEnemyPhase(transition) => {
                drive_transition(transition, state, env)
                    .map(ActionResult::Phase)
                    .map_err(ExecuteError::TurnTransition)
            }
            SystemActionKind::BeginProcessing(transition) => {
                drive_transition(transition, state, env)
                    .map(ActionResult::Phase)
                    .map_err(ExecuteError::TurnTransition)
            }
        },
    }
}
