//! Action domain: every state mutation is a typed action.
//!
//! Both player/enemy actions and system actions (turn phase management, hand
//! refresh) flow through the same three-phase transition pipeline driven by
//! the engine, so validation and bookkeeping are uniform.
//!
//! # Module Structure
//!
//! - `movement`: single-step board moves and directional target queries
//! - `combat`: strike resolution (target search, damage, knockback, death)
//! - `guard`: the Defense piece's temporary defense buff
//! - `card`: hand slot plays and rotation adjustments
//! - `system`: turn phase transitions and player-turn refresh
//! - `walk`: the resumable pattern-walk state machine

pub mod card;
pub mod combat;
pub mod guard;
pub mod movement;
pub mod system;
pub mod walk;

pub use card::{
    PlayCardAction, PlayError, PlayRecord, RotateError, RotateSlotAction, SlotRotatedRecord,
};
pub use combat::{StrikeAction, StrikeError, StrikeRecord};
pub use guard::{GuardError, GuardRecord, GuardUpAction};
pub use movement::{
    MoveError, MoveRecord, MoveStepAction, find_enemy_in_direction, player_adjacent_to,
};
pub use system::{
    BeginEnemyPhaseAction, BeginPlayerTurnAction, BeginProcessingAction, PhaseRecord,
    TurnRefreshRecord, TurnTransitionError,
};
pub use walk::{PatternWalk, WalkOutcome, WalkProgress};

use crate::env::GameEnv;
use crate::state::{EntityId, GameState};

/// Defines how a concrete action variant mutates game state.
///
/// Implementors can override the validation hooks to surface pre- and
/// post-conditions that must hold around the state mutation. All hooks
/// receive read-only access to deterministic environment facts via the
/// oracle environment.
pub trait ActionTransition {
    type Error;
    type Result;

    /// Returns the entity performing this action.
    fn actor(&self) -> EntityId;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action by mutating the game state directly.
    /// Implementations may assume `pre_validate` has already succeeded.
    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>)
    -> Result<Self::Result, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Character action variants performed by the player or an enemy.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CharacterActionKind {
    Move(MoveStepAction),
    Strike(StrikeAction),
    GuardUp(GuardUpAction),
    PlayCard(PlayCardAction),
    RotateSlot(RotateSlotAction),
}

/// System action variants (turn management, hand refresh).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SystemActionKind {
    BeginPlayerTurn(BeginPlayerTurnAction),
    BeginEnemyPhase(BeginEnemyPhaseAction),
    BeginProcessing(BeginProcessingAction),
}

/// Top-level action enum routed through the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Character(CharacterActionKind),
    System(SystemActionKind),
}

impl Action {
    pub fn move_step(action: MoveStepAction) -> Self {
        Self::Character(CharacterActionKind::Move(action))
    }

    pub fn strike(action: StrikeAction) -> Self {
        Self::Character(CharacterActionKind::Strike(action))
    }

    pub fn guard_up(action: GuardUpAction) -> Self {
        Self::Character(CharacterActionKind::GuardUp(action))
    }

    pub fn play_card(action: PlayCardAction) -> Self {
        Self::Character(CharacterActionKind::PlayCard(action))
    }

    pub fn rotate_slot(action: RotateSlotAction) -> Self {
        Self::Character(CharacterActionKind::RotateSlot(action))
    }

    /// Returns the entity performing this action; system actions have no
    /// in-game actor.
    pub fn actor(&self) -> Option<EntityId> {
        match self {
            Action::Character(kind) => Some(match kind {
                CharacterActionKind::Move(action) => action.actor(),
                CharacterActionKind::Strike(action) => action.actor(),
                CharacterActionKind::GuardUp(action) => action.actor(),
                CharacterActionKind::PlayCard(action) => action.actor(),
                CharacterActionKind::RotateSlot(action) => action.actor(),
            }),
            Action::System(_) => None,
        }
    }

    /// snake_case name used for logging.
    pub fn as_snake_case(&self) -> &'static str {
        match self {
            Action::Character(kind) => match kind {
                CharacterActionKind::Move(_) => "move_step",
                CharacterActionKind::Strike(_) => "strike",
                CharacterActionKind::GuardUp(_) => "guard_up",
                CharacterActionKind::PlayCard(_) => "play_card",
                CharacterActionKind::RotateSlot(_) => "rotate_slot",
            },
            Action::System(kind) => match kind {
                SystemActionKind::BeginPlayerTurn(_) => "begin_player_turn",
                SystemActionKind::BeginEnemyPhase(_) => "begin_enemy_phase",
                SystemActionKind::BeginProcessing(_) => "begin_processing",
            },
        }
    }
}

impl From<BeginPlayerTurnAction> for Action {
    fn from(action: BeginPlayerTurnAction) -> Self {
        Action::System(SystemActionKind::BeginPlayerTurn(action))
    }
}

impl From<BeginEnemyPhaseAction> for Action {
    fn from(action: BeginEnemyPhaseAction) -> Self {
        Action::System(SystemActionKind::BeginEnemyPhase(action))
    }
}

impl From<BeginProcessingAction> for Action {
    fn from(action: BeginProcessingAction) -> Self {
        Action::System(SystemActionKind::BeginProcessing(action))
    }
}

/// Action-specific execution results surfaced in the execution outcome.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionResult {
    Move(MoveRecord),
    Strike(StrikeRecord),
    Guard(GuardRecord),
    Play(PlayRecord),
    SlotRotated(SlotRotatedRecord),
    TurnRefresh(TurnRefreshRecord),
    Phase(PhaseRecord),
}
