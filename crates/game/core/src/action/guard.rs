//! Temporary defense buff granted by ending a walk on a Defense piece.

use crate::action::ActionTransition;
use crate::env::{GameEnv, OracleError};
use crate::state::{EntityId, GameState};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GuardError {
    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GuardUpAction {
    pub actor: EntityId,
}

impl GuardUpAction {
    pub fn new(actor: EntityId) -> Self {
        Self { actor }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GuardRecord {
    pub actor: EntityId,
    pub amount: u32,
    /// Defense value after the buff.
    pub defense: u32,
}

impl ActionTransition for GuardUpAction {
    type Error = GuardError;
    type Result = GuardRecord;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        let amount = env.tables()?.defense_bonus();
        let actor = state
            .entities
            .actor_mut(self.actor)
            .ok_or(GuardError::ActorNotFound(self.actor))?;
        actor.model.add_temporary_defense(amount);

        Ok(GuardRecord {
            actor: self.actor,
            amount,
            defense: actor.model.defense(),
        })
    }
}
