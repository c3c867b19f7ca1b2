//! Hand slot plays and rotation adjustments.

use crate::action::ActionTransition;
use crate::config::SlotRefillPolicy;
use crate::env::{GameEnv, OracleError, compute_seed, roll};
use crate::pattern::{Card, PatternId, PieceType, Rotation};
use crate::state::{EntityId, GameState, Position, TurnPhase};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayError {
    #[error("cards can only be played during the player turn (phase: {phase})")]
    NotPlayerTurn { phase: TurnPhase },

    #[error("slot index {0} out of range")]
    SlotOutOfRange(usize),

    #[error("slot {0} holds no card")]
    EmptySlot(usize),

    #[error("pattern {0} missing from the catalog")]
    UnknownPattern(PatternId),

    #[error("cannot afford cost {cost} with energy {energy}")]
    InsufficientEnergy { cost: u32, energy: u32 },

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

/// Plays the card held in a hand slot.
///
/// Spends the pattern's energy cost, resolves the walk cells from the
/// player's current position using the slot's composed rotation, discards the
/// card, and — depending on the refill policy — draws a replacement
/// immediately or leaves the slot empty until the next turn refresh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayCardAction {
    pub slot: usize,
}

impl PlayCardAction {
    pub fn new(slot: usize) -> Self {
        Self { slot }
    }

    fn slot_card<'a>(
        &self,
        state: &GameState,
        env: &GameEnv<'a>,
    ) -> Result<(Card, Rotation, u32), PlayError> {
        let slot = state
            .hand
            .slot(self.slot)
            .ok_or(PlayError::SlotOutOfRange(self.slot))?;
        let card = slot.card.ok_or(PlayError::EmptySlot(self.slot))?;
        let pattern = env
            .content()?
            .pattern(card.pattern)
            .ok_or(PlayError::UnknownPattern(card.pattern))?;
        Ok((card, slot.rotation, pattern.cost))
    }
}

/// Facts about a committed play, consumed by the event layer and the walk
/// executor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayRecord {
    pub slot: usize,
    pub card: Card,
    /// Deck-build rotation composed with the slot adjustment.
    pub rotation: Rotation,
    pub cost: u32,
    pub energy_remaining: u32,
    /// Absolute walk cells in step order.
    pub steps: Vec<Position>,
    /// Piece-type per step, same order as `steps`.
    pub pieces: Vec<PieceType>,
    /// Replacement card drawn under the auto-redraw policy.
    pub drawn: Option<Card>,
    /// True when the replacement draw reshuffled the discard pile.
    pub reshuffled: bool,
}

impl ActionTransition for PlayCardAction {
    type Error = PlayError;
    type Result = PlayRecord;

    fn actor(&self) -> EntityId {
        EntityId::PLAYER
    }

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if state.turn.phase != TurnPhase::PlayerTurn {
            return Err(PlayError::NotPlayerTurn {
                phase: state.turn.phase,
            });
        }

        let (_, _, cost) = self.slot_card(state, env)?;
        if !state.turn.can_afford(cost) {
            return Err(PlayError::InsufficientEnergy {
                cost,
                energy: state.turn.energy,
            });
        }

        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        let (card, slot_rotation, cost) = self.slot_card(state, env)?;
        let pattern = env
            .content()?
            .pattern(card.pattern)
            .ok_or(PlayError::UnknownPattern(card.pattern))?;

        if !state.turn.spend(cost) {
            return Err(PlayError::InsufficientEnergy {
                cost,
                energy: state.turn.energy,
            });
        }

        let rotation = card.rotation.compose(slot_rotation);
        let origin = state.entities.player.position;
        let steps = pattern.resolve_absolute(origin, rotation);
        let pieces = pattern.piece_types();

        // The played card leaves the slot for the discard pile; the slot
        // refills now or at the next turn refresh per policy.
        let slot = state
            .hand
            .slot_mut(self.slot)
            .ok_or(PlayError::SlotOutOfRange(self.slot))?;
        slot.take();
        state.deck.discard(card);

        let mut drawn = None;
        let mut reshuffled = false;
        if env.config()?.refill_policy() == SlotRefillPolicy::AutoRedraw {
            let seed = compute_seed(
                state.game_seed,
                state.turn.nonce,
                EntityId::PLAYER.0,
                roll::DRAW_BASE + self.slot as u32,
            );
            let outcome = state.deck.draw(env.rng()?, seed);
            drawn = outcome.card;
            reshuffled = outcome.reshuffled;
            if let Some(slot) = state.hand.slot_mut(self.slot) {
                slot.assign(drawn);
            }
        }

        Ok(PlayRecord {
            slot: self.slot,
            card,
            rotation,
            cost,
            energy_remaining: state.turn.energy,
            steps,
            pieces,
            drawn,
            reshuffled,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RotateError {
    #[error("slots can only be rotated during the player turn (phase: {phase})")]
    NotPlayerTurn { phase: TurnPhase },

    #[error("slot index {0} out of range")]
    SlotOutOfRange(usize),

    #[error("slot {0} holds no card")]
    EmptySlot(usize),
}

/// Cycles a slot's rotation by a quarter turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RotateSlotAction {
    pub slot: usize,
}

impl RotateSlotAction {
    pub fn new(slot: usize) -> Self {
        Self { slot }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotRotatedRecord {
    pub slot: usize,
    pub rotation: Rotation,
}

impl ActionTransition for RotateSlotAction {
    type Error = RotateError;
    type Result = SlotRotatedRecord;

    fn actor(&self) -> EntityId {
        EntityId::PLAYER
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if state.turn.phase != TurnPhase::PlayerTurn {
            return Err(RotateError::NotPlayerTurn {
                phase: state.turn.phase,
            });
        }
        let slot = state
            .hand
            .slot(self.slot)
            .ok_or(RotateError::SlotOutOfRange(self.slot))?;
        if slot.is_empty() {
            return Err(RotateError::EmptySlot(self.slot));
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        let slot = state
            .hand
            .slot_mut(self.slot)
            .ok_or(RotateError::SlotOutOfRange(self.slot))?;
        slot.rotation = slot.rotation.next();

        Ok(SlotRotatedRecord {
            slot: self.slot,
            rotation: slot.rotation,
        })
    }
}
