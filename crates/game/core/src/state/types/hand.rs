use crate::config::GameConfig;
use crate::pattern::{Card, Rotation};

/// One of the concurrent hand slots.
///
/// The slot's rotation is player-adjustable core state; the UI gesture that
/// cycles it is external. It composes with the card's deck-build rotation at
/// resolve time and resets to the default on every assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandSlot {
    pub card: Option<Card>,
    pub rotation: Rotation,
}

impl HandSlot {
    pub fn is_empty(&self) -> bool {
        self.card.is_none()
    }

    /// Assigns a card (or empties the slot), resetting the rotation.
    pub fn assign(&mut self, card: Option<Card>) {
        self.card = card;
        self.rotation = Rotation::default();
    }

    /// Removes and returns the held card, resetting the rotation.
    pub fn take(&mut self) -> Option<Card> {
        self.rotation = Rotation::default();
        self.card.take()
    }
}

/// The fixed set of hand slots, created once per session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandState {
    pub slots: [HandSlot; GameConfig::HAND_SLOTS],
}

impl HandState {
    pub fn slot(&self, index: usize) -> Option<&HandSlot> {
        self.slots.get(index)
    }

    pub fn slot_mut(&mut self, index: usize) -> Option<&mut HandSlot> {
        self.slots.get_mut(index)
    }

    /// Number of cards currently held across all slots.
    pub fn held_count(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.is_empty()).count()
    }
}
