//! Deck engine: draw and discard piles over the pattern catalog.
//!
//! A deck is built once per session from the content composition. Depending
//! on the configured [`DeckPolicy`], each catalog copy materializes either as
//! four rotated variants or as a single as-authored card. Shuffling is
//! Fisher–Yates driven by the deterministic RNG oracle.

use std::collections::VecDeque;

use crate::config::DeckPolicy;
use crate::env::{DeckEntry, RngOracle};

use super::{PatternId, Rotation};

/// One card instance in the deck: a pattern reference plus its deck-build
/// rotation tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    pub pattern: PatternId,
    pub rotation: Rotation,
}

/// Result of a single draw attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawOutcome {
    /// `None` signals a fully empty deck; an expected condition, not an error.
    pub card: Option<Card>,
    /// True when the discard pile was reshuffled into the draw pile.
    pub reshuffled: bool,
}

/// Draw pile (FIFO) plus discard pile.
///
/// Conservation invariant: every card materialized at build time is in exactly
/// one of draw pile, discard pile, or a hand slot; the total is constant
/// across any sequence of draws, discards, and reshuffles.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeckState {
    draw_pile: VecDeque<Card>,
    discard_pile: Vec<Card>,
}

impl DeckState {
    pub fn draw_count(&self) -> usize {
        self.draw_pile.len()
    }

    pub fn discard_count(&self) -> usize {
        self.discard_pile.len()
    }

    /// Pops the next card, reshuffling the discard pile into a fresh draw
    /// pile when the draw pile is empty. Both piles empty yields `None`.
    pub fn draw(&mut self, rng: &(impl RngOracle + ?Sized), seed: u64) -> DrawOutcome {
        let mut reshuffled = false;

        if self.draw_pile.is_empty() {
            if self.discard_pile.is_empty() {
                return DrawOutcome {
                    card: None,
                    reshuffled: false,
                };
            }

            let mut cards: Vec<Card> = std::mem::take(&mut self.discard_pile);
            fisher_yates(&mut cards, rng, seed);
            self.draw_pile = cards.into();
            reshuffled = true;
        }

        DrawOutcome {
            card: self.draw_pile.pop_front(),
            reshuffled,
        }
    }

    /// Appends a card to the discard pile unconditionally.
    pub fn discard(&mut self, card: Card) {
        self.discard_pile.push(card);
    }
}

/// Materializes and shuffles a deck from the content composition.
pub fn build_deck(
    composition: &[DeckEntry],
    policy: DeckPolicy,
    rng: &(impl RngOracle + ?Sized),
    seed: u64,
) -> DeckState {
    let mut cards = Vec::new();

    for entry in composition {
        for _ in 0..entry.count {
            match policy {
                DeckPolicy::RotatedVariants => {
                    for rotation in Rotation::ALL {
                        cards.push(Card {
                            pattern: entry.pattern,
                            rotation,
                        });
                    }
                }
                DeckPolicy::AsAuthored => cards.push(Card {
                    pattern: entry.pattern,
                    rotation: Rotation::Deg0,
                }),
            }
        }
    }

    fisher_yates(&mut cards, rng, seed);

    DeckState {
        draw_pile: cards.into(),
        discard_pile: Vec::new(),
    }
}

/// Fisher–Yates shuffle with per-swap seeds derived from the base seed.
fn fisher_yates(cards: &mut [Card], rng: &(impl RngOracle + ?Sized), seed: u64) {
    for i in (1..cards.len()).rev() {
        let j = rng.range(seed.wrapping_add(i as u64), 0, i as u32) as usize;
        cards.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;

    fn composition() -> Vec<DeckEntry> {
        vec![
            DeckEntry {
                pattern: PatternId(0),
                count: 2,
            },
            DeckEntry {
                pattern: PatternId(1),
                count: 1,
            },
        ]
    }

    #[test]
    fn rotated_variants_materialize_four_cards_per_copy() {
        let deck = build_deck(&composition(), DeckPolicy::RotatedVariants, &PcgRng, 7);
        assert_eq!(deck.draw_count(), 12);
        assert_eq!(deck.discard_count(), 0);
    }

    #[test]
    fn as_authored_materializes_one_card_per_copy() {
        let deck = build_deck(&composition(), DeckPolicy::AsAuthored, &PcgRng, 7);
        assert_eq!(deck.draw_count(), 3);
    }

    #[test]
    fn conservation_across_draw_discard_reshuffle() {
        let rng = PcgRng;
        let mut deck = build_deck(&composition(), DeckPolicy::RotatedVariants, &rng, 11);
        let total = deck.draw_count();
        let mut held = Vec::new();

        // Draw everything, discarding every other card.
        for round in 0..total {
            let outcome = deck.draw(&rng, round as u64);
            let card = outcome.card.expect("deck not exhausted yet");
            if round % 2 == 0 {
                deck.discard(card);
            } else {
                held.push(card);
            }
            assert_eq!(deck.draw_count() + deck.discard_count() + held.len(), total);
        }

        // The next draw must reshuffle the discard pile back in.
        let outcome = deck.draw(&rng, 99);
        assert!(outcome.reshuffled);
        assert!(outcome.card.is_some());
        assert_eq!(
            deck.draw_count() + deck.discard_count() + held.len() + 1,
            total
        );
    }

    #[test]
    fn empty_deck_signals_none() {
        let rng = PcgRng;
        let mut deck = DeckState::default();
        let outcome = deck.draw(&rng, 0);
        assert_eq!(outcome.card, None);
        assert!(!outcome.reshuffled);
    }

    #[test]
    fn shuffle_is_deterministic_for_a_seed() {
        let rng = PcgRng;
        let a = build_deck(&composition(), DeckPolicy::RotatedVariants, &rng, 42);
        let b = build_deck(&composition(), DeckPolicy::RotatedVariants, &rng, 42);
        assert_eq!(a, b);
    }
}
