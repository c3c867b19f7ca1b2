//! Hand queries shared by the session and the turn controller.

use crate::env::ContentOracle;
use crate::state::{GameState, Position};

/// True iff at least one occupied slot's cost is affordable with the current
/// energy. Used by the turn controller to auto-end a turn with no legal
/// action remaining.
pub fn can_play_any_card(state: &GameState, content: &(impl ContentOracle + ?Sized)) -> bool {
    state.hand.slots.iter().any(|slot| {
        slot.card
            .and_then(|card| content.pattern(card.pattern))
            .is_some_and(|pattern| state.turn.can_afford(pattern.cost))
    })
}

/// Energy cost of the card held in a slot, if any.
pub fn slot_cost(
    state: &GameState,
    content: &(impl ContentOracle + ?Sized),
    slot: usize,
) -> Option<u32> {
    let card = state.hand.slot(slot)?.card?;
    content.pattern(card.pattern).map(|pattern| pattern.cost)
}

/// Absolute cells a slot's card would walk from the player's current cell,
/// for the presentation layer's pattern preview.
pub fn preview_steps(
    state: &GameState,
    content: &(impl ContentOracle + ?Sized),
    slot: usize,
) -> Option<Vec<Position>> {
    let hand_slot = state.hand.slot(slot)?;
    let card = hand_slot.card?;
    let pattern = content.pattern(card.pattern)?;
    let rotation = card.rotation.compose(hand_slot.rotation);
    Some(pattern.resolve_absolute(state.entities.player.position, rotation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{Card, Pattern, PatternId, PatternStep, PieceType, Rotation};
    use crate::state::{
        ActorState, EntitiesState, EntityId, Facing, Offset, StatBlock,
    };
    use crate::testkit::TestContent;

    fn content_with_costs(costs: &[u32]) -> TestContent {
        let patterns = costs
            .iter()
            .map(|&cost| Pattern {
                name: format!("cost{cost}"),
                cost,
                steps: vec![PatternStep {
                    offset: Offset::new(0, 1),
                    piece: PieceType::Basic,
                }],
            })
            .collect();
        TestContent::with_patterns(patterns)
    }

    fn state_with_hand(cards: &[Option<PatternId>]) -> GameState {
        let player = ActorState::new(
            EntityId::PLAYER,
            Position::new(4, 4),
            Facing::Down,
            &StatBlock::GENERIC,
        );
        let mut state = GameState::new(0, EntitiesState::new(player), Default::default());
        for (slot, pattern) in cards.iter().enumerate() {
            state.hand.slots[slot].assign(pattern.map(|pattern| Card {
                pattern,
                rotation: Rotation::Deg0,
            }));
        }
        state
    }

    #[test]
    fn no_affordable_card_means_no_play() {
        let content = content_with_costs(&[3, 3, 3]);
        let mut state = state_with_hand(&[
            Some(PatternId(0)),
            Some(PatternId(1)),
            Some(PatternId(2)),
        ]);

        state.turn.energy = 1;
        assert!(!can_play_any_card(&state, &content));

        state.turn.energy = 3;
        assert!(can_play_any_card(&state, &content));
    }

    #[test]
    fn empty_slots_never_count() {
        let content = content_with_costs(&[1]);
        let mut state = state_with_hand(&[None, None, None]);
        state.turn.energy = 10;
        assert!(!can_play_any_card(&state, &content));
        assert_eq!(slot_cost(&state, &content, 0), None);
    }

    #[test]
    fn preview_applies_slot_rotation() {
        let content = content_with_costs(&[1]);
        let mut state = state_with_hand(&[Some(PatternId(0)), None, None]);

        assert_eq!(
            preview_steps(&state, &content, 0),
            Some(vec![Position::new(4, 5)])
        );

        state.hand.slots[0].rotation = Rotation::Deg90;
        assert_eq!(
            preview_steps(&state, &content, 0),
            Some(vec![Position::new(3, 4)])
        );
    }
}
