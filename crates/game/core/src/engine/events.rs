//! Game events emitted per executed action.
//!
//! Cross-component notifications are plain values collected by the engine and
//! drained once per tick by the session — there is no subscription lifecycle
//! to leak. Events carry world positions where the presentation layer needs
//! them.

use crate::action::ActionResult;
use crate::combat::{AttackOutcome, KnockbackOutcome};
use crate::env::WorldPos;
use crate::pattern::{Card, PatternId, PieceType, Rotation};
use crate::state::{EntityId, Facing, Position, TurnPhase};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    PhaseChanged {
        phase: TurnPhase,
    },
    /// A player turn began: energy reset and hand refreshed.
    TurnRefreshed {
        energy: u32,
    },
    EnergySpent {
        cost: u32,
        remaining: u32,
    },
    CardPlayed {
        slot: usize,
        pattern: PatternId,
        rotation: Rotation,
    },
    CardDrawn {
        slot: usize,
        card: Card,
    },
    /// A draw found both piles empty; the slot stays vacant.
    DeckExhausted {
        slot: usize,
    },
    DeckReshuffled,
    SlotRotated {
        slot: usize,
        rotation: Rotation,
    },
    /// A single-step move was committed; presentation must animate to
    /// `world_pos` and call back with a motion completion.
    MoveApproved {
        entity: EntityId,
        from: Position,
        to: Position,
        world_pos: WorldPos,
    },
    FacingChanged {
        entity: EntityId,
        facing: Facing,
    },
    DefenseRaised {
        entity: EntityId,
        amount: u32,
        defense: u32,
    },
    AttackResolved {
        attacker: EntityId,
        target: EntityId,
        piece: PieceType,
        outcome: AttackOutcome,
    },
    KnockbackApplied {
        target: EntityId,
        from: Position,
        to: Position,
        world_pos: WorldPos,
    },
    KnockbackBlocked {
        target: EntityId,
        damage: u32,
    },
    /// Fired exactly once per enemy death; the cell is already vacated.
    EnemyDied {
        entity: EntityId,
        position: Position,
    },
    PlayerDied,
    AllEnemiesDefeated,
}

/// Maps an action result to its observable events, in occurrence order.
pub(super) fn collect_events(result: &ActionResult) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match result {
        ActionResult::Move(record) => {
            if let Some(facing) = record.facing {
                events.push(GameEvent::FacingChanged {
                    entity: record.actor,
                    facing,
                });
            }
            events.push(GameEvent::MoveApproved {
                entity: record.actor,
                from: record.from,
                to: record.to,
                world_pos: record.world_pos,
            });
        }
        ActionResult::Strike(record) => {
            if let Some(facing) = record.refaced {
                events.push(GameEvent::FacingChanged {
                    entity: record.attacker,
                    facing,
                });
            }
            if let (Some(target), Some(outcome)) = (record.target, record.outcome) {
                events.push(GameEvent::AttackResolved {
                    attacker: record.attacker,
                    target,
                    piece: record.piece,
                    outcome,
                });
                match record.knockback {
                    Some(KnockbackOutcome::Relocated { from, to }) => {
                        events.push(GameEvent::KnockbackApplied {
                            target,
                            from,
                            to,
                            world_pos: record.knockback_world_pos.unwrap_or_default(),
                        });
                    }
                    Some(KnockbackOutcome::Blocked { damage }) => {
                        events.push(GameEvent::KnockbackBlocked { target, damage });
                    }
                    None => {}
                }
                if record.target_died {
                    if target.is_player() {
                        events.push(GameEvent::PlayerDied);
                    } else if let Some(position) = record.target_position {
                        events.push(GameEvent::EnemyDied {
                            entity: target,
                            position,
                        });
                    }
                }
                if record.roster_cleared {
                    events.push(GameEvent::AllEnemiesDefeated);
                }
            }
        }
        ActionResult::Guard(record) => {
            events.push(GameEvent::DefenseRaised {
                entity: record.actor,
                amount: record.amount,
                defense: record.defense,
            });
        }
        ActionResult::Play(record) => {
            events.push(GameEvent::EnergySpent {
                cost: record.cost,
                remaining: record.energy_remaining,
            });
            events.push(GameEvent::CardPlayed {
                slot: record.slot,
                pattern: record.card.pattern,
                rotation: record.rotation,
            });
            if record.reshuffled {
                events.push(GameEvent::DeckReshuffled);
            }
            if let Some(card) = record.drawn {
                events.push(GameEvent::CardDrawn {
                    slot: record.slot,
                    card,
                });
            }
        }
        ActionResult::SlotRotated(record) => {
            events.push(GameEvent::SlotRotated {
                slot: record.slot,
                rotation: record.rotation,
            });
        }
        ActionResult::TurnRefresh(record) => {
            events.push(GameEvent::PhaseChanged {
                phase: TurnPhase::PlayerTurn,
            });
            events.push(GameEvent::TurnRefreshed {
                energy: record.energy,
            });
            for _ in 0..record.reshuffles {
                events.push(GameEvent::DeckReshuffled);
            }
            for (slot, drawn) in record.drawn.iter().enumerate() {
                match drawn {
                    Some(card) => events.push(GameEvent::CardDrawn { slot, card: *card }),
                    None => events.push(GameEvent::DeckExhausted { slot }),
                }
            }
        }
        ActionResult::Phase(record) => {
            events.push(GameEvent::PhaseChanged {
                phase: record.phase,
            });
        }
    }

    events
}
