//! End-to-end session scenarios driven through the cooperative tick loop.

use gridfall_content::{CatalogContent, GameContent, MapContent, MapSpec, SpawnSpec, StartSpec};
use gridfall_core::{
    BalanceTables, DeckPolicy, Facing, GameConfig, GameEvent, Offset, Pattern, PatternStep,
    PieceType, Position, SlotRefillPolicy, StatBlock, TurnPhase,
};
use gridfall_runtime::{GameSession, SessionStatus};

const ENEMY_TEMPLATE: &str = "drone";

fn pattern(name: &str, cost: u32, steps: &[((i32, i32), PieceType)]) -> Pattern {
    Pattern {
        name: name.into(),
        cost,
        steps: steps
            .iter()
            .map(|&((dx, dy), piece)| PatternStep {
                offset: Offset::new(dx, dy),
                piece,
            })
            .collect(),
    }
}

fn test_config() -> GameConfig {
    GameConfig {
        energy_base: 4,
        movement_range: 1,
        deck_policy: DeckPolicy::AsAuthored,
        refill_policy: SlotRefillPolicy::TurnRefresh,
        grace_delay_ticks: 0,
        motion_watchdog_ticks: 60,
    }
}

struct Setup {
    patterns: Vec<Pattern>,
    deck: Vec<(String, u32)>,
    player: StatBlock,
    enemy: Option<(StatBlock, Position)>,
    borders: Vec<Position>,
    config: GameConfig,
}

impl Default for Setup {
    fn default() -> Self {
        Self {
            patterns: Vec::new(),
            deck: Vec::new(),
            player: StatBlock {
                hp: 100,
                damage: 10,
                defense: 5,
                dodge: 0,
                crit: 0,
            },
            enemy: None,
            borders: Vec::new(),
            config: test_config(),
        }
    }
}

impl Setup {
    fn build(self) -> GameContent {
        let mut stats = vec![("player".to_string(), self.player)];
        let mut spawns = Vec::new();
        if let Some((block, position)) = self.enemy {
            stats.push((ENEMY_TEMPLATE.to_string(), block));
            spawns.push(SpawnSpec {
                stats: ENEMY_TEMPLATE.to_string(),
                position,
            });
        }

        let catalog = CatalogContent::build(self.patterns, self.deck, stats);
        let map = MapContent::build(
            MapSpec {
                width: 9,
                height: 9,
                geometry: None,
                obstacles: Vec::new(),
                borders: self.borders,
                player_start: StartSpec {
                    cell: Position::new(4, 4),
                    facing: Facing::Down,
                },
                spawns,
            },
            &catalog,
        )
        .expect("test map builds");

        GameContent {
            config: self.config,
            tables: BalanceTables::default(),
            catalog,
            map,
        }
    }
}

/// Ticks the session, acknowledging every presentation motion immediately.
fn run_ticks(session: &mut GameSession, ticks: usize) {
    for _ in 0..ticks {
        session.tick();
        if session.is_motion_pending() {
            session.notify_motion_complete();
        }
    }
}

#[test]
fn scenario_a_one_step_basic_move_without_combat() {
    let content = Setup {
        patterns: vec![pattern("step", 1, &[((0, 1), PieceType::Basic)])],
        deck: vec![("step".into(), 3)],
        ..Setup::default()
    }
    .build();

    let mut session = GameSession::new(content, 1).expect("session boots");
    assert_eq!(session.phase(), TurnPhase::PlayerTurn);
    assert_eq!(session.energy(), 4);

    session.play_slot(0).expect("play succeeds");
    run_ticks(&mut session, 3);

    assert_eq!(session.state().entities.player.position, Position::new(4, 5));
    assert_eq!(session.energy(), 3);

    let events = session.drain_events();
    assert!(events.iter().any(|event| matches!(
        event,
        GameEvent::MoveApproved { to, .. } if *to == Position::new(4, 5)
    )));
    assert!(
        !events
            .iter()
            .any(|event| matches!(event, GameEvent::AttackResolved { .. })),
        "no enemy adjacent, so no combat may resolve"
    );
}

#[test]
fn scenario_b_attack_pattern_kills_adjacent_enemy_exactly_once() {
    let content = Setup {
        patterns: vec![pattern("lunge", 1, &[((0, 1), PieceType::Attack)])],
        deck: vec![("lunge".into(), 3)],
        enemy: Some((
            StatBlock {
                hp: 10,
                damage: 5,
                defense: 0,
                dodge: 0,
                crit: 0,
            },
            Position::new(4, 6),
        )),
        ..Setup::default()
    }
    .build();

    let mut session = GameSession::new(content, 2).expect("session boots");
    session.play_slot(0).expect("play succeeds");
    run_ticks(&mut session, 3);

    // Walk ended at (4,5) facing up; the Attack piece strikes (4,6) for
    // 10 × 2 = 20 damage against 10 HP.
    let events = session.drain_events();
    assert!(events.iter().any(|event| matches!(
        event,
        GameEvent::AttackResolved {
            piece: PieceType::Attack,
            outcome: gridfall_core::AttackOutcome::Hit { damage: 20, critical: false },
            ..
        }
    )));

    let deaths = events
        .iter()
        .filter(|event| matches!(event, GameEvent::EnemyDied { .. }))
        .count();
    assert_eq!(deaths, 1, "death notification fires exactly once");

    assert!(
        !session
            .state()
            .world
            .tile_map
            .is_occupied(&Position::new(4, 6)),
        "dead enemy's cell is vacated"
    );
    assert!(session.state().entities.enemies.is_empty());
    assert_eq!(session.status(), SessionStatus::Victory);
}

#[test]
fn scenario_c_unaffordable_hand_auto_ends_the_turn() {
    let content = Setup {
        patterns: vec![pattern("heavy", 3, &[((0, 1), PieceType::Basic)])],
        deck: vec![("heavy".into(), 6)],
        ..Setup::default()
    }
    .build();

    let mut session = GameSession::new(content, 3).expect("session boots");
    assert_eq!(session.slot_cost(0), Some(3));
    assert_eq!(session.slot_cost(1), Some(3));
    assert_eq!(session.slot_cost(2), Some(3));

    session.play_slot(0).expect("play succeeds");
    assert_eq!(session.energy(), 1);

    // Finish the walk, then let the zero-grace countdown fire.
    run_ticks(&mut session, 4);

    let events = session.drain_events();
    assert!(
        events.iter().any(|event| matches!(
            event,
            GameEvent::PhaseChanged {
                phase: TurnPhase::EnemyTurn
            }
        )),
        "turn must auto-transition to the enemy phase"
    );
}

#[test]
fn scenario_d_knockback_into_border_deals_wall_damage_without_relocation() {
    let content = Setup {
        patterns: vec![pattern("ram", 1, &[((0, 1), PieceType::Special)])],
        deck: vec![("ram".into(), 3)],
        enemy: Some((
            StatBlock {
                hp: 100,
                damage: 5,
                defense: 0,
                dodge: 0,
                crit: 0,
            },
            Position::new(4, 6),
        )),
        borders: vec![Position::new(4, 7)],
        ..Setup::default()
    }
    .build();

    let mut session = GameSession::new(content, 4).expect("session boots");
    session.play_slot(0).expect("play succeeds");
    run_ticks(&mut session, 3);

    let events = session.drain_events();
    assert!(events.iter().any(|event| matches!(
        event,
        GameEvent::KnockbackBlocked { damage: 5, .. }
    )));
    assert!(
        !events
            .iter()
            .any(|event| matches!(event, GameEvent::KnockbackApplied { .. })),
        "no relocation may occur"
    );

    let enemy = &session.state().entities.enemies[0];
    assert_eq!(enemy.position, Position::new(4, 6), "target stays in place");
    // 10 × 3 special damage plus 5 wall collision.
    assert_eq!(enemy.model.current_hp(), 100 - 30 - 5);
}

#[test]
fn enemy_phase_adjacent_enemy_attacks_then_player_turn_returns() {
    let content = Setup {
        patterns: vec![pattern("step", 1, &[((0, 1), PieceType::Basic)])],
        deck: vec![("step".into(), 6)],
        enemy: Some((
            StatBlock {
                hp: 30,
                damage: 8,
                defense: 0,
                dodge: 0,
                crit: 0,
            },
            Position::new(4, 3),
        )),
        ..Setup::default()
    }
    .build();

    let mut session = GameSession::new(content, 5).expect("session boots");
    session.end_turn().expect("end turn accepted");

    // Countdown fires, the enemy phase runs its single enemy, and the next
    // player turn starts with refreshed energy.
    run_ticks(&mut session, 4);

    assert_eq!(session.phase(), TurnPhase::PlayerTurn);
    assert_eq!(session.energy(), 4);
    assert_eq!(
        session.state().entities.player.model.current_hp(),
        92,
        "adjacent enemy strikes for its base damage"
    );

    let events = session.drain_events();
    assert!(events.iter().any(|event| matches!(
        event,
        GameEvent::AttackResolved {
            target: gridfall_core::EntityId(0),
            ..
        }
    )));
}

#[test]
fn lethal_enemy_attack_defeats_the_player_and_halts_the_session() {
    let content = Setup {
        patterns: vec![pattern("step", 1, &[((0, 1), PieceType::Basic)])],
        deck: vec![("step".into(), 6)],
        player: StatBlock {
            hp: 5,
            damage: 10,
            defense: 0,
            dodge: 0,
            crit: 0,
        },
        enemy: Some((
            StatBlock {
                hp: 30,
                damage: 8,
                defense: 0,
                dodge: 0,
                crit: 0,
            },
            Position::new(4, 3),
        )),
        ..Setup::default()
    }
    .build();

    let mut session = GameSession::new(content, 11).expect("session boots");
    session.end_turn().expect("end turn accepted");
    run_ticks(&mut session, 4);

    assert_eq!(session.status(), SessionStatus::Defeat);
    let events = session.drain_events();
    assert!(events.iter().any(|event| matches!(event, GameEvent::PlayerDied)));
    assert!(session.play_slot(0).is_err(), "a finished session refuses input");
}

#[test]
fn distant_enemy_approaches_during_its_phase() {
    let content = Setup {
        patterns: vec![pattern("step", 1, &[((0, 1), PieceType::Basic)])],
        deck: vec![("step".into(), 6)],
        enemy: Some((
            StatBlock {
                hp: 30,
                damage: 8,
                defense: 0,
                dodge: 0,
                crit: 0,
            },
            Position::new(0, 0),
        )),
        ..Setup::default()
    }
    .build();

    let mut session = GameSession::new(content, 6).expect("session boots");
    session.end_turn().expect("end turn accepted");
    run_ticks(&mut session, 4);

    let enemy = &session.state().entities.enemies[0];
    assert_eq!(
        enemy.position.manhattan_distance(Position::new(0, 0)),
        1,
        "enemy wanders one cell within its movement range"
    );
    assert_eq!(
        session.state().world.tile_map.occupant(&enemy.position),
        Some(enemy.id),
        "occupancy follows the enemy"
    );
}

#[test]
fn motion_gate_blocks_logic_until_completion_arrives() {
    let content = Setup {
        patterns: vec![pattern("dash", 1, &[((0, 1), PieceType::Basic), ((0, 2), PieceType::Basic)])],
        deck: vec![("dash".into(), 3)],
        ..Setup::default()
    }
    .build();

    let mut session = GameSession::new(content, 7).expect("session boots");
    session.play_slot(0).expect("play succeeds");

    session.tick();
    assert!(session.is_motion_pending());
    assert_eq!(session.state().entities.player.position, Position::new(4, 5));

    // Without the completion callback, further ticks may not advance the walk.
    session.tick();
    session.tick();
    assert_eq!(session.state().entities.player.position, Position::new(4, 5));

    session.notify_motion_complete();
    session.tick();
    assert_eq!(session.state().entities.player.position, Position::new(4, 6));
}

#[test]
fn stalled_motion_is_released_by_the_watchdog() {
    let mut config = test_config();
    config.motion_watchdog_ticks = 3;

    let content = Setup {
        patterns: vec![pattern("step", 1, &[((0, 1), PieceType::Basic)])],
        deck: vec![("step".into(), 3)],
        config,
        ..Setup::default()
    }
    .build();

    let mut session = GameSession::new(content, 8).expect("session boots");
    session.play_slot(0).expect("play succeeds");
    session.tick();
    assert!(session.is_motion_pending());

    // Never acknowledge the motion; the watchdog must unblock the session.
    for _ in 0..6 {
        session.tick();
    }
    assert!(!session.is_motion_pending());
    assert_eq!(session.state().entities.player.position, Position::new(4, 5));
}

#[test]
fn session_rejects_input_while_an_action_resolves() {
    let content = Setup {
        patterns: vec![pattern("dash", 1, &[((0, 1), PieceType::Basic), ((0, 2), PieceType::Basic)])],
        deck: vec![("dash".into(), 3)],
        ..Setup::default()
    }
    .build();

    let mut session = GameSession::new(content, 9).expect("session boots");
    assert!(session.can_player_act());

    session.play_slot(0).expect("play succeeds");
    assert!(!session.can_player_act());
    assert!(session.play_slot(1).is_err());
    assert!(session.end_turn().is_err());
}

#[test]
fn deck_refills_slots_only_at_turn_refresh() {
    let content = Setup {
        patterns: vec![pattern("step", 1, &[((0, 1), PieceType::Basic)])],
        deck: vec![("step".into(), 6)],
        ..Setup::default()
    }
    .build();

    let mut session = GameSession::new(content, 10).expect("session boots");
    let (draw_before, _) = session.deck_counts();
    assert_eq!(draw_before, 3, "three of six cards dealt to the hand");

    session.play_slot(0).expect("play succeeds");
    run_ticks(&mut session, 2);

    // Under the turn-refresh policy the played slot stays empty.
    assert_eq!(session.slot_cost(0), None);
    let (draw, discard) = session.deck_counts();
    assert_eq!((draw, discard), (3, 1));
}
