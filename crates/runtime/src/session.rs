//! Single-threaded cooperative session driver.
//!
//! All game logic advances on a per-tick `tick()` call from the embedding
//! host. Multi-step operations — the pattern walk, the sequential enemy
//! phase — are resumable state held on the session and advanced one unit per
//! tick, pausing whenever a presentation motion is in flight. There is no
//! executor and no parallelism; correctness of grid mutation rests on this
//! strictly sequential model.

use std::collections::VecDeque;

use gridfall_core::{
    Action, ActionResult, ActorState, BeginEnemyPhaseAction, BeginPlayerTurnAction,
    BeginProcessingAction, EntitiesState, EntityId, ExecuteError, Facing, GameEngine, GameEnv,
    GameEvent, GameState, MoveStepAction, PatternWalk, PcgRng, PieceType, PlayCardAction,
    Position, RotateSlotAction, StatBlock, StrikeAction, TurnPhase, WalkProgress, build_deck,
    compute_seed, hand, roll,
};
use gridfall_content::GameContent;
use tracing::{debug, info, warn};

use crate::error::SessionError;
use crate::motion::MotionGate;
use crate::providers::{EnemyDecision, decide_enemy_turn};

/// Terminal condition of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    /// Every enemy is defeated.
    Victory,
    /// The player died.
    Defeat,
}

/// A running game session: owned content oracles, authoritative state, and
/// the cooperative scheduling glue between them.
pub struct GameSession {
    content: GameContent,
    rng: PcgRng,
    state: GameState,
    status: SessionStatus,
    events: VecDeque<GameEvent>,
    motion: MotionGate,
    walk: Option<PatternWalk>,
    /// Ticks remaining until a scheduled automatic/explicit end of turn.
    end_turn_countdown: Option<u32>,
    /// Enemies still to act this processing phase, in spawn order.
    enemy_queue: VecDeque<EntityId>,
}

impl GameSession {
    /// Boots a session from loaded content and a deterministic seed, and
    /// performs the game-start transition into the first player turn.
    pub fn new(content: GameContent, game_seed: u64) -> Result<Self, SessionError> {
        let rng = PcgRng;
        let state = bootstrap_state(&content, &rng, game_seed);

        let mut session = Self {
            content,
            rng,
            state,
            status: SessionStatus::Running,
            events: VecDeque::new(),
            motion: MotionGate::new(),
            walk: None,
            end_turn_countdown: None,
            enemy_queue: VecDeque::new(),
        };

        info!(game_seed, "session starting");
        session.execute(&BeginPlayerTurnAction.into())?;
        Ok(session)
    }

    /// Boots a session with an OS-entropy seed. All in-game randomness still
    /// derives deterministically from the chosen seed.
    pub fn from_entropy(content: GameContent) -> Result<Self, SessionError> {
        Self::new(content, rand::random())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn phase(&self) -> TurnPhase {
        self.state.turn.phase
    }

    pub fn energy(&self) -> u32 {
        self.state.turn.energy
    }

    pub fn is_motion_pending(&self) -> bool {
        self.motion.is_pending()
    }

    /// True when player input is currently accepted: player turn, session
    /// running, and no action or motion in flight.
    pub fn can_player_act(&self) -> bool {
        self.status == SessionStatus::Running
            && self.state.turn.phase == TurnPhase::PlayerTurn
            && self.walk.is_none()
            && !self.motion.is_pending()
            && self.end_turn_countdown.is_none()
    }

    /// Energy cost of the card in a slot, for input-layer affordability UI.
    pub fn slot_cost(&self, slot: usize) -> Option<u32> {
        hand::slot_cost(&self.state, &self.content.catalog, slot)
    }

    /// Absolute cells a slot would walk, for the pattern preview.
    pub fn preview_steps(&self, slot: usize) -> Option<Vec<Position>> {
        hand::preview_steps(&self.state, &self.content.catalog, slot)
    }

    pub fn deck_counts(&self) -> (usize, usize) {
        (self.state.deck.draw_count(), self.state.deck.discard_count())
    }

    /// Drains the queued events for the presentation layer; called once per
    /// host frame.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    // ========================================================================
    // Input surface
    // ========================================================================

    /// Plays the card in a hand slot, starting its pattern walk.
    pub fn play_slot(&mut self, slot: usize) -> Result<(), SessionError> {
        self.require_player_idle()?;

        let outcome = self.execute(&Action::play_card(PlayCardAction::new(slot)))?;
        if let ActionResult::Play(record) = &outcome {
            info!(slot, pattern = %record.card.pattern, cost = record.cost, "card played");
            self.walk = Some(PatternWalk::from_play(record));
        }
        Ok(())
    }

    /// Cycles a slot's rotation by a quarter turn.
    pub fn rotate_slot(&mut self, slot: usize) -> Result<(), SessionError> {
        self.require_player_idle()?;
        self.execute(&Action::rotate_slot(RotateSlotAction::new(slot)))?;
        Ok(())
    }

    /// Explicit end-turn request. The transition happens on the next idle
    /// tick so in-flight effects settle first.
    pub fn end_turn(&mut self) -> Result<(), SessionError> {
        self.require_player_idle()?;
        debug!("player requested end of turn");
        self.end_turn_countdown = Some(0);
        Ok(())
    }

    /// Direct single-step move, outside the card system.
    pub fn try_move_player(&mut self, direction: Facing) -> Result<bool, SessionError> {
        self.require_player_idle()?;

        let target = self.state.entities.player.position + direction.delta();
        let action = Action::move_step(MoveStepAction::new(EntityId::PLAYER, target));
        match self.execute(&action) {
            Ok(_) => {
                self.motion.begin(EntityId::PLAYER);
                Ok(true)
            }
            // Illegal destinations are expected control flow, not errors.
            Err(SessionError::Execute(ExecuteError::Move(rejection))) => {
                debug!(%target, %rejection, "move rejected");
                Ok(false)
            }
            Err(error) => Err(error),
        }
    }

    /// Completion callback from the presentation layer: the animated motion
    /// for the last `MoveApproved`/`KnockbackApplied` event has finished.
    pub fn notify_motion_complete(&mut self) {
        if self.motion.complete().is_none() {
            debug!("motion completion with no motion in flight, ignoring");
        }
    }

    // ========================================================================
    // Cooperative scheduling
    // ========================================================================

    /// Advances at most one unit of game logic.
    ///
    /// Order of concerns: motion back-pressure (with watchdog), the active
    /// pattern walk, a scheduled end of turn, then the per-phase duties.
    pub fn tick(&mut self) {
        if self.motion.is_pending() {
            let watchdog = self.content.config.motion_watchdog_ticks;
            match self.motion.tick_watchdog(watchdog) {
                Some(entity) => warn!(%entity, "motion completion never arrived, force-releasing"),
                None => return,
            }
        }

        if self.status != SessionStatus::Running {
            return;
        }

        if self.walk.is_some() {
            self.advance_walk();
            return;
        }

        if let Some(remaining) = self.end_turn_countdown {
            if remaining == 0 {
                self.end_turn_countdown = None;
                self.begin_enemy_phase();
            } else {
                self.end_turn_countdown = Some(remaining - 1);
            }
            return;
        }

        match self.state.turn.phase {
            TurnPhase::PlayerTurn => self.evaluate_auto_end_turn(),
            TurnPhase::EnemyTurn => {
                // Defensive resync; begin_enemy_phase normally enters
                // Processing in the same tick.
                if self.run_system(&BeginProcessingAction.into()) {
                    self.enemy_queue = self.state.entities.enemies.iter().map(|e| e.id).collect();
                }
            }
            TurnPhase::Processing => self.advance_enemy_phase(),
        }
    }

    fn advance_walk(&mut self) {
        let Some(mut walk) = self.walk.take() else {
            return;
        };

        let env = build_env(&self.content, &self.rng);
        let (progress, events) = walk.advance(&mut self.state, &env);
        self.push_events(events);

        match progress {
            WalkProgress::Stepped { to } => {
                debug!(%to, "walk step committed");
                self.motion.begin(walk.actor());
                self.walk = Some(walk);
            }
            WalkProgress::Finished(outcome) => {
                if let Some(rejection) = &outcome.rejection {
                    debug!(%rejection, "walk stopped early");
                }
                debug!(
                    steps = outcome.steps_taken,
                    final_piece = %outcome.final_piece,
                    "walk resolved"
                );
                if let Some(completion) = walk.completion_action() {
                    self.run_player_completion(&completion);
                }
                // Action complete: the turn controller takes over.
                self.evaluate_auto_end_turn();
            }
        }
    }

    fn run_player_completion(&mut self, action: &Action) {
        match self.execute(action) {
            Ok(ActionResult::Strike(record)) => {
                if let Some(gridfall_core::KnockbackOutcome::Relocated { .. }) = record.knockback {
                    // The pushed target owns the follow-up motion.
                    if let Some(target) = record.target {
                        self.motion.begin(target);
                    }
                }
            }
            Ok(_) => {}
            Err(error) => warn!(%error, "post-walk effect failed"),
        }
    }

    /// Schedules an automatic end of turn when no legal action remains:
    /// energy exhausted, no affordable card, or the session is already over.
    fn evaluate_auto_end_turn(&mut self) {
        if self.status != SessionStatus::Running
            || self.state.turn.phase != TurnPhase::PlayerTurn
            || self.end_turn_countdown.is_some()
        {
            return;
        }

        let energy = self.state.turn.energy;
        if energy == 0 {
            info!("energy depleted, auto-ending turn");
        } else if !hand::can_play_any_card(&self.state, &self.content.catalog) {
            info!(energy, "no playable card with remaining energy, auto-ending turn");
        } else {
            return;
        }

        self.end_turn_countdown = Some(self.content.config.grace_delay_ticks);
    }

    fn begin_enemy_phase(&mut self) {
        if !self.run_system(&BeginEnemyPhaseAction.into()) {
            return;
        }
        if !self.run_system(&BeginProcessingAction.into()) {
            return;
        }

        self.enemy_queue = self.state.entities.enemies.iter().map(|e| e.id).collect();
        info!(enemies = self.enemy_queue.len(), "enemy phase started");
    }

    /// Runs one enemy's full turn, skipping entries removed mid-iteration;
    /// returns to the player turn once the queue drains.
    fn advance_enemy_phase(&mut self) {
        while let Some(enemy) = self.enemy_queue.pop_front() {
            if !self.state.entities.is_enemy(enemy) {
                debug!(%enemy, "enemy removed mid-phase, skipping");
                continue;
            }

            let decision = decide_enemy_turn(
                &self.state,
                &self.content.map,
                &self.rng,
                self.content.config.movement_range,
                enemy,
            );

            match decision {
                EnemyDecision::AttackPlayer => {
                    debug!(%enemy, "enemy attacks the player");
                    let action = Action::strike(StrikeAction::new(enemy, PieceType::Basic));
                    if let Err(error) = self.execute(&action) {
                        warn!(%enemy, %error, "enemy attack failed");
                    }
                }
                EnemyDecision::MoveTo(target) => {
                    debug!(%enemy, %target, "enemy moves");
                    let action = Action::move_step(MoveStepAction::new(enemy, target));
                    match self.execute(&action) {
                        Ok(_) => {
                            self.motion.begin(enemy);
                        }
                        Err(SessionError::Execute(ExecuteError::Move(rejection))) => {
                            debug!(%enemy, %rejection, "enemy move rejected");
                        }
                        Err(error) => warn!(%enemy, %error, "enemy move failed"),
                    }
                }
                EnemyDecision::Hold => {
                    debug!(%enemy, "enemy holds");
                }
            }

            // One enemy per tick; its motion (if any) gates the next.
            return;
        }

        info!("all enemies processed, starting player turn");
        self.run_system(&BeginPlayerTurnAction.into());
    }

    // ========================================================================
    // Execution plumbing
    // ========================================================================

    fn require_player_idle(&self) -> Result<(), SessionError> {
        if self.status != SessionStatus::Running {
            return Err(SessionError::SessionOver);
        }
        if self.walk.is_some() || self.end_turn_countdown.is_some() {
            return Err(SessionError::ActionInFlight);
        }
        if self.motion.is_pending() {
            return Err(SessionError::MotionInFlight);
        }
        Ok(())
    }

    /// Executes an action against the state, queueing its events.
    fn execute(&mut self, action: &Action) -> Result<ActionResult, SessionError> {
        let env = build_env(&self.content, &self.rng);
        let outcome = GameEngine::new(&mut self.state).execute(&env, action)?;
        self.push_events(outcome.events);
        Ok(outcome.result)
    }

    /// Executes a system action, logging instead of propagating failures —
    /// the turn loop must never crash on a phase hiccup.
    fn run_system(&mut self, action: &Action) -> bool {
        match self.execute(action) {
            Ok(_) => true,
            Err(error) => {
                warn!(action = action.as_snake_case(), %error, "system action failed");
                false
            }
        }
    }

    fn push_events(&mut self, events: Vec<GameEvent>) {
        for event in events {
            match &event {
                GameEvent::PlayerDied => {
                    info!("player died, session over");
                    self.status = SessionStatus::Defeat;
                }
                GameEvent::AllEnemiesDefeated => {
                    info!("all enemies defeated");
                    self.status = SessionStatus::Victory;
                }
                _ => {}
            }
            self.events.push_back(event);
        }
    }
}

/// Builds the oracle environment over the session-owned content.
fn build_env<'a>(content: &'a GameContent, rng: &'a PcgRng) -> GameEnv<'a> {
    gridfall_core::Env::with_all(
        &content.map,
        &content.catalog,
        &content.tables,
        &content.config,
        rng,
    )
    .as_game_env()
}

/// Materializes the initial game state: player, enemy roster, occupancy, and
/// the shuffled session deck.
fn bootstrap_state(content: &GameContent, rng: &PcgRng, game_seed: u64) -> GameState {
    use gridfall_core::{ContentOracle, MapOracle};

    let (start, facing) = content.map.player_start();
    let player_stats = content
        .catalog
        .player_stats()
        .copied()
        .unwrap_or_else(|| {
            warn!("player stats missing, using generic fallback");
            StatBlock::GENERIC
        });
    let player = ActorState::new(EntityId::PLAYER, start, facing, &player_stats);

    let shuffle_seed = compute_seed(game_seed, 0, EntityId::SYSTEM.0, roll::SHUFFLE);
    let deck = build_deck(
        content.catalog.deck_composition(),
        content.config.deck_policy,
        rng,
        shuffle_seed,
    );

    let mut state = GameState::new(game_seed, EntitiesState::new(player), deck);
    state.register_occupant(EntityId::PLAYER, start);
    info!(%start, "player registered");

    for spawn in content.map.enemy_spawns() {
        let stats = content.catalog.stats(spawn.stats).copied().unwrap_or_else(|| {
            warn!(enemy = %spawn.id, "enemy stats missing, using generic fallback");
            StatBlock::GENERIC
        });
        if !state.register_occupant(spawn.id, spawn.position) {
            warn!(cell = %spawn.position, "spawn cell already occupied, skipping enemy");
            continue;
        }
        state.entities.enemies.push(ActorState::new(
            spawn.id,
            spawn.position,
            spawn.facing,
            &stats,
        ));
        debug!(enemy = %spawn.id, cell = %spawn.position, "enemy registered");
    }

    state
}
