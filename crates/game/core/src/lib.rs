//! Deterministic game logic and data types for the grid-tactics core.
//!
//! `gridfall-core` defines the canonical rules (grid occupancy, patterns and
//! deck, combat, turn/energy state machine) and exposes pure APIs reused by
//! the runtime session and offline tools. All state mutation flows through
//! [`engine::GameEngine`], and supporting crates depend on the types
//! re-exported here.

pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod hand;
pub mod pattern;
pub mod state;

pub use action::{
    Action, ActionResult, ActionTransition, BeginEnemyPhaseAction, BeginPlayerTurnAction,
    BeginProcessingAction, CharacterActionKind, GuardUpAction, MoveError, MoveStepAction,
    PatternWalk, PlayCardAction, PlayError, PlayRecord, RotateSlotAction, StrikeAction,
    StrikeError, SystemActionKind, TurnTransitionError, WalkOutcome, WalkProgress,
    find_enemy_in_direction,
};
pub use combat::{AttackOutcome, KnockbackOutcome};
pub use config::{ConfigOracle, DeckPolicy, GameConfig, SlotRefillPolicy};
pub use engine::{ExecuteError, ExecutionOutcome, GameEngine, GameEvent};
pub use env::{
    BalanceTables, ContentOracle, DeckEntry, EnemySpawn, Env, GameEnv, GridGeometry,
    MapDimensions, MapOracle, OracleError, PcgRng, RngOracle, StaticTile, StatsId, TablesOracle,
    TerrainKind, WorldPos, compute_seed, roll,
};
pub use pattern::{
    Card, DeckState, DrawOutcome, Pattern, PatternId, PatternStep, PieceType, Rotation, build_deck,
};
pub use state::{
    ActorState, CharacterModel, EntitiesState, EntityId, Facing, GameState, HandSlot, HandState,
    Offset, Position, StatBlock, TileMap, TileView, TurnPhase, TurnState, WorldState, direction_to,
};
