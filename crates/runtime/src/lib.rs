//! Runtime orchestration for the deterministic grid-tactics simulation.
//!
//! This crate wires loaded content, the core engine, and the cooperative
//! per-tick scheduler into a cohesive session API. Embedders drive
//! [`GameSession::tick`] once per frame, feed player input through the input
//! surface, drain [`gridfall_core::GameEvent`]s for presentation, and report
//! animation completions back via `notify_motion_complete`.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the session driver and bootstrap
//! - [`providers`] supplies enemy turn decisions
//! - [`motion`] implements the single-flight motion gate with its watchdog

pub mod error;
pub mod motion;
pub mod providers;
pub mod session;

pub use error::SessionError;
pub use motion::MotionGate;
pub use providers::{EnemyDecision, decide_enemy_turn};
pub use session::{GameSession, SessionStatus};
