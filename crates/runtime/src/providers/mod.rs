//! Decision providers for non-player actors.

mod enemy;

pub use enemy::{EnemyDecision, decide_enemy_turn};
