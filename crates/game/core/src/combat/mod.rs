//! Combat resolution system.
//!
//! Pure, deterministic helpers used by the strike action: damage arithmetic,
//! dodge/crit checks against oracle-supplied rolls, and knockback destination
//! resolution. None of these functions mutate state; the action transition
//! layer applies their outcomes.

pub mod damage;
pub mod hit;
pub mod knockback;
pub mod result;

pub use damage::calculate_damage;
pub use hit::{check_crit, check_dodge};
pub use knockback::{KnockbackOutcome, resolve_knockback_destination};
pub use result::AttackOutcome;
