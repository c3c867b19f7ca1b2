//! Knockback destination resolution.

use crate::env::MapOracle;
use crate::state::{Facing, GameState, Position};

/// Outcome of a knockback attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KnockbackOutcome {
    /// The target is relocated one cell in the push direction.
    Relocated { from: Position, to: Position },
    /// The destination was out of bounds, an obstacle, a border, or occupied;
    /// the target stays in place and takes fixed collision damage.
    Blocked { damage: u32 },
}

/// Resolves where a knockback would push a target standing at `from`.
///
/// Returns the destination cell when it is in-bounds, passable, and
/// unoccupied; `None` means the push is blocked. This is a pure query — the
/// relocation itself is a direct grid move applied by the strike action, not
/// a validated turn-gated move, since knockback may displace an entity
/// outside the normal action gate.
pub fn resolve_knockback_destination<M>(
    state: &GameState,
    map: &M,
    from: Position,
    direction: Facing,
) -> Option<Position>
where
    M: MapOracle + ?Sized,
{
    let destination = from + direction.delta();
    state.can_enter(map, destination).then_some(destination)
}
