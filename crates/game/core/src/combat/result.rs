//! Combat outcome types.

/// Outcome of a resolved attack against a located target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    /// The defender's dodge roll succeeded; no damage was applied.
    Dodged,
    /// Damage was applied.
    Hit { damage: u32, critical: bool },
}

impl AttackOutcome {
    pub fn damage(&self) -> u32 {
        match self {
            AttackOutcome::Dodged => 0,
            AttackOutcome::Hit { damage, .. } => *damage,
        }
    }
}
