use crate::pattern::PieceType;

/// Balance parameter oracle for combat resolution.
pub trait TablesOracle: Send + Sync {
    /// Damage multiplier applied for an attack of the given piece-type.
    fn piece_multiplier(&self, piece: PieceType) -> u32;

    /// Multiplier applied on a critical hit.
    fn crit_multiplier(&self) -> u32;

    /// Fixed damage taken when knockback is blocked by a wall, border,
    /// obstacle, or occupant.
    fn wall_collision_damage(&self) -> u32;

    /// Temporary defense gained from ending a walk on a Defense piece.
    fn defense_bonus(&self) -> u32;
}

/// Concrete balance tables, loadable from content data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BalanceTables {
    pub basic_multiplier: u32,
    pub attack_multiplier: u32,
    pub special_multiplier: u32,
    pub crit_multiplier: u32,
    pub wall_collision_damage: u32,
    pub defense_bonus: u32,
}

impl Default for BalanceTables {
    fn default() -> Self {
        Self {
            basic_multiplier: 1,
            attack_multiplier: 2,
            special_multiplier: 3,
            crit_multiplier: 2,
            wall_collision_damage: 5,
            defense_bonus: 5,
        }
    }
}

impl TablesOracle for BalanceTables {
    fn piece_multiplier(&self, piece: PieceType) -> u32 {
        match piece {
            PieceType::Basic => self.basic_multiplier,
            PieceType::Attack => self.attack_multiplier,
            PieceType::Special => self.special_multiplier,
            // Defense and Player never strike; a caller asking anyway gets 1x.
            PieceType::Defense | PieceType::Player => 1,
        }
    }

    fn crit_multiplier(&self) -> u32 {
        self.crit_multiplier
    }

    fn wall_collision_damage(&self) -> u32 {
        self.wall_collision_damage
    }

    fn defense_bonus(&self) -> u32 {
        self.defense_bonus
    }
}
