//! Movement patterns and their rotation algebra.
//!
//! A pattern is plain authored data: a named, ordered sequence of relative
//! steps, each tagged with a piece-type. Rotation is a pure function applied
//! at resolve time or at deck-build time; a rotated variant is a
//! `(PatternId, Rotation)` tag, never a separate authored entity.

mod deck;

pub use deck::{Card, DeckState, DrawOutcome, build_deck};

use crate::state::{Offset, Position};

/// Identifier of a pattern in the content catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatternId(pub u16);

impl std::fmt::Display for PatternId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pattern#{}", self.0)
    }
}

/// Effect class of a pattern step.
///
/// The piece-type of the last step a walker actually reaches selects the
/// post-move effect: Defense buffs the mover, Basic/Attack/Special strike,
/// Player does nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PieceType {
    Basic,
    Attack,
    Defense,
    Special,
    Player,
}

impl PieceType {
    /// True for piece-types that trigger combat resolution after the walk.
    pub fn is_attacking(self) -> bool {
        matches!(self, PieceType::Basic | PieceType::Attack | PieceType::Special)
    }
}

/// Quarter-turn rotation applied to pattern offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rotation {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    /// Rotates an offset on the integer lattice.
    ///
    /// 90° maps (x, y) to (−y, x); 180° to (−x, −y); 270° to (y, −x).
    pub fn apply(self, offset: Offset) -> Offset {
        match self {
            Rotation::Deg0 => offset,
            Rotation::Deg90 => Offset::new(-offset.dy, offset.dx),
            Rotation::Deg180 => Offset::new(-offset.dx, -offset.dy),
            Rotation::Deg270 => Offset::new(offset.dy, -offset.dx),
        }
    }

    /// The next quarter turn, wrapping after 270°.
    pub fn next(self) -> Rotation {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }

    /// Composition of two rotations (angles add modulo 360°).
    pub fn compose(self, other: Rotation) -> Rotation {
        let quarters = (self.quarter_turns() + other.quarter_turns()) % 4;
        match quarters {
            0 => Rotation::Deg0,
            1 => Rotation::Deg90,
            2 => Rotation::Deg180,
            _ => Rotation::Deg270,
        }
    }

    pub fn degrees(self) -> u16 {
        self.quarter_turns() as u16 * 90
    }

    fn quarter_turns(self) -> u8 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 1,
            Rotation::Deg180 => 2,
            Rotation::Deg270 => 3,
        }
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Rotation::Deg0
    }
}

/// One authored step of a pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatternStep {
    pub offset: Offset,
    pub piece: PieceType,
}

/// A named movement pattern. Immutable once authored.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pattern {
    pub name: String,
    /// Energy cost to play this pattern from a hand slot.
    pub cost: u32,
    pub steps: Vec<PatternStep>,
}

impl Pattern {
    /// Resolves the pattern to absolute board cells for a given origin and
    /// rotation, preserving step order.
    ///
    /// Order is significant: it is the walk sequence, and the index into it
    /// selects which piece-type applies at path completion.
    pub fn resolve_absolute(&self, origin: Position, rotation: Rotation) -> Vec<Position> {
        self.steps
            .iter()
            .map(|step| origin + rotation.apply(step.offset))
            .collect()
    }

    /// Piece-types in step order, rotated variants share the originals.
    pub fn piece_types(&self) -> Vec<PieceType> {
        self.steps.iter().map(|step| step.piece).collect()
    }
}
