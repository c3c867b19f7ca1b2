use crate::pattern::{Pattern, PatternId};
use crate::state::StatBlock;

/// Identifier of a stat template in the content catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatsId(pub u16);

/// One entry of the deck composition: a catalog pattern and its copy count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeckEntry {
    pub pattern: PatternId,
    pub count: u32,
}

/// Static content oracle: pattern catalog, deck composition, stat templates.
pub trait ContentOracle: Send + Sync {
    /// Looks up a catalog pattern; `None` for an unknown id.
    fn pattern(&self, id: PatternId) -> Option<&Pattern>;

    /// Deck composition the session deck is built from.
    fn deck_composition(&self) -> &[DeckEntry];

    /// Stat template for the player character, if authored.
    fn player_stats(&self) -> Option<&StatBlock>;

    /// Stat template lookup for spawned enemies.
    fn stats(&self, id: StatsId) -> Option<&StatBlock>;
}
