//! Concrete content oracle backed by loaded catalogs.

use std::collections::BTreeMap;

use gridfall_core::{ContentOracle, DeckEntry, Pattern, PatternId, StatBlock, StatsId};

/// Pattern catalog, deck composition, and stat templates resolved into the
/// core's id space.
#[derive(Clone, Debug)]
pub struct CatalogContent {
    patterns: Vec<Pattern>,
    deck: Vec<DeckEntry>,
    stats: Vec<StatBlock>,
    stats_by_name: BTreeMap<String, StatsId>,
    player: Option<StatBlock>,
}

impl CatalogContent {
    /// Stat template name reserved for the player character.
    pub const PLAYER_TEMPLATE: &'static str = "player";

    /// Builds the catalog, resolving deck entries by pattern name.
    ///
    /// Unknown pattern names and zero-count entries are skipped with a
    /// warning; they never fail the build.
    pub fn build(
        patterns: Vec<Pattern>,
        deck_names: Vec<(String, u32)>,
        stat_templates: Vec<(String, StatBlock)>,
    ) -> Self {
        let mut deck = Vec::new();
        for (name, count) in deck_names {
            let Some(index) = patterns.iter().position(|pattern| pattern.name == name) else {
                tracing::warn!(pattern = %name, "deck references unknown pattern, skipping");
                continue;
            };
            if count == 0 {
                tracing::warn!(pattern = %name, "deck entry has zero count, skipping");
                continue;
            }
            deck.push(DeckEntry {
                pattern: PatternId(index as u16),
                count,
            });
        }

        let mut stats = Vec::new();
        let mut stats_by_name = BTreeMap::new();
        let mut player = None;
        for (name, block) in stat_templates {
            if name == Self::PLAYER_TEMPLATE {
                player = Some(block);
                continue;
            }
            stats_by_name.insert(name, StatsId(stats.len() as u16));
            stats.push(block);
        }

        if player.is_none() {
            tracing::warn!("no player stat template authored, using generic fallback");
        }

        Self {
            patterns,
            deck,
            stats,
            stats_by_name,
            player,
        }
    }

    /// Resolves a stat template name to its id.
    pub fn stats_id(&self, name: &str) -> Option<StatsId> {
        self.stats_by_name.get(name).copied()
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}

impl ContentOracle for CatalogContent {
    fn pattern(&self, id: PatternId) -> Option<&Pattern> {
        self.patterns.get(id.0 as usize)
    }

    fn deck_composition(&self) -> &[DeckEntry] {
        &self.deck
    }

    fn player_stats(&self) -> Option<&StatBlock> {
        self.player.as_ref()
    }

    fn stats(&self, id: StatsId) -> Option<&StatBlock> {
        self.stats.get(id.0 as usize)
    }
}
