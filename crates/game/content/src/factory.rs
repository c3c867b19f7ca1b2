//! Content factory for building oracles from data files.

use std::path::{Path, PathBuf};

use gridfall_core::{BalanceTables, GameConfig};

use crate::loaders::{
    ConfigLoader, DeckLoader, LoadResult, MapLoader, PatternLoader, StatsLoader, TablesLoader,
};
use crate::oracle::{CatalogContent, MapContent};

/// Everything a session needs, loaded from one data directory.
#[derive(Clone, Debug)]
pub struct GameContent {
    pub config: GameConfig,
    pub tables: BalanceTables,
    pub catalog: CatalogContent,
    pub map: MapContent,
}

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── tables.toml
/// ├── patterns.ron
/// ├── deck.ron
/// ├── stats.ron
/// └── map.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.path("config.toml"))
    }

    /// Load balance tables from `tables.toml`.
    pub fn load_tables(&self) -> LoadResult<BalanceTables> {
        TablesLoader::load(&self.path("tables.toml"))
    }

    /// Load the pattern catalog, deck composition, and stat templates.
    pub fn load_catalog(&self) -> LoadResult<CatalogContent> {
        let patterns = PatternLoader::load(&self.path("patterns.ron"))?;
        let deck = DeckLoader::load(&self.path("deck.ron"))?;
        let stats = StatsLoader::load(&self.path("stats.ron"))?;
        Ok(CatalogContent::build(patterns, deck, stats))
    }

    /// Load the map layout from `map.ron`, resolved against a catalog.
    pub fn load_map(&self, catalog: &CatalogContent) -> LoadResult<MapContent> {
        let spec = MapLoader::load(&self.path("map.ron"))?;
        MapContent::build(spec, catalog)
    }

    /// Load the complete content bundle.
    pub fn load_all(&self) -> LoadResult<GameContent> {
        let config = self.load_config()?;
        let tables = self.load_tables()?;
        let catalog = self.load_catalog()?;
        let map = self.load_map(&catalog)?;
        Ok(GameContent {
            config,
            tables,
            catalog,
            map,
        })
    }
}

impl GameContent {
    /// Loads the bundle from an explicit directory.
    pub fn load_from(data_dir: impl AsRef<Path>) -> LoadResult<Self> {
        ContentFactory::new(data_dir.as_ref()).load_all()
    }
}
