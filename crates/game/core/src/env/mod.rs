//! Traits describing read-only world data.
//!
//! Oracles expose static map geometry, the pattern catalog, balance tables,
//! configuration, and deterministic randomness. The [`Env`] aggregate bundles
//! them so the engine can access everything it needs without hard coupling to
//! concrete implementations — construction order and wiring are explicit,
//! never global.

mod content;
mod error;
mod map;
mod rng;
mod tables;

pub use content::{ContentOracle, DeckEntry, StatsId};
pub use error::OracleError;
pub use map::{
    EnemySpawn, GridGeometry, MapDimensions, MapOracle, StaticTile, TerrainKind, WorldPos,
};
pub use rng::{PcgRng, RngOracle, compute_seed, roll};
pub use tables::{BalanceTables, TablesOracle};

use crate::config::ConfigOracle;

/// Aggregates read-only oracles required by the action pipeline.
#[derive(Clone, Copy, Debug)]
pub struct Env<'a, M, C, T, G, R>
where
    M: MapOracle + ?Sized,
    C: ContentOracle + ?Sized,
    T: TablesOracle + ?Sized,
    G: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    map: Option<&'a M>,
    content: Option<&'a C>,
    tables: Option<&'a T>,
    config: Option<&'a G>,
    rng: Option<&'a R>,
}

/// Trait-object based environment used throughout the engine.
pub type GameEnv<'a> = Env<
    'a,
    dyn MapOracle + 'a,
    dyn ContentOracle + 'a,
    dyn TablesOracle + 'a,
    dyn ConfigOracle + 'a,
    dyn RngOracle + 'a,
>;

impl<'a, M, C, T, G, R> Env<'a, M, C, T, G, R>
where
    M: MapOracle + ?Sized,
    C: ContentOracle + ?Sized,
    T: TablesOracle + ?Sized,
    G: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(
        map: Option<&'a M>,
        content: Option<&'a C>,
        tables: Option<&'a T>,
        config: Option<&'a G>,
        rng: Option<&'a R>,
    ) -> Self {
        Self {
            map,
            content,
            tables,
            config,
            rng,
        }
    }

    pub fn with_all(map: &'a M, content: &'a C, tables: &'a T, config: &'a G, rng: &'a R) -> Self {
        Self::new(Some(map), Some(content), Some(tables), Some(config), Some(rng))
    }

    pub fn empty() -> Self {
        Self::new(None, None, None, None, None)
    }

    pub fn map(&self) -> Result<&'a M, OracleError> {
        self.map.ok_or(OracleError::MapNotAvailable)
    }

    pub fn content(&self) -> Result<&'a C, OracleError> {
        self.content.ok_or(OracleError::ContentNotAvailable)
    }

    pub fn tables(&self) -> Result<&'a T, OracleError> {
        self.tables.ok_or(OracleError::TablesNotAvailable)
    }

    pub fn config(&self) -> Result<&'a G, OracleError> {
        self.config.ok_or(OracleError::ConfigNotAvailable)
    }

    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }
}

impl<'a, M, C, T, G, R> Env<'a, M, C, T, G, R>
where
    M: MapOracle + 'a,
    C: ContentOracle + 'a,
    T: TablesOracle + 'a,
    G: ConfigOracle + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into a trait-object based `GameEnv`.
    pub fn as_game_env(&self) -> GameEnv<'a> {
        let map: Option<&'a dyn MapOracle> = self.map.map(|map| map as _);
        let content: Option<&'a dyn ContentOracle> = self.content.map(|content| content as _);
        let tables: Option<&'a dyn TablesOracle> = self.tables.map(|tables| tables as _);
        let config: Option<&'a dyn ConfigOracle> = self.config.map(|config| config as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|rng| rng as _);
        Env::new(map, content, tables, config, rng)
    }
}
