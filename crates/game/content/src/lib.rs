//! Data-driven content for the grid-tactics core.
//!
//! Loads the pattern catalog, deck composition, stat templates, board layout,
//! and tunables from RON/TOML files and exposes them through the core's
//! oracle traits. Configuration problems degrade gracefully: invalid entries
//! are skipped with a warning, missing stats fall back to generic defaults,
//! and only an unusable player start aborts a load.

pub mod factory;
pub mod loaders;
pub mod oracle;

pub use factory::{ContentFactory, GameContent};
pub use loaders::{LoadResult, MapSpec, SpawnSpec, StartSpec};
pub use oracle::{CatalogContent, MapContent};
