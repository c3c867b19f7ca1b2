/// Errors surfaced when a required oracle is missing from the environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("map oracle not available")]
    MapNotAvailable,

    #[error("content oracle not available")]
    ContentNotAvailable,

    #[error("tables oracle not available")]
    TablesNotAvailable,

    #[error("config oracle not available")]
    ConfigNotAvailable,

    #[error("rng oracle not available")]
    RngNotAvailable,
}
