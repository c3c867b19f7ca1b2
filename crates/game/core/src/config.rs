/// Deck construction policy.
///
/// Two behaviors existed across the system's evolution; the active one is an
/// explicit configuration choice, never a silent switch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DeckPolicy {
    /// Each catalog copy materializes as four cards, one per rotation.
    RotatedVariants,
    /// Each catalog copy materializes as a single unrotated card.
    AsAuthored,
}

/// What happens to a slot after its card is played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SlotRefillPolicy {
    /// The slot stays empty until the next player-turn refresh.
    TurnRefresh,
    /// A replacement card is drawn immediately after the play.
    AutoRedraw,
}

/// Game configuration constants and tunable parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Energy the player starts each turn with.
    pub energy_base: u32,
    /// Maximum orthogonal steps an enemy may take per turn.
    pub movement_range: u32,
    /// Deck construction policy.
    pub deck_policy: DeckPolicy,
    /// Slot refill policy after a play.
    pub refill_policy: SlotRefillPolicy,
    /// Ticks the session waits before an automatic end-of-turn, letting
    /// in-flight effects settle.
    pub grace_delay_ticks: u32,
    /// Ticks after which a stalled motion completion is force-released.
    pub motion_watchdog_ticks: u32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Number of concurrent hand slots.
    pub const HAND_SLOTS: usize = 3;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ENERGY_BASE: u32 = 4;
    pub const DEFAULT_MOVEMENT_RANGE: u32 = 1;
    pub const DEFAULT_GRACE_DELAY_TICKS: u32 = 2;
    pub const DEFAULT_MOTION_WATCHDOG_TICKS: u32 = 60;

    pub fn new() -> Self {
        Self {
            energy_base: Self::DEFAULT_ENERGY_BASE,
            movement_range: Self::DEFAULT_MOVEMENT_RANGE,
            deck_policy: DeckPolicy::RotatedVariants,
            refill_policy: SlotRefillPolicy::TurnRefresh,
            grace_delay_ticks: Self::DEFAULT_GRACE_DELAY_TICKS,
            motion_watchdog_ticks: Self::DEFAULT_MOTION_WATCHDOG_TICKS,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Provides access to runtime configuration values consumed by the engine.
pub trait ConfigOracle: Send + Sync {
    fn energy_base(&self) -> u32;
    fn movement_range(&self) -> u32;
    fn deck_policy(&self) -> DeckPolicy;
    fn refill_policy(&self) -> SlotRefillPolicy;
}

impl ConfigOracle for GameConfig {
    fn energy_base(&self) -> u32 {
        self.energy_base
    }

    fn movement_range(&self) -> u32 {
        self.movement_range
    }

    fn deck_policy(&self) -> DeckPolicy {
        self.deck_policy
    }

    fn refill_policy(&self) -> SlotRefillPolicy {
        self.refill_policy
    }
}
