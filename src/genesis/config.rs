//! Engine constants and the per-session configuration derived from them.

/// Game ticks per real-time second.
pub const TICKS_PER_SEC: u32 = 10;

/// Seconds between periodic saves.
pub const AUTOSAVE_INTERVAL_SECS: u32 = 30;

/// localStorage key. The suffix is bumped on breaking format changes.
pub const STORAGE_KEY: &str = "cosmic_genesis_save_v1";

/// Per-unit cost growth of every generator.
pub const COST_GROWTH: f64 = 1.15;

/// Click power = CLICK_BASE + CLICK_MPS_FRACTION × MPS.
pub const CLICK_BASE: f64 = 1.0;
pub const CLICK_MPS_FRACTION: f64 = 0.01;

/// Longest gap between two tick-source callbacks that is still credited.
/// Background tabs throttle intervals to once a second, or once a minute
/// under intensive throttling; a longer suspension is not caught up.
pub const MAX_TICK_GAP_MS: f64 = 60_000.0;

/// Floating "+N" indicators kept alive at once.
pub const MAX_FLOATERS: usize = 20;

/// Lifetime of a floating indicator, in ticks (1 second).
pub const FLOATER_LIFE_TICKS: u32 = 10;

#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    pub ticks_per_sec: u32,
    /// Ticks between periodic saves.
    pub autosave_interval_ticks: u32,
    pub storage_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ticks_per_sec: TICKS_PER_SEC,
            autosave_interval_ticks: AUTOSAVE_INTERVAL_SECS * TICKS_PER_SEC,
            storage_key: STORAGE_KEY.to_string(),
        }
    }
}
