//! Semantic action IDs for Cosmic Genesis click targets.

// ── Singularity ────────────────────────────────────────────────
pub const HARVEST: u16 = 0;

// ── Generators ─────────────────────────────────────────────────
/// Buy base: + catalog index.
pub const BUY_GENERATOR_BASE: u16 = 100;

// ── Big Crunch ─────────────────────────────────────────────────
pub const RESET_REQUEST: u16 = 500;
pub const RESET_CONFIRM: u16 = 501;
pub const RESET_CANCEL: u16 = 502;

// ── Language selector ──────────────────────────────────────────
/// Locale base: + `Locale::index()`.
pub const LOCALE_BASE: u16 = 600;
