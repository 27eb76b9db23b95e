//! Cost / production model: pure functions over base parameters and counts.

use super::config::{CLICK_BASE, CLICK_MPS_FRACTION, COST_GROWTH};

/// Price of the next unit when `owned` are already owned:
/// `floor(base × 1.15^owned)`.
///
/// Saturates at `f64::MAX` instead of reaching infinity.
pub fn cost(base: f64, owned: u32) -> f64 {
    let raw = (base * COST_GROWTH.powf(owned as f64)).floor();
    if raw.is_finite() {
        raw
    } else {
        f64::MAX
    }
}

/// Matter per second from `owned` units.
pub fn production_rate(base: f64, owned: u32) -> f64 {
    base * owned as f64
}

/// Matter granted by one manual harvest at aggregate rate `mps`.
pub fn click_power(mps: f64) -> f64 {
    CLICK_BASE + CLICK_MPS_FRACTION * mps
}
