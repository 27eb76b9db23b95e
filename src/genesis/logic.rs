//! Cosmic Genesis game logic: pure state mutations, fully testable.
//!
//! Persistence is not touched here; `Session` pairs each mutation with the
//! save it requires.

use super::catalog;
use super::config::{FLOATER_LIFE_TICKS, MAX_FLOATERS};
use super::format::format_number;
use super::state::{fresh_generators, Floater, GenesisState, Locale};

/// Advance the game by `delta_ticks` ticks at `ticks_per_sec`.
///
/// Each tick adds `mps / ticks_per_sec`, read from the live generator counts.
pub fn tick(state: &mut GenesisState, delta_ticks: u32, ticks_per_sec: u32) {
    if delta_ticks == 0 || ticks_per_sec == 0 {
        return;
    }
    let per_tick = state.mps() / ticks_per_sec as f64;
    if per_tick > 0.0 {
        state.matter += per_tick * delta_ticks as f64;
    }

    state.anim_frame = state.anim_frame.wrapping_add(delta_ticks);
    if state.click_flash > 0 {
        state.click_flash = state.click_flash.saturating_sub(delta_ticks);
    }
    for f in &mut state.floaters {
        f.life = f.life.saturating_sub(delta_ticks);
    }
    state.floaters.retain(|f| f.life > 0);
}

/// Manual harvest: add click power to matter and spawn a floater.
/// Returns the amount harvested.
pub fn harvest(state: &mut GenesisState) -> f64 {
    let power = state.click_power();
    state.matter += power;
    state.click_flash = 3;

    let col_offset = (state.next_random() % 13) as i16 - 6; // -6..+6
    state.floaters.push(Floater {
        text: format!("+{}", format_number(power)),
        col_offset,
        life: FLOATER_LIFE_TICKS,
        max_life: FLOATER_LIFE_TICKS,
    });
    if state.floaters.len() > MAX_FLOATERS {
        state.floaters.remove(0);
    }
    power
}

/// Try to buy one unit of the generator `id`. Returns true if successful.
///
/// Unknown ids and unaffordable purchases leave the state untouched.
pub fn buy_generator(state: &mut GenesisState, id: &str) -> bool {
    // generators は常にカタログ順
    let Some(generator) = catalog::index_of(id).and_then(|i| state.generators.get_mut(i)) else {
        return false;
    };

    let cost = generator.cost();
    if state.matter < cost {
        return false;
    }
    state.matter -= cost;
    generator.count = generator.count.saturating_add(1);
    true
}

/// First step of the Big Crunch.
pub fn request_reset(state: &mut GenesisState) {
    state.reset_pending = true;
}

pub fn cancel_reset(state: &mut GenesisState) {
    state.reset_pending = false;
}

/// Big Crunch: matter and every count back to zero. Locale is kept.
pub fn reset(state: &mut GenesisState) {
    state.matter = 0.0;
    state.generators = fresh_generators();
    state.reset_pending = false;
    state.floaters.clear();
    state.click_flash = 0;
}

/// Change the display language. Returns true if it changed.
pub fn set_locale(state: &mut GenesisState, locale: Locale) -> bool {
    if state.locale == locale {
        return false;
    }
    state.locale = locale;
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    const TPS: u32 = 10;

    #[test]
    fn tick_produces_matter() {
        let mut state = GenesisState::new();
        state.generators[0].count = 2; // 1.0 MPS
        tick(&mut state, 10, TPS); // 1 second
        assert!((state.matter - 1.0).abs() < 1e-9);
    }

    #[test]
    fn tick_zero_does_nothing() {
        let mut state = GenesisState::new();
        state.generators[0].count = 10;
        tick(&mut state, 0, TPS);
        assert_eq!(state.matter, 0.0);
    }

    #[test]
    fn tick_without_generators_keeps_matter() {
        let mut state = GenesisState::new();
        state.matter = 12.0;
        tick(&mut state, 100, TPS);
        assert_eq!(state.matter, 12.0);
    }

    #[test]
    fn tick_multiple_generators() {
        let mut state = GenesisState::new();
        state.generators[0].count = 10; // 5
        state.generators[1].count = 3; // 12
        tick(&mut state, 20, TPS); // 2 seconds
        assert!((state.matter - 34.0).abs() < 1e-9);
    }

    #[test]
    fn tick_ages_floaters() {
        let mut state = GenesisState::new();
        harvest(&mut state);
        assert_eq!(state.floaters.len(), 1);
        tick(&mut state, FLOATER_LIFE_TICKS - 1, TPS);
        assert_eq!(state.floaters.len(), 1);
        tick(&mut state, 1, TPS);
        assert!(state.floaters.is_empty());
    }

    #[test]
    fn harvest_adds_base_click() {
        let mut state = GenesisState::new();
        let gained = harvest(&mut state);
        assert!((gained - 1.0).abs() < 1e-9);
        assert!((state.matter - 1.0).abs() < 1e-9);
        assert_eq!(state.floaters[0].text, "+1");
    }

    #[test]
    fn harvest_scales_with_mps() {
        let mut state = GenesisState::new();
        state.generators[5].count = 1; // 2800 MPS → 1 + 28
        let gained = harvest(&mut state);
        assert!((gained - 29.0).abs() < 1e-9);
    }

    #[test]
    fn floaters_are_capped() {
        let mut state = GenesisState::new();
        for _ in 0..(MAX_FLOATERS + 5) {
            harvest(&mut state);
        }
        assert_eq!(state.floaters.len(), MAX_FLOATERS);
    }

    #[test]
    fn buy_deducts_cost_and_increments() {
        let mut state = GenesisState::new();
        state.matter = 20.0;
        assert!(buy_generator(&mut state, "stardust_collector"));
        assert!((state.matter - 5.0).abs() < 1e-9);
        assert_eq!(state.generators[0].count, 1);
        // next one costs 17
        assert!((state.generators[0].cost() - 17.0).abs() < 1e-9);
    }

    #[test]
    fn buy_insufficient_is_noop() {
        let mut state = GenesisState::new();
        state.matter = 14.0;
        assert!(!buy_generator(&mut state, "stardust_collector"));
        assert_eq!(state.matter, 14.0);
        assert_eq!(state.generators[0].count, 0);
    }

    #[test]
    fn buy_unknown_is_noop() {
        let mut state = GenesisState::new();
        state.matter = 1e9;
        assert!(!buy_generator(&mut state, "dyson_sphere"));
        assert_eq!(state.matter, 1e9);
        assert_eq!(state.total_generators(), 0);
    }

    #[test]
    fn buy_with_exact_funds() {
        let mut state = GenesisState::new();
        state.matter = 100.0;
        assert!(buy_generator(&mut state, "asteroid_miner"));
        assert_eq!(state.matter, 0.0);
    }

    #[test]
    fn reset_flow() {
        let mut state = GenesisState::new();
        state.matter = 5000.0;
        state.generators[3].count = 7;
        state.locale = Locale::Zh;

        request_reset(&mut state);
        assert!(state.reset_pending);
        cancel_reset(&mut state);
        assert!(!state.reset_pending);
        assert_eq!(state.matter, 5000.0);

        request_reset(&mut state);
        reset(&mut state);
        assert!(!state.reset_pending);
        assert_eq!(state.matter, 0.0);
        assert_eq!(state.total_generators(), 0);
        assert_eq!(state.locale, Locale::Zh);
    }

    #[test]
    fn set_locale_reports_change() {
        let mut state = GenesisState::new();
        state.matter = 3.0;
        assert!(set_locale(&mut state, Locale::Zh));
        assert!(!set_locale(&mut state, Locale::Zh));
        assert_eq!(state.locale, Locale::Zh);
        assert_eq!(state.matter, 3.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::genesis::catalog::CATALOG;
    use proptest::prelude::*;

    fn arb_index() -> impl Strategy<Value = usize> {
        0..CATALOG.len()
    }

    proptest! {
        #[test]
        fn prop_buy_fails_without_funds(idx in arb_index(), owned in 0u32..50) {
            let mut state = GenesisState::new();
            state.generators[idx].count = owned;
            let cost = state.generators[idx].cost();
            state.matter = cost - 1.0;
            let before: Vec<u32> = state.generators.iter().map(|g| g.count).collect();
            prop_assert!(!buy_generator(&mut state, CATALOG[idx].id));
            prop_assert_eq!(state.matter, cost - 1.0);
            let after: Vec<u32> = state.generators.iter().map(|g| g.count).collect();
            prop_assert_eq!(before, after);
        }

        #[test]
        fn prop_buy_deducts_exact_cost(
            idx in arb_index(),
            owned in 0u32..30,
            extra in 0.0f64..1000.0,
        ) {
            let mut state = GenesisState::new();
            state.generators[idx].count = owned;
            let cost = state.generators[idx].cost();
            state.matter = cost + extra;
            let before = state.matter;
            prop_assert!(buy_generator(&mut state, CATALOG[idx].id));
            prop_assert!((state.matter - (before - cost)).abs() < 1e-6 * before.max(1.0));
            prop_assert_eq!(state.generators[idx].count, owned + 1);
            for (i, g) in state.generators.iter().enumerate() {
                if i != idx {
                    prop_assert_eq!(g.count, 0);
                }
            }
        }

        #[test]
        fn prop_buy_raises_mps_by_base_production(idx in arb_index()) {
            let mut state = GenesisState::new();
            state.matter = 1e12;
            let before = state.mps();
            prop_assert!(buy_generator(&mut state, CATALOG[idx].id));
            let gained = state.mps() - before;
            prop_assert!((gained - CATALOG[idx].base_production).abs() < 1e-9);
        }

        #[test]
        fn prop_tick_is_linear(
            counts in prop::collection::vec(0u32..50, CATALOG.len()),
            n in 0u32..1000,
        ) {
            let mut state = GenesisState::new();
            for (g, c) in state.generators.iter_mut().zip(&counts) {
                g.count = *c;
            }
            let rate = state.mps();
            tick(&mut state, n, 10);
            let expected = n as f64 * (rate / 10.0);
            prop_assert!((state.matter - expected).abs() <= 1e-9 * expected.max(1.0));
        }

        #[test]
        fn prop_harvest_does_not_disturb_tick_accrual(
            counts in prop::collection::vec(0u32..20, CATALOG.len()),
            n in 1u32..200,
            clicks in 0usize..20,
        ) {
            let mut ticked = GenesisState::new();
            for (g, c) in ticked.generators.iter_mut().zip(&counts) {
                g.count = *c;
            }
            let rate = ticked.mps();
            let mut harvested_total = 0.0;
            for i in 0..n {
                tick(&mut ticked, 1, 10);
                if (i as usize) < clicks {
                    harvested_total += harvest(&mut ticked);
                }
            }
            let from_ticks = ticked.matter - harvested_total;
            let expected = n as f64 * (rate / 10.0);
            prop_assert!((from_ticks - expected).abs() <= 1e-6 * expected.max(1.0));
        }

        #[test]
        fn prop_matter_stays_finite_and_nonnegative(
            ops in prop::collection::vec(0u8..4, 0..200),
        ) {
            let mut state = GenesisState::new();
            for op in ops {
                match op {
                    0 => { harvest(&mut state); }
                    1 => { tick(&mut state, 5, 10); }
                    2 => { buy_generator(&mut state, CATALOG[0].id); }
                    _ => { buy_generator(&mut state, CATALOG[1].id); }
                }
                prop_assert!(state.matter.is_finite());
                prop_assert!(state.matter >= 0.0);
            }
        }
    }
}
