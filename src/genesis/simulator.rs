//! Balance simulator for Cosmic Genesis.
//! Run with: cargo test simulate_greedy -- --nocapture
//!
//! Drives a real `Session` over a `MemoryStore`, so periodic saves and
//! stop/restore cycles are exercised along the way.

use super::catalog::CATALOG;
use super::config::SessionConfig;
use super::format::format_number;
use super::save::MemoryStore;
use super::session::Session;
use super::state::GenesisState;

const CLICKS_PER_SECOND: u32 = 5;

/// Affordable generator with the shortest payback (cost / production).
fn find_best_purchase(state: &GenesisState) -> Option<&'static str> {
    state
        .generators
        .iter()
        .filter(|g| g.can_afford(state.matter))
        .map(|g| (g.cost() / g.def.base_production, g.def.id))
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, id)| id)
}

fn report(state: &GenesisState, second: u32, purchases: u32) {
    let counts: Vec<String> = state
        .generators
        .iter()
        .map(|g| format!("{}{}", g.def.icon, g.count))
        .collect();
    eprintln!(
        "│ {:>4}s  matter {:>8}  mps {:>8}  購入 {:>4}  {}",
        second,
        format_number(state.matter),
        format_number(state.mps()),
        purchases,
        counts.join(" ")
    );
}

/// Greedy play for `total_seconds`; restores from storage every
/// `restore_every` seconds. Returns the final state.
fn simulate(total_seconds: u32, restore_every: u32) -> GenesisState {
    let config = SessionConfig::default();
    let tps = config.ticks_per_sec;
    let mut session = Session::start(MemoryStore::new(), config.clone());
    let mut purchases: u32 = 0;
    let mut last_mps = 0.0;

    eprintln!("\n┌── Cosmic Genesis バランスシミュレーター ({}分)", total_seconds / 60);

    for second in 1..=total_seconds {
        for _ in 0..CLICKS_PER_SECOND {
            session.harvest();
        }
        session.tick(tps);

        while let Some(id) = find_best_purchase(session.state()) {
            if !session.buy(id) {
                break;
            }
            purchases += 1;
        }

        let state = session.state();
        assert!(state.matter.is_finite() && state.matter >= 0.0);
        assert!(state.mps() >= last_mps, "MPS never decreases without a reset");
        last_mps = state.mps();

        if second % restore_every == 0 {
            report(state, second, purchases);
            let before_matter = state.matter;
            let before_counts: Vec<u32> = state.generators.iter().map(|g| g.count).collect();

            session.stop();
            let store = session.store().clone();
            session = Session::start(store, config.clone());

            let after_counts: Vec<u32> =
                session.state().generators.iter().map(|g| g.count).collect();
            assert_eq!(session.state().matter, before_matter);
            assert_eq!(after_counts, before_counts);
        }
    }

    eprintln!("└── 総購入回数: {}", purchases);
    session.state().clone()
}

#[test]
fn simulate_greedy_1hour() {
    let state = simulate(3600, 600);
    assert!(state.mps() > 1_000.0, "mps {}", state.mps());
    assert!(state.generator(CATALOG[3].id).map_or(0, |g| g.count) > 0);
    assert!(state.total_generators() > 100);
}

#[test]
fn simulate_greedy_5min_first_generators() {
    let state = simulate(300, 60);
    assert!(state.generators[0].count >= 10);
    assert!(state.generators[1].count >= 1);
}
