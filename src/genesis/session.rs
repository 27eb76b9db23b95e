//! Session controller: the single owner of the live game state.
//!
//! All reads go through [`Session::state`]; every mutation goes through a
//! handler method that updates the state synchronously and then performs
//! whatever save the mutation requires, so a save always observes a
//! completed update.

use crate::log;
use crate::time::GameTime;

use super::config::SessionConfig;
use super::logic;
use super::save::{self, SaveStore};
use super::state::{GenesisState, Locale};

/// Host signals that the process may be about to lose the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    BeforeUnload,
    PageHide,
    Blur,
    VisibilityHidden,
}

pub struct Session<S: SaveStore> {
    state: GenesisState,
    store: S,
    config: SessionConfig,
    clock: GameTime,
    /// Ticks left until the next periodic save.
    autosave_countdown: u32,
    running: bool,
}

impl<S: SaveStore> Session<S> {
    /// Restore from `store` (or start fresh) and begin running.
    pub fn start(mut store: S, config: SessionConfig) -> Self {
        let state = save::load_game(&mut store, &config.storage_key);
        Self {
            state,
            store,
            clock: GameTime::new(config.ticks_per_sec),
            autosave_countdown: config.autosave_interval_ticks,
            config,
            running: true,
        }
    }

    pub fn state(&self) -> &GenesisState {
        &self.state
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[cfg(test)]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Feed a wall-clock timestamp; runs however many whole ticks have elapsed.
    /// Returns the number of ticks run.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        if !self.running {
            return 0;
        }
        let ticks = self.clock.update(now_ms);
        self.tick(ticks);
        ticks
    }

    /// Run `delta_ticks` ticks, saving each time the autosave interval elapses.
    pub fn tick(&mut self, delta_ticks: u32) {
        if !self.running || delta_ticks == 0 {
            return;
        }
        logic::tick(&mut self.state, delta_ticks, self.config.ticks_per_sec);

        if self.config.autosave_interval_ticks == 0 {
            return;
        }
        let mut remaining = delta_ticks;
        while remaining >= self.autosave_countdown {
            remaining -= self.autosave_countdown;
            self.autosave_countdown = self.config.autosave_interval_ticks;
            self.persist();
        }
        self.autosave_countdown -= remaining;
    }

    /// Manual harvest. Not followed by a save; the next periodic or
    /// lifecycle save picks it up.
    pub fn harvest(&mut self) -> f64 {
        logic::harvest(&mut self.state)
    }

    /// Buy one unit of `id`; saves immediately on success.
    pub fn buy(&mut self, id: &str) -> bool {
        let bought = logic::buy_generator(&mut self.state, id);
        if bought {
            self.persist();
        }
        bought
    }

    pub fn request_reset(&mut self) {
        logic::request_reset(&mut self.state);
    }

    pub fn cancel_reset(&mut self) {
        logic::cancel_reset(&mut self.state);
    }

    /// Execute the Big Crunch if it was requested. Returns true if it ran.
    ///
    /// The stored save is erased rather than overwritten; the fresh state is
    /// written by the next periodic or lifecycle save.
    pub fn confirm_reset(&mut self) -> bool {
        if !self.state.reset_pending {
            return false;
        }
        save::delete_save(&mut self.store, &self.config.storage_key);
        logic::reset(&mut self.state);
        log::info("Cosmic Genesis: Big Crunch。進行状況をリセットしました。");
        true
    }

    /// Change the display language; saves immediately.
    pub fn set_locale(&mut self, locale: Locale) {
        logic::set_locale(&mut self.state, locale);
        self.persist();
    }

    /// Save in response to a host lifecycle signal.
    pub fn on_lifecycle(&mut self, signal: Lifecycle) {
        if !self.running {
            return;
        }
        log::info(&format!("Cosmic Genesis: {signal:?} を受けて保存します。"));
        self.persist();
    }

    /// End the session: stop ticking and write one final save.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.persist();
    }

    fn persist(&mut self) {
        save::save_game(&mut self.store, &self.config.storage_key, &self.state);
    }
}
