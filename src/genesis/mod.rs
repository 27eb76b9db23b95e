/// Cosmic Genesis: an idle clicker about harvesting matter from a singularity.

pub mod actions;
pub mod catalog;
pub mod config;
pub mod format;
pub mod i18n;
pub mod logic;
pub mod model;
pub mod render;
pub mod save;
pub mod session;
pub mod state;

#[cfg(test)]
mod simulator;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::{ClickState, InputEvent};

use actions::*;
use catalog::CATALOG;
use config::SessionConfig;
use save::SaveStore;
use session::{Lifecycle, Session};
use state::Locale;

pub struct GenesisGame<S: SaveStore> {
    session: Session<S>,
}

impl<S: SaveStore> GenesisGame<S> {
    pub fn new(store: S, config: SessionConfig) -> Self {
        Self {
            session: Session::start(store, config),
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &state::GenesisState {
        self.session.state()
    }

    #[cfg(test)]
    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    /// Returns true if the event was consumed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(ch) => self.handle_key(*ch),
            InputEvent::Click(id) => self.handle_click(*id),
        }
    }

    fn handle_key(&mut self, key: char) -> bool {
        // 確認中は y / n だけ受け付ける
        if self.session.state().reset_pending {
            return match key.to_ascii_lowercase() {
                'y' => self.session.confirm_reset(),
                'n' => {
                    self.session.cancel_reset();
                    true
                }
                _ => false,
            };
        }

        match key.to_ascii_lowercase() {
            'c' | ' ' => {
                self.session.harvest();
                true
            }
            '1'..='9' => {
                let idx = key as usize - '1' as usize;
                match CATALOG.get(idx) {
                    Some(def) => {
                        self.session.buy(def.id);
                        true
                    }
                    None => false,
                }
            }
            'l' => {
                let next = self.session.state().locale.next();
                self.session.set_locale(next);
                true
            }
            'r' => {
                self.session.request_reset();
                true
            }
            _ => false,
        }
    }

    fn handle_click(&mut self, id: u16) -> bool {
        if self.session.state().reset_pending {
            return match id {
                RESET_CONFIRM => self.session.confirm_reset(),
                RESET_CANCEL => {
                    self.session.cancel_reset();
                    true
                }
                _ => false,
            };
        }

        match id {
            HARVEST => {
                self.session.harvest();
                true
            }
            RESET_REQUEST => {
                self.session.request_reset();
                true
            }
            id if (BUY_GENERATOR_BASE..BUY_GENERATOR_BASE + CATALOG.len() as u16)
                .contains(&id) =>
            {
                let def = &CATALOG[(id - BUY_GENERATOR_BASE) as usize];
                self.session.buy(def.id);
                true
            }
            id if (LOCALE_BASE..LOCALE_BASE + Locale::all().len() as u16).contains(&id) => {
                let locale = Locale::all()[(id - LOCALE_BASE) as usize];
                if locale != self.session.state().locale {
                    self.session.set_locale(locale);
                }
                true
            }
            _ => false,
        }
    }

    /// Feed a wall-clock timestamp in milliseconds from the tick source.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        self.session.advance(now_ms)
    }

    pub fn on_lifecycle(&mut self, signal: Lifecycle) {
        self.session.on_lifecycle(signal);
    }

    /// Final save; the session ignores everything afterwards.
    pub fn stop(&mut self) {
        self.session.stop();
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(self.session.state(), f, area, click_state);
    }
}
