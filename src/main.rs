mod genesis;
mod input;
mod log;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use genesis::config::SessionConfig;
use genesis::save::LocalStore;
use genesis::session::Lifecycle;
use genesis::GenesisGame;
use input::{ClickState, InputEvent};

type Game = GenesisGame<LocalStore>;

/// Millisecond timestamp for the tick clock.
fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Resolve a DOM click to the action under it.
fn dom_click_to_action(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<u16> {
    let document = web_sys::window()?.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    cs.hit_test_pixels(
        mouse_x as f64 - rect.left(),
        mouse_y as f64 - rect.top(),
        rect.width(),
        rect.height(),
    )
}

/// Drive the session clock from a timer, independent of animation frames.
///
/// Browsers stop delivering animation frames to hidden tabs but keep firing
/// (throttled) intervals, so matter keeps accruing in the background.
fn install_tick_source(game: &Rc<RefCell<Game>>, period_ms: i32) {
    let Some(window) = web_sys::window() else {
        log::warn("Cosmic Genesis: window がないため tick を開始できません。");
        return;
    };
    let cb = {
        let game = game.clone();
        Closure::<dyn FnMut()>::new(move || {
            // 借用中なら次の呼び出しでまとめて進む
            if let Ok(mut g) = game.try_borrow_mut() {
                g.advance(now_ms());
            }
        })
    };
    if window
        .set_interval_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            period_ms,
        )
        .is_err()
    {
        log::warn("Cosmic Genesis: tick interval の登録に失敗しました。");
    }
    cb.forget();
}

/// Save whenever the page may be going away.
fn install_lifecycle_hooks(game: &Rc<RefCell<Game>>) {
    let Some(window) = web_sys::window() else {
        log::warn("Cosmic Genesis: window がないためライフサイクル保存を登録できません。");
        return;
    };

    let window_events = [
        ("beforeunload", Lifecycle::BeforeUnload),
        ("pagehide", Lifecycle::PageHide),
        ("blur", Lifecycle::Blur),
    ];
    for (name, signal) in window_events {
        let game = game.clone();
        let cb = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            // フレーム処理中なら次の機会に任せる
            let Ok(mut g) = game.try_borrow_mut() else {
                return;
            };
            // bfcache に入らない pagehide はページの終わり
            let unloading = signal == Lifecycle::PageHide
                && event
                    .dyn_ref::<web_sys::PageTransitionEvent>()
                    .is_some_and(|e| !e.persisted());
            if unloading {
                g.stop();
            } else {
                g.on_lifecycle(signal);
            }
        });
        if window
            .add_event_listener_with_callback(name, cb.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn(&format!("Cosmic Genesis: {} の登録に失敗しました。", name));
        }
        cb.forget();
    }

    let Some(document) = window.document() else {
        return;
    };
    let cb = {
        let game = game.clone();
        let document = document.clone();
        Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
            if document.visibility_state() != web_sys::VisibilityState::Hidden {
                return;
            }
            if let Ok(mut g) = game.try_borrow_mut() {
                g.on_lifecycle(Lifecycle::VisibilityHidden);
            }
        })
    };
    if document
        .add_event_listener_with_callback("visibilitychange", cb.as_ref().unchecked_ref())
        .is_err()
    {
        log::warn("Cosmic Genesis: visibilitychange の登録に失敗しました。");
    }
    cb.forget();
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let config = SessionConfig::default();
    let tick_ms = (1000 / config.ticks_per_sec.max(1)) as i32;
    let game = Rc::new(RefCell::new(Game::new(LocalStore::open(), config)));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    install_tick_source(&game, tick_ms);
    install_lifecycle_hooks(&game);

    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }
            let action = {
                let cs = click_state.borrow();
                dom_click_to_action(mouse_event.x, mouse_event.y, &cs)
            };
            if let Some(id) = action {
                game.borrow_mut().handle_input(&InputEvent::Click(id));
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            let event = match key_event.code {
                KeyCode::Char(c) => InputEvent::Key(c),
                KeyCode::Enter => InputEvent::Key('y'),
                KeyCode::Esc => InputEvent::Key('n'),
                _ => return,
            };
            game.borrow_mut().handle_input(&event);
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let area = f.area();
            click_state
                .borrow_mut()
                .begin_frame(area.width, area.height);
            game.borrow().render(f, area, &click_state);
        }
    });

    Ok(())
}
