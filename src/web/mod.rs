//! Browser binding: mounts the controller on the page's DOM.
//!
//! The controller lives in a thread-local, one `requestAnimationFrame` loop
//! feeds it `performance.now()`, and the start button and every heart forward
//! their clicks into it.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{MouseEvent, window};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::random::SeededRandom;
use crate::game::{HeartGame, HeartId};

mod dom_surface;

pub use dom_surface::DomSurface;

type WebGame = HeartGame<DomSurface, SeededRandom>;

thread_local! {
    static GAME: RefCell<Option<WebGame>> = const { RefCell::new(None) };
}

/// Mounts the game once; later calls are no-ops.
pub fn mount(config: GameConfig) -> Result<(), GameError> {
    if is_mounted() {
        debug!("heart game already mounted");
        return Ok(());
    }
    config.validate()?;

    let win = window().ok_or(GameError::NoWindow)?;
    let doc = win.document().ok_or(GameError::NoDocument)?;
    let perf = win.performance().ok_or(GameError::NoPerformance)?;

    let start_id = config.elements.start_button.clone();
    let start_btn = doc
        .get_element_by_id(&start_id)
        .ok_or(GameError::MissingElement { id: start_id })?;

    let on_catch: Rc<dyn Fn(HeartId)> = Rc::new(|id: HeartId| {
        let now = performance_now();
        with_game(|game| {
            game.catch(id, now);
        });
    });
    let surface = DomSurface::new(&doc, &config, on_catch)?;
    let rng = SeededRandom::from_entropy(perf.now().to_bits());
    let game = HeartGame::new(config, surface, rng)?;

    // the slot is only filled once every listener is attached, so a failed
    // mount can be retried
    {
        let closure = Closure::wrap(Box::new(move |_evt: MouseEvent| {
            let now = performance_now();
            with_game(|game| {
                if game.start(now) {
                    game.view_mut().remove_placeholder();
                }
            });
        }) as Box<dyn FnMut(_)>);
        start_btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    GAME.with(|cell| *cell.borrow_mut() = Some(game));

    start_frame_loop();
    info!("heart game mounted");
    Ok(())
}

pub fn is_mounted() -> bool {
    GAME.with(|cell| cell.borrow().is_some())
}

fn with_game(f: impl FnOnce(&mut WebGame)) {
    GAME.with(|cell| match cell.try_borrow_mut() {
        Ok(mut slot) => {
            if let Some(game) = slot.as_mut() {
                f(game);
            }
        }
        Err(_) => warn!("game state busy, event dropped"),
    });
}

fn performance_now() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_frame_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        with_game(|game| {
            game.advance_to(ts);
            game.view_mut().reap();
        });
        request_frame(&f);
    }) as Box<dyn FnMut(f64)>));
    request_frame(&g);
}

fn request_frame(callback: &FrameCallback) {
    let Some(w) = window() else { return };
    if let Some(cb) = callback.borrow().as_ref() {
        if let Err(err) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            warn!("requestAnimationFrame failed: {err:?}");
        }
    }
}
