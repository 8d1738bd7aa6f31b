//! Heart Catch core crate.
//!
//! The "catch the hearts" mini-game from the birthday page: press start,
//! click as many 💗 as you can in 20 seconds, get a verdict. The game logic
//! (`game`) is plain Rust and runs natively; `web` mounts it on the page.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod game;
pub mod web;

pub use config::{ElementIds, GameConfig};
pub use error::{ConfigError, GameError};
pub use game::headless::HeadlessSurface;
pub use game::random::{RandomSource, SeededRandom, SequenceRandom};
pub use game::surface::{Bounds, DisplaySurface, GameView, Position, Scoreboard};
pub use game::timer::{TimerKind, TimerService};
pub use game::{GameSession, HeartGame, HeartId, HeartTarget, Phase};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    {
        let level = if cfg!(debug_assertions) {
            log::Level::Debug
        } else {
            log::Level::Info
        };
        // fails only when a logger is already installed
        let _ = console_log::init_with_level(level);
    }
}

/// Mounts the game on `#gameArea` / `#startGame` with the default tuning.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::mount(GameConfig::default()).map_err(JsValue::from)
}

/// Same as [`start_game`] with a JSON config; omitted fields keep defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let config = GameConfig::from_json(json)?;
    web::mount(config).map_err(JsValue::from)
}
