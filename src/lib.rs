//! Pendu core crate.
//!
//! Browser hangman: guess the letters of a hidden French word before the
//! gallows is complete. Words come from `theme.json` (themes, one list per
//! initial letter), then `mots.json`, then a built-in default. Win/loss
//! counters persist in `localStorage`.
//!
//! Game rules, accent folding, word selection and score persistence are plain
//! Rust and testable on the host; `web` holds the DOM glue exposed through
//! `start_game()`.

use wasm_bindgen::prelude::*;

pub mod accents;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod round;
pub mod scores;
mod web;

pub use catalog::{Pick, PickSource, Theme};
pub use config::GameConfig;
pub use error::PenduError;
pub use round::{Difficulty, GuessOutcome, Round, Slot, Status};
pub use scores::{KeyValueStore, MemoryStore, Scoreboard};
pub use web::LocalStore;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Starts the game on the current page with the default configuration.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::start(GameConfig::default())
}

/// Same as [`start_game`], with JSON overrides for [`GameConfig`] fields.
#[wasm_bindgen]
pub fn start_game_with_config(config_json: &str) -> Result<(), JsValue> {
    let config = GameConfig::from_json(config_json)?;
    web::start(config)
}
