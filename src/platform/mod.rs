//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Logger and panic hook setup
//! - Default high score storage (LocalStorage on web, a JSON file on native)
//! - The `wasm-bindgen` surface the JS host drives each frame

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::persistence::HighScoreStore;

/// Install the logger for this platform (safe to call more than once)
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("Logger already initialized");
    }
}

/// Install the logger for this platform (safe to call more than once)
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    if env_logger::try_init().is_err() {
        log::debug!("Logger already initialized");
    }
}

/// The platform's durable high score store
#[cfg(target_arch = "wasm32")]
pub fn default_store() -> Box<dyn HighScoreStore> {
    Box::new(crate::persistence::LocalStorageStore::new())
}

/// The platform's durable high score store
///
/// `DINO_RUNNER_HIGHSCORE` overrides the file location.
#[cfg(not(target_arch = "wasm32"))]
pub fn default_store() -> Box<dyn HighScoreStore> {
    let path = std::env::var_os("DINO_RUNNER_HIGHSCORE")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| std::path::PathBuf::from("highscore.json"));
    let store = crate::persistence::FileStore::new(path);
    log::info!("High score file: {}", store.path().display());
    Box::new(store)
}

/// Seed for a fresh run
#[cfg(target_arch = "wasm32")]
pub fn time_seed() -> u64 {
    js_sys::Date::now() as u64
}

/// Seed for a fresh run
#[cfg(not(target_arch = "wasm32"))]
pub fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
