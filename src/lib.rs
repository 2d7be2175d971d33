//! Dino Runner - A side-scrolling runner arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (state machine, scrolling, spawning, scoring)
//! - `game`: Coordinator exposing the per-frame tick/input contract to the host
//! - `persistence`: High score storage backends
//! - `platform`: Browser/native host bindings and logging setup
//! - `settings`: Data-driven game tuning

pub mod error;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::{Result, SimError};
pub use game::Game;
pub use highscores::HighScoreTracker;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Score is awarded once per this much running time (ms)
    pub const SCORE_INTERVAL_MS: f64 = 100.0;
    /// Points between difficulty levels (ladder 100, 200, 300, ...)
    pub const LEVEL_STEP: u64 = 100;
    /// Scroll bonus added per level (pixels per tick)
    pub const SPEED_STEP: f32 = 0.5;
    /// Base scroll rate (pixels per ms)
    pub const BASE_ADVANCE_RATE: f32 = 0.3;

    /// First obstacle arrives after a fixed delay
    pub const FIRST_SPAWN_INTERVAL_MS: f64 = 2000.0;
    /// Randomized obstacle cooldown bounds
    pub const MIN_SPAWN_INTERVAL_MS: f64 = 800.0;
    pub const MAX_SPAWN_INTERVAL_MS: f64 = 2000.0;
    /// Obstacles appear this far past the right edge of the viewport
    pub const SPAWN_LEAD_DISTANCE: f32 = 100.0;
    /// Obstacles are returned to the pool this far behind the camera
    pub const OBSTACLE_DESPAWN_MARGIN: f32 = 200.0;

    /// Viewport defaults (the host reports the real size)
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Ground ring: 5 tiles of one viewport each, recycled 2 viewports behind
    pub const PLATFORM_TILE_COUNT: usize = 5;
    pub const TILE_WIDTH_VIEWPORTS: f32 = 1.0;
    pub const TILE_RECYCLE_VIEWPORTS: f32 = 2.0;
    /// Ground strip height measured from the bottom of the viewport
    pub const GROUND_HEIGHT: f32 = 100.0;

    /// Obstacle pool capacity
    pub const OBSTACLE_POOL_CAPACITY: usize = 16;
    /// Obstacle footprint (35x100 body at 0.6 scale)
    pub const OBSTACLE_WIDTH: f32 = 21.0;
    pub const OBSTACLE_HEIGHT: f32 = 60.0;

    /// Player sits this far from the left edge of the camera
    pub const PLAYER_SCREEN_X: f32 = 80.0;
    /// Player footprint (16px sprite at 4x)
    pub const PLAYER_WIDTH: f32 = 64.0;
    pub const PLAYER_HEIGHT: f32 = 64.0;
    /// Upward velocity applied on jump (pixels/s, negative = up)
    pub const JUMP_VELOCITY: f32 = -800.0;
    /// Arcade gravity used by headless hosts (pixels/s²)
    pub const GRAVITY: f32 = 1700.0;

    /// Parallax factors for the back, middle and front mountain layers
    pub const PARALLAX_FACTORS: [f64; 3] = [0.05, 0.2, 0.8];
}
