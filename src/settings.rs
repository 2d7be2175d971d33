//! Game tuning and host-provided dimensions
//!
//! Persisted separately from the high score (LocalStorage on web, a JSON file on native).

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SimError};

/// Simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Viewport (reported by the host) ===
    pub viewport_width: f32,
    pub viewport_height: f32,

    // === Scrolling ===
    /// Base scroll rate (pixels per ms)
    pub base_advance_rate: f32,
    /// Scroll bonus gained per difficulty level (pixels per tick)
    pub speed_step: f32,
    /// Parallax factors, far to near
    pub parallax: [f64; 3],
    /// Player distance from the left edge of the camera
    pub player_screen_x: f32,

    // === Ground ring ===
    pub platform_tiles: usize,
    /// Fixed tile width; follows the viewport width when unset
    pub tile_width: Option<f32>,
    /// How far behind the camera a tile's right edge may fall before
    /// recycling; two viewport widths when unset
    pub tile_recycle_margin: Option<f32>,
    pub ground_height: f32,

    // === Scoring ===
    pub score_interval_ms: f64,
    pub level_step: u64,

    // === Obstacles ===
    pub first_spawn_interval_ms: f64,
    pub min_spawn_interval_ms: f64,
    pub max_spawn_interval_ms: f64,
    pub spawn_lead_distance: f32,
    pub obstacle_despawn_margin: f32,
    pub obstacle_capacity: usize,

    // === Player ===
    pub jump_velocity: f32,

    /// Panic on pool exhaustion instead of skipping the spawn
    pub strict_pools: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,

            base_advance_rate: BASE_ADVANCE_RATE,
            speed_step: SPEED_STEP,
            parallax: PARALLAX_FACTORS,
            player_screen_x: PLAYER_SCREEN_X,

            platform_tiles: PLATFORM_TILE_COUNT,
            tile_width: None,
            tile_recycle_margin: None,
            ground_height: GROUND_HEIGHT,

            score_interval_ms: SCORE_INTERVAL_MS,
            level_step: LEVEL_STEP,

            first_spawn_interval_ms: FIRST_SPAWN_INTERVAL_MS,
            min_spawn_interval_ms: MIN_SPAWN_INTERVAL_MS,
            max_spawn_interval_ms: MAX_SPAWN_INTERVAL_MS,
            spawn_lead_distance: SPAWN_LEAD_DISTANCE,
            obstacle_despawn_margin: OBSTACLE_DESPAWN_MARGIN,
            obstacle_capacity: OBSTACLE_POOL_CAPACITY,

            jump_velocity: JUMP_VELOCITY,

            // Loud in development, graceful in release
            strict_pools: cfg!(debug_assertions),
        }
    }
}

impl Settings {
    /// Top of the ground strip in screen space (y grows downward)
    pub fn ground_y(&self) -> f32 {
        self.viewport_height - self.ground_height
    }

    /// Width of each ground tile
    pub fn ground_tile_width(&self) -> f32 {
        self.tile_width
            .unwrap_or(self.viewport_width * TILE_WIDTH_VIEWPORTS)
    }

    /// Distance behind the camera at which ground tiles are recycled
    pub fn recycle_margin(&self) -> f32 {
        self.tile_recycle_margin
            .unwrap_or(self.viewport_width * TILE_RECYCLE_VIEWPORTS)
    }

    /// Parse settings from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)
            .map_err(|e| SimError::InvalidSettings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject tunings that break the simulation's invariants
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: String| Err(SimError::InvalidSettings(msg));

        if !(self.viewport_width > 0.0 && self.viewport_height > 0.0) {
            return fail(format!(
                "viewport must be positive, got {}x{}",
                self.viewport_width, self.viewport_height
            ));
        }
        if !(self.score_interval_ms > 0.0) {
            return fail("score_interval_ms must be positive".into());
        }
        if self.level_step == 0 {
            return fail("level_step must be at least 1".into());
        }
        if !(self.first_spawn_interval_ms > 0.0 && self.min_spawn_interval_ms > 0.0) {
            return fail("spawn intervals must be positive".into());
        }
        if self.min_spawn_interval_ms > self.max_spawn_interval_ms {
            return fail(format!(
                "min_spawn_interval_ms ({}) exceeds max_spawn_interval_ms ({})",
                self.min_spawn_interval_ms, self.max_spawn_interval_ms
            ));
        }
        if !(2..=5).contains(&self.platform_tiles) {
            return fail(format!(
                "platform_tiles must be between 2 and 5, got {}",
                self.platform_tiles
            ));
        }
        let (tile_width, margin) = (self.ground_tile_width(), self.recycle_margin());
        if !(tile_width > 0.0) {
            return fail(format!("tile width must be positive, got {}", tile_width));
        }
        if !(margin >= 0.0) {
            return fail(format!("recycle margin must not be negative, got {}", margin));
        }
        // Ring must still reach past the right edge after the oldest tile is recycled
        let coverage = (self.platform_tiles as f32 - 1.0) * tile_width;
        if coverage < margin + self.viewport_width {
            return fail(format!(
                "{} tiles of {}px cannot cover a {}px viewport with a {}px recycle margin",
                self.platform_tiles, tile_width, self.viewport_width, margin
            ));
        }
        if self.obstacle_capacity == 0 {
            return fail("obstacle_capacity must be at least 1".into());
        }
        let [back, mid, front] = self.parallax;
        if !(back < mid && mid < front) {
            return fail(format!(
                "parallax factors must be strictly increasing, got {:?}",
                self.parallax
            ));
        }
        Ok(())
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "dino_runner_settings";

    /// Environment variable naming a JSON settings file (native only)
    #[allow(dead_code)]
    const PATH_ENV: &'static str = "DINO_RUNNER_SETTINGS";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from the file named by `DINO_RUNNER_SETTINGS` (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(Self::PATH_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match std::fs::read_to_string(&path)
            .map_err(SimError::from)
            .and_then(|json| Self::from_json(&json))
        {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.to_string_lossy());
                settings
            }
            Err(e) => {
                log::warn!(
                    "Ignoring settings file {}: {}",
                    path.to_string_lossy(),
                    e
                );
                Self::default()
            }
        }
    }
}
