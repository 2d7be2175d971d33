//! Game state and core simulation types
//!
//! Everything the coordinator resets on restart lives in [`GameState`].

use serde::{Deserialize, Serialize};

use super::pool::{Pool, SlotId};
use super::score::{DifficultyState, ScoreState};
use super::scroll::WorldScroll;
use super::spawn::SpawnTimer;
use crate::consts::{PLAYER_HEIGHT, PLAYER_WIDTH};
use crate::settings::Settings;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first activate input; the clock is frozen
    Idle,
    /// Active gameplay
    Running,
    /// Run ended; the clock is frozen until the next activate input
    GameOver,
}

/// Which animation the host should play on the player sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Animation {
    Run,
    Idle,
}

/// The runner
///
/// `x` follows the camera (world space). `y` and `on_ground` come from the
/// host's physics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub x: f64,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub on_ground: bool,
    /// Vertical velocity last commanded by the simulation (pixels/s)
    pub velocity_y: f32,
}

impl Player {
    pub fn new(settings: &Settings) -> Self {
        Self {
            x: settings.player_screen_x as f64,
            y: settings.ground_y() - PLAYER_HEIGHT,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            on_ground: true,
            velocity_y: 0.0,
        }
    }

    pub fn animation(&self) -> Animation {
        if self.on_ground {
            Animation::Run
        } else {
            Animation::Idle
        }
    }
}

/// Obstacle sprite variants (cosmetic only, all share one hitbox)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Cactus,
    TallCactus,
    CactusPair,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [
        ObstacleKind::Cactus,
        ObstacleKind::TallCactus,
        ObstacleKind::CactusPair,
    ];

    /// Frame index in the obstacle sprite sheet
    pub fn frame(&self) -> u32 {
        match self {
            ObstacleKind::Cactus => 2,
            ObstacleKind::TallCactus => 3,
            ObstacleKind::CactusPair => 4,
        }
    }
}

/// An obstacle entity (left edge in world space)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub world_x: f64,
    pub kind: ObstacleKind,
}

/// One segment of the looping ground
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformTile {
    pub world_x: f64,
    pub width: f32,
}

impl PlatformTile {
    #[inline]
    pub fn right_edge(&self) -> f64 {
        self.world_x + self.width as f64
    }
}

/// Commands and notifications for the host, drained once per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Idle -> Running
    Started,
    /// GameOver -> Running; every pooled sprite should be hidden
    Restarted,
    /// Apply this vertical velocity to the player body
    Jumped { velocity: f32 },
    ObstacleSpawned {
        slot: SlotId,
        world_x: f64,
        kind: ObstacleKind,
    },
    ObstacleDespawned { slot: SlotId },
    /// Move the tile sprite from `old` to `new` at `world_x`, sized `width`
    TileRecycled {
        old: SlotId,
        new: SlotId,
        world_x: f64,
        width: f32,
    },
    LevelUp { level: u32, scroll_speed_bonus: f32 },
    /// A spawn was dropped because the obstacle pool was full
    SpawnSkipped,
    GameOver {
        score: u64,
        high_score: u64,
        new_record: bool,
    },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub player: Player,
    pub score: ScoreState,
    pub difficulty: DifficultyState,
    pub spawn: SpawnTimer,
    pub world: WorldScroll,
    pub obstacles: Pool<Obstacle>,
    /// Running time since the last (re)start (ms)
    pub elapsed_ms: f64,
    /// Set by an activate input, cleared by the next tick
    pub press_consumed: bool,
    /// Pending host events
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(settings: &Settings, high_score: u64) -> Self {
        Self {
            phase: GamePhase::Idle,
            player: Player::new(settings),
            score: ScoreState::new(high_score),
            difficulty: DifficultyState::new(settings.level_step),
            spawn: SpawnTimer::new(settings.first_spawn_interval_ms),
            world: WorldScroll::new(settings),
            obstacles: Pool::new("obstacle", settings.obstacle_capacity),
            elapsed_ms: 0.0,
            press_consumed: false,
            events: Vec::new(),
        }
    }

    /// Return every run-scoped piece of state to its initial value
    ///
    /// The best score survives; pools keep their allocation.
    pub fn reset(&mut self, settings: &Settings) {
        self.player = Player::new(settings);
        self.score.reset();
        self.difficulty = DifficultyState::new(settings.level_step);
        self.spawn.reset(settings.first_spawn_interval_ms);
        self.world.reset(settings);
        self.obstacles.clear();
        self.elapsed_ms = 0.0;
    }

    /// Camera-relative x of a world position, for hosts that place sprites in screen space
    pub fn screen_x(&self, world_x: f64) -> f32 {
        (world_x - self.world.scroll_x) as f32
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
