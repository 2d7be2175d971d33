//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `tick`
//! - Injected (seedable) RNG only
//! - Stable iteration order (pool acquisition order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod pool;
pub mod score;
pub mod scroll;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, ends_run, first_overlap};
pub use pool::{Pool, SlotId};
pub use score::{DifficultyState, ScoreState, ScoreTick};
pub use scroll::WorldScroll;
pub use spawn::SpawnTimer;
pub use state::{
    Animation, GameEvent, GamePhase, GameState, Obstacle, ObstacleKind, PlatformTile, Player,
};
pub use tick::{TickReport, tick};
