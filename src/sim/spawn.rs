//! Obstacle spawn scheduling
//!
//! A cooldown timer decides when obstacles appear. Every interval crossing
//! yields exactly one spawn decision, and the overshoot carries into the next
//! interval so long frames neither drop nor double spawns.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState, Obstacle, ObstacleKind};
use crate::error::SimError;
use crate::settings::Settings;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnTimer {
    pub elapsed_since_last_spawn: f64,
    pub next_interval: f64,
    /// Spawn decisions since the last reset (including skipped spawns)
    pub decisions: u64,
}

impl SpawnTimer {
    pub fn new(first_interval_ms: f64) -> Self {
        Self {
            elapsed_since_last_spawn: 0.0,
            next_interval: first_interval_ms,
            decisions: 0,
        }
    }

    pub fn reset(&mut self, first_interval_ms: f64) {
        *self = Self::new(first_interval_ms);
    }

    /// Bank `delta_ms` and return how many spawns are due
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        delta_ms: f64,
        rng: &mut R,
        min_ms: f64,
        max_ms: f64,
    ) -> u32 {
        self.elapsed_since_last_spawn += delta_ms;

        let mut due = 0;
        while self.elapsed_since_last_spawn >= self.next_interval {
            self.elapsed_since_last_spawn -= self.next_interval;
            self.next_interval = draw_interval(rng, min_ms, max_ms);
            self.decisions += 1;
            due += 1;
        }
        due
    }
}

/// Uniform cooldown in `[min_ms, max_ms]`
pub fn draw_interval<R: Rng + ?Sized>(rng: &mut R, min_ms: f64, max_ms: f64) -> f64 {
    if min_ms >= max_ms {
        return min_ms;
    }
    rng.random_range(min_ms..=max_ms)
}

/// Uniform pick among the obstacle sprites
pub fn choose_kind<R: Rng + ?Sized>(rng: &mut R) -> ObstacleKind {
    ObstacleKind::ALL[rng.random_range(0..ObstacleKind::ALL.len())]
}

/// World x for a new obstacle: just past the right edge of the camera
#[inline]
pub fn spawn_x(scroll_x: f64, viewport_width: f32, lead: f32) -> f64 {
    scroll_x + viewport_width as f64 + lead as f64
}

/// Run the scheduler for one tick, placing every due obstacle
///
/// Returns the number of obstacles actually placed.
pub fn spawn_due<R: Rng + ?Sized>(
    state: &mut GameState,
    rng: &mut R,
    settings: &Settings,
    delta_ms: f64,
) -> u32 {
    let due = state.spawn.advance(
        delta_ms,
        rng,
        settings.min_spawn_interval_ms,
        settings.max_spawn_interval_ms,
    );

    let mut placed = 0;
    for _ in 0..due {
        let obstacle = Obstacle {
            world_x: spawn_x(
                state.world.scroll_x,
                settings.viewport_width,
                settings.spawn_lead_distance,
            ),
            kind: choose_kind(rng),
        };
        let (world_x, kind) = (obstacle.world_x, obstacle.kind);

        match state.obstacles.acquire(obstacle) {
            Ok(slot) => {
                log::debug!("Spawned {:?} at x={} (slot {})", kind, world_x, slot.index());
                state.push_event(GameEvent::ObstacleSpawned {
                    slot,
                    world_x,
                    kind,
                });
                placed += 1;
            }
            Err(e @ SimError::PoolExhausted { .. }) => {
                if settings.strict_pools {
                    panic!("obstacle pool sized too small for the spawn rate: {}", e);
                }
                log::warn!("Skipping spawn: {}", e);
                state.push_event(GameEvent::SpawnSkipped);
            }
            Err(e) => log::error!("Spawn failed: {}", e),
        }
    }
    placed
}

/// Return obstacles that fell behind the camera to the pool
pub fn despawn_passed(state: &mut GameState, settings: &Settings) -> usize {
    let cutoff = state.world.scroll_x - settings.obstacle_despawn_margin as f64;
    let events = &mut state.events;
    state.obstacles.release_where(
        |o| o.world_x < cutoff,
        |slot, _| events.push(GameEvent::ObstacleDespawned { slot }),
    )
}
