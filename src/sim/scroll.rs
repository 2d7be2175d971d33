//! World scrolling, parallax and the looping ground ring

use super::pool::{Pool, SlotId};
use super::state::{GameEvent, PlatformTile};
use crate::settings::Settings;

/// Camera position and the ground tiles around it
#[derive(Debug, Clone)]
pub struct WorldScroll {
    /// Distance scrolled since the run started (camera left edge, world space)
    pub scroll_x: f64,
    /// World x where the next recycled tile goes
    pub world_end: f64,
    pub tiles: Pool<PlatformTile>,
}

impl WorldScroll {
    pub fn new(settings: &Settings) -> Self {
        let mut world = Self {
            scroll_x: 0.0,
            world_end: 0.0,
            tiles: Pool::new("platform", settings.platform_tiles),
        };
        world.lay_ground(settings);
        world
    }

    pub fn reset(&mut self, settings: &Settings) {
        self.scroll_x = 0.0;
        self.world_end = 0.0;
        self.tiles.clear();
        self.lay_ground(settings);
    }

    /// Fill the ring with contiguous tiles starting at the camera
    fn lay_ground(&mut self, settings: &Settings) {
        let width = settings.ground_tile_width();
        for _ in 0..self.tiles.capacity() {
            let tile = PlatformTile {
                world_x: self.world_end,
                width,
            };
            if self.tiles.acquire(tile).is_err() {
                break;
            }
            self.world_end += width as f64;
        }
    }

    /// Rebuild the ring from the camera's left edge with the current tile width
    ///
    /// Used when the viewport changes size mid-session. Every tile is moved,
    /// so the host gets one `TileRecycled` per slot.
    pub fn relay_ground(&mut self, settings: &Settings, events: &mut Vec<GameEvent>) -> usize {
        let width = settings.ground_tile_width();
        let old: Vec<SlotId> = self.tiles.iter().map(|(slot, _)| slot).collect();
        self.world_end = self.scroll_x;

        let mut moved = 0;
        for old in old {
            self.tiles.release(old);
            let world_x = self.world_end;
            match self.tiles.acquire(PlatformTile { world_x, width }) {
                Ok(new) => {
                    self.world_end += width as f64;
                    moved += 1;
                    events.push(GameEvent::TileRecycled {
                        old,
                        new,
                        world_x,
                        width,
                    });
                }
                Err(e) => {
                    log::error!("Ground ring lost a tile: {}", e);
                    break;
                }
            }
        }

        log::debug!("Ground relaid with {} tile(s) of {}px", moved, width);
        moved
    }

    /// Advance the camera; returns the distance moved this tick
    pub fn advance(&mut self, delta_ms: f64, scroll_speed_bonus: f32, base_rate: f32) -> f64 {
        let distance = base_rate as f64 * delta_ms + scroll_speed_bonus as f64;
        self.scroll_x += distance;
        distance
    }

    /// Layer offsets derived from the camera (far layers move slowest)
    pub fn parallax_offsets(&self, factors: [f64; 3]) -> [f64; 3] {
        factors.map(|k| self.scroll_x * k)
    }

    /// Move every tile that fell behind the camera to the far end of the ring
    ///
    /// Tiles iterate in world order, so only the oldest needs checking; a
    /// large delta recycles several in one call.
    pub fn recycle_tiles(&mut self, margin: f32, events: &mut Vec<GameEvent>) -> usize {
        let threshold = self.scroll_x - margin as f64;
        let mut recycled = 0;

        while let Some((old, tile)) = self.tiles.first() {
            if tile.right_edge() >= threshold {
                break;
            }
            let width = tile.width;

            // Release first so the slot is free before it is reused
            self.tiles.release(old);
            let world_x = self.world_end;
            match self.tiles.acquire(PlatformTile { world_x, width }) {
                Ok(new) => {
                    self.world_end += width as f64;
                    recycled += 1;
                    events.push(GameEvent::TileRecycled {
                        old,
                        new,
                        world_x,
                        width,
                    });
                }
                Err(e) => {
                    log::error!("Ground ring lost a tile: {}", e);
                    break;
                }
            }
        }

        if recycled > 0 {
            log::debug!(
                "Recycled {} ground tile(s), world end now {}",
                recycled,
                self.world_end
            );
        }
        recycled
    }
}
