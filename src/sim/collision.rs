//! Player/obstacle overlap detection
//!
//! The host's physics engine normally reports contacts; these boxes back
//! the headless driver and let the simulation double-check a contact.
//! Boxes live in camera space so they stay precise however far the run
//! has scrolled.

use glam::Vec2;

use super::pool::{Pool, SlotId};
use super::state::{GamePhase, Obstacle, Player};
use crate::consts::{OBSTACLE_HEIGHT, OBSTACLE_WIDTH};

/// Axis-aligned bounding box (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    /// Strict overlap: boxes that only share an edge do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

impl Player {
    pub fn bounds(&self, scroll_x: f64) -> Aabb {
        Aabb::from_origin_size(
            Vec2::new((self.x - scroll_x) as f32, self.y),
            Vec2::new(self.width, self.height),
        )
    }
}

impl Obstacle {
    /// Obstacles stand on the ground strip whose top is `ground_y`
    pub fn bounds(&self, scroll_x: f64, ground_y: f32) -> Aabb {
        Aabb::from_origin_size(
            Vec2::new((self.world_x - scroll_x) as f32, ground_y - OBSTACLE_HEIGHT),
            Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
        )
    }
}

/// Whether a reported contact should end the run
///
/// Only the first contact in `Running` counts; the phase is the guard, so a
/// repeated callback after the transition is a no-op.
pub fn ends_run(phase: GamePhase, obstacles: &Pool<Obstacle>, obstacle: SlotId) -> bool {
    phase == GamePhase::Running && obstacles.contains(obstacle)
}

/// Oldest active obstacle overlapping the player, if any
pub fn first_overlap(
    player: &Player,
    obstacles: &Pool<Obstacle>,
    scroll_x: f64,
    ground_y: f32,
) -> Option<SlotId> {
    let player_box = player.bounds(scroll_x);
    obstacles
        .iter()
        .find(|(_, o)| player_box.overlaps(&o.bounds(scroll_x, ground_y)))
        .map(|(slot, _)| slot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::ObstacleKind;

    fn obstacle_at(x: f64) -> Obstacle {
        Obstacle {
            world_x: x,
            kind: ObstacleKind::Cactus,
        }
    }

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::from_origin_size(Vec2::ZERO, Vec2::splat(10.0));
        let b = Aabb::from_origin_size(Vec2::splat(5.0), Vec2::splat(10.0));
        let touching = Aabb::from_origin_size(Vec2::new(10.0, 0.0), Vec2::splat(10.0));

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&touching));
    }

    #[test]
    fn test_grounded_player_hits_obstacle_in_front() {
        let settings = Settings::default();
        let player = Player::new(&settings);
        let mut pool = Pool::new("obstacle", 4);
        pool.acquire(obstacle_at(player.x + 500.0)).unwrap();
        let hit = pool.acquire(obstacle_at(player.x + 10.0)).unwrap();

        assert_eq!(first_overlap(&player, &pool, 0.0, settings.ground_y()), Some(hit));
    }

    #[test]
    fn test_airborne_player_clears_obstacle() {
        let settings = Settings::default();
        let mut player = Player::new(&settings);
        player.y -= 200.0;
        player.on_ground = false;
        let mut pool = Pool::new("obstacle", 4);
        pool.acquire(obstacle_at(player.x + 10.0)).unwrap();

        assert_eq!(first_overlap(&player, &pool, 0.0, settings.ground_y()), None);
    }

    #[test]
    fn test_overlap_holds_far_down_the_track() {
        let settings = Settings::default();
        let scroll_x = 50_000_000.0;
        let mut player = Player::new(&settings);
        player.x += scroll_x;

        // Touching edges do not collide, one pixel of overlap does
        let mut pool = Pool::new("obstacle", 2);
        let touching = pool.acquire(obstacle_at(player.x + 64.0)).unwrap();
        assert_eq!(first_overlap(&player, &pool, scroll_x, settings.ground_y()), None);

        pool.release(touching);
        let hit = pool.acquire(obstacle_at(player.x + 63.0)).unwrap();
        assert_eq!(
            first_overlap(&player, &pool, scroll_x, settings.ground_y()),
            Some(hit)
        );
    }

    #[test]
    fn test_ends_run_only_while_running_and_live() {
        let mut pool = Pool::new("obstacle", 2);
        let slot = pool.acquire(obstacle_at(0.0)).unwrap();

        assert!(ends_run(GamePhase::Running, &pool, slot));
        assert!(!ends_run(GamePhase::Idle, &pool, slot));
        assert!(!ends_run(GamePhase::GameOver, &pool, slot));

        pool.release(slot);
        assert!(!ends_run(GamePhase::Running, &pool, slot));
    }
}
