//! Per-frame simulation tick
//!
//! Advances a running game by a variable delta. Nothing moves outside `Running`.

use rand::Rng;

use super::spawn::{despawn_passed, spawn_due};
use super::state::{GameEvent, GamePhase, GameState};
use crate::settings::Settings;

/// Summary of one tick (for hosts and tests)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    pub scrolled: f64,
    pub points: u64,
    pub spawned: u32,
    pub despawned: usize,
    pub tiles_recycled: usize,
}

/// Advance the game state by `delta_ms` of wall time
pub fn tick<R: Rng + ?Sized>(
    state: &mut GameState,
    rng: &mut R,
    settings: &Settings,
    delta_ms: f64,
) -> TickReport {
    // A new frame: the next press may jump again
    state.press_consumed = false;

    if state.phase != GamePhase::Running {
        return TickReport::default();
    }

    // Paused tabs and clock hiccups can hand us garbage
    if !delta_ms.is_finite() || delta_ms <= 0.0 {
        return TickReport::default();
    }

    let mut report = TickReport::default();
    state.elapsed_ms += delta_ms;

    // Scroll with the bonus earned so far, camera drags the player along
    report.scrolled = state.world.advance(
        delta_ms,
        state.difficulty.scroll_speed_bonus,
        settings.base_advance_rate,
    );
    state.player.x = state.world.scroll_x + settings.player_screen_x as f64;

    report.tiles_recycled = state
        .world
        .recycle_tiles(settings.recycle_margin(), &mut state.events);

    // Free slots before the scheduler asks for new ones
    report.despawned = despawn_passed(state, settings);
    report.spawned = spawn_due(state, rng, settings, delta_ms);

    let scored = state.score.accumulate(
        delta_ms,
        settings.score_interval_ms,
        &mut state.difficulty,
        settings.speed_step,
        settings.level_step,
    );
    report.points = scored.points;
    if scored.level_ups > 0 {
        log::info!(
            "Level {} reached at score {} (scroll bonus {})",
            state.difficulty.level,
            state.score.score,
            state.difficulty.scroll_speed_bonus
        );
        state.push_event(GameEvent::LevelUp {
            level: state.difficulty.level,
            scroll_speed_bonus: state.difficulty.scroll_speed_bonus,
        });
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use crate::consts::*;

    fn running(settings: &Settings) -> GameState {
        let mut state = GameState::new(settings, 0);
        state.phase = GamePhase::Running;
        state
    }

    #[test]
    fn test_tick_frozen_outside_running() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(1);

        for phase in [GamePhase::Idle, GamePhase::GameOver] {
            let mut state = GameState::new(&settings, 0);
            state.phase = phase;
            let report = tick(&mut state, &mut rng, &settings, 5000.0);

            assert_eq!(report, TickReport::default());
            assert_eq!(state.score.score, 0);
            assert_eq!(state.world.scroll_x, 0.0);
            assert!(state.obstacles.is_empty());
        }
    }

    #[test]
    fn test_tick_ignores_bad_deltas() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let mut state = running(&settings);

        tick(&mut state, &mut rng, &settings, -16.0);
        tick(&mut state, &mut rng, &settings, f64::NAN);
        tick(&mut state, &mut rng, &settings, f64::INFINITY);

        assert_eq!(state.world.scroll_x, 0.0);
        assert_eq!(state.elapsed_ms, 0.0);
    }

    #[test]
    fn test_tick_scrolls_and_follows_camera() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut state = running(&settings);

        let report = tick(&mut state, &mut rng, &settings, 100.0);
        assert_eq!(report.scrolled, BASE_ADVANCE_RATE as f64 * 100.0);
        assert_eq!(state.player.x, state.world.scroll_x + PLAYER_SCREEN_X as f64);
        assert_eq!(report.points, 1);
    }

    #[test]
    fn test_first_spawn_after_two_seconds() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(4);
        let mut state = running(&settings);

        for _ in 0..19 {
            tick(&mut state, &mut rng, &settings, 100.0);
        }
        assert!(state.obstacles.is_empty());

        let report = tick(&mut state, &mut rng, &settings, 100.0);
        assert_eq!(report.spawned, 1);
        assert_eq!(state.obstacles.len(), 1);
    }

    #[test]
    fn test_level_up_event_at_hundred_points() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut state = running(&settings);

        tick(&mut state, &mut rng, &settings, 10_000.0);
        assert_eq!(state.score.score, 100);
        assert_eq!(state.difficulty.next_level_threshold, 200);
        assert!(state.events.contains(&GameEvent::LevelUp {
            level: 1,
            scroll_speed_bonus: SPEED_STEP,
        }));
    }

    #[test]
    fn test_old_obstacles_leave_pool() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(6);
        let mut state = running(&settings);

        // Long run at 60 fps; the pool must never fill up
        for _ in 0..6000 {
            tick(&mut state, &mut rng, &settings, 16.0);
            assert!(!state.obstacles.is_full());
            let cutoff = state.world.scroll_x - settings.obstacle_despawn_margin as f64;
            assert!(state.obstacles.iter().all(|(_, o)| o.world_x >= cutoff));
        }
        assert!(state.spawn.decisions > 0);
    }
}
