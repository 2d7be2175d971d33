//! Score and difficulty accumulation
//!
//! Score is time-based: one point per fixed interval of running time,
//! independent of frame rate. Every `level_step` points the scroll speed
//! bonus grows by a fixed step.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreState {
    pub score: u64,
    /// Best of the persisted value and every finished run
    pub high_score: u64,
    /// Running time not yet converted into points (ms)
    pub accumulator_ms: f64,
}

impl ScoreState {
    pub fn new(high_score: u64) -> Self {
        Self {
            score: 0,
            high_score,
            accumulator_ms: 0.0,
        }
    }

    /// Clear the run's score; the best score is kept
    pub fn reset(&mut self) {
        self.score = 0;
        self.accumulator_ms = 0.0;
    }

    /// Bank running time and award the points it completes
    ///
    /// Returns the number of points awarded. The remainder below one interval
    /// carries into the next call.
    pub fn accumulate(
        &mut self,
        delta_ms: f64,
        interval_ms: f64,
        difficulty: &mut DifficultyState,
        speed_step: f32,
        level_step: u64,
    ) -> ScoreTick {
        let mut result = ScoreTick::default();
        self.accumulator_ms += delta_ms;

        while self.accumulator_ms >= interval_ms {
            self.score += 1;
            self.accumulator_ms -= interval_ms;
            result.points += 1;

            if difficulty.on_score(self.score, speed_step, level_step) {
                result.level_ups += 1;
            }
        }

        result
    }
}

/// What one accumulation step produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreTick {
    pub points: u64,
    pub level_ups: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultyState {
    /// Extra scroll distance per tick (pixels)
    pub scroll_speed_bonus: f32,
    pub next_level_threshold: u64,
    /// Number of thresholds crossed
    pub level: u32,
}

impl DifficultyState {
    pub fn new(level_step: u64) -> Self {
        Self {
            scroll_speed_bonus: 0.0,
            next_level_threshold: level_step,
            level: 0,
        }
    }

    /// Check a freshly incremented score against the ladder
    pub fn on_score(&mut self, score: u64, speed_step: f32, level_step: u64) -> bool {
        if score < self.next_level_threshold {
            return false;
        }
        self.scroll_speed_bonus += speed_step;
        self.next_level_threshold += level_step;
        self.level += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{LEVEL_STEP, SCORE_INTERVAL_MS, SPEED_STEP};

    fn run(score: &mut ScoreState, difficulty: &mut DifficultyState, delta: f64) -> ScoreTick {
        score.accumulate(delta, SCORE_INTERVAL_MS, difficulty, SPEED_STEP, LEVEL_STEP)
    }

    #[test]
    fn test_carries_remainder() {
        let mut score = ScoreState::new(0);
        let mut difficulty = DifficultyState::new(LEVEL_STEP);

        let tick = run(&mut score, &mut difficulty, 250.0);
        assert_eq!(tick.points, 2);
        assert_eq!(score.score, 2);
        assert_eq!(score.accumulator_ms, 50.0);

        run(&mut score, &mut difficulty, 50.0);
        assert_eq!(score.score, 3);
        assert_eq!(score.accumulator_ms, 0.0);
    }

    #[test]
    fn test_frame_rate_independent() {
        let mut small = ScoreState::new(0);
        let mut small_difficulty = DifficultyState::new(LEVEL_STEP);
        for _ in 0..20 {
            run(&mut small, &mut small_difficulty, 50.0);
        }

        let mut large = ScoreState::new(0);
        let mut large_difficulty = DifficultyState::new(LEVEL_STEP);
        run(&mut large, &mut large_difficulty, 1000.0);

        assert_eq!(small.score, 10);
        assert_eq!(large.score, 10);
    }

    #[test]
    fn test_level_up_once_at_threshold() {
        let mut score = ScoreState::new(0);
        let mut difficulty = DifficultyState::new(LEVEL_STEP);

        let tick = run(&mut score, &mut difficulty, 99.0 * SCORE_INTERVAL_MS);
        assert_eq!(tick.level_ups, 0);
        assert_eq!(difficulty.next_level_threshold, 100);

        let tick = run(&mut score, &mut difficulty, SCORE_INTERVAL_MS);
        assert_eq!(score.score, 100);
        assert_eq!(tick.level_ups, 1);
        assert_eq!(difficulty.scroll_speed_bonus, SPEED_STEP);
        assert_eq!(difficulty.next_level_threshold, 200);

        // Staying past 100 never re-triggers the first rung
        let tick = run(&mut score, &mut difficulty, 50.0 * SCORE_INTERVAL_MS);
        assert_eq!(tick.level_ups, 0);
        assert_eq!(difficulty.level, 1);
    }

    #[test]
    fn test_large_delta_climbs_several_rungs() {
        let mut score = ScoreState::new(0);
        let mut difficulty = DifficultyState::new(LEVEL_STEP);

        let tick = run(&mut score, &mut difficulty, 350.0 * SCORE_INTERVAL_MS);
        assert_eq!(score.score, 350);
        assert_eq!(tick.level_ups, 3);
        assert_eq!(difficulty.next_level_threshold, 400);
        assert_eq!(difficulty.scroll_speed_bonus, 3.0 * SPEED_STEP);
    }

    #[test]
    fn test_reset_keeps_high_score() {
        let mut score = ScoreState::new(17);
        score.score = 9;
        score.accumulator_ms = 40.0;
        score.reset();
        assert_eq!(score.score, 0);
        assert_eq!(score.accumulator_ms, 0.0);
        assert_eq!(score.high_score, 17);
    }
}
