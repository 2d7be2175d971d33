//! Game coordinator
//!
//! Owns the simulation state, the RNG and the high score tracker, and exposes
//! the narrow per-frame contract a host drives:
//!
//! - `on_tick(delta_ms)` once per rendered frame
//! - `on_activate_input()` / `on_jump_input()` (or `on_press()` for a single button)
//! - `on_collision(obstacle)` from the physics overlap callback
//! - `sync_player(y, on_ground)` / `set_viewport(w, h)` with engine feedback
//!
//! Host-side effects (sprite activation, jump velocity, restart) come back as
//! [`GameEvent`]s via `drain_events()`.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::error::Result;
use crate::highscores::HighScoreTracker;
use crate::persistence::HighScoreStore;
use crate::settings::Settings;
use crate::sim::{
    GameEvent, GamePhase, GameState, SlotId, TickReport, ends_run, first_overlap, tick,
};

pub struct Game<S, R = Pcg32> {
    settings: Settings,
    state: GameState,
    rng: R,
    high_scores: HighScoreTracker<S>,
}

impl<S: HighScoreStore> Game<S, Pcg32> {
    /// Create a game with a seeded PCG generator
    pub fn new(settings: Settings, store: S, seed: u64) -> Result<Self> {
        Self::with_rng(settings, store, Pcg32::seed_from_u64(seed))
    }
}

impl<S: HighScoreStore, R: Rng> Game<S, R> {
    pub fn with_rng(settings: Settings, store: S, rng: R) -> Result<Self> {
        settings.validate()?;
        let high_scores = HighScoreTracker::new(store);
        let state = GameState::new(&settings, high_scores.best());
        log::info!("Runner ready (high score {})", high_scores.best());
        Ok(Self {
            settings,
            state,
            rng,
            high_scores,
        })
    }

    /// Advance one frame
    pub fn on_tick(&mut self, delta_ms: f64) -> TickReport {
        tick(&mut self.state, &mut self.rng, &self.settings, delta_ms)
    }

    /// Start (from Idle) or restart (from GameOver) the run
    ///
    /// The press that activates is consumed: a jump input later in the same
    /// frame is ignored.
    pub fn on_activate_input(&mut self) -> GamePhase {
        match self.state.phase {
            GamePhase::Idle => {
                self.state.phase = GamePhase::Running;
                self.state.press_consumed = true;
                self.state.push_event(GameEvent::Started);
                log::info!("Run started");
            }
            GamePhase::GameOver => {
                self.state.reset(&self.settings);
                self.state.phase = GamePhase::Running;
                self.state.press_consumed = true;
                self.state.push_event(GameEvent::Restarted);
                log::info!("Run restarted");
            }
            GamePhase::Running => {
                log::debug!("Activate ignored while running");
            }
        }
        self.state.phase
    }

    /// Jump if running and grounded; returns whether the jump happened
    pub fn on_jump_input(&mut self) -> bool {
        if self.state.phase != GamePhase::Running || self.state.press_consumed {
            return false;
        }
        if !self.state.player.on_ground {
            return false;
        }

        let velocity = self.settings.jump_velocity;
        self.state.player.velocity_y = velocity;
        self.state.player.on_ground = false;
        self.state.push_event(GameEvent::Jumped { velocity });
        true
    }

    /// One button for everything: activates outside a run, jumps inside one
    pub fn on_press(&mut self) {
        if self.state.phase == GamePhase::Running {
            self.on_jump_input();
        } else {
            self.on_activate_input();
        }
    }

    /// Physics reported the player touching `obstacle`
    ///
    /// Returns true if this contact ended the run. Repeated callbacks for the
    /// same contact, stale handles and contacts outside a run do nothing.
    pub fn on_collision(&mut self, obstacle: SlotId) -> bool {
        if !ends_run(self.state.phase, &self.state.obstacles, obstacle) {
            log::debug!(
                "Collision with slot {} ignored in {:?}",
                obstacle.index(),
                self.state.phase
            );
            return false;
        }
        self.end_run();
        true
    }

    /// Overlap test over every active obstacle, for hosts without physics
    pub fn check_overlaps(&mut self) -> bool {
        if self.state.phase != GamePhase::Running {
            return false;
        }
        match first_overlap(
            &self.state.player,
            &self.state.obstacles,
            self.state.world.scroll_x,
            self.settings.ground_y(),
        ) {
            Some(slot) => self.on_collision(slot),
            None => false,
        }
    }

    fn end_run(&mut self) {
        self.state.phase = GamePhase::GameOver;
        self.state.player.velocity_y = 0.0;

        let score = self.state.score.score;
        let new_record = self.high_scores.submit(score);
        self.state.score.high_score = self.high_scores.best();

        log::info!(
            "Game over at score {} (best {})",
            score,
            self.state.score.high_score
        );
        self.state.push_event(GameEvent::GameOver {
            score,
            high_score: self.state.score.high_score,
            new_record,
        });
    }

    /// Feedback from the host's physics body
    pub fn sync_player(&mut self, y: f32, on_ground: bool) {
        self.state.player.y = y;
        self.state.player.on_ground = on_ground;
        if on_ground {
            self.state.player.velocity_y = 0.0;
        }
    }

    /// The host resized its viewport
    ///
    /// Rejected if the ground ring can no longer cover it. When the tile
    /// width follows the viewport, the ring is relaid at the camera and the
    /// moves are reported as `TileRecycled` events.
    pub fn set_viewport(&mut self, width: f32, height: f32) -> Result<()> {
        let candidate = Settings {
            viewport_width: width,
            viewport_height: height,
            ..self.settings.clone()
        };
        candidate.validate()?;
        log::debug!("Viewport now {}x{}", width, height);

        let relay = candidate.ground_tile_width() != self.settings.ground_tile_width();
        self.settings = candidate;
        if relay {
            self.state
                .world
                .relay_ground(&self.settings, &mut self.state.events);
        }
        Ok(())
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score.score
    }

    pub fn high_score(&self) -> u64 {
        self.state.score.high_score
    }

    /// Back, middle and front mountain offsets
    pub fn parallax_offsets(&self) -> [f64; 3] {
        self.state.world.parallax_offsets(self.settings.parallax)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        self.high_scores.store()
    }

    /// Unmount: release every pooled entity and hand back the store
    pub fn shutdown(mut self) -> S {
        self.state.obstacles.clear();
        self.state.world.tiles.clear();
        self.state.events.clear();
        log::info!("Runner shut down");
        self.high_scores.into_store()
    }
}
