//! Dino Runner entry point
//!
//! On the web the JS host drives `platform::web::WasmRunner`. Natively this
//! runs a headless session: a tiny arcade body stands in for the physics
//! engine and an autopilot presses jump when an obstacle gets close.
//!
//! Usage: `dino-runner [seconds] [seed]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use dino_runner::consts::{GRAVITY, PLAYER_WIDTH};
    use dino_runner::persistence::HighScoreStore;
    use dino_runner::sim::{GameEvent, GamePhase};
    use dino_runner::Game;

    /// Frame length for the headless loop (60 Hz)
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Jump once an obstacle is this close to the player's front edge
    const REACTION_DISTANCE: f32 = 90.0;

    /// Stand-in for the engine's arcade physics body
    struct Body {
        y: f32,
        vel_y: f32,
    }

    impl Body {
        fn step(&mut self, dt_secs: f32, floor_y: f32) -> bool {
            self.vel_y += GRAVITY * dt_secs;
            self.y += self.vel_y * dt_secs;
            if self.y >= floor_y {
                self.y = floor_y;
                self.vel_y = 0.0;
                return true;
            }
            false
        }
    }

    pub fn run<S: HighScoreStore>(game: &mut Game<S>, seconds: f64) {
        let floor_y = game.state().player.y;
        let mut body = Body {
            y: floor_y,
            vel_y: 0.0,
        };
        let frames = (seconds * 1000.0 / FRAME_MS).ceil() as u64;

        game.on_activate_input();

        for frame in 0..frames {
            // Engine step first: physics, then overlap callbacks
            let grounded = body.step(FRAME_MS as f32 / 1000.0, floor_y);
            game.sync_player(body.y, grounded);
            if game.check_overlaps() {
                log::info!("Hit an obstacle on frame {}", frame);
            }

            game.on_tick(FRAME_MS);

            // Compare in screen space, the way a player sees the track
            let state = game.state();
            let front = state.screen_x(state.player.x) + PLAYER_WIDTH;
            let obstacle_close = state.obstacles.iter().any(|(_, o)| {
                let x = state.screen_x(o.world_x);
                x >= front && x - front < REACTION_DISTANCE
            });
            if obstacle_close {
                game.on_jump_input();
            }

            for event in game.drain_events() {
                match event {
                    GameEvent::Jumped { velocity } => body.vel_y = velocity,
                    GameEvent::LevelUp { level, .. } => {
                        println!("  level {} at score {}", level, game.score())
                    }
                    GameEvent::GameOver {
                        score,
                        high_score,
                        new_record,
                    } => {
                        println!(
                            "Game over: score {} (best {}){}",
                            score,
                            high_score,
                            if new_record { " - new record!" } else { "" }
                        );
                    }
                    _ => {}
                }
            }

            if game.phase() == GamePhase::GameOver {
                return;
            }
        }

        println!(
            "Survived {:.1}s: score {} (best {})",
            seconds,
            game.score(),
            game.high_score()
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use dino_runner::{Game, Settings, platform};

    platform::init_logging();
    log::info!("Dino Runner (native) starting...");

    let mut args = std::env::args().skip(1);
    let seconds = args
        .next()
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(60.0);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(platform::time_seed);

    let mut game = match Game::new(Settings::load(), platform::default_store(), seed) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Could not start: {}", e);
            std::process::exit(1);
        }
    };

    println!("Running headless for {}s (seed {})", seconds, seed);
    headless::run(&mut game, seconds);
    game.shutdown();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::WasmRunner, this is just to satisfy the compiler
}
