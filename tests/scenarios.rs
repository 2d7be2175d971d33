//! End-to-end runs through the public coordinator API

use dino_runner::consts::*;
use dino_runner::persistence::{HighScoreStore, MemoryStore};
use dino_runner::sim::{GameEvent, GamePhase, SlotId};
use dino_runner::{Game, Settings};

fn game_with(store: MemoryStore) -> Game<MemoryStore> {
    Game::new(Settings::default(), store, 2024).unwrap()
}

/// Put an obstacle in the pool without waiting for the scheduler
fn plant_obstacle(game: &mut Game<MemoryStore>) -> SlotId {
    for _ in 0..100 {
        game.on_tick(100.0);
        if let Some((slot, _)) = game.state().obstacles.first() {
            return slot;
        }
    }
    panic!("scheduler never spawned");
}

#[test]
fn test_activate_score_collide_restart() {
    let mut game = game_with(MemoryStore::with_value(1));

    assert_eq!(game.on_activate_input(), GamePhase::Running);
    assert_eq!(game.score(), 0);

    game.on_tick(250.0);
    assert_eq!(game.score(), 2);
    assert_eq!(game.state().score.accumulator_ms, 50.0);

    // Nothing spawned yet, so no handle can be live
    assert!(!game.on_collision(SlotId::from_parts(0, 0)));
    assert_eq!(game.phase(), GamePhase::Running);

    let slot = plant_obstacle(&mut game);
    assert!(game.on_collision(slot));
    assert_eq!(game.phase(), GamePhase::GameOver);

    let frozen = game.score();
    game.on_tick(5000.0);
    assert_eq!(game.score(), frozen);

    assert_eq!(game.on_activate_input(), GamePhase::Running);
    assert_eq!(game.score(), 0);
}

#[test]
fn test_score_two_then_game_over_writes_two() {
    // Spawn early so there is something to hit at score 2
    let settings = Settings {
        first_spawn_interval_ms: 200.0,
        ..Default::default()
    };
    let mut game = Game::new(settings, MemoryStore::with_value(1), 11).unwrap();

    game.on_activate_input();
    game.on_tick(250.0);
    assert_eq!(game.score(), 2);

    let (slot, _) = game.state().obstacles.first().expect("obstacle spawned");
    assert!(game.on_collision(slot));
    assert_eq!(game.phase(), GamePhase::GameOver);
    assert_eq!(game.store().writes(), &[2]);
    assert_eq!(game.high_score(), 2);

    assert_eq!(game.on_activate_input(), GamePhase::Running);
    assert_eq!(game.score(), 0);
    assert_eq!(game.state().spawn.next_interval, 200.0);
    assert!(game.state().obstacles.is_empty());
}

#[test]
fn test_restart_uses_fixed_first_interval() {
    let mut game = game_with(MemoryStore::new());
    game.on_activate_input();
    let slot = plant_obstacle(&mut game);
    game.on_collision(slot);

    game.on_activate_input();
    assert_eq!(game.state().spawn.next_interval, FIRST_SPAWN_INTERVAL_MS);
    assert_eq!(game.state().spawn.decisions, 0);
}

#[test]
fn test_lower_score_is_not_written() {
    let mut game = game_with(MemoryStore::with_value(10_000));
    game.on_activate_input();
    let slot = plant_obstacle(&mut game);

    assert!(game.on_collision(slot));
    assert!(game.store().writes().is_empty());
    assert_eq!(game.high_score(), 10_000);
}

#[test]
fn test_high_score_survives_new_process() {
    let mut first = game_with(MemoryStore::new());
    first.on_activate_input();
    let slot = plant_obstacle(&mut first);
    first.on_collision(slot);
    let best = first.high_score();
    let store = first.shutdown();

    // A fresh coordinator over the same storage sees the best score
    let second = game_with(store);
    assert_eq!(second.high_score(), best);
    assert_eq!(second.store().read().unwrap(), best);
}

#[test]
fn test_events_tell_host_what_to_do() {
    let mut game = game_with(MemoryStore::new());
    game.on_activate_input();
    let slot = plant_obstacle(&mut game);
    game.on_tick(16.0);
    game.on_jump_input();
    game.on_collision(slot);

    let events = game.drain_events();
    assert_eq!(events.first(), Some(&GameEvent::Started));
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::ObstacleSpawned { slot: s, .. } if *s == slot
    )));
    assert!(events.contains(&GameEvent::Jumped {
        velocity: JUMP_VELOCITY
    }));
    assert!(matches!(events.last(), Some(GameEvent::GameOver { .. })));
    assert!(game.drain_events().is_empty());

    game.on_activate_input();
    assert_eq!(game.drain_events(), vec![GameEvent::Restarted]);
}

#[test]
fn test_long_run_recycles_ground_and_obstacles() {
    let mut game = game_with(MemoryStore::new());
    game.on_activate_input();

    for _ in 0..60 * 120 {
        game.on_tick(1000.0 / 60.0);
    }

    let events = game.drain_events();
    let recycled = events
        .iter()
        .filter(|e| matches!(e, GameEvent::TileRecycled { .. }))
        .count();
    let despawned = events
        .iter()
        .filter(|e| matches!(e, GameEvent::ObstacleDespawned { .. }))
        .count();
    assert!(recycled > 0);
    assert!(despawned > 0);
    assert!(!events.contains(&GameEvent::SpawnSkipped));

    let state = game.state();
    assert_eq!(state.world.tiles.len(), PLATFORM_TILE_COUNT);
    assert!(state.world.world_end >= state.world.scroll_x + VIEWPORT_WIDTH as f64);
    assert!(state.difficulty.level >= 1);
}

#[test]
fn test_desktop_viewports_mount_and_resize() {
    let settings = Settings {
        viewport_width: 1920.0,
        viewport_height: 1080.0,
        ..Default::default()
    };
    let mut game = Game::new(settings, MemoryStore::new(), 5).unwrap();

    for (width, height) in [(1366.0, 768.0), (1600.0, 900.0), (2560.0, 1440.0), (1920.0, 1080.0)] {
        assert!(game.set_viewport(width, height).is_ok(), "{}x{}", width, height);
    }

    game.on_activate_input();
    let slot = plant_obstacle(&mut game);
    assert!(game.on_collision(slot));
    assert_eq!(game.on_activate_input(), GamePhase::Running);
    assert_eq!(game.state().world.world_end, 5.0 * 1920.0);
}
