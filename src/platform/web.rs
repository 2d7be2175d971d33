//! Browser bindings
//!
//! The JS side owns the engine (sprites, arcade physics, camera) and calls
//! into `WasmRunner` from its frame loop and input/overlap handlers. Events
//! come back as a JSON array.

use wasm_bindgen::prelude::*;

use crate::game::Game;
use crate::persistence::HighScoreStore;
use crate::settings::Settings;
use crate::sim::{GamePhase, SlotId};

#[wasm_bindgen]
pub struct WasmRunner {
    game: Game<Box<dyn HighScoreStore>>,
}

#[wasm_bindgen]
impl WasmRunner {
    /// Mount the simulation for a host surface of the given size
    #[wasm_bindgen(constructor)]
    pub fn new(viewport_width: f32, viewport_height: f32) -> Result<WasmRunner, JsValue> {
        super::init_logging();

        let mut settings = Settings::load();
        settings.viewport_width = viewport_width;
        settings.viewport_height = viewport_height;

        let game = Game::new(settings, super::default_store(), super::time_seed())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { game })
    }

    #[wasm_bindgen(js_name = onTick)]
    pub fn on_tick(&mut self, delta_ms: f64) {
        self.game.on_tick(delta_ms);
    }

    #[wasm_bindgen(js_name = onActivateInput)]
    pub fn on_activate_input(&mut self) {
        self.game.on_activate_input();
    }

    #[wasm_bindgen(js_name = onJumpInput)]
    pub fn on_jump_input(&mut self) -> bool {
        self.game.on_jump_input()
    }

    #[wasm_bindgen(js_name = onPress)]
    pub fn on_press(&mut self) {
        self.game.on_press();
    }

    /// Overlap callback; the obstacle handle arrives as its two parts
    #[wasm_bindgen(js_name = onCollision)]
    pub fn on_collision(&mut self, slot_index: u32, slot_generation: u32) -> bool {
        self.game
            .on_collision(SlotId::from_parts(slot_index, slot_generation))
    }

    #[wasm_bindgen(js_name = syncPlayer)]
    pub fn sync_player(&mut self, y: f32, on_ground: bool) {
        self.game.sync_player(y, on_ground);
    }

    #[wasm_bindgen(js_name = setViewport)]
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if let Err(e) = self.game.set_viewport(width, height) {
            log::warn!("Viewport {}x{} rejected: {}", width, height, e);
        }
    }

    /// Pending events as a JSON array
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&mut self) -> String {
        let events = self.game.drain_events();
        serde_json::to_string(&events).unwrap_or_else(|e| {
            log::error!("Could not serialize events: {}", e);
            "[]".to_string()
        })
    }

    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> String {
        match self.game.phase() {
            GamePhase::Idle => "idle",
            GamePhase::Running => "running",
            GamePhase::GameOver => "game_over",
        }
        .to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn score(&self) -> f64 {
        self.game.score() as f64
    }

    #[wasm_bindgen(getter, js_name = highScore)]
    pub fn high_score(&self) -> f64 {
        self.game.high_score() as f64
    }

    #[wasm_bindgen(getter, js_name = scrollX)]
    pub fn scroll_x(&self) -> f64 {
        self.game.state().world.scroll_x
    }

    /// Back, middle and front layer offsets
    #[wasm_bindgen(js_name = parallaxOffsets)]
    pub fn parallax_offsets(&self) -> Vec<f64> {
        self.game.parallax_offsets().to_vec()
    }

    #[wasm_bindgen(getter, js_name = playerX)]
    pub fn player_x(&self) -> f64 {
        self.game.state().player.x
    }

    /// "run" or "idle"
    #[wasm_bindgen(getter)]
    pub fn animation(&self) -> String {
        match self.game.state().player.animation() {
            crate::sim::Animation::Run => "run",
            crate::sim::Animation::Idle => "idle",
        }
        .to_string()
    }

    /// Unmount: release pooled state
    pub fn destroy(self) {
        self.game.shutdown();
    }
}
