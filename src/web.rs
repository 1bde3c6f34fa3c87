//! Browser bridge
//!
//! The page's 2D engine owns the canvas, the sprites and the audio nodes.
//! It forwards input into a `GameHandle`, calls `frame` from its update
//! callback and draws whatever the snapshot describes.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::settings::Settings;
use crate::sim::{FrameDriver, GameState, InputEvent, build_snapshot};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }
    log::info!("Cosmic Light Brew module loaded");
}

/// One running game, driven by the host engine
#[wasm_bindgen]
pub struct GameHandle {
    state: GameState,
    driver: FrameDriver,
    settings: Settings,
    focused: bool,
}

#[wasm_bindgen]
impl GameHandle {
    /// Start a run; pass `Date.now()` or any other seed
    #[wasm_bindgen(constructor)]
    pub fn new(seed: f64) -> GameHandle {
        Self::with_tuning(seed as u64, Tuning::default())
    }

    /// Start a run with tuning overrides given as JSON
    pub fn with_tuning_json(seed: f64, json: &str) -> Result<GameHandle, JsValue> {
        let tuning = Tuning::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::with_tuning(seed as u64, tuning))
    }

    /// Held arrow-key direction, each axis -1, 0 or 1
    pub fn set_movement(&mut self, x: f32, y: f32) {
        self.driver.set_movement(Vec2::new(x, y));
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.driver.push(InputEvent::PointerDown(Vec2::new(x, y)));
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.driver.push(InputEvent::PointerMove(Vec2::new(x, y)));
    }

    pub fn pointer_up(&mut self) {
        self.driver.push(InputEvent::PointerUp);
    }

    pub fn toggle_pause(&mut self) {
        self.driver.push(InputEvent::TogglePause);
    }

    /// "Play Again"
    pub fn restart(&mut self) {
        self.driver.push(InputEvent::Restart);
        log::info!("Restart requested");
    }

    /// Window lost focus: auto-pause a running game
    pub fn blur(&mut self) {
        self.focused = false;
        self.driver.push(InputEvent::Pause);
        log::info!("Auto-pause requested (window blur)");
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    /// Advance the simulation to the host's frame time (ms); returns ticks run
    pub fn frame(&mut self, time_ms: f64) -> u32 {
        self.driver.frame(&mut self.state, time_ms)
    }

    /// Beam as a flat array: `[x, y, angle, length]` per segment
    pub fn beam_segments(&self) -> js_sys::Float32Array {
        let flat: Vec<f32> = self
            .state
            .puzzle
            .iter()
            .flat_map(|p| p.route.segments.iter())
            .flat_map(|s| [s.origin.x, s.origin.y, s.angle, s.length])
            .collect();
        js_sys::Float32Array::from(flat.as_slice())
    }

    /// Whether a light wall is currently up
    pub fn wall_active(&self) -> bool {
        self.state.puzzle.is_some()
    }

    /// Everything the host needs to draw this frame, as JSON
    ///
    /// Drains the pending event list, so call it once per frame.
    pub fn snapshot_json(&mut self) -> Result<String, JsValue> {
        let snapshot = build_snapshot(&mut self.state, &self.settings, self.focused);
        serde_json::to_string(&snapshot).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn settings_json(&self) -> Result<String, JsValue> {
        self.settings
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Replace the player settings and persist them
    pub fn apply_settings_json(&mut self, json: &str) -> Result<(), JsValue> {
        let settings = Settings::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        settings.save();
        self.settings = settings;
        Ok(())
    }
}

impl GameHandle {
    fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        log::info!("Game initialized with seed: {}", seed);
        Self {
            state: GameState::with_tuning(seed, tuning),
            driver: FrameDriver::new(),
            settings: Settings::load(),
            focused: true,
        }
    }
}
