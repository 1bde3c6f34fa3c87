//! Cosmic Light Brew - a coffee-fuelled space dodger
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ship, spawns, collisions, light puzzle)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `web`: wasm-bindgen handle driven by the browser-side engine

pub mod settings;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions in screen pixels
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Ship spawn point and collision size
    pub const SHIP_START_X: f32 = 150.0;
    pub const SHIP_START_Y: f32 = 300.0;
    pub const SHIP_RADIUS: f32 = 10.0;
    pub const SHIP_HALF_WIDTH: f32 = 20.0;
    pub const SHIP_HALF_HEIGHT: f32 = 10.0;

    /// Asteroid sprite radius at scale 1.0
    pub const ASTEROID_RADIUS: f32 = 15.0;
    /// Coffee cup pickup radius
    pub const COFFEE_RADIUS: f32 = 15.0;

    /// Entities spawn this far past the right edge
    pub const SPAWN_MARGIN: f32 = 50.0;
    /// Entities are culled once this far past the left edge
    pub const DESPAWN_MARGIN: f32 = 50.0;

    /// Light wall (the beam emitter) geometry
    pub const WALL_OFFSET_FROM_RIGHT: f32 = 200.0;
    pub const WALL_WIDTH: f32 = 20.0;

    /// Mirror sprite half extents (15x30 texture)
    pub const MIRROR_HALF_WIDTH: f32 = 7.5;
    pub const MIRROR_HALF_HEIGHT: f32 = 15.0;

    /// Energy bounds
    pub const ENERGY_MAX: u32 = 100;
}

/// Angle of the direction from `from` to `to` (radians, atan2 convention)
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Unit vector for an angle
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
