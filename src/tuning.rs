//! Data-driven game balance
//!
//! Every gameplay number that a designer might want to tweak lives here.
//! Defaults reproduce the shipped game; a JSON document may override any
//! subset of fields.

use serde::de::Error as _;
use serde::{Deserialize, Serialize};

use crate::sim::beam::BeamParams;

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Ship ===
    /// Ship speed with energy left (pixels/s)
    pub ship_speed: f32,
    /// Speed multiplier applied while energy is depleted
    pub depleted_speed_factor: f32,

    // === Asteroids ===
    /// Seconds between asteroid spawns
    pub asteroid_interval: f32,
    pub asteroid_min_speed: f32,
    pub asteroid_max_speed: f32,
    pub asteroid_min_scale: f32,
    pub asteroid_max_scale: f32,
    /// Maximum spin either way (degrees/s, cosmetic)
    pub asteroid_max_spin: f32,
    /// Energy lost per asteroid crash
    pub crash_energy_loss: u32,

    // === Coffee ===
    /// Seconds between coffee spawns
    pub coffee_interval: f32,
    pub coffee_speed: f32,
    /// Energy gained per coffee cup
    pub coffee_energy_gain: u32,

    // === Energy ===
    /// Seconds per point of energy drained
    pub energy_drain_interval: f32,
    /// Seconds at zero energy before the run ends
    pub depleted_grace: f32,

    // === Light wall ===
    /// Seconds between light walls (measured from the previous spawn)
    pub wall_interval: f32,
    /// Maximum mirror-to-target distance that still connects the beam
    pub beam_max_range: f32,
    /// Pixel tolerance between beam endpoint and target centre
    pub beam_hit_tolerance: f32,
    /// Probability that a solved puzzle pays out coffee instead of a laser
    pub coffee_reward_chance: f64,
    /// Coffee cups spawned by a coffee reward
    pub bonus_coffee_count: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ship_speed: 1000.0,
            depleted_speed_factor: 0.5,

            asteroid_interval: 1.5,
            asteroid_min_speed: 100.0,
            asteroid_max_speed: 200.0,
            asteroid_min_scale: 0.5,
            asteroid_max_scale: 1.5,
            asteroid_max_spin: 50.0,
            crash_energy_loss: 10,

            coffee_interval: 3.0,
            coffee_speed: 150.0,
            coffee_energy_gain: 10,

            energy_drain_interval: 1.0,
            depleted_grace: 15.0,

            wall_interval: 10.0,
            beam_max_range: 150.0,
            beam_hit_tolerance: 30.0,
            coffee_reward_chance: 0.7,
            bonus_coffee_count: 3,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides; missing fields keep their defaults
    ///
    /// Values that would leave a spawner with an empty random range are
    /// rejected here rather than surfacing mid-run.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate().map_err(serde_json::Error::custom)?;
        Ok(tuning)
    }

    /// Check that every range and rate is usable by the simulation
    pub fn validate(&self) -> Result<(), String> {
        let finite = [
            ("ship_speed", self.ship_speed),
            ("depleted_speed_factor", self.depleted_speed_factor),
            ("asteroid_interval", self.asteroid_interval),
            ("asteroid_min_speed", self.asteroid_min_speed),
            ("asteroid_max_speed", self.asteroid_max_speed),
            ("asteroid_min_scale", self.asteroid_min_scale),
            ("asteroid_max_scale", self.asteroid_max_scale),
            ("asteroid_max_spin", self.asteroid_max_spin),
            ("coffee_interval", self.coffee_interval),
            ("coffee_speed", self.coffee_speed),
            ("energy_drain_interval", self.energy_drain_interval),
            ("depleted_grace", self.depleted_grace),
            ("wall_interval", self.wall_interval),
            ("beam_max_range", self.beam_max_range),
            ("beam_hit_tolerance", self.beam_hit_tolerance),
        ];
        if let Some((name, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(format!("{name} must be a finite number"));
        }
        if !self.coffee_reward_chance.is_finite() {
            return Err("coffee_reward_chance must be a finite number".into());
        }

        if self.asteroid_min_speed > self.asteroid_max_speed {
            return Err(format!(
                "asteroid_min_speed ({}) exceeds asteroid_max_speed ({})",
                self.asteroid_min_speed, self.asteroid_max_speed
            ));
        }
        if self.asteroid_min_scale > self.asteroid_max_scale {
            return Err(format!(
                "asteroid_min_scale ({}) exceeds asteroid_max_scale ({})",
                self.asteroid_min_scale, self.asteroid_max_scale
            ));
        }
        if self.asteroid_max_spin < 0.0 {
            return Err(format!(
                "asteroid_max_spin ({}) must not be negative",
                self.asteroid_max_spin
            ));
        }
        Ok(())
    }

    /// Beam router parameters for the light puzzle
    pub fn beam_params(&self) -> BeamParams {
        BeamParams {
            max_range: self.beam_max_range,
            hit_tolerance: self.beam_hit_tolerance,
        }
    }

    /// Convert a duration in seconds to whole simulation ticks (at least 1)
    pub fn ticks(seconds: f32) -> u64 {
        ((seconds / crate::consts::SIM_DT).round() as u64).max(1)
    }
}
