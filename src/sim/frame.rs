//! Frame driver: turns variable host frames into fixed simulation ticks
//!
//! Input callbacks only ever push onto the queue here. The queue is drained
//! into the first tick of the next frame, so every event is seen exactly once
//! and in arrival order.

use std::collections::VecDeque;

use glam::Vec2;

use super::state::GameState;
use super::tick::{InputEvent, TickInput, tick};
use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame gap we simulate; anything longer is treated as a stall
const MAX_FRAME_DT: f32 = 0.1;

#[derive(Debug, Default)]
pub struct FrameDriver {
    accumulator: f32,
    /// Host timestamp of the previous frame (ms), 0 before the first frame
    last_time: f64,
    queue: VecDeque<InputEvent>,
    movement: Vec2,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an input event for the next tick
    pub fn push(&mut self, event: InputEvent) {
        self.queue.push_back(event);
    }

    /// Set the held movement direction (persists until changed)
    pub fn set_movement(&mut self, movement: Vec2) {
        self.movement = movement;
    }

    pub fn movement(&self) -> Vec2 {
        self.movement
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Advance using the host's frame timestamp in milliseconds
    pub fn frame(&mut self, state: &mut GameState, time_ms: f64) -> u32 {
        let dt = if self.last_time > 0.0 {
            ((time_ms - self.last_time) / 1000.0) as f32
        } else {
            SIM_DT
        };
        self.last_time = time_ms;
        self.advance(state, dt)
    }

    /// Run as many fixed ticks as `dt` seconds cover; returns the tick count
    pub fn advance(&mut self, state: &mut GameState, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = TickInput {
                movement: self.movement,
                events: self.queue.drain(..).collect(),
            };
            tick(state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GamePhase;

    #[test]
    fn test_first_frame_runs_one_tick() {
        let mut state = GameState::new(1);
        let mut driver = FrameDriver::new();
        assert_eq!(driver.frame(&mut state, 1000.0), 1);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_short_frame_accumulates() {
        let mut state = GameState::new(1);
        let mut driver = FrameDriver::new();
        assert_eq!(driver.advance(&mut state, SIM_DT * 0.5), 0);
        assert_eq!(driver.advance(&mut state, SIM_DT * 0.6), 1);
    }

    #[test]
    fn test_long_stall_is_capped() {
        let mut state = GameState::new(1);
        let mut driver = FrameDriver::new();
        let ticks = driver.advance(&mut state, 5.0);
        assert!(ticks <= MAX_SUBSTEPS);
        assert_eq!(driver.advance(&mut state, 0.0), 0);
    }

    #[test]
    fn test_queued_events_apply_once() {
        let mut state = GameState::new(1);
        let mut driver = FrameDriver::new();
        driver.push(InputEvent::TogglePause);
        assert_eq!(driver.pending(), 1);

        driver.advance(&mut state, SIM_DT * 3.0);
        assert_eq!(driver.pending(), 0);
        assert_eq!(state.phase, GamePhase::Paused);
    }

    #[test]
    fn test_pause_key_and_focus_loss_in_one_frame() {
        let mut state = GameState::new(1);
        let mut driver = FrameDriver::new();
        driver.push(InputEvent::TogglePause);
        driver.push(InputEvent::Pause);
        driver.advance(&mut state, SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);
    }

    #[test]
    fn test_movement_persists_across_frames() {
        let mut state = GameState::new(1);
        let mut driver = FrameDriver::new();
        driver.set_movement(Vec2::new(0.0, 1.0));
        driver.advance(&mut state, SIM_DT);
        let y1 = state.ship.y;
        driver.advance(&mut state, SIM_DT);
        assert!(state.ship.y > y1);
    }
}
