//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;

use super::collision::{block_by_wall, circles_overlap, clamp_to_world, is_offscreen_left};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::tuning::Tuning;

/// Discrete input, queued by the host between ticks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed at a playfield position (may pick up a mirror)
    PointerDown(Vec2),
    /// Pointer moved (drags the held mirror)
    PointerMove(Vec2),
    /// Pointer released (drops the held mirror)
    PointerUp,
    /// Pause toggle
    TogglePause,
    /// Pause if running, otherwise no-op (focus loss)
    Pause,
    /// Start over after game over (or at any time)
    Restart,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held movement direction, each axis in -1..=1 (arrow keys)
    pub movement: Vec2,
    /// Queued events, applied in order before the world moves
    pub events: Vec<InputEvent>,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    for event in &input.events {
        apply_event(state, *event);
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    move_ship(state, input.movement, dt);
    move_entities(state, dt);
    run_spawners(state);
    resolve_collisions(state);

    if drain_energy(state) {
        return;
    }

    // Light wall schedule: measured from the previous wall's appearance
    let since_wall = state.time_ticks - state.timers.last_wall;
    let wall_due = since_wall >= Tuning::ticks(state.tuning.wall_interval);
    if state.puzzle.is_none() && wall_due {
        state.spawn_puzzle();
    }

    let solved = state.puzzle.as_mut().is_some_and(|p| p.update());
    if solved {
        state.solve_puzzle();
    }

    state.normalize_order();
}

fn apply_event(state: &mut GameState, event: InputEvent) {
    match event {
        InputEvent::Restart => state.restart(),
        InputEvent::TogglePause => {
            state.phase = match state.phase {
                GamePhase::Playing => GamePhase::Paused,
                GamePhase::Paused => GamePhase::Playing,
                GamePhase::GameOver => GamePhase::GameOver,
            };
        }
        InputEvent::Pause => {
            if state.phase == GamePhase::Playing {
                state.phase = GamePhase::Paused;
            }
        }
        InputEvent::PointerDown(pos) => {
            if state.phase == GamePhase::Playing {
                if let Some(puzzle) = state.puzzle.as_mut() {
                    puzzle.grab(pos);
                }
            }
        }
        InputEvent::PointerMove(pos) => {
            if state.phase == GamePhase::Playing {
                if let Some(puzzle) = state.puzzle.as_mut() {
                    puzzle.drag_to(pos);
                }
            }
        }
        InputEvent::PointerUp => {
            if let Some(puzzle) = state.puzzle.as_mut() {
                puzzle.release();
            }
        }
    }
}

fn move_ship(state: &mut GameState, movement: Vec2, dt: f32) {
    let dir = movement.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));

    // A wall can appear on top of a ship that is standing still
    let prev = state.ship;
    let mut next = clamp_to_world(prev + dir * state.ship_speed() * dt);
    if let Some(puzzle) = &state.puzzle {
        next = block_by_wall(prev, next, puzzle.emitter.x);
    }
    state.ship = next;
}

fn move_entities(state: &mut GameState, dt: f32) {
    for asteroid in &mut state.asteroids {
        asteroid.pos += asteroid.vel * dt;
        asteroid.rotation += asteroid.spin * dt;
    }
    for coffee in &mut state.coffees {
        coffee.pos += coffee.vel * dt;
    }
    state.asteroids.retain(|a| !is_offscreen_left(a.pos));
    state.coffees.retain(|c| !is_offscreen_left(c.pos));
}

fn run_spawners(state: &mut GameState) {
    state.timers.asteroid = state.timers.asteroid.saturating_sub(1);
    if state.timers.asteroid == 0 {
        state.spawn_asteroid();
        state.timers.asteroid = Tuning::ticks(state.tuning.asteroid_interval);
    }

    state.timers.coffee = state.timers.coffee.saturating_sub(1);
    if state.timers.coffee == 0 {
        state.spawn_coffee();
        state.timers.coffee = Tuning::ticks(state.tuning.coffee_interval);
    }
}

fn resolve_collisions(state: &mut GameState) {
    let ship = state.ship;

    let before = state.asteroids.len();
    state
        .asteroids
        .retain(|a| !circles_overlap(ship, SHIP_RADIUS, a.pos, a.radius()));
    let crashes = before - state.asteroids.len();
    for _ in 0..crashes {
        let energy = state.energy.saturating_sub(state.tuning.crash_energy_loss);
        state.set_energy(energy);
        state.push_event(GameEvent::Crash);
        log::debug!("Crash! energy now {}", state.energy);
    }

    let before = state.coffees.len();
    state
        .coffees
        .retain(|c| !circles_overlap(ship, SHIP_RADIUS, c.pos, COFFEE_RADIUS));
    let pickups = before - state.coffees.len();
    for _ in 0..pickups {
        state.score += 1;
        let energy = state.energy + state.tuning.coffee_energy_gain;
        state.set_energy(energy);
        state.push_event(GameEvent::CoffeePickup);
    }
}

/// Tick the energy drain; returns `true` if the run just ended
fn drain_energy(state: &mut GameState) -> bool {
    if state.energy > 0 {
        state.timers.depleted = 0;
        state.timers.energy_drain = state.timers.energy_drain.saturating_sub(1);
        if state.timers.energy_drain == 0 {
            state.set_energy(state.energy - 1);
            state.timers.energy_drain = Tuning::ticks(state.tuning.energy_drain_interval);
        }
        return false;
    }

    state.timers.depleted += 1;
    if state.timers.depleted >= Tuning::ticks(state.tuning.depleted_grace) {
        state.phase = GamePhase::GameOver;
        state.puzzle = None;
        state.push_event(GameEvent::GameOver);
        log::info!("Game over with {} coffee collected", state.score);
        return true;
    }
    false
}
