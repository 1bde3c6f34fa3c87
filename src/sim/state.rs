//! Game state and core simulation types
//!
//! `GameState` is the session object: it owns every entity, the timers, the
//! seeded RNG and the optional active light puzzle.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::puzzle::{LightPuzzle, Reward};
use crate::consts::*;
use crate::tuning::Tuning;

/// Events kept for a host that has not drained them; the oldest go first
pub const MAX_PENDING_EVENTS: usize = 64;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Ran out of energy for too long
    GameOver,
}

/// Things that happened during a tick, for sound and UI cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    CoffeePickup,
    Crash,
    PuzzleSpawned,
    PuzzleSolved { reward: Reward },
    LaserClear,
    GameOver,
    Restarted,
}

/// An asteroid drifting left
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub scale: f32,
    /// Current rotation (radians, cosmetic)
    pub rotation: f32,
    /// Spin rate (radians/s, cosmetic)
    pub spin: f32,
}

impl Asteroid {
    pub fn radius(&self) -> f32 {
        ASTEROID_RADIUS * self.scale
    }
}

/// A coffee cup pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coffee {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
}

/// Countdown timers, all in ticks
#[derive(Debug, Clone, Default)]
pub struct Timers {
    pub asteroid: u64,
    pub coffee: u64,
    pub energy_drain: u64,
    /// Ticks spent continuously at zero energy
    pub depleted: u64,
    /// Tick at which the last light wall appeared
    pub last_wall: u64,
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    /// Coffee cups collected
    pub score: u32,
    /// 0..=ENERGY_MAX
    pub energy: u32,
    /// Scroll speed multiplier for the host's parallax (0.5 when depleted)
    pub game_speed: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub ship: Vec2,
    /// Active asteroids (sorted by id)
    pub asteroids: Vec<Asteroid>,
    /// Active coffee cups (sorted by id)
    pub coffees: Vec<Coffee>,
    /// The light wall puzzle, while one is up
    pub puzzle: Option<LightPuzzle>,
    pub timers: Timers,
    /// Events raised since the host last drained them (at most
    /// `MAX_PENDING_EVENTS`)
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            tuning,
            score: 0,
            energy: ENERGY_MAX,
            game_speed: 1.0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            ship: Vec2::new(SHIP_START_X, SHIP_START_Y),
            asteroids: Vec::new(),
            coffees: Vec::new(),
            puzzle: None,
            timers: Timers::default(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };
        state.reset_timers();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn reset_timers(&mut self) {
        self.timers = Timers {
            asteroid: Tuning::ticks(self.tuning.asteroid_interval),
            coffee: Tuning::ticks(self.tuning.coffee_interval),
            energy_drain: Tuning::ticks(self.tuning.energy_drain_interval),
            depleted: 0,
            last_wall: self.time_ticks,
        };
    }

    /// Start a fresh run in place, keeping seed stream and tuning
    pub fn restart(&mut self) {
        self.score = 0;
        self.energy = ENERGY_MAX;
        self.game_speed = 1.0;
        self.phase = GamePhase::Playing;
        self.ship = Vec2::new(SHIP_START_X, SHIP_START_Y);
        self.asteroids.clear();
        self.coffees.clear();
        self.puzzle = None;
        self.reset_timers();
        self.push_event(GameEvent::Restarted);
        log::info!("Game restarted");
    }

    /// Record an event, dropping the oldest once the backlog is full
    pub fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Spawn an asteroid just off the right edge
    pub fn spawn_asteroid(&mut self) {
        let t = &self.tuning;
        let (min_speed, max_speed) = (t.asteroid_min_speed, t.asteroid_max_speed);
        let (min_scale, max_scale) = (t.asteroid_min_scale, t.asteroid_max_scale);
        let max_spin = t.asteroid_max_spin;

        let y = self.rng.random_range(50.0..=WORLD_HEIGHT - 50.0);
        let speed = self.rng.random_range(min_speed..=max_speed);
        let scale = self.rng.random_range(min_scale..=max_scale);
        let spin = self.rng.random_range(-max_spin..=max_spin).to_radians();

        let id = self.next_entity_id();
        self.asteroids.push(Asteroid {
            id,
            pos: Vec2::new(WORLD_WIDTH + SPAWN_MARGIN, y),
            vel: Vec2::new(-speed, 0.0),
            scale,
            rotation: 0.0,
            spin,
        });
        log::debug!("Spawned asteroid {} at y={:.0}", id, y);
    }

    /// Spawn a coffee cup at `pos` drifting left
    pub fn spawn_coffee_at(&mut self, pos: Vec2) {
        let id = self.next_entity_id();
        let vel = Vec2::new(-self.tuning.coffee_speed, 0.0);
        self.coffees.push(Coffee { id, pos, vel });
    }

    /// Spawn a coffee cup just off the right edge
    pub fn spawn_coffee(&mut self) {
        let y = self.rng.random_range(50.0..=WORLD_HEIGHT - 50.0);
        self.spawn_coffee_at(Vec2::new(WORLD_WIDTH + SPAWN_MARGIN, y));
    }

    /// Put up a new light wall puzzle
    pub fn spawn_puzzle(&mut self) {
        let puzzle = LightPuzzle::spawn(&mut self.rng, self.tuning.beam_params());
        log::info!(
            "Light wall up: {} mirrors, target at ({:.0}, {:.0})",
            puzzle.mirrors.len(),
            puzzle.target.pos.x,
            puzzle.target.pos.y
        );
        self.puzzle = Some(puzzle);
        self.timers.last_wall = self.time_ticks;
        self.push_event(GameEvent::PuzzleSpawned);
    }

    /// Pay out a solved puzzle and tear it down
    pub fn solve_puzzle(&mut self) {
        let Some(puzzle) = self.puzzle.take() else {
            return;
        };

        let reward = Reward::roll(&mut self.rng, self.tuning.coffee_reward_chance);
        log::info!("Light puzzle solved, reward: {:?}", reward);
        self.push_event(GameEvent::PuzzleSolved { reward });

        match reward {
            Reward::BonusCoffee => {
                for _ in 0..self.tuning.bonus_coffee_count {
                    let x = puzzle.emitter.x + self.rng.random_range(-50.0..=50.0);
                    let y = self.rng.random_range(100.0..=WORLD_HEIGHT - 100.0);
                    self.spawn_coffee_at(Vec2::new(x, y));
                }
            }
            Reward::LaserClear => {
                self.asteroids.clear();
                self.push_event(GameEvent::LaserClear);
            }
        }
    }

    /// Ship speed after the low-energy penalty
    pub fn ship_speed(&self) -> f32 {
        if self.energy > 0 {
            self.tuning.ship_speed
        } else {
            self.tuning.ship_speed * self.tuning.depleted_speed_factor
        }
    }

    /// Set energy, keeping the speed cue in step
    pub fn set_energy(&mut self, energy: u32) {
        self.energy = energy.min(ENERGY_MAX);
        self.game_speed = if self.energy == 0 { 0.5 } else { 1.0 };
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.asteroids.sort_by_key(|a| a.id);
        self.coffees.sort_by_key(|c| c.id);
    }
}
