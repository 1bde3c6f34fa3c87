//! The light-wall mirror puzzle
//!
//! A puzzle is the emitter (the wall), a handful of draggable mirrors and a
//! target. All of it is created in one go and dropped in one go: the game
//! state holds at most one `LightPuzzle` at a time.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::beam::{BeamParams, BeamRoute, route_beam};
use super::collision::point_in_box;
use crate::consts::*;

/// What the player earns for solving a puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reward {
    /// A few bonus coffee cups drift out of the wall
    BonusCoffee,
    /// A laser sweep destroys every asteroid on screen
    LaserClear,
}

impl Reward {
    /// Weighted pick: `coffee_chance` for coffee, the rest for the laser
    pub fn roll<R: Rng>(rng: &mut R, coffee_chance: f64) -> Self {
        if rng.random_bool(coffee_chance.clamp(0.0, 1.0)) {
            Reward::BonusCoffee
        } else {
            Reward::LaserClear
        }
    }
}

/// The target the beam has to reach
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Target {
    pub pos: Vec2,
    pub hit_radius: f32,
}

/// Mirror currently held by the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    mirror: usize,
    /// Mirror position relative to the grab point
    offset: Vec2,
}

/// An active light-wall puzzle
#[derive(Debug, Clone)]
pub struct LightPuzzle {
    /// Beam origin (centre of the light wall)
    pub emitter: Vec2,
    /// Mirror centres, in spawn order
    pub mirrors: Vec<Vec2>,
    pub target: Target,
    /// Beam computed on the latest update
    pub route: BeamRoute,
    params: BeamParams,
    drag: Option<Drag>,
    solved: bool,
}

impl LightPuzzle {
    /// Build a puzzle from explicit positions
    pub fn new(emitter: Vec2, mirrors: Vec<Vec2>, target: Vec2, params: BeamParams) -> Self {
        Self {
            emitter,
            mirrors,
            target: Target {
                pos: target,
                hit_radius: params.hit_tolerance,
            },
            route: BeamRoute::none(),
            params,
            drag: None,
            solved: false,
        }
    }

    /// Spawn a wall with 2-3 mirrors left of it and a target right of it
    pub fn spawn<R: Rng>(rng: &mut R, params: BeamParams) -> Self {
        let emitter = Self::wall_position();

        let mirror_count = rng.random_range(2..=3);
        let mirrors = (0..mirror_count)
            .map(|_| {
                Vec2::new(
                    rng.random_range(100..=(WORLD_WIDTH as i32 - 300)) as f32,
                    rng.random_range(100..=(WORLD_HEIGHT as i32 - 100)) as f32,
                )
            })
            .collect();

        let target = Vec2::new(
            rng.random_range((WORLD_WIDTH as i32 - 150)..=(WORLD_WIDTH as i32 - 50)) as f32,
            rng.random_range(100..=(WORLD_HEIGHT as i32 - 100)) as f32,
        );

        Self::new(emitter, mirrors, target, params)
    }

    /// Where every light wall stands
    pub fn wall_position() -> Vec2 {
        Vec2::new(WORLD_WIDTH - WALL_OFFSET_FROM_RIGHT, WORLD_HEIGHT / 2.0)
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Index of the mirror being dragged, if any
    pub fn dragged(&self) -> Option<usize> {
        self.drag.map(|d| d.mirror)
    }

    /// Pick up the topmost mirror under `point`
    pub fn grab(&mut self, point: Vec2) -> bool {
        let half = Vec2::new(MIRROR_HALF_WIDTH, MIRROR_HALF_HEIGHT);
        let hit = self
            .mirrors
            .iter()
            .enumerate()
            .rev()
            .find(|(_, m)| point_in_box(point, **m, half))
            .map(|(i, m)| Drag {
                mirror: i,
                offset: *m - point,
            });
        self.drag = hit;
        hit.is_some()
    }

    /// Move the held mirror so it follows the pointer
    pub fn drag_to(&mut self, point: Vec2) {
        if let Some(drag) = self.drag {
            self.mirrors[drag.mirror] = point + drag.offset;
        }
    }

    pub fn release(&mut self) {
        self.drag = None;
    }

    /// Re-route the beam; returns `true` on the tick the target is first hit
    pub fn update(&mut self) -> bool {
        if self.solved {
            return false;
        }
        self.route = route_beam(self.emitter, &self.mirrors, self.target.pos, &self.params);
        if self.route.hit {
            self.solved = true;
            self.drag = None;
            return true;
        }
        false
    }
}
