//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod beam;
pub mod collision;
pub mod frame;
pub mod puzzle;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use beam::{BeamParams, BeamRoute, BeamSegment, nearest_reflector, route_beam};
pub use frame::FrameDriver;
pub use puzzle::{LightPuzzle, Reward, Target};
pub use snapshot::{EnergyBand, Snapshot, build_snapshot};
pub use state::{Asteroid, Coffee, GameEvent, GamePhase, GameState};
pub use tick::{InputEvent, TickInput, tick};
