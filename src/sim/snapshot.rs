//! Read-only view of the game for the host
//!
//! The host engine draws sprites, the beam and the HUD from this each frame
//! and maps the drained events to sounds.

use glam::Vec2;
use serde::Serialize;

use super::beam::BeamSegment;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::settings::Settings;

/// Energy bar colour band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EnergyBand {
    Green,
    Yellow,
    Red,
}

impl EnergyBand {
    pub fn from_energy(energy: u32) -> Self {
        match energy {
            61.. => EnergyBand::Green,
            31..=60 => EnergyBand::Yellow,
            _ => EnergyBand::Red,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AsteroidView {
    pub pos: Vec2,
    pub scale: f32,
    pub rotation: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PuzzleView {
    pub emitter: Vec2,
    pub wall_width: f32,
    pub mirrors: Vec<Vec2>,
    /// Mirror to tint while it is held
    pub dragged: Option<usize>,
    pub target: Vec2,
    pub target_radius: f32,
    pub beam: Vec<BeamSegment>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub energy: u32,
    pub energy_band: EnergyBand,
    /// Opacity of the low-energy dimming overlay
    pub dim_alpha: f32,
    pub game_speed: f32,
    /// Volumes the host should mix at this frame
    pub sfx_volume: f32,
    pub music_volume: f32,
    pub ship: Vec2,
    pub asteroids: Vec<AsteroidView>,
    pub coffees: Vec<Vec2>,
    pub puzzle: Option<PuzzleView>,
    pub events: Vec<GameEvent>,
}

/// Build a snapshot, handing over the events raised since the last one
pub fn build_snapshot(state: &mut GameState, settings: &Settings, focused: bool) -> Snapshot {
    let dim_alpha = if state.energy == 0 && !settings.reduced_motion {
        0.3
    } else {
        0.0
    };

    // Music fades out once the run is over
    let music_volume = match state.phase {
        GamePhase::GameOver => 0.0,
        _ => settings.effective_music_volume(focused),
    };

    let puzzle = state.puzzle.as_ref().map(|p| PuzzleView {
        emitter: p.emitter,
        wall_width: WALL_WIDTH,
        mirrors: p.mirrors.clone(),
        dragged: p.dragged(),
        target: p.target.pos,
        target_radius: p.target.hit_radius,
        beam: p.route.segments.clone(),
    });

    Snapshot {
        phase: state.phase,
        score: state.score,
        energy: state.energy,
        energy_band: EnergyBand::from_energy(state.energy),
        dim_alpha,
        game_speed: state.game_speed,
        sfx_volume: settings.effective_sfx_volume(focused),
        music_volume,
        ship: state.ship,
        asteroids: state
            .asteroids
            .iter()
            .map(|a| AsteroidView {
                pos: a.pos,
                scale: a.scale,
                rotation: a.rotation,
            })
            .collect(),
        coffees: state.coffees.iter().map(|c| c.pos).collect(),
        puzzle,
        events: state.drain_events(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_energy_bands() {
        assert_eq!(EnergyBand::from_energy(100), EnergyBand::Green);
        assert_eq!(EnergyBand::from_energy(61), EnergyBand::Green);
        assert_eq!(EnergyBand::from_energy(60), EnergyBand::Yellow);
        assert_eq!(EnergyBand::from_energy(31), EnergyBand::Yellow);
        assert_eq!(EnergyBand::from_energy(30), EnergyBand::Red);
        assert_eq!(EnergyBand::from_energy(0), EnergyBand::Red);
    }

    #[test]
    fn test_dim_respects_reduced_motion() {
        let mut state = GameState::new(1);
        state.set_energy(0);

        let snap = build_snapshot(&mut state, &Settings::default(), true);
        assert_eq!(snap.dim_alpha, 0.3);
        assert_eq!(snap.game_speed, 0.5);

        let calm = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        assert_eq!(build_snapshot(&mut state, &calm, true).dim_alpha, 0.0);
    }

    #[test]
    fn test_snapshot_drains_events() {
        let mut state = GameState::new(2);
        state.spawn_puzzle();

        let snap = build_snapshot(&mut state, &Settings::default(), true);
        assert_eq!(snap.events, vec![GameEvent::PuzzleSpawned]);
        assert!(snap.puzzle.is_some());

        let again = build_snapshot(&mut state, &Settings::default(), true);
        assert!(again.events.is_empty());
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut state = GameState::new(3);
        state.spawn_asteroid();
        let json = serde_json::to_string(&build_snapshot(&mut state, &Settings::default(), true)).unwrap();
        assert!(json.contains("\"phase\":\"Playing\""));
        assert!(json.contains("\"asteroids\""));
    }

    #[test]
    fn test_music_silent_after_game_over() {
        let mut state = GameState::new(4);
        let settings = Settings::default();
        assert!(build_snapshot(&mut state, &settings, true).music_volume > 0.0);
        assert_eq!(build_snapshot(&mut state, &settings, false).music_volume, 0.0);

        state.phase = GamePhase::GameOver;
        assert_eq!(build_snapshot(&mut state, &settings, true).music_volume, 0.0);
    }
}
