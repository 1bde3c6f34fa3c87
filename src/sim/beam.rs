//! Light beam routing for the mirror puzzle
//!
//! The beam leaves the emitter, strikes the mirror closest to it and is
//! redirected toward the target. The route is recomputed from scratch every
//! tick because mirrors may be dragged between ticks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{angle_between, direction};

/// Router parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamParams {
    /// Maximum mirror-to-target distance that still counts as connected
    pub max_range: f32,
    /// Maximum distance between beam endpoint and target centre
    pub hit_tolerance: f32,
}

impl Default for BeamParams {
    fn default() -> Self {
        Self {
            max_range: 150.0,
            hit_tolerance: 30.0,
        }
    }
}

/// One straight piece of the beam
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamSegment {
    pub origin: Vec2,
    /// Direction in radians (atan2 convention, screen space)
    pub angle: f32,
    pub length: f32,
}

impl BeamSegment {
    /// Segment from `from` pointing at `to`, reaching exactly to it
    pub fn between(from: Vec2, to: Vec2) -> Self {
        Self {
            origin: from,
            angle: angle_between(from, to),
            length: from.distance(to),
        }
    }

    /// Far end of the segment
    pub fn end(&self) -> Vec2 {
        self.origin + direction(self.angle) * self.length
    }
}

/// Result of routing the beam for one tick
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BeamRoute {
    /// Emitter→mirror first, then mirror→target
    pub segments: Vec<BeamSegment>,
    /// Index of the mirror the beam strikes
    pub reflector: Option<usize>,
    /// Whether the beam reaches the target
    pub hit: bool,
}

impl BeamRoute {
    /// No beam at all
    pub fn none() -> Self {
        Self::default()
    }
}

/// Index of the reflector closest to `emitter`
///
/// Ties resolve to the earliest reflector in the slice.
pub fn nearest_reflector(emitter: Vec2, reflectors: &[Vec2]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, r) in reflectors.iter().enumerate() {
        let d = emitter.distance_squared(*r);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}

/// Route the beam from `emitter` via the nearest reflector toward `target`
pub fn route_beam(
    emitter: Vec2,
    reflectors: &[Vec2],
    target: Vec2,
    params: &BeamParams,
) -> BeamRoute {
    let Some(index) = nearest_reflector(emitter, reflectors) else {
        return BeamRoute::none();
    };
    let mirror = reflectors[index];

    let incoming = BeamSegment::between(emitter, mirror);
    let outgoing = BeamSegment::between(mirror, target);

    // The outgoing leg is aimed straight at the target, so the endpoint test
    // only fails on float drift. It stays separate from the range gate so a
    // bouncing router can reuse it.
    let in_range = outgoing.length <= params.max_range;
    let hit = in_range && outgoing.end().distance(target) < params.hit_tolerance;

    BeamRoute {
        segments: vec![incoming, outgoing],
        reflector: Some(index),
        hit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn scenario_params() -> BeamParams {
        BeamParams {
            max_range: 150.0,
            hit_tolerance: 30.0,
        }
    }

    #[test]
    fn test_empty_reflectors_is_noop() {
        let route = route_beam(
            Vec2::new(600.0, 300.0),
            &[],
            Vec2::new(700.0, 280.0),
            &scenario_params(),
        );
        assert!(route.segments.is_empty());
        assert!(route.reflector.is_none());
        assert!(!route.hit);
    }

    #[test]
    fn test_scenario_target_in_range() {
        let emitter = Vec2::new(600.0, 300.0);
        let mirrors = [Vec2::new(200.0, 200.0), Vec2::new(650.0, 250.0)];
        let route = route_beam(emitter, &mirrors, Vec2::new(700.0, 280.0), &scenario_params());

        assert_eq!(route.reflector, Some(1));
        assert_eq!(route.segments.len(), 2);
        assert!((route.segments[0].length - 70.710_68).abs() < 1e-3);
        assert!((route.segments[1].length - 58.309_52).abs() < 1e-3);
        assert!(route.hit);
    }

    #[test]
    fn test_scenario_target_out_of_range() {
        let emitter = Vec2::new(600.0, 300.0);
        let mirrors = [Vec2::new(200.0, 200.0), Vec2::new(650.0, 250.0)];
        let route = route_beam(emitter, &mirrors, Vec2::new(900.0, 900.0), &scenario_params());

        assert_eq!(route.reflector, Some(1));
        assert!(route.segments[1].length > 150.0);
        assert!(!route.hit);
    }

    #[test]
    fn test_first_segment_geometry() {
        let emitter = Vec2::new(600.0, 300.0);
        let mirror = Vec2::new(500.0, 400.0);
        let route = route_beam(emitter, &[mirror], Vec2::new(0.0, 0.0), &scenario_params());
        let seg = route.segments[0];

        assert_eq!(seg.origin, emitter);
        assert!((seg.length - emitter.distance(mirror)).abs() < 1e-4);
        assert!((seg.angle - (100.0f32).atan2(-100.0)).abs() < 1e-6);
        assert!(seg.end().distance(mirror) < 1e-3);
    }

    #[test]
    fn test_second_segment_starts_at_mirror() {
        let mirror = Vec2::new(640.0, 320.0);
        let target = Vec2::new(700.0, 400.0);
        let route = route_beam(Vec2::new(600.0, 300.0), &[mirror], target, &scenario_params());

        assert_eq!(route.segments[1].origin, mirror);
        assert!(route.segments[1].end().distance(target) < 1e-3);
    }

    #[test]
    fn test_exact_tie_picks_first() {
        let emitter = Vec2::new(0.0, 0.0);
        let mirrors = [Vec2::new(10.0, 0.0), Vec2::new(-10.0, 0.0), Vec2::new(0.0, 10.0)];
        assert_eq!(nearest_reflector(emitter, &mirrors), Some(0));
    }

    #[test]
    fn test_range_boundary_is_inclusive() {
        let mirror = Vec2::new(600.0, 200.0);
        let target = Vec2::new(750.0, 200.0);
        let route = route_beam(Vec2::new(600.0, 300.0), &[mirror], target, &scenario_params());
        assert!(route.hit);
    }

    fn point() -> impl Strategy<Value = Vec2> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Vec2::new(x, y))
    }

    proptest! {
        #[test]
        fn prop_selects_minimum_distance(
            emitter in point(),
            mirrors in prop::collection::vec(point(), 1..6),
        ) {
            let idx = nearest_reflector(emitter, &mirrors).unwrap();
            let chosen = emitter.distance_squared(mirrors[idx]);
            for (i, m) in mirrors.iter().enumerate() {
                let d = emitter.distance_squared(*m);
                prop_assert!(chosen <= d);
                if i < idx {
                    prop_assert!(d > chosen);
                }
            }
        }

        #[test]
        fn prop_hit_iff_within_range(
            emitter in point(),
            mirrors in prop::collection::vec(point(), 1..6),
            target in point(),
        ) {
            let params = scenario_params();
            let route = route_beam(emitter, &mirrors, target, &params);
            let mirror = mirrors[route.reflector.unwrap()];
            let dist = mirror.distance(target);
            // Skip values too close to the boundary for f32 to decide
            prop_assume!((dist - params.max_range).abs() > 1e-2);
            prop_assert_eq!(route.hit, dist <= params.max_range);
        }
    }
}
