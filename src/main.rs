//! Cosmic Light Brew entry point
//!
//! The browser build is driven from JavaScript through `web::GameHandle`.
//! Natively this runs a headless demo with a simple autopilot, which is handy
//! for eyeballing balance changes in the logs.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::Vec2;

    use cosmic_light_brew::Settings;
    use cosmic_light_brew::consts::*;
    use cosmic_light_brew::sim::{
        FrameDriver, GameEvent, GamePhase, GameState, InputEvent, build_snapshot,
        nearest_reflector,
    };

    /// Two minutes of play
    const DEMO_FRAMES: u32 = 120 * 60;

    /// Steer toward the closest coffee ahead and solve any light wall
    fn autopilot(state: &GameState, driver: &mut FrameDriver) {
        let ship = state.ship;
        let coffee = state
            .coffees
            .iter()
            .filter(|c| c.pos.x > ship.x)
            .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));

        let dy = match coffee {
            Some(c) if (c.pos.y - ship.y).abs() > 5.0 => (c.pos.y - ship.y).signum(),
            _ => 0.0,
        };
        driver.set_movement(Vec2::new(0.0, dy));

        let Some(puzzle) = &state.puzzle else {
            return;
        };
        if driver.pending() > 0 {
            return;
        }
        // Park the beam-catching mirror halfway between wall and target
        let spot = (puzzle.emitter + puzzle.target.pos) / 2.0;
        if let Some(i) = nearest_reflector(puzzle.emitter, &puzzle.mirrors) {
            let mirror = puzzle.mirrors[i];
            if mirror.distance(spot) > 1.0 {
                driver.push(InputEvent::PointerDown(mirror));
                driver.push(InputEvent::PointerMove(spot));
                driver.push(InputEvent::PointerUp);
            }
        }
    }

    pub fn run(seed: u64) {
        log::info!("Cosmic Light Brew (native demo) starting with seed {}", seed);

        let settings = Settings::load();
        let mut state = GameState::new(seed);
        let mut driver = FrameDriver::new();
        let mut solved = 0;
        let mut crashes = 0;

        for _ in 0..DEMO_FRAMES {
            autopilot(&state, &mut driver);
            driver.advance(&mut state, SIM_DT);

            let snapshot = build_snapshot(&mut state, &settings, true);
            for event in &snapshot.events {
                match event {
                    GameEvent::PuzzleSolved { .. } => solved += 1,
                    GameEvent::Crash => crashes += 1,
                    _ => {}
                }
            }
            if snapshot.phase == GamePhase::GameOver {
                break;
            }
        }

        println!(
            "Demo finished after {:.1}s: {} coffee, {} energy, {} puzzles solved, {} crashes",
            state.time_ticks as f32 * SIM_DT,
            state.score,
            state.energy,
            solved,
            crashes
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    demo::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_start, this is just to satisfy the compiler
}
