//! Splitting Comets entry point
//!
//! Headless driver: runs scripted rounds of the simulation and reports
//! what happened. The real game wires `tick` to a window, a renderer, and
//! an audio device; this binary exists to soak-test the core and to give
//! `RUST_LOG=debug` something to narrate.

use splitting_comets::Config;
use splitting_comets::sim::{ControlInput, GameEvent, GamePhase, SoundKind, WorldState, tick};

const FRAME_DT: f32 = 1.0 / 60.0;

fn main() {
    env_logger::init();
    log::info!("Splitting Comets (headless) starting...");

    let config = match std::env::var("COMETS_CONFIG") {
        Ok(path) => Config::load_or_default(&path),
        Err(_) => Config::default(),
    };

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xC0FFEE);

    let mut state = WorldState::new(config, seed);
    state.start_game();

    // Scripted pilot: thrust in a slow left-hand circle and let the guns
    // do the rest. Crude, but it exercises every system in the core.
    let input = ControlInput {
        forward: true,
        turn_left: true,
        ..Default::default()
    };

    let mut frames: u64 = 0;
    let mut sounds: u64 = 0;
    let max_frames = 60 * 150; // 150 simulated seconds

    while state.phase == GamePhase::Playing && frames < max_frames {
        tick(&mut state, &input, FRAME_DT);
        frames += 1;

        for event in state.drain_events() {
            match event {
                GameEvent::PlaySound(SoundKind::Fire) => sounds += 1,
                GameEvent::PlaySound(kind) => {
                    sounds += 1;
                    log::debug!("Sound requested: {kind:?}");
                }
                GameEvent::ScoreDelta(delta) => {
                    log::debug!("Score +{delta} -> {}", state.score);
                }
            }
        }

        if frames % (60 * 10) == 0 {
            log::info!(
                "t={:.0}s score={} hp={} comets={} big={} bullets={}",
                state.game_time,
                state.score,
                state.ship.hit_points,
                state.comets.len(),
                state.big_comets.len(),
                state.bullets.len()
            );
        }
    }

    let outcome = match state.phase {
        GamePhase::Win => "won",
        GamePhase::GameOver => "lost",
        _ => "timed out",
    };
    println!(
        "Round {outcome} after {:.1}s: score {}, hp {}, {} sound requests over {} frames",
        state.game_time, state.score, state.ship.hit_points, sounds, frames
    );
}
