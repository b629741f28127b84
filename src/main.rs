//! Cap Pong entry point
//!
//! Runs a short headless demo of the simulation: serve, a scripted paddle
//! sweep, and fixed-step ticks until the match ends. A presentation shell
//! would drive the same API from its own event loop.

use std::env;
use std::process::ExitCode;

use cap_pong::Tuning;
use cap_pong::consts::SIM_DT;
use cap_pong::sim::{GameEvent, GamePhase, GameState, InputAction, tick};

fn main() -> ExitCode {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let tuning = match env::args().nth(1) {
        Some(path) => match Tuning::load(path.as_ref()) {
            Ok(t) => t,
            Err(e) => {
                log::error!("failed to load tuning from {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };

    let mut state = GameState::new(tuning);
    state.handle_input(InputAction::Serve);

    // Scripted sweep: hold right for a second, then left for two
    let mut frame: u64 = 0;
    while state.phase != GamePhase::GameOver && frame < 36_000 {
        match frame {
            0 => state.handle_input(InputAction::MoveRightStart),
            60 => {
                state.handle_input(InputAction::MoveRightEnd);
                state.handle_input(InputAction::MoveLeftStart);
            }
            180 => state.handle_input(InputAction::MoveLeftEnd),
            _ => {}
        }

        tick(&mut state, SIM_DT);

        for event in state.drain_events() {
            if event == GameEvent::BallPaddleHit {
                log::info!("hit! score {}", state.score);
            }
        }

        // Relaunch each fresh round so the demo plays itself out
        if state.phase == GamePhase::Serve {
            state.handle_input(InputAction::Serve);
        }
        frame += 1;
    }

    log::info!(
        "demo finished after {frame} frames: score {}, lives {}",
        state.score,
        state.lives
    );
    ExitCode::SUCCESS
}
