//! Stickman Runner headless entry point
//!
//! Runs one stage with a simple autopilot and prints the final metrics as
//! JSON. Useful for balance checks without a renderer:
//!
//! ```text
//! stickman-runner [stage_id] [seed] [max_frames]
//! ```
//!
//! `RUNNER_TUNING`, `RUNNER_SETTINGS` and `RUNNER_SCORES` point at optional
//! JSON files for tuning, settings and the high score board.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use stickman_runner::consts::*;
use stickman_runner::sim::{
    GameState, HazardEffect, JumpOutcome, Simulation, StageCatalog, StageStatus,
};
use stickman_runner::{HighScores, Settings, Tuning};

/// Frames simulated when no limit is given (5 minutes at 60 fps)
const DEFAULT_MAX_FRAMES: u64 = 5 * 60 * 60;

/// Look-ahead window in which the autopilot reacts to a hazard
const REACTION_WINDOW: f32 = 70.0;

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let stage_id = args.next().unwrap_or_else(|| "stage_1_city".to_string());
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(rand::random);
    let max_frames = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FRAMES);

    let tuning = env_path("RUNNER_TUNING")
        .map(|p| Tuning::load(&p))
        .unwrap_or_default();
    let settings = env_path("RUNNER_SETTINGS")
        .map(|p| Settings::load(&p))
        .unwrap_or_default();
    let scores_path = env_path("RUNNER_SCORES");
    let mut scores = scores_path
        .as_deref()
        .map(HighScores::load)
        .unwrap_or_default();

    let mut sim = Simulation::with_config(seed, StageCatalog::builtin(), &stage_id, tuning);
    sim.apply_settings(&settings);
    sim.set_best_score(scores.best());

    log::info!(
        "Stickman Runner (headless) - stage '{}', seed {}, up to {} frames",
        sim.stage().id,
        seed,
        max_frames
    );

    let mut air_jumps = 0u32;
    let mut hits = 0u32;
    for _ in 0..max_frames {
        if wants_jump(sim.state()) && sim.request_jump() == JumpOutcome::Air {
            air_jumps += 1;
        }
        let report = sim.advance_frame();
        if report.collided {
            hits += 1;
        }
        if report.new_high_score {
            log::info!("New high score reached: {}", sim.metrics().score);
        }
        if sim.is_over() || sim.metrics().stage_status == StageStatus::Victory {
            break;
        }
    }

    let metrics = sim.metrics();
    log::info!(
        "Run finished after {} frames: {} contacts, {} air jumps",
        sim.state().frame,
        hits,
        air_jumps
    );

    let rank = scores.add_score(metrics.score, &sim.stage().id, metrics.distance, unix_now());
    if let Some(rank) = rank {
        log::info!("Leaderboard rank #{}", rank);
        if let Some(path) = &scores_path {
            if let Err(err) = scores.save(path) {
                log::warn!("Could not save high scores: {}", err);
            }
        }
    }

    match serde_json::to_string_pretty(&metrics) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("Could not encode metrics: {}", err),
    }
}

/// Jump when a damaging hazard is about to reach the runner. Air jumps are
/// spent only when the hazard is already underneath and the runner is falling.
fn wants_jump(state: &GameState) -> bool {
    let threat = state.hazards.iter().find(|h| {
        !h.scored
            && matches!(h.kind.effect(&state.tuning), HazardEffect::Damage(_))
            && h.trailing_edge() > PLAYER_X
    });
    let Some(hazard) = threat else {
        return false;
    };
    let gap = hazard.x - (PLAYER_X + PLAYER_SIZE);

    if state.player.grounded {
        return gap < REACTION_WINDOW;
    }
    state.player.dy > 0.0 && gap < PLAYER_SIZE && state.energy >= state.tuning.double_jump_cost
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var_os(key).map(PathBuf::from)
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
