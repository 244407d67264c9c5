//! Per-frame simulation driver
//!
//! One call to [`advance_frame`] runs physics, spawning, particle update,
//! collision resolution and stage bookkeeping, strictly in that order, so
//! collisions see this frame's hazard positions and collision particles start
//! moving next frame.

use super::collision::resolve_collisions;
use super::physics::{self, JumpOutcome};
use super::progress::update_stage;
use super::spawn::spawn_obstacle;
use super::stage::{DEFAULT_STAGE_ID, StageCatalog, StageConfig};
use super::state::{GameState, Metrics, StageStatus};
use crate::settings::Settings;
use crate::tuning::Tuning;

/// What happened during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// A hazard was consumed this frame
    pub collided: bool,
    /// The run ended this frame
    pub died: bool,
    /// Stage status entered this frame
    pub transition: Option<StageStatus>,
    /// Score passed the best known score this frame
    pub new_high_score: bool,
}

/// Advance the game state by one frame.
///
/// Physics, spawning and collisions only run while the run is started, alive
/// and the stage is still `Playing`. Particles always finish their motion, and
/// stage bookkeeping runs for every started run.
pub fn advance_frame(state: &mut GameState, stage: &StageConfig) -> FrameReport {
    let mut report = FrameReport::default();

    if state.is_simulating() {
        state.frame += 1;
        physics::advance_physics(state, stage.difficulty.base_speed);
        spawn_obstacle(state, stage);
        state.particles.advance();
        report.collided = resolve_collisions(state);
        report.died = state.game_over;

        if state.debug && report.collided {
            log::info!(
                "[frame {}] contact: health {}/{}, score {}, {} hazards live",
                state.frame,
                state.player.health,
                state.player.max_health,
                state.score,
                state.hazards.len()
            );
        }
    } else {
        state.particles.advance();
    }

    if state.game_started {
        report.transition = update_stage(state, stage);
    }

    report
}

/// Owns the authoritative state of a run.
///
/// Hosts call [`Simulation::advance_frame`] once per display tick and
/// [`Simulation::request_jump`] on input. Both are synchronous; a host that
/// delivers input from another thread should wrap the simulation in a mutex
/// so a jump never lands mid-frame.
#[derive(Debug, Clone)]
pub struct Simulation {
    state: GameState,
    catalog: StageCatalog,
    stage: StageConfig,
    tuning: Tuning,
    settings: Settings,
    /// Best score known before this run started
    best_score: u64,
    /// This run already beat `best_score`
    beat_best: bool,
}

impl Simulation {
    /// Default catalog, first stage, default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, StageCatalog::builtin(), DEFAULT_STAGE_ID, Tuning::default())
    }

    pub fn with_config(seed: u64, catalog: StageCatalog, stage_id: &str, tuning: Tuning) -> Self {
        let (catalog, stage) = select_stage(catalog, stage_id);
        let settings = Settings::default();
        let state = fresh_state(seed, &stage, tuning, &settings);
        Self {
            state,
            catalog,
            stage,
            tuning,
            settings,
            best_score: 0,
            beat_best: false,
        }
    }

    /// Read-only view of the full state (hazards, particles) for renderers
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn stage(&self) -> &StageConfig {
        &self.stage
    }

    pub fn catalog(&self) -> &StageCatalog {
        &self.catalog
    }

    pub fn metrics(&self) -> Metrics {
        self.state.metrics()
    }

    pub fn is_started(&self) -> bool {
        self.state.game_started
    }

    pub fn is_over(&self) -> bool {
        self.state.game_over
    }

    /// Begin the run (idempotent)
    pub fn start(&mut self) {
        if !self.state.game_started {
            self.state.game_started = true;
            log::info!("Run started on '{}' (seed {})", self.stage.id, self.state.seed);
        }
    }

    pub fn advance_frame(&mut self) -> FrameReport {
        let mut report = advance_frame(&mut self.state, &self.stage);

        if !self.beat_best && self.state.score > self.best_score {
            self.beat_best = true;
            report.new_high_score = true;
            log::info!("New best score: {}", self.state.score);
        }

        report
    }

    /// Jump intent from input. Starts an unstarted run; ignored once the run
    /// is over or the stage is cleared, so hosts call [`Simulation::restart`]
    /// to begin a new run after game over.
    pub fn request_jump(&mut self) -> JumpOutcome {
        if self.state.game_over || self.state.stage_status != StageStatus::Playing {
            return JumpOutcome::Ignored;
        }
        self.start();
        physics::request_jump(&mut self.state)
    }

    /// Best score known, including the current run
    pub fn best_score(&self) -> u64 {
        self.best_score.max(self.state.score)
    }

    /// Whether the current run has beaten the previously known best
    pub fn is_new_high_score(&self) -> bool {
        self.state.score > self.best_score
    }

    /// Seed the comparison with a best score loaded by the host
    pub fn set_best_score(&mut self, best: u64) {
        self.best_score = best;
        self.beat_best = self.state.score > best;
    }

    /// Replace the run with a fresh one on the same stage
    pub fn restart(&mut self, seed: u64) {
        self.best_score = self.best_score();
        self.beat_best = false;
        self.state = fresh_state(seed, &self.stage, self.tuning, &self.settings);
        log::info!("Restarted '{}' with seed {}", self.stage.id, seed);
    }

    /// Restart on another stage. Returns false if the id is unknown.
    pub fn switch_stage(&mut self, stage_id: &str, seed: u64) -> bool {
        let Some(stage) = self.catalog.get(stage_id) else {
            log::warn!("Unknown stage '{}'", stage_id);
            return false;
        };
        self.stage = stage.clone();
        self.restart(seed);
        true
    }

    /// Next stage in the catalog, if any
    pub fn next_stage_id(&self) -> Option<&str> {
        self.catalog.next_after(&self.stage.id).map(|s| s.id.as_str())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Apply preferences that affect simulation (particle budget, dust, debug)
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.settings = settings.clone();
        apply_settings_to(&mut self.state, settings);
    }
}

/// Resolve the starting stage, swapping in the built-in stages when the
/// catalog is empty
fn select_stage(catalog: StageCatalog, stage_id: &str) -> (StageCatalog, StageConfig) {
    if let Some(stage) = catalog.get_or_first(stage_id).cloned() {
        return (catalog, stage);
    }
    log::warn!("Stage catalog is empty, using the built-in stages");
    select_stage(StageCatalog::builtin(), stage_id)
}

fn fresh_state(seed: u64, stage: &StageConfig, tuning: Tuning, settings: &Settings) -> GameState {
    let mut state = GameState::with_tuning(seed, &stage.id, tuning);
    apply_settings_to(&mut state, settings);
    state
}

fn apply_settings_to(state: &mut GameState, settings: &Settings) {
    let cap = settings.max_particles().min(state.tuning.max_particles);
    state.particles.set_cap(cap);
    state.run_dust = settings.effective_run_dust();
    state.debug = settings.debug;
}
