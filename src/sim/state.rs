//! Game state and core simulation types
//!
//! `GameState` is the single authoritative aggregate for one run. It is built
//! fully populated by [`GameState::new`]; nothing in the simulation patches in
//! missing fields later.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::particles::ParticleField;
use super::spawn::Spawner;
use crate::consts::*;
use crate::tuning::Tuning;

/// Stream selector for the cosmetic RNG so effects never shift gameplay draws
const FX_STREAM: u64 = 0x5eed_f00d;

/// Where the current stage is in its lifecycle. Only moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StageStatus {
    /// Course still running
    #[default]
    Playing,
    /// Course cleared, world frozen, runner catching breath
    Exhausted,
    /// Victory pose
    Victory,
}

/// Hazard kinds. Every site that cares about kind matches exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardKind {
    /// Red block
    Standard,
    /// Tall block that hits harder
    Heavy,
    /// Small purple block
    Light,
    /// Rolling boulder that weaves back and forth
    Boulder,
    /// Heart pickup
    Heart,
}

/// What touching a hazard does to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardEffect {
    Damage(i32),
    Heal(i32),
}

impl HazardKind {
    pub const ALL: [HazardKind; 5] = [
        HazardKind::Standard,
        HazardKind::Heavy,
        HazardKind::Light,
        HazardKind::Boulder,
        HazardKind::Heart,
    ];

    /// Edge length of the hazard's box
    pub fn size(self) -> f32 {
        match self {
            HazardKind::Standard => OBSTACLE_SIZE,
            HazardKind::Heavy => OBSTACLE_SIZE_HEAVY,
            HazardKind::Light => OBSTACLE_SIZE_LIGHT,
            HazardKind::Boulder => OBSTACLE_SIZE,
            HazardKind::Heart => OBSTACLE_SIZE,
        }
    }

    pub fn effect(self, tuning: &Tuning) -> HazardEffect {
        match self {
            HazardKind::Standard => HazardEffect::Damage(tuning.damage_standard),
            HazardKind::Heavy => HazardEffect::Damage(tuning.damage_heavy),
            HazardKind::Light => HazardEffect::Damage(tuning.damage_light),
            HazardKind::Boulder => HazardEffect::Damage(tuning.damage_boulder),
            HazardKind::Heart => HazardEffect::Heal(tuning.heal_amount),
        }
    }

    /// Kinds allowed as the trailing half of a paired spawn
    pub fn is_simple(self) -> bool {
        match self {
            HazardKind::Standard | HazardKind::Heavy | HazardKind::Light => true,
            HazardKind::Boulder | HazardKind::Heart => false,
        }
    }

    pub fn oscillates(self) -> bool {
        match self {
            HazardKind::Boulder => true,
            HazardKind::Standard | HazardKind::Heavy | HazardKind::Light | HazardKind::Heart => {
                false
            }
        }
    }
}

/// An obstacle or pickup scrolling toward the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub kind: HazardKind,
    /// Oscillation phase (boulders only)
    pub phase: Option<f32>,
    /// Already counted toward score
    pub scored: bool,
}

impl Hazard {
    pub fn new(id: u32, x: f32, kind: HazardKind) -> Self {
        Self {
            id,
            x,
            kind,
            phase: None,
            scored: false,
        }
    }

    /// Right edge
    #[inline]
    pub fn trailing_edge(&self) -> f32 {
        self.x + self.kind.size()
    }
}

/// The runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Top edge
    pub y: f32,
    /// Vertical velocity (negative = up)
    pub dy: f32,
    pub grounded: bool,
    /// Jumps used since last ground contact (0-2)
    pub jump_count: u8,
    pub health: i32,
    pub max_health: i32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            y: crate::player_ground_y(),
            dy: 0.0,
            grounded: true,
            jump_count: 0,
            health: MAX_HEALTH,
            max_health: MAX_HEALTH,
        }
    }
}

impl PlayerState {
    /// Apply a health delta and clamp into `[0, max_health]`
    pub fn adjust_health(&mut self, delta: i32) {
        self.health = (self.health + delta).clamp(0, self.max_health);
    }
}

/// Cheap read-only snapshot for HUD layers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub score: u64,
    pub health: i32,
    pub max_health: i32,
    pub energy: f32,
    pub distance: f32,
    pub stage_progress: f32,
    pub time_of_day: f32,
    pub stage_status: StageStatus,
    pub game_over: bool,
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gameplay RNG (spawner decisions, boulder phases)
    pub rng: Pcg32,
    /// Cosmetic RNG (particle spray, dust)
    pub fx_rng: Pcg32,
    /// Balance in effect for this run
    pub tuning: Tuning,
    pub player: PlayerState,
    /// Live hazards in spawn order
    pub hazards: Vec<Hazard>,
    /// Visual particles (not gameplay-affecting)
    pub particles: ParticleField,
    /// Hazard id allocator
    pub spawner: Spawner,
    pub score: u64,
    /// World scroll, frozen once the stage leaves `Playing`
    pub distance: f32,
    /// Double-jump resource, `[0, MAX_ENERGY]`
    pub energy: f32,
    /// Cosmetic clock in hours
    pub time_of_day: f32,
    /// `distance / course_length`, clamped to `[0, 1]`
    pub stage_progress: f32,
    pub stage_id: String,
    pub stage_status: StageStatus,
    /// Frames elapsed since the stage became exhausted
    pub exhausted_frames: u32,
    /// Distance at which the last paired spawn happened
    pub last_double_spawn: f32,
    /// Spawn dust while running
    pub run_dust: bool,
    pub game_started: bool,
    pub game_over: bool,
    pub debug: bool,
    /// Frames simulated while playing
    pub frame: u64,
}

impl GameState {
    /// Create a new game state with the given seed on the given stage
    pub fn new(seed: u64, stage_id: &str) -> Self {
        Self::with_tuning(seed, stage_id, Tuning::default())
    }

    pub fn with_tuning(seed: u64, stage_id: &str, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            fx_rng: Pcg32::new(seed, FX_STREAM),
            tuning,
            player: PlayerState::default(),
            hazards: Vec::new(),
            particles: ParticleField::new(tuning.max_particles),
            spawner: Spawner::default(),
            score: 0,
            distance: 0.0,
            energy: MAX_ENERGY,
            time_of_day: START_HOUR,
            stage_progress: 0.0,
            stage_id: stage_id.to_string(),
            stage_status: StageStatus::Playing,
            exhausted_frames: 0,
            last_double_spawn: 0.0,
            run_dust: true,
            game_started: false,
            game_over: false,
            debug: false,
            frame: 0,
        }
    }

    /// Whether physics, spawning and collisions run this frame
    pub fn is_simulating(&self) -> bool {
        self.game_started && !self.game_over && self.stage_status == StageStatus::Playing
    }

    pub fn metrics(&self) -> Metrics {
        Metrics {
            score: self.score,
            health: self.player.health,
            max_health: self.player.max_health,
            energy: self.energy,
            distance: self.distance,
            stage_progress: self.stage_progress,
            time_of_day: self.time_of_day,
            stage_status: self.stage_status,
            game_over: self.game_over,
        }
    }

    /// Add energy, clamped into `[0, MAX_ENERGY]`
    pub fn adjust_energy(&mut self, delta: f32) {
        self.energy = (self.energy + delta).clamp(0.0, MAX_ENERGY);
    }
}

/// Fresh run on the first built-in stage with a random seed
pub fn create_initial_state() -> GameState {
    GameState::new(rand::random(), super::stage::DEFAULT_STAGE_ID)
}
