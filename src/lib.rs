//! Stickman Runner - A neon endless-runner
//!
//! Core modules:
//! - `sim`: Deterministic per-frame simulation (physics, spawning, collisions, stages)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences the core honours (particle budget, debug)
//! - `highscores`: Leaderboard and best-score comparison
//!
//! Rendering, audio, input plumbing and menus live outside this crate. They
//! drive a [`sim::Simulation`] through `advance_frame` / `request_jump` and read
//! back [`sim::Metrics`] snapshots.

pub mod highscores;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Display ticks per second the simulation is tuned for
    pub const FRAME_RATE: f32 = 60.0;

    /// Logical screen dimensions (presentation scales these)
    pub const SCREEN_WIDTH: f32 = 600.0;
    pub const SCREEN_HEIGHT: f32 = 350.0;
    pub const GROUND_HEIGHT: f32 = 50.0;

    /// Player box, anchored at a fixed horizontal position
    pub const PLAYER_SIZE: f32 = 40.0;
    pub const PLAYER_X: f32 = 50.0;
    pub const MAX_HEALTH: i32 = 10;

    /// Energy bar bounds
    pub const MAX_ENERGY: f32 = 100.0;

    /// Hazard sizes (square, ground-aligned)
    pub const OBSTACLE_SIZE: f32 = 40.0;
    pub const OBSTACLE_SIZE_HEAVY: f32 = 46.0;
    pub const OBSTACLE_SIZE_LIGHT: f32 = 30.0;

    /// Spawn offset for the very first hazard of a run
    pub const FIRST_SPAWN_OFFSET: f32 = 200.0;

    /// HUD anchors homing particles fly toward
    pub const HEALTH_ANCHOR: (f32, f32) = (70.0, 28.0);
    pub const SCORE_ANCHOR: (f32, f32) = (SCREEN_WIDTH - 60.0, 28.0);

    /// Time-of-day scale (hours on a 24h clock)
    pub const DAY_LENGTH_HOURS: f32 = 24.0;
    pub const START_HOUR: f32 = 12.0;
    pub const DUSK_HOUR: f32 = 18.0;
    pub const DAWN_HOUR: f32 = 6.0;
}

/// Y coordinate of the player's top edge when standing on the ground
#[inline]
pub fn player_ground_y() -> f32 {
    consts::SCREEN_HEIGHT - consts::GROUND_HEIGHT - consts::PLAYER_SIZE
}

/// Y coordinate of the top edge of a ground-aligned box of the given size
#[inline]
pub fn ground_aligned_y(size: f32) -> f32 {
    consts::SCREEN_HEIGHT - consts::GROUND_HEIGHT - size
}

/// Convert a tuple anchor into a point
#[inline]
pub fn anchor(point: (f32, f32)) -> Vec2 {
    Vec2::new(point.0, point.1)
}

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
