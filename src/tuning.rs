//! Data-driven game balance
//!
//! Every number that shapes how the run *feels* lives here so it can be
//! tweaked from a JSON file without touching the simulation code. Defaults
//! reproduce the shipped balance.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Balance knobs read by physics, spawning, collisions and stage bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Downward acceleration per frame
    pub gravity: f32,
    /// Vertical velocity applied on every jump (negative = up)
    pub jump_velocity: f32,
    /// Energy regained per grounded frame
    pub energy_regen: f32,
    /// Energy consumed by an air jump (also the minimum required)
    pub double_jump_cost: f32,

    // === Hazards ===
    pub damage_standard: i32,
    pub damage_heavy: i32,
    pub damage_light: i32,
    pub damage_boulder: i32,
    /// Health restored by a heart
    pub heal_amount: i32,
    /// Score granted by a heart collected at full health
    pub heal_bonus_score: u64,
    /// Inward shrink applied to both hitboxes
    pub hit_margin: f32,
    /// Phase advance per frame for oscillating hazards
    pub boulder_phase_step: f32,
    /// Speed swing of oscillating hazards
    pub boulder_amplitude: f32,

    // === Spawner ===
    /// Chance per frame to spawn early once the minimum gap is cleared
    pub organic_spawn_chance: f32,
    /// Chance a spawn is a heart (when the stage allows hearts)
    pub heal_chance: f32,
    /// Chance an eligible spawn becomes a pair
    pub double_spawn_chance: f32,
    /// Distance that must scroll between two pairs
    pub double_spawn_cooldown: f32,
    /// Horizontal offset of the second hazard of a pair
    pub double_spawn_gap: f32,
    /// Hard cap on live hazards
    pub max_hazards: usize,

    // === Stage ===
    /// Distance past the course length before the run is over
    pub victory_overshoot: f32,
    /// Frames spent exhausted before the victory pose
    pub victory_delay_frames: u32,
    /// Stage progress at which dusk begins
    pub dusk_start: f32,

    // === Effects ===
    /// Per-frame chance of run dust while grounded
    pub dust_chance: f32,
    /// Live particle budget
    pub max_particles: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.6,
            jump_velocity: -12.0,
            energy_regen: 0.5,
            double_jump_cost: 100.0,

            damage_standard: 4,
            damage_heavy: 5,
            damage_light: 2,
            damage_boulder: 4,
            heal_amount: 3,
            heal_bonus_score: 5,
            hit_margin: 5.0,
            boulder_phase_step: 0.1,
            boulder_amplitude: 3.0,

            organic_spawn_chance: 0.05,
            heal_chance: 0.05,
            double_spawn_chance: 0.3,
            double_spawn_cooldown: 2500.0,
            double_spawn_gap: 90.0,
            max_hazards: 20,

            victory_overshoot: 200.0,
            victory_delay_frames: 90,
            dusk_start: 0.5,

            dust_chance: 0.4,
            max_particles: 500,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load tuning from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(err) => {
                    log::warn!("Invalid tuning file {}: {}", path.display(), err);
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!("Could not read tuning {}: {}", path.display(), err);
                Self::default()
            }
        }
    }
}
