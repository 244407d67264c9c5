//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per display frame
//! - Seeded RNG only (separate streams for gameplay and effects)
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod particles;
pub mod physics;
pub mod progress;
pub mod spawn;
pub mod stage;
pub mod state;
pub mod tick;

pub use collision::{Aabb, resolve_collisions};
pub use particles::{Burst, Particle, ParticleField, ParticleTint, advance_particles};
pub use physics::{JumpOutcome, advance_physics, request_jump};
pub use progress::{stage_progress, time_of_day, update_stage};
pub use spawn::{Spawner, reset_spawner, spawn_obstacle};
pub use stage::{
    BackgroundKind, DEFAULT_STAGE_ID, Difficulty, StageCatalog, StageConfig, Theme,
    TimelineEffect, TimelineEvent, Trigger,
};
pub use state::{
    GameState, Hazard, HazardEffect, HazardKind, Metrics, PlayerState, StageStatus,
    create_initial_state,
};
pub use tick::{FrameReport, Simulation, advance_frame};
