//! Player motion, world scroll and hazard movement
//!
//! Units are pixels and frames. Y grows downward, so jumps use negative
//! velocity and gravity is positive.

use glam::Vec2;
use rand::Rng;

use super::particles::{Burst, ParticleTint};
use super::state::GameState;
use crate::consts::*;

/// Result of a jump request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOutcome {
    /// Free jump off the ground
    Grounded,
    /// Energy-paid air jump
    Air,
    /// Not allowed right now
    Ignored,
}

impl JumpOutcome {
    pub fn jumped(self) -> bool {
        self != JumpOutcome::Ignored
    }
}

/// Advance player, world scroll and hazards by one frame at `scroll_speed`
pub fn advance_physics(state: &mut GameState, scroll_speed: f32) {
    let ground_y = crate::player_ground_y();
    let tuning = state.tuning;

    // Gravity
    state.player.dy += tuning.gravity;
    state.player.y += state.player.dy;

    state.distance += scroll_speed;

    if state.player.y >= ground_y {
        let landed = !state.player.grounded;

        state.player.y = ground_y;
        state.player.dy = 0.0;
        state.player.grounded = true;
        state.player.jump_count = 0;
        state.adjust_energy(tuning.energy_regen);

        let feet = Vec2::new(PLAYER_X + PLAYER_SIZE / 2.0, ground_y + PLAYER_SIZE);
        if landed {
            let burst = Burst::new(feet, ParticleTint::White, 20, 4.0).drift(Vec2::new(-3.0, -1.0));
            state.particles.emit(&mut state.fx_rng, &burst);
        }

        if state.run_dust && state.fx_rng.random::<f32>() < tuning.dust_chance {
            let burst = Burst::new(Vec2::new(PLAYER_X, feet.y), ParticleTint::Dust, 3, 1.0)
                .drift(Vec2::new(-4.0, -0.5))
                .cone(-std::f32::consts::FRAC_PI_2, std::f32::consts::PI)
                .size(2.0);
            state.particles.emit(&mut state.fx_rng, &burst);
        }
    } else {
        state.player.grounded = false;
    }

    for hazard in &mut state.hazards {
        let mut speed = scroll_speed;
        if let Some(phase) = hazard.phase.as_mut() {
            *phase += tuning.boulder_phase_step;
            speed += phase.cos() * tuning.boulder_amplitude;
        }
        hazard.x -= speed;

        if !hazard.scored && hazard.trailing_edge() < PLAYER_X {
            hazard.scored = true;
            state.score += 1;
        }
    }

    state.hazards.retain(|h| h.trailing_edge() > 0.0);
}

/// Try to jump. Ground jumps are free; one air jump costs energy.
pub fn request_jump(state: &mut GameState) -> JumpOutcome {
    let tuning = state.tuning;

    if state.player.grounded {
        state.player.dy = tuning.jump_velocity;
        state.player.grounded = false;
        state.player.jump_count = 1;
        return JumpOutcome::Grounded;
    }

    if state.player.jump_count < 2 && state.energy >= tuning.double_jump_cost {
        state.player.dy = tuning.jump_velocity;
        state.player.jump_count += 1;
        state.adjust_energy(-tuning.double_jump_cost);

        let origin = Vec2::new(PLAYER_X + PLAYER_SIZE / 2.0, state.player.y + PLAYER_SIZE);
        let burst = Burst::new(origin, ParticleTint::Cyan, 30, 6.0).drift(Vec2::new(-3.0, 0.0));
        state.particles.emit(&mut state.fx_rng, &burst);
        return JumpOutcome::Air;
    }

    JumpOutcome::Ignored
}
