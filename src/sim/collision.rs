//! Player vs hazard collision resolution
//!
//! Both boxes are shrunk by a forgiveness margin before testing, so grazing
//! contact never counts. Hearts heal (or score when already healthy) and
//! scanning continues; the first damaging hit ends the scan for this frame.

use glam::Vec2;

use super::particles::{Burst, ParticleTint};
use super::state::{GameState, Hazard, HazardEffect};
use crate::consts::*;

/// Axis-aligned box, `min` top-left and `max` bottom-right
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, size: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + size, y + size),
        }
    }

    /// Shrink inward on every side
    pub fn shrink(&self, margin: f32) -> Self {
        Self {
            min: self.min + Vec2::splat(margin),
            max: self.max - Vec2::splat(margin),
        }
    }

    /// Strict overlap; touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}

pub fn player_box(state: &GameState) -> Aabb {
    Aabb::new(PLAYER_X, state.player.y, PLAYER_SIZE)
}

/// Ground-aligned box sized by kind
pub fn hazard_box(hazard: &Hazard) -> Aabb {
    let size = hazard.kind.size();
    Aabb::new(hazard.x, crate::ground_aligned_y(size), size)
}

/// Overlap test with the forgiveness margin applied to both boxes
pub fn hits(player: &Aabb, hazard: &Aabb, margin: f32) -> bool {
    player.shrink(margin).overlaps(&hazard.shrink(margin))
}

/// Resolve this frame's contacts. Returns true if anything was processed.
pub fn resolve_collisions(state: &mut GameState) -> bool {
    if state.game_over {
        return false;
    }
    let player = player_box(state);
    let margin = state.tuning.hit_margin;
    let mut processed = false;

    let mut i = 0;
    while i < state.hazards.len() {
        let hazard_aabb = hazard_box(&state.hazards[i]);
        if !hits(&player, &hazard_aabb, margin) {
            i += 1;
            continue;
        }

        let hazard = state.hazards.remove(i);
        processed = true;

        match hazard.kind.effect(&state.tuning) {
            HazardEffect::Heal(amount) => {
                let burst = if state.player.health < state.player.max_health {
                    state.player.adjust_health(amount);
                    log::debug!("Heart #{} healed to {}", hazard.id, state.player.health);
                    Burst::new(hazard_aabb.center(), ParticleTint::Pink, 15, 3.0)
                        .homing(crate::anchor(HEALTH_ANCHOR))
                } else {
                    state.score += state.tuning.heal_bonus_score;
                    log::debug!(
                        "Heart #{} at full health: +{}",
                        hazard.id,
                        state.tuning.heal_bonus_score
                    );
                    Burst::new(hazard_aabb.center(), ParticleTint::Gold, 15, 3.0)
                        .homing(crate::anchor(SCORE_ANCHOR))
                };
                state.particles.emit(&mut state.fx_rng, &burst);
            }
            HazardEffect::Damage(damage) => {
                // Raw subtraction first; clamped below before anyone observes it
                state.player.health -= damage;

                let size = hazard.kind.size();
                let count = (size / 2.0) as usize;
                let burst = Burst::new(hazard_aabb.center(), ParticleTint::Ember, count, 5.0)
                    .size(size / 8.0);
                state.particles.emit(&mut state.fx_rng, &burst);

                if state.player.health <= 0 {
                    state.player.health = 0;
                    state.game_over = true;
                    log::info!("Game over: score {}, distance {:.0}", state.score, state.distance);
                } else {
                    log::debug!("Hit by {:?} #{} for {}", hazard.kind, hazard.id, damage);
                }
                return true;
            }
        }
    }

    processed
}
