//! Short-lived visual effect particles
//!
//! Particles never feed back into gameplay. They are emitted in bursts by
//! physics and collision events and advanced once per frame.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Distance at which a homing particle counts as arrived
const HOMING_ARRIVE_DIST: f32 = 10.0;
/// Acceleration toward the homing target per frame
const HOMING_FORCE: f32 = 2.0;
/// Velocity retained per frame while homing
const HOMING_DAMPING: f32 = 0.9;
/// Velocity retained per frame for free particles
const DRAG: f32 = 0.95;

/// Colour tag resolved by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleTint {
    /// Landing puff
    White,
    /// Translucent run dust
    Dust,
    /// Double-jump burst
    Cyan,
    /// Healing hearts flying to the health bar
    Pink,
    /// Bonus sparks flying to the score
    Gold,
    /// Impact explosion
    Ember,
}

impl ParticleTint {
    pub fn as_css(&self) -> &'static str {
        match self {
            ParticleTint::White => "white",
            ParticleTint::Dust => "rgba(255,255,255,0.6)",
            ParticleTint::Cyan => "#00ffff",
            ParticleTint::Pink => "#ff1493",
            ParticleTint::Gold => "#ffd700",
            ParticleTint::Ember => "#ff5500",
        }
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0-1, decreases by `decay` every frame
    pub life: f32,
    pub decay: f32,
    pub tint: ParticleTint,
    pub size: f32,
    /// Point the particle is attracted to, if homing
    pub target: Option<Vec2>,
}

/// Parameters for a burst of particles from a single point
#[derive(Debug, Clone, Copy)]
pub struct Burst {
    pub origin: Vec2,
    pub tint: ParticleTint,
    pub count: usize,
    /// Upper bound of the random speed
    pub speed: f32,
    /// Velocity added to every particle (drift)
    pub bias: Vec2,
    /// Base size before jitter
    pub size: f32,
    pub target: Option<Vec2>,
    /// Centre of the spray cone in radians (0 = +x, y down)
    pub heading: f32,
    /// Full width of the spray cone in radians
    pub spread: f32,
}

impl Burst {
    pub fn new(origin: Vec2, tint: ParticleTint, count: usize, speed: f32) -> Self {
        Self {
            origin,
            tint,
            count,
            speed,
            bias: Vec2::ZERO,
            size: 4.0,
            target: None,
            heading: 0.0,
            spread: TAU,
        }
    }

    /// Restrict the spray to `spread` radians centred on `heading`
    pub fn cone(mut self, heading: f32, spread: f32) -> Self {
        self.heading = heading;
        self.spread = spread.clamp(0.0, TAU);
        self
    }

    pub fn drift(mut self, bias: Vec2) -> Self {
        self.bias = bias;
        self
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn homing(mut self, target: Vec2) -> Self {
        self.target = Some(target);
        self
    }
}

/// Live particles plus the id allocator
#[derive(Debug, Clone, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
    next_id: u32,
    /// Budget; oldest particles are dropped beyond it
    cap: usize,
}

impl ParticleField {
    pub fn new(cap: usize) -> Self {
        Self {
            particles: Vec::new(),
            next_id: 0,
            cap,
        }
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn set_cap(&mut self, cap: usize) {
        self.cap = cap;
        self.enforce_cap();
    }

    /// Spawn `burst.count` particles with randomized direction, speed and size
    pub fn emit(&mut self, rng: &mut impl Rng, burst: &Burst) {
        if self.cap == 0 {
            return;
        }
        self.particles.reserve(burst.count);
        for _ in 0..burst.count {
            let angle = burst.heading + (rng.random::<f32>() - 0.5) * burst.spread;
            let speed = rng.random::<f32>() * burst.speed;
            let size = (burst.size * (0.5 + rng.random::<f32>())).max(1.0);
            let decay = 0.01 + rng.random::<f32>() * 0.02;
            let vel = Vec2::new(angle.cos(), angle.sin()) * speed + burst.bias;

            let id = self.next_id;
            self.next_id = self.next_id.wrapping_add(1);
            self.particles.push(Particle {
                id,
                pos: burst.origin,
                vel,
                life: 1.0,
                decay,
                tint: burst.tint,
                size,
                target: burst.target,
            });
        }
        self.enforce_cap();
    }

    /// Advance every particle one frame and drop the dead ones
    pub fn advance(&mut self) {
        let particles = std::mem::take(&mut self.particles);
        self.particles = advance_particles(particles);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    fn enforce_cap(&mut self) {
        if self.particles.len() > self.cap {
            let excess = self.particles.len() - self.cap;
            self.particles.drain(..excess);
        }
    }
}

/// Advance particles one frame.
///
/// Homing particles accelerate toward their target with damping and vanish on
/// arrival; free particles just drag. All particles integrate and decay, and
/// any with `life <= 0` are removed.
pub fn advance_particles(particles: Vec<Particle>) -> Vec<Particle> {
    particles
        .into_iter()
        .filter_map(|mut p| {
            match p.target {
                Some(target) => {
                    let to_target = target - p.pos;
                    let dist = to_target.length();
                    if dist <= HOMING_ARRIVE_DIST {
                        return None;
                    }
                    p.vel += to_target / dist * HOMING_FORCE;
                    p.vel *= HOMING_DAMPING;
                }
                None => p.vel *= DRAG,
            }
            p.pos += p.vel;
            p.life -= p.decay;
            (p.life > 0.0).then_some(p)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn particle(pos: Vec2, vel: Vec2, target: Option<Vec2>) -> Particle {
        Particle {
            id: 0,
            pos,
            vel,
            life: 1.0,
            decay: 0.02,
            tint: ParticleTint::White,
            size: 4.0,
            target,
        }
    }

    #[test]
    fn test_free_particle_drags_and_decays() {
        let out = advance_particles(vec![particle(Vec2::ZERO, Vec2::new(10.0, 0.0), None)]);
        assert_eq!(out.len(), 1);
        assert!((out[0].vel.x - 9.5).abs() < 1e-5);
        assert!((out[0].pos.x - 9.5).abs() < 1e-5);
        assert!((out[0].life - 0.98).abs() < 1e-5);
    }

    #[test]
    fn test_dead_particles_removed() {
        let mut p = particle(Vec2::ZERO, Vec2::ZERO, None);
        p.life = 0.01;
        assert!(advance_particles(vec![p]).is_empty());
    }

    #[test]
    fn test_homing_particle_moves_toward_target() {
        let target = Vec2::new(100.0, 0.0);
        let out = advance_particles(vec![particle(Vec2::ZERO, Vec2::ZERO, Some(target))]);
        assert!(out[0].vel.x > 0.0);
        assert!(out[0].pos.distance(target) < 100.0);
    }

    #[test]
    fn test_homing_particle_despawns_on_arrival() {
        let target = Vec2::new(5.0, 0.0);
        let out = advance_particles(vec![particle(Vec2::ZERO, Vec2::ZERO, Some(target))]);
        assert!(out.is_empty());
    }

    #[test]
    fn test_homing_particles_eventually_arrive() {
        let target = Vec2::new(300.0, -200.0);
        let mut particles = vec![particle(Vec2::ZERO, Vec2::new(-3.0, 2.0), Some(target))];
        particles[0].decay = 0.0;
        for _ in 0..400 {
            particles = advance_particles(particles);
        }
        assert!(particles.is_empty());
    }

    #[test]
    fn test_emit_assigns_fresh_ids_and_applies_bias() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut field = ParticleField::new(100);
        let burst = Burst::new(Vec2::new(10.0, 20.0), ParticleTint::Cyan, 8, 0.0)
            .drift(Vec2::new(-3.0, 0.0))
            .size(2.0);
        field.emit(&mut rng, &burst);
        field.emit(&mut rng, &burst);

        assert_eq!(field.len(), 16);
        let ids: Vec<u32> = field.as_slice().iter().map(|p| p.id).collect();
        assert_eq!(ids, (0..16).collect::<Vec<_>>());
        for p in field.as_slice() {
            assert_eq!(p.pos, Vec2::new(10.0, 20.0));
            assert_eq!(p.vel, Vec2::new(-3.0, 0.0));
            assert!(p.size >= 1.0 && p.size <= 3.0);
            assert!(p.decay >= 0.01 && p.decay <= 0.03);
        }
    }

    #[test]
    fn test_cap_drops_oldest() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut field = ParticleField::new(5);
        field.emit(&mut rng, &Burst::new(Vec2::ZERO, ParticleTint::White, 8, 1.0));
        assert_eq!(field.len(), 5);
        assert_eq!(field.as_slice()[0].id, 3);

        let mut off = ParticleField::new(0);
        off.emit(&mut rng, &Burst::new(Vec2::ZERO, ParticleTint::White, 8, 1.0));
        assert!(off.is_empty());
    }

    #[test]
    fn test_cone_limits_spray_direction() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut field = ParticleField::new(100);
        // Upper half only: y velocity never points down
        let burst = Burst::new(Vec2::ZERO, ParticleTint::Dust, 64, 2.0)
            .cone(-std::f32::consts::FRAC_PI_2, std::f32::consts::PI);
        field.emit(&mut rng, &burst);

        assert_eq!(field.len(), 64);
        for p in field.as_slice() {
            assert!(p.vel.y <= 1e-5, "{:?}", p.vel);
        }
    }

    #[test]
    fn test_default_burst_sprays_full_circle() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut field = ParticleField::new(500);
        field.emit(&mut rng, &Burst::new(Vec2::ZERO, ParticleTint::White, 400, 2.0));

        let slice = field.as_slice();
        assert!(slice.iter().any(|p| p.vel.x > 0.5 && p.vel.y.abs() < 0.5));
        assert!(slice.iter().any(|p| p.vel.x < -0.5 && p.vel.y.abs() < 0.5));
        assert!(slice.iter().any(|p| p.vel.y > 0.5));
        assert!(slice.iter().any(|p| p.vel.y < -0.5));
    }
}
