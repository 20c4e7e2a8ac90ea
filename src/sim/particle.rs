//! Decaying visual particles
//!
//! Particles never collide and never affect gameplay. Scatter comes from the
//! caller's RNG so a seeded match stays reproducible.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::PARTICLE_GRAVITY;

/// Color tag, resolved to real colors by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleColor {
    Cyan,
    Red,
    Orange,
    Yellow,
    White,
}

impl ParticleColor {
    pub const EXPLOSION: [ParticleColor; 4] = [Self::Red, Self::Orange, Self::Yellow, Self::White];
    pub const FLAME: [ParticleColor; 3] = [Self::Red, Self::Orange, Self::Yellow];

    /// Pick a color from a palette
    pub fn pick<R: Rng>(palette: &[ParticleColor], rng: &mut R) -> ParticleColor {
        palette[rng.random_range(0..palette.len())]
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: ParticleColor,
    /// Remaining life in ticks
    pub life: u32,
    pub max_life: u32,
    /// Base render radius (2-5)
    pub size: f32,
}

impl Particle {
    pub fn new<R: Rng>(pos: Vec2, vel: Vec2, color: ParticleColor, life: u32, rng: &mut R) -> Self {
        Self {
            pos,
            vel,
            color,
            life,
            max_life: life,
            size: rng.random_range(2..=5) as f32,
        }
    }

    /// Spawn with a random velocity in `[-spread, spread]` on both axes
    pub fn scattered<R: Rng>(
        pos: Vec2,
        spread: f32,
        color: ParticleColor,
        life: u32,
        rng: &mut R,
    ) -> Self {
        let vel = Vec2::new(
            rng.random_range(-spread..=spread),
            rng.random_range(-spread..=spread),
        );
        Self::new(pos, vel, color, life, rng)
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel.y += PARTICLE_GRAVITY;
        self.life = self.life.saturating_sub(1);
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    /// Remaining life as a 0-1 fraction (drives alpha)
    pub fn fade(&self) -> f32 {
        if self.max_life == 0 {
            0.0
        } else {
            self.life as f32 / self.max_life as f32
        }
    }

    /// Render radius, shrinking with age but never below 1
    pub fn render_size(&self) -> f32 {
        (self.size * self.fade()).floor().max(1.0)
    }
}

/// Advance every particle and drop the dead ones
pub fn update_particles(particles: &mut Vec<Particle>) {
    for particle in particles.iter_mut() {
        particle.update();
    }
    particles.retain(Particle::is_alive);
}

/// Drop the oldest particles beyond `cap`
pub fn cap_particles(particles: &mut Vec<Particle>, cap: usize) {
    if particles.len() > cap {
        let excess = particles.len() - cap;
        particles.drain(..excess);
    }
}
