//! Projectiles: straight lightning bolts and homing rockets
//!
//! A projectile lives until it leaves the arena (plus margin) or lands a hit.
//! Inactive projectiles are purged by their owner at the end of the tick.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::particle::{Particle, ParticleColor, update_particles};
use super::state::Facing;
use crate::consts::*;
use crate::settings::ArenaConfig;

/// Lightning bolt state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bolt {
    /// Hypercharged bolt (more damage, faster, branching visuals)
    pub enhanced: bool,
    /// Animation counter, advanced once per tick
    pub frame: u32,
    /// Visual tilt in degrees (wave ability); motion stays horizontal
    pub tilt_deg: f32,
    /// Electric trail owned by this bolt
    pub particles: Vec<Particle>,
}

/// Homing rocket state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rocket {
    /// Y coordinate being steered toward, refreshed every tick
    pub target_y: f32,
    /// Vertical speed, clamped to +/- ROCKET_MAX_VERTICAL_SPEED
    pub speed_y: f32,
    /// Recent positions, oldest first
    pub trail: VecDeque<Vec2>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProjectileKind {
    Bolt(Bolt),
    Rocket(Rocket),
}

/// A moving hazard with a damage payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub direction: Facing,
    pub active: bool,
    pub damage: f32,
    /// Horizontal speed per tick
    pub speed: f32,
    pub kind: ProjectileKind,
}

impl Projectile {
    /// A bolt whose top-left corner sits at `pos`
    pub fn bolt(pos: Vec2, direction: Facing, enhanced: bool) -> Self {
        let (damage, speed) = if enhanced {
            (BOLT_ENHANCED_DAMAGE, BOLT_ENHANCED_SPEED)
        } else {
            (BOLT_DAMAGE, BOLT_SPEED)
        };
        Self {
            pos,
            direction,
            active: true,
            damage,
            speed,
            kind: ProjectileKind::Bolt(Bolt {
                enhanced,
                frame: 0,
                tilt_deg: 0.0,
                particles: Vec::new(),
            }),
        }
    }

    /// A rocket centered on `pos`, steering toward `target_y`
    pub fn rocket(pos: Vec2, direction: Facing, target_y: f32) -> Self {
        Self {
            pos,
            direction,
            active: true,
            damage: ROCKET_DAMAGE,
            speed: ROCKET_SPEED,
            kind: ProjectileKind::Rocket(Rocket {
                target_y,
                speed_y: 0.0,
                trail: VecDeque::with_capacity(ROCKET_TRAIL_LENGTH + 1),
            }),
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_damage(mut self, damage: f32) -> Self {
        self.damage = damage;
        self
    }

    pub fn with_tilt(mut self, tilt_deg: f32) -> Self {
        if let ProjectileKind::Bolt(bolt) = &mut self.kind {
            bolt.tilt_deg = tilt_deg;
        }
        self
    }

    pub fn is_enhanced(&self) -> bool {
        matches!(&self.kind, ProjectileKind::Bolt(b) if b.enhanced)
    }

    /// Collision box for this projectile
    pub fn rect(&self) -> Rect {
        match self.kind {
            ProjectileKind::Bolt(_) => Rect::new(self.pos.x, self.pos.y, BOLT_WIDTH, BOLT_HEIGHT),
            ProjectileKind::Rocket(_) => Rect::centered(self.pos, ROCKET_WIDTH, ROCKET_HEIGHT),
        }
    }

    /// Advance one tick. Rockets steer toward `target_y`; bolts ignore it.
    pub fn update<R: Rng>(&mut self, arena: &ArenaConfig, target_y: f32, rng: &mut R) {
        self.pos.x += self.speed * self.direction.sign();

        match &mut self.kind {
            ProjectileKind::Bolt(bolt) => {
                bolt.frame += 1;
                if bolt.frame % 2 == 0 {
                    let count = if bolt.enhanced { 5 } else { 2 };
                    for _ in 0..count {
                        let pos = self.pos
                            + Vec2::new(rng.random_range(-10..=10) as f32, rng.random_range(0..=60) as f32);
                        let vel = Vec2::new(rng.random_range(-1.0..=1.0), rng.random_range(-1.0..=1.0));
                        bolt.particles
                            .push(Particle::new(pos, vel, ParticleColor::Cyan, 15, rng));
                    }
                }
                update_particles(&mut bolt.particles);
            }
            ProjectileKind::Rocket(rocket) => {
                rocket.target_y = target_y;
                if self.pos.y < rocket.target_y {
                    rocket.speed_y += ROCKET_STEER;
                } else {
                    rocket.speed_y -= ROCKET_STEER;
                }
                rocket.speed_y = rocket
                    .speed_y
                    .clamp(-ROCKET_MAX_VERTICAL_SPEED, ROCKET_MAX_VERTICAL_SPEED);
                self.pos.y += rocket.speed_y;

                rocket.trail.push_back(self.pos);
                if rocket.trail.len() > ROCKET_TRAIL_LENGTH {
                    rocket.trail.pop_front();
                }
            }
        }

        if arena.is_offscreen(self.pos.x) {
            self.active = false;
        }
    }

    /// Consume the projectile on impact, returning its damage
    pub fn strike(&mut self) -> f32 {
        debug_assert!(self.active, "inactive projectile cannot strike");
        self.active = false;
        self.damage
    }
}
