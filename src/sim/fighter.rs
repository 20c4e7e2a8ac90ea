//! Fighters: movement, damage, timers and the hypercharge state machine
//!
//! Both fighter kinds share one state struct; what differs between them is the
//! ability table and hypercharge effect, looked up by `FighterKind`.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ability::ABILITY_SLOTS;
use super::collision::Rect;
use super::particle::{Particle, ParticleColor, cap_particles, update_particles};
use super::projectile::{Projectile, ProjectileKind};
use super::state::{Facing, FighterId};
use super::tick::FighterInput;
use crate::consts::*;
use crate::settings::ArenaConfig;

/// The two playable fighter kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FighterKind {
    /// Throws lightning bolts
    BoltCaster,
    /// Launches homing rockets
    RocketLauncher,
}

impl FighterKind {
    pub fn name(&self) -> &'static str {
        match self {
            FighterKind::BoltCaster => "Bolt Caster",
            FighterKind::RocketLauncher => "Rocket Launcher",
        }
    }

    /// Aura colors while hypercharged
    fn aura_palette(&self) -> &'static [ParticleColor] {
        match self {
            FighterKind::BoltCaster => &[ParticleColor::Cyan],
            FighterKind::RocketLauncher => &ParticleColor::FLAME,
        }
    }
}

/// Hypercharge phase, derived from the timers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HyperchargePhase {
    Ready,
    Active,
    Cooldown,
}

/// Ultimate-ability timers
///
/// Duration and cooldown start together on activation; the duration is a
/// subset of the cooldown window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hypercharge {
    pub ready: bool,
    pub cooldown_remaining: u32,
    pub active: bool,
    pub active_remaining: u32,
}

impl Default for Hypercharge {
    fn default() -> Self {
        Self {
            ready: true,
            cooldown_remaining: 0,
            active: false,
            active_remaining: 0,
        }
    }
}

impl Hypercharge {
    pub fn phase(&self) -> HyperchargePhase {
        if self.active {
            HyperchargePhase::Active
        } else if self.cooldown_remaining > 0 {
            HyperchargePhase::Cooldown
        } else {
            HyperchargePhase::Ready
        }
    }

    /// Start the hypercharge. Returns false (and changes nothing) unless ready.
    pub fn activate(&mut self) -> bool {
        if !self.ready {
            return false;
        }
        self.active = true;
        self.active_remaining = HYPERCHARGE_DURATION_TICKS;
        self.cooldown_remaining = HYPERCHARGE_COOLDOWN_TICKS;
        self.ready = false;
        true
    }

    /// Advance both timers by one tick
    ///
    /// The match loop calls this once, before any input is handled, so every
    /// hypercharge buff sees the same `active` value for the whole tick.
    pub fn tick(&mut self) {
        if self.active_remaining > 0 {
            self.active_remaining -= 1;
        }
        self.active = self.active_remaining > 0;

        if self.cooldown_remaining > 0 {
            self.cooldown_remaining -= 1;
        }
        self.ready = self.cooldown_remaining == 0;

        debug_assert!(!(self.active && self.ready), "hypercharge active while ready");
    }

    /// Cooldown remaining as a 0-1 fraction (0 = ready)
    pub fn cooldown_fraction(&self) -> f32 {
        self.cooldown_remaining as f32 / HYPERCHARGE_COOLDOWN_TICKS as f32
    }
}

/// A playable fighter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fighter {
    pub id: FighterId,
    pub kind: FighterKind,
    /// Top-left corner of the body
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub jump_power: f32,
    pub on_ground: bool,
    pub health: f32,
    pub max_health: f32,
    pub facing: Facing,
    /// Remaining cooldown per ability slot
    pub ability_cooldowns: [u32; ABILITY_SLOTS],
    /// Hit-invulnerability ticks remaining
    pub hit_cooldown: u32,
    pub hypercharge: Hypercharge,
    pub projectiles: Vec<Projectile>,
    pub particles: Vec<Particle>,
    spawn: Vec2,
}

impl Fighter {
    pub fn new(id: FighterId, kind: FighterKind, arena: &ArenaConfig) -> Self {
        let x = match id {
            FighterId::One => 100.0,
            FighterId::Two => arena.width - 150.0,
        };
        let spawn = Vec2::new(x, arena.ground_y - FIGHTER_HEIGHT);
        Self {
            id,
            kind,
            pos: spawn,
            vel: Vec2::ZERO,
            size: Vec2::new(FIGHTER_WIDTH, FIGHTER_HEIGHT),
            speed: FIGHTER_SPEED,
            jump_power: JUMP_POWER,
            on_ground: false,
            health: MAX_HEALTH,
            max_health: MAX_HEALTH,
            facing: Facing::Right,
            ability_cooldowns: [0; ABILITY_SLOTS],
            hit_cooldown: 0,
            hypercharge: Hypercharge::default(),
            projectiles: Vec::new(),
            particles: Vec::new(),
            spawn,
        }
    }

    /// Back to the starting position with full health, no timers and no effects
    pub fn reset(&mut self) {
        self.pos = self.spawn;
        self.vel = Vec2::ZERO;
        self.on_ground = false;
        self.health = self.max_health;
        self.facing = Facing::Right;
        self.ability_cooldowns = [0; ABILITY_SLOTS];
        self.hit_cooldown = 0;
        self.hypercharge = Hypercharge::default();
        self.projectiles.clear();
        self.particles.clear();
    }

    pub fn spawn_point(&self) -> Vec2 {
        self.spawn
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0.0
    }

    pub fn is_invulnerable(&self) -> bool {
        self.hit_cooldown > 0
    }

    pub fn speed_multiplier(&self) -> f32 {
        if self.hypercharge.active {
            HYPERCHARGE_SPEED_MULT
        } else {
            1.0
        }
    }

    /// Multiplier applied to outgoing ability damage
    pub fn damage_multiplier(&self) -> f32 {
        if self.hypercharge.active {
            HYPERCHARGE_DAMAGE_MULT
        } else {
            1.0
        }
    }

    /// Integrate one tick of movement and advance the ability and hit timers
    pub fn step(&mut self, input: &FighterInput, arena: &ArenaConfig) {
        let run = self.speed * self.speed_multiplier();
        self.vel.x = match (input.left, input.right) {
            (true, false) => {
                self.facing = Facing::Left;
                -run
            }
            (false, true) => {
                self.facing = Facing::Right;
                run
            }
            _ => 0.0,
        };

        if input.jump && self.on_ground {
            self.vel.y = -self.jump_power;
            self.on_ground = false;
        }

        self.vel.y += FIGHTER_GRAVITY;
        self.pos += self.vel;

        self.pos.x = self.pos.x.clamp(0.0, arena.width - self.size.x);

        let floor = arena.ground_y - self.size.y;
        if self.pos.y >= floor {
            self.pos.y = floor;
            self.vel.y = 0.0;
            self.on_ground = true;
        }

        self.tick_timers();
    }

    fn tick_timers(&mut self) {
        for cooldown in &mut self.ability_cooldowns {
            *cooldown = cooldown.saturating_sub(1);
        }
        self.hit_cooldown = self.hit_cooldown.saturating_sub(1);
    }

    /// Apply projectile damage. Returns the health actually removed.
    ///
    /// Ignored while invulnerable; halved while hypercharged.
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        if self.is_invulnerable() {
            return 0.0;
        }
        let amount = if self.hypercharge.active {
            amount * HYPERCHARGE_DAMAGE_TAKEN_MULT
        } else {
            amount
        };
        self.hit_cooldown = HIT_INVULNERABLE_TICKS;
        self.lose_health(amount)
    }

    /// Flat damage that ignores invulnerability and hypercharge reduction
    pub fn apply_blast(&mut self, amount: f32) -> f32 {
        self.hit_cooldown = HIT_INVULNERABLE_TICKS;
        self.lose_health(amount)
    }

    fn lose_health(&mut self, amount: f32) -> f32 {
        let before = self.health;
        self.health = (self.health - amount).max(0.0);
        debug_assert!((0.0..=self.max_health).contains(&self.health));
        before - self.health
    }

    /// Advance projectiles and particles, then emit the hypercharge aura
    ///
    /// Rockets steer toward `target_y` (the opponent's vertical center).
    pub fn update_effects<R: Rng>(
        &mut self,
        arena: &ArenaConfig,
        target_y: f32,
        particle_cap: usize,
        rng: &mut R,
    ) {
        for projectile in &mut self.projectiles {
            projectile.update(arena, target_y, rng);
            if let ProjectileKind::Bolt(bolt) = &mut projectile.kind {
                cap_particles(&mut bolt.particles, particle_cap);
            }
        }
        self.purge_projectiles();

        update_particles(&mut self.particles);

        if self.hypercharge.active && rng.random_bool(HYPERCHARGE_AURA_CHANCE) {
            let pos = self.pos
                + Vec2::new(
                    rng.random_range(0.0..=self.size.x),
                    rng.random_range(0.0..=self.size.y),
                );
            let vel = Vec2::new(rng.random_range(-2.0..=2.0), rng.random_range(-3.0..=-1.0));
            let color = ParticleColor::pick(self.kind.aura_palette(), rng);
            self.particles.push(Particle::new(pos, vel, color, 30, rng));
        }
        cap_particles(&mut self.particles, particle_cap);
    }

    /// Drop projectiles that went off-screen or already hit
    pub fn purge_projectiles(&mut self) {
        self.projectiles.retain(|p| p.active);
    }
}
