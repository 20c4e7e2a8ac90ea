//! Arena Duel - a two-player arcade fighting game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (fighters, projectiles, collisions, match flow)
//! - `view`: Read-only frame snapshot for an external renderer/HUD
//! - `platform`: Frame clock and key bindings
//! - `settings`: Arena configuration and effect quality

pub mod platform;
pub mod settings;
pub mod sim;
pub mod view;

pub use settings::{ArenaConfig, QualityPreset, Settings};

/// Game configuration constants
///
/// All values are per tick at 60 Hz unless noted.
pub mod consts {
    /// Fixed simulation rate
    pub const TICK_RATE: u32 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 1000.0;
    pub const ARENA_HEIGHT: f32 = 600.0;
    pub const GROUND_Y: f32 = ARENA_HEIGHT - 100.0;
    /// Projectiles despawn this far past either side of the arena
    pub const OFFSCREEN_MARGIN: f32 = 50.0;

    /// Fighter body
    pub const FIGHTER_WIDTH: f32 = 50.0;
    pub const FIGHTER_HEIGHT: f32 = 80.0;
    pub const FIGHTER_SPEED: f32 = 5.0;
    pub const JUMP_POWER: f32 = 15.0;
    pub const FIGHTER_GRAVITY: f32 = 0.8;
    pub const MAX_HEALTH: f32 = 100.0;
    /// Post-hit window during which further damage is ignored
    pub const HIT_INVULNERABLE_TICKS: u32 = 20;

    /// Hypercharge
    pub const HYPERCHARGE_DURATION_TICKS: u32 = 180; // 3 seconds
    pub const HYPERCHARGE_COOLDOWN_TICKS: u32 = 900; // 15 seconds
    pub const HYPERCHARGE_SPEED_MULT: f32 = 1.5;
    pub const HYPERCHARGE_DAMAGE_MULT: f32 = 1.5;
    pub const HYPERCHARGE_DAMAGE_TAKEN_MULT: f32 = 0.5;
    /// Per-tick chance of an aura particle while hypercharged
    pub const HYPERCHARGE_AURA_CHANCE: f64 = 0.3;
    pub const BLAST_RADIUS: f32 = 120.0;
    pub const BLAST_DAMAGE: f32 = 35.0;

    /// Particles
    pub const PARTICLE_GRAVITY: f32 = 0.2;

    /// Bolts
    pub const BOLT_WIDTH: f32 = 30.0;
    pub const BOLT_HEIGHT: f32 = 80.0;
    pub const BOLT_DAMAGE: f32 = 15.0;
    pub const BOLT_ENHANCED_DAMAGE: f32 = 25.0;
    pub const BOLT_SPEED: f32 = 12.0;
    pub const BOLT_ENHANCED_SPEED: f32 = 15.0;

    /// Rockets
    pub const ROCKET_WIDTH: f32 = 40.0;
    pub const ROCKET_HEIGHT: f32 = 20.0;
    pub const ROCKET_DAMAGE: f32 = 18.0;
    pub const HOMING_MISSILE_DAMAGE: f32 = 25.0;
    pub const ROCKET_SPEED: f32 = 8.0;
    pub const HOMING_MISSILE_SPEED: f32 = 12.0;
    pub const ROCKET_STEER: f32 = 0.3;
    pub const ROCKET_MAX_VERTICAL_SPEED: f32 = 5.0;
    pub const ROCKET_TRAIL_LENGTH: usize = 10;
}

