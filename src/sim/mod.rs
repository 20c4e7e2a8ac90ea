//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to `tick` = one 1/60 s step)
//! - Seeded RNG only, passed explicitly into spawners
//! - Stable iteration order (player one, then player two)
//! - No rendering or platform dependencies

pub mod ability;
pub mod collision;
pub mod fighter;
pub mod particle;
pub mod projectile;
pub mod state;
pub mod tick;

pub use ability::{ABILITY_SLOTS, Ability, AbilitySpec, AreaBlast, dispatch};
pub use collision::Rect;
pub use fighter::{Fighter, FighterKind, Hypercharge, HyperchargePhase};
pub use particle::{Particle, ParticleColor};
pub use projectile::{Bolt, Projectile, ProjectileKind, Rocket};
pub use state::{Facing, FighterId, MatchEvent, MatchPhase, MatchState};
pub use tick::{FighterInput, InputSnapshot, tick};
