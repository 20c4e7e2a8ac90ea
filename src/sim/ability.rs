//! Ability dispatch
//!
//! Each fighter kind has three ability slots plus a hypercharge. Slots are
//! looked up in a per-kind table; an ability fires only when its signal is
//! held and its cooldown is exactly zero.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::fighter::{Fighter, FighterKind};
use super::particle::{Particle, ParticleColor};
use super::projectile::Projectile;
use super::state::{FighterId, MatchEvent};
use super::tick::FighterInput;
use crate::consts::*;

/// Ability slots per fighter
pub const ABILITY_SLOTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ability {
    SingleBolt,
    BoltStorm,
    BoltWave,
    SingleRocket,
    RocketBarrage,
    HomingMissile,
}

/// Static description of one ability slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbilitySpec {
    pub ability: Ability,
    /// HUD label
    pub label: &'static str,
    /// Ticks before the slot can fire again
    pub cooldown: u32,
}

const BOLT_CASTER_ABILITIES: [AbilitySpec; ABILITY_SLOTS] = [
    AbilitySpec { ability: Ability::SingleBolt, label: "Lightning", cooldown: 40 },
    AbilitySpec { ability: Ability::BoltStorm, label: "Storm", cooldown: 80 },
    AbilitySpec { ability: Ability::BoltWave, label: "Wave", cooldown: 60 },
];

const ROCKET_LAUNCHER_ABILITIES: [AbilitySpec; ABILITY_SLOTS] = [
    AbilitySpec { ability: Ability::SingleRocket, label: "Rocket", cooldown: 40 },
    AbilitySpec { ability: Ability::RocketBarrage, label: "Barrage", cooldown: 80 },
    AbilitySpec { ability: Ability::HomingMissile, label: "Homing", cooldown: 100 },
];

impl FighterKind {
    /// Ability table for this kind, indexed by slot
    pub fn abilities(&self) -> &'static [AbilitySpec; ABILITY_SLOTS] {
        match self {
            FighterKind::BoltCaster => &BOLT_CASTER_ABILITIES,
            FighterKind::RocketLauncher => &ROCKET_LAUNCHER_ABILITIES,
        }
    }
}

/// Area damage released by a hypercharge activation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaBlast {
    pub center: Vec2,
    pub radius: f32,
    pub damage: f32,
}

impl AreaBlast {
    pub fn reaches(&self, point: Vec2) -> bool {
        self.center.distance(point) < self.radius
    }
}

/// Where bolts leave the body
fn bolt_emitter(fighter: &Fighter) -> Vec2 {
    Vec2::new(fighter.pos.x + fighter.size.x / 2.0, fighter.pos.y + 20.0)
}

/// Where rockets leave the body
fn rocket_emitter(fighter: &Fighter) -> Vec2 {
    Vec2::new(fighter.pos.x + fighter.size.x / 2.0, fighter.pos.y)
}

impl Ability {
    /// Build the projectiles for one activation of this ability
    ///
    /// `target` is the opponent's body; rockets home on its vertical center.
    pub fn spawn<R: Rng>(&self, fighter: &Fighter, target: &Rect, rng: &mut R) -> Vec<Projectile> {
        let enhanced = fighter.hypercharge.active;
        let mult = fighter.damage_multiplier();
        let facing = fighter.facing;
        let target_y = target.center().y;

        let bolt = |origin: Vec2| {
            let p = Projectile::bolt(origin, facing, enhanced);
            let damage = p.damage * mult;
            p.with_damage(damage)
        };

        match self {
            Ability::SingleBolt => vec![bolt(bolt_emitter(fighter))],
            Ability::BoltStorm => {
                let count = if enhanced { 5 } else { 3 };
                (0..count)
                    .map(|i| {
                        let origin = bolt_emitter(fighter) - Vec2::new(0.0, i as f32 * 15.0);
                        bolt(origin).with_speed(10.0 + i as f32 * 2.0)
                    })
                    .collect()
            }
            Ability::BoltWave => {
                let angles: &[f32] = if enhanced {
                    &[-30.0, -15.0, 0.0, 15.0, 30.0]
                } else {
                    &[-20.0, 0.0, 20.0]
                };
                angles
                    .iter()
                    .map(|&angle| bolt(bolt_emitter(fighter)).with_tilt(angle))
                    .collect()
            }
            Ability::SingleRocket => {
                let p = Projectile::rocket(rocket_emitter(fighter), facing, target_y);
                vec![p.with_damage(ROCKET_DAMAGE * mult)]
            }
            Ability::RocketBarrage => {
                let count = if enhanced { 6 } else { 3 };
                (0..count)
                    .map(|i| {
                        let origin = rocket_emitter(fighter) - Vec2::new(0.0, i as f32 * 20.0);
                        Projectile::rocket(origin, facing, target_y)
                            .with_speed(ROCKET_SPEED + rng.random_range(-1.0..=1.0))
                            .with_damage(ROCKET_DAMAGE * mult)
                    })
                    .collect()
            }
            Ability::HomingMissile => {
                let p = Projectile::rocket(rocket_emitter(fighter), facing, target_y)
                    .with_speed(HOMING_MISSILE_SPEED)
                    .with_damage(HOMING_MISSILE_DAMAGE * mult);
                vec![p]
            }
        }
    }
}

/// Trigger the hypercharge and its kind-specific burst
///
/// Returns the area blast the match loop must apply to the opponent, if any.
fn activate_hypercharge<R: Rng>(fighter: &mut Fighter, rng: &mut R) -> Option<AreaBlast> {
    if !fighter.hypercharge.activate() {
        return None;
    }
    log::info!("{} hypercharged", fighter.kind.name());

    let burst_origin = Vec2::new(fighter.pos.x + fighter.size.x / 2.0, fighter.pos.y + 40.0);
    match fighter.kind {
        FighterKind::BoltCaster => {
            // Lightning storm: ten enhanced bolts fanned vertically
            for _ in 0..10 {
                let origin = bolt_emitter(fighter) + Vec2::new(0.0, rng.random_range(-30..=30) as f32);
                let storm = Projectile::bolt(origin, fighter.facing, true)
                    .with_speed(10.0 + rng.random_range(-2.0..=2.0))
                    .with_damage(30.0);
                fighter.projectiles.push(storm);
            }
            for _ in 0..50 {
                fighter
                    .particles
                    .push(Particle::scattered(burst_origin, 5.0, ParticleColor::Cyan, 60, rng));
            }
            None
        }
        FighterKind::RocketLauncher => {
            for _ in 0..100 {
                let color = ParticleColor::pick(&ParticleColor::EXPLOSION, rng);
                fighter
                    .particles
                    .push(Particle::scattered(burst_origin, 8.0, color, 60, rng));
            }
            for _ in 0..30 {
                let color = ParticleColor::pick(&ParticleColor::EXPLOSION, rng);
                fighter
                    .particles
                    .push(Particle::scattered(burst_origin, 10.0, color, 30, rng));
            }
            Some(AreaBlast {
                center: fighter.center(),
                radius: BLAST_RADIUS,
                damage: BLAST_DAMAGE,
            })
        }
    }
}

/// Process one tick of ability input for `fighter`
///
/// Hypercharge is handled first so abilities fired on the same tick are
/// already enhanced. Events are appended to `events`.
pub fn dispatch<R: Rng>(
    fighter: &mut Fighter,
    input: &FighterInput,
    target: &Rect,
    rng: &mut R,
    events: &mut Vec<MatchEvent>,
) -> Option<AreaBlast> {
    let id: FighterId = fighter.id;
    let mut blast = None;

    if input.hypercharge && fighter.hypercharge.ready {
        blast = activate_hypercharge(fighter, rng);
        events.push(MatchEvent::HyperchargeActivated { fighter: id });
    }

    for (slot, spec) in fighter.kind.abilities().iter().enumerate() {
        if !input.abilities[slot] || fighter.ability_cooldowns[slot] != 0 {
            continue;
        }
        let spawned = spec.ability.spawn(fighter, target, rng);
        let count = spawned.len();
        fighter.projectiles.extend(spawned);
        fighter.ability_cooldowns[slot] = spec.cooldown;
        log::debug!("{} fired {} ({} projectiles)", fighter.kind.name(), spec.label, count);
        events.push(MatchEvent::AbilityFired {
            fighter: id,
            ability: spec.ability,
            projectiles: count,
        });
    }

    blast
}
