//! Render boundary
//!
//! A read-only snapshot of everything an external renderer or HUD needs to
//! draw a frame. Nothing here feeds back into the simulation.

use glam::Vec2;
use serde::Serialize;

use crate::sim::{
    Facing, Fighter, FighterId, FighterKind, MatchPhase, MatchState, Particle, ParticleColor,
    Projectile, ProjectileKind,
};

/// Health bar color band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthTier {
    High,
    Mid,
    Low,
}

impl HealthTier {
    pub fn for_health(health: f32) -> Self {
        if health > 60.0 {
            HealthTier::High
        } else if health > 30.0 {
            HealthTier::Mid
        } else {
            HealthTier::Low
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AbilityView {
    pub label: &'static str,
    /// Cooldown remaining as a 0-1 fraction
    pub cooldown: f32,
    pub ready: bool,
}

#[derive(Debug, Clone, Serialize)]
pub enum ProjectileShape {
    Bolt { enhanced: bool, frame: u32, tilt_deg: f32 },
    /// Trail is oldest first
    Rocket { trail: Vec<Vec2> },
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectileView {
    pub pos: Vec2,
    pub direction: Facing,
    pub shape: ProjectileShape,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub color: ParticleColor,
    /// Alpha, 1 when fresh
    pub fade: f32,
    pub size: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct FighterView {
    pub id: FighterId,
    pub kind: FighterKind,
    pub name: &'static str,
    pub pos: Vec2,
    pub size: Vec2,
    pub facing: Facing,
    pub health: f32,
    pub max_health: f32,
    pub health_tier: HealthTier,
    /// Blink phase of the post-hit flash
    pub hit_flash: bool,
    pub hypercharge_active: bool,
    pub hypercharge_ready: bool,
    pub hypercharge_cooldown: f32,
    pub abilities: Vec<AbilityView>,
    pub projectiles: Vec<ProjectileView>,
    /// Fighter effects followed by bolt trails
    pub particles: Vec<ParticleView>,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameView {
    pub tick: u64,
    pub phase: MatchPhase,
    pub screen_shake: bool,
    pub fighters: Vec<FighterView>,
}

impl FrameView {
    pub fn capture(state: &MatchState) -> Self {
        Self {
            tick: state.tick,
            phase: state.phase,
            screen_shake: state.screen_shake(),
            fighters: state.fighters.iter().map(FighterView::capture).collect(),
        }
    }

    /// Victory banner text, once the match is decided
    pub fn banner(&self) -> Option<String> {
        match self.phase {
            MatchPhase::MatchOver { winner } => {
                let name = self.fighters.iter().find(|f| f.id == winner)?.name;
                Some(format!("{} WINS!", name.to_uppercase()))
            }
            MatchPhase::Running => None,
        }
    }
}

impl FighterView {
    fn capture(fighter: &Fighter) -> Self {
        let abilities = fighter
            .kind
            .abilities()
            .iter()
            .zip(fighter.ability_cooldowns.iter())
            .map(|(spec, &remaining)| AbilityView {
                label: spec.label,
                cooldown: remaining as f32 / spec.cooldown as f32,
                ready: remaining == 0,
            })
            .collect();

        let mut particles: Vec<ParticleView> = fighter.particles.iter().map(particle_view).collect();
        for projectile in &fighter.projectiles {
            if let ProjectileKind::Bolt(bolt) = &projectile.kind {
                particles.extend(bolt.particles.iter().map(particle_view));
            }
        }

        Self {
            id: fighter.id,
            kind: fighter.kind,
            name: fighter.kind.name(),
            pos: fighter.pos,
            size: fighter.size,
            facing: fighter.facing,
            health: fighter.health,
            max_health: fighter.max_health,
            health_tier: HealthTier::for_health(fighter.health),
            hit_flash: fighter.hit_cooldown > 0 && fighter.hit_cooldown % 4 < 2,
            hypercharge_active: fighter.hypercharge.active,
            hypercharge_ready: fighter.hypercharge.ready,
            hypercharge_cooldown: fighter.hypercharge.cooldown_fraction(),
            abilities,
            projectiles: fighter.projectiles.iter().map(projectile_view).collect(),
            particles,
        }
    }
}

fn projectile_view(projectile: &Projectile) -> ProjectileView {
    let shape = match &projectile.kind {
        ProjectileKind::Bolt(bolt) => ProjectileShape::Bolt {
            enhanced: bolt.enhanced,
            frame: bolt.frame,
            tilt_deg: bolt.tilt_deg,
        },
        ProjectileKind::Rocket(rocket) => ProjectileShape::Rocket {
            trail: rocket.trail.iter().copied().collect(),
        },
    };
    ProjectileView {
        pos: projectile.pos,
        direction: projectile.direction,
        shape,
    }
}

fn particle_view(particle: &Particle) -> ParticleView {
    ParticleView {
        pos: particle.pos,
        color: particle.color,
        fade: particle.fade(),
        size: particle.render_size(),
    }
}
