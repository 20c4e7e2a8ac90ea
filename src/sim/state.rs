//! Match state and shared simulation types
//!
//! Everything the match loop mutates lives here; the render boundary reads it.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ability::Ability;
use super::fighter::{Fighter, FighterKind};
use crate::settings::{ArenaConfig, Settings};

/// Horizontal facing / travel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1.0 for left, 1.0 for right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Which of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FighterId {
    One,
    Two,
}

impl FighterId {
    pub const ALL: [FighterId; 2] = [FighterId::One, FighterId::Two];

    pub fn index(self) -> usize {
        match self {
            FighterId::One => 0,
            FighterId::Two => 1,
        }
    }

    pub fn opponent(self) -> FighterId {
        match self {
            FighterId::One => FighterId::Two,
            FighterId::Two => FighterId::One,
        }
    }
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Simulation advancing every tick
    Running,
    /// Frozen until a reset is requested
    MatchOver { winner: FighterId },
}

/// Things that happened during the last tick (for HUD/audio consumers)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MatchEvent {
    AbilityFired { fighter: FighterId, ability: Ability, projectiles: usize },
    HyperchargeActivated { fighter: FighterId },
    /// Hypercharge area blast reached the opponent
    Blast { attacker: FighterId, damage: f32 },
    /// A projectile struck; `damage` is 0 when the target was invulnerable
    Hit { attacker: FighterId, damage: f32 },
    MatchOver { winner: FighterId },
    Reset,
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct MatchState {
    pub arena: ArenaConfig,
    /// Per-fighter particle cap (0 disables effects)
    pub particle_cap: usize,
    /// Screen shake allowed by the player's settings (off under reduced motion)
    pub shake_enabled: bool,
    /// Seed the RNG was created from
    pub seed: u64,
    /// Cosmetic scatter and barrage jitter
    pub rng: Pcg32,
    /// Running ticks since the match (re)started
    pub tick: u64,
    pub phase: MatchPhase,
    /// Bolt caster, then rocket launcher
    pub fighters: [Fighter; 2],
    /// Events from the most recent tick
    pub events: Vec<MatchEvent>,
}

impl MatchState {
    pub fn new(settings: &Settings) -> Self {
        let mut state = Self::with_seed(settings.arena, settings.seed);
        state.particle_cap = settings.max_particles();
        state.shake_enabled = settings.effective_screen_shake();
        state
    }

    pub fn with_seed(arena: ArenaConfig, seed: u64) -> Self {
        log::info!("New match (seed {})", seed);
        Self {
            arena,
            particle_cap: Settings::default().max_particles(),
            shake_enabled: true,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tick: 0,
            phase: MatchPhase::Running,
            fighters: Self::starting_lineup(&arena),
            events: Vec::new(),
        }
    }

    fn starting_lineup(arena: &ArenaConfig) -> [Fighter; 2] {
        [
            Fighter::new(FighterId::One, FighterKind::BoltCaster, arena),
            Fighter::new(FighterId::Two, FighterKind::RocketLauncher, arena),
        ]
    }

    pub fn fighter(&self, id: FighterId) -> &Fighter {
        &self.fighters[id.index()]
    }

    pub fn fighter_mut(&mut self, id: FighterId) -> &mut Fighter {
        &mut self.fighters[id.index()]
    }

    pub fn is_running(&self) -> bool {
        self.phase == MatchPhase::Running
    }

    pub fn winner(&self) -> Option<FighterId> {
        match self.phase {
            MatchPhase::MatchOver { winner } => Some(winner),
            MatchPhase::Running => None,
        }
    }

    /// True while either fighter is hypercharged, unless shake is disabled
    pub fn screen_shake(&self) -> bool {
        self.shake_enabled && self.fighters.iter().any(|f| f.hypercharge.active)
    }

    /// Restore both fighters to their starting state and resume play
    pub fn reset(&mut self) {
        for fighter in &mut self.fighters {
            fighter.reset();
        }
        self.tick = 0;
        self.phase = MatchPhase::Running;
        self.events.push(MatchEvent::Reset);
        log::info!("Match reset");
    }
}

/// Borrow a fighter and its opponent mutably at the same time
pub(crate) fn split_pair(fighters: &mut [Fighter; 2], id: FighterId) -> (&mut Fighter, &mut Fighter) {
    let [one, two] = fighters;
    match id {
        FighterId::One => (one, two),
        FighterId::Two => (two, one),
    }
}
