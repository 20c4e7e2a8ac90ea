//! Game settings and arena configuration
//!
//! Loaded from an optional JSON file; anything missing falls back to defaults.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::platform::KeyBindings;

/// Immutable arena geometry and timing, passed explicitly into the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
    /// Y coordinate of the ground surface (fighters stand on it)
    pub ground_y: f32,
    /// Simulation ticks per second
    pub tick_rate: u32,
    /// How far past either side a projectile may travel before despawning
    pub offscreen_margin: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            ground_y: GROUND_Y,
            tick_rate: TICK_RATE,
            offscreen_margin: OFFSCREEN_MARGIN,
        }
    }
}

impl ArenaConfig {
    /// Duration of one tick in seconds
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }

    /// True if `x` has left the playable strip plus margin
    pub fn is_offscreen(&self, x: f32) -> bool {
        x < -self.offscreen_margin || x > self.width + self.offscreen_margin
    }
}

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Maximum live particles per fighter for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 64,
            QualityPreset::Medium => 256,
            QualityPreset::High => 1024,
        }
    }
}

impl FromStr for QualityPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(QualityPreset::Low),
            "medium" | "med" => Ok(QualityPreset::Medium),
            "high" => Ok(QualityPreset::High),
            other => Err(format!("unknown quality preset '{}'", other)),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for cosmetic scatter and barrage jitter
    pub seed: u64,
    /// Effects quality preset
    pub quality: QualityPreset,
    /// Particle effects (trails, bursts, auras)
    pub particles: bool,
    /// Screen shake while a fighter is hypercharged
    pub screen_shake: bool,
    /// Reduced motion (suppresses shake)
    pub reduced_motion: bool,
    /// Arena geometry and tick rate
    pub arena: ArenaConfig,
    /// Keyboard layout for both players
    pub bindings: KeyBindings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5EED,
            quality: QualityPreset::Medium,
            particles: true,
            screen_shake: true,
            reduced_motion: false,
            arena: ArenaConfig::default(),
            bindings: KeyBindings::default(),
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Load settings from a JSON file, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "arena": { "width": 800.0 } }"#).unwrap();
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.arena.width, 800.0);
        assert_eq!(settings.arena.ground_y, GROUND_Y);
        assert_eq!(settings.quality, QualityPreset::Medium);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Settings::from_json("{ seed: ").is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load(Path::new("/definitely/not/here.json"));
        assert_eq!(settings.seed, Settings::default().seed);
    }

    #[test]
    fn test_particles_disabled_caps_to_zero() {
        let settings = Settings {
            particles: false,
            ..Settings::from_preset(QualityPreset::High)
        };
        assert_eq!(settings.max_particles(), 0);
    }

    #[test]
    fn test_quality_preset_parse() {
        assert_eq!("MED".parse::<QualityPreset>(), Ok(QualityPreset::Medium));
        assert_eq!("high".parse::<QualityPreset>(), Ok(QualityPreset::High));
        assert!("ultra".parse::<QualityPreset>().is_err());
    }

    #[test]
    fn test_offscreen_margin() {
        let arena = ArenaConfig::default();
        assert!(!arena.is_offscreen(-50.0));
        assert!(arena.is_offscreen(-50.1));
        assert!(!arena.is_offscreen(1050.0));
        assert!(arena.is_offscreen(1050.5));
    }
}
