//! Data-driven game balance
//!
//! Every gameplay number that a designer might want to tweak lives here.
//! Geometry (box sizes, muzzle offsets) stays in [`crate::consts`].
//! A `tuning.json` may override any subset of fields; missing keys keep
//! the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::persistence;

/// Upper bound on `max_debris`; critical hits double the burst
pub const MAX_DEBRIS_PER_ASTEROID: u32 = 64;

/// Asteroid spawning, health and death-zone balance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsteroidTuning {
    /// Seconds between normal asteroid spawns
    pub spawn_interval: f32,
    /// Interpolation speed of normal asteroids (path fraction per second)
    pub speed: f32,
    /// Spin of normal asteroids (radians/sec)
    pub rotation_speed: f32,
    pub min_health: f32,
    pub max_health: f32,
    /// Interpolation speed of death asteroids
    pub death_speed: f32,
    pub death_rotation_speed: f32,
    pub death_health: f32,
    /// Seconds in the death zone between death asteroid rolls
    pub death_zone_interval: f32,
    /// Chance a roll sends a death asteroid
    pub death_chance: f32,
    /// Extra seconds before the first roll of a run
    pub death_zone_grace: f32,
    /// Debris per destroyed asteroid, `[min_debris, max_debris)`
    pub min_debris: u32,
    pub max_debris: u32,
}

impl Default for AsteroidTuning {
    fn default() -> Self {
        Self {
            spawn_interval: 0.5,
            speed: 0.2,
            rotation_speed: 1.0,
            min_health: 80.0,
            max_health: 120.0,
            death_speed: 0.125,
            death_rotation_speed: 3.0,
            death_health: 300.0,
            death_zone_interval: 2.0,
            death_chance: 0.1,
            death_zone_grace: 10.0,
            min_debris: 5,
            max_debris: 8,
        }
    }
}

/// Player spaceship balance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpaceshipTuning {
    pub lives: u32,
    /// Seconds between a spaceship's destruction and the next spawn
    pub spawn_delay: f32,
    /// Movement speed (NDC units/sec)
    pub speed: f32,
    /// Seconds between shots
    pub shot_delay: f32,
}

impl Default for SpaceshipTuning {
    fn default() -> Self {
        Self {
            lives: 4,
            spawn_delay: 3.0,
            speed: 0.8,
            shot_delay: 0.3,
        }
    }
}

/// Laser shot balance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaserTuning {
    /// Travel speed (NDC units/sec)
    pub speed: f32,
    pub min_damage: f32,
    pub max_damage: f32,
    /// Cap on damage after distance falloff
    pub max_falloff_damage: f32,
}

impl Default for LaserTuning {
    fn default() -> Self {
        Self {
            speed: 2.5,
            min_damage: 10.0,
            max_damage: 25.0,
            max_falloff_damage: 10_000.0,
        }
    }
}

/// Complete gameplay tuning
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub asteroids: AsteroidTuning,
    pub spaceship: SpaceshipTuning,
    pub laser: LaserTuning,
}

fn positive(field: &'static str, value: f32) -> ConfigResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidTuning {
            field,
            value,
            expected: "a finite value > 0",
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> ConfigResult<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidTuning {
            field,
            value,
            expected: "a finite value >= 0",
        })
    }
}

fn ordered(field: &'static str, min: f32, max: f32) -> ConfigResult<()> {
    if min <= max && max.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidTuning {
            field,
            value: max,
            expected: "a finite max >= min",
        })
    }
}

impl Tuning {
    /// Load and validate a tuning file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let tuning: Tuning = persistence::load_json(path)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a tuning file, falling back to defaults if it is missing or invalid
    pub fn load_or_default(path: &Path) -> Self {
        let tuning: Tuning = persistence::load_json_or_default(path);
        match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("{e}; using default tuning");
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot work with
    pub fn validate(&self) -> ConfigResult<()> {
        let a = &self.asteroids;
        positive("asteroids.spawn_interval", a.spawn_interval)?;
        positive("asteroids.speed", a.speed)?;
        non_negative("asteroids.rotation_speed", a.rotation_speed)?;
        positive("asteroids.min_health", a.min_health)?;
        ordered("asteroids.max_health", a.min_health, a.max_health)?;
        positive("asteroids.death_speed", a.death_speed)?;
        non_negative("asteroids.death_rotation_speed", a.death_rotation_speed)?;
        positive("asteroids.death_health", a.death_health)?;
        positive("asteroids.death_zone_interval", a.death_zone_interval)?;
        if !(0.0..=1.0).contains(&a.death_chance) {
            return Err(ConfigError::InvalidTuning {
                field: "asteroids.death_chance",
                value: a.death_chance,
                expected: "a probability in [0, 1]",
            });
        }
        non_negative("asteroids.death_zone_grace", a.death_zone_grace)?;
        ordered(
            "asteroids.max_debris",
            a.min_debris as f32,
            a.max_debris as f32,
        )?;
        if a.max_debris > MAX_DEBRIS_PER_ASTEROID {
            return Err(ConfigError::InvalidTuning {
                field: "asteroids.max_debris",
                value: a.max_debris as f32,
                expected: "at most 64",
            });
        }

        let s = &self.spaceship;
        positive("spaceship.speed", s.speed)?;
        positive("spaceship.shot_delay", s.shot_delay)?;
        non_negative("spaceship.spawn_delay", s.spawn_delay)?;

        let l = &self.laser;
        positive("laser.speed", l.speed)?;
        positive("laser.min_damage", l.min_damage)?;
        ordered("laser.max_damage", l.min_damage, l.max_damage)?;
        positive("laser.max_falloff_damage", l.max_falloff_damage)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning: Tuning =
            serde_json::from_str(r#"{ "spaceship": { "lives": 2 } }"#).unwrap();
        assert_eq!(tuning.spaceship.lives, 2);
        assert_eq!(tuning.spaceship.spawn_delay, 3.0);
        assert_eq!(tuning.asteroids, AsteroidTuning::default());
    }

    #[test]
    fn test_inverted_health_band_rejected() {
        let mut tuning = Tuning::default();
        tuning.asteroids.min_health = 200.0;
        let err = tuning.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidTuning {
                field: "asteroids.max_health",
                ..
            }
        ));
    }

    #[test]
    fn test_death_chance_must_be_probability() {
        let mut tuning = Tuning::default();
        tuning.asteroids.death_chance = 1.5;
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_infinite_damage_rejected() {
        // 1e39 overflows f32 and parses as infinity
        let tuning: Tuning =
            serde_json::from_str(r#"{ "laser": { "max_damage": 1e39 } }"#).unwrap();
        assert!(tuning.laser.max_damage.is_infinite());
        let err = tuning.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidTuning {
                field: "laser.max_damage",
                ..
            }
        ));
    }

    #[test]
    fn test_infinite_health_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tuning.json");
        std::fs::write(&path, r#"{ "asteroids": { "max_health": 1e39 } }"#).unwrap();

        assert!(Tuning::load(&path).is_err());
        assert_eq!(Tuning::load_or_default(&path), Tuning::default());
    }

    #[test]
    fn test_debris_count_is_capped() {
        let mut tuning = Tuning::default();
        tuning.asteroids.max_debris = MAX_DEBRIS_PER_ASTEROID;
        assert!(tuning.validate().is_ok());
        tuning.asteroids.max_debris = 4_000_000_000;
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_nan_grace_rejected() {
        let mut tuning = Tuning::default();
        tuning.asteroids.death_zone_grace = f32::NAN;
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tuning.json");
        std::fs::write(&path, r#"{ "laser": { "speed": -3.0 } }"#).unwrap();

        assert!(Tuning::load(&path).is_err());
        assert_eq!(Tuning::load_or_default(&path), Tuning::default());
    }
}
