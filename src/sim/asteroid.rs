//! Asteroids
//!
//! An asteroid travels a straight chord from `initial` to `final` as its
//! interpolation parameter `t` runs from 0 to 1. It leaves the field when
//! `t` reaches 1 or its health runs out.

use std::f32::consts::TAU;

use glam::{Mat4, Vec3, Vec4};
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::consts::*;
use crate::tuning::AsteroidTuning;

/// Asteroid variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AsteroidKind {
    /// Crosses the field along a random chord
    #[default]
    Normal,
    /// Spawns far away and flies through the spaceship's position
    Death,
}

impl AsteroidKind {
    /// Radius of the circle this kind spawns on
    pub fn spawn_distance(&self) -> f32 {
        match self {
            AsteroidKind::Normal => ASTEROID_SPAWN_DISTANCE,
            AsteroidKind::Death => DEATH_ASTEROID_SPAWN_DISTANCE,
        }
    }
}

/// Result of a laser hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Already destroyed; nothing happened
    Ignored,
    /// Took damage and survived
    Damaged,
    /// This hit destroyed it
    Destroyed { critical: bool },
}

/// An asteroid entity
#[derive(Debug, Clone)]
pub struct Asteroid {
    kind: AsteroidKind,
    initial_position: Vec3,
    final_position: Vec3,
    /// Interpolation parameter along the chord
    t: f32,
    position: Vec3,
    rotation_x: f32,
    rotation_y: f32,
    /// Accumulated spin about Z, wrapped to [0, 2π)
    spin: f32,
    speed: f32,
    rotation_speed: f32,
    health: f32,
    max_health: f32,
    hit_flash: f32,
    frozen: bool,
}

impl Asteroid {
    pub fn new(
        kind: AsteroidKind,
        initial_position: Vec3,
        final_position: Vec3,
        tuning: &AsteroidTuning,
        rng: &mut Pcg32,
    ) -> Self {
        let (speed, rotation_speed, health) = match kind {
            AsteroidKind::Normal => {
                let health = if tuning.max_health > tuning.min_health {
                    rng.random_range(tuning.min_health..=tuning.max_health)
                } else {
                    tuning.min_health
                };
                (tuning.speed, tuning.rotation_speed, health)
            }
            AsteroidKind::Death => (
                tuning.death_speed,
                tuning.death_rotation_speed,
                tuning.death_health,
            ),
        };

        Self {
            kind,
            initial_position,
            final_position,
            t: 0.0,
            position: initial_position,
            rotation_x: rng.random_range(0.0..TAU),
            rotation_y: rng.random_range(0.0..TAU),
            spin: 0.0,
            speed,
            rotation_speed,
            health,
            max_health: health,
            hit_flash: 0.0,
            frozen: false,
        }
    }

    pub fn kind(&self) -> AsteroidKind {
        self.kind
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn initial_position(&self) -> Vec3 {
        self.initial_position
    }

    pub fn final_position(&self) -> Vec3 {
        self.final_position
    }

    /// Interpolation parameter along the chord
    pub fn progress(&self) -> f32 {
        self.t
    }

    /// Unit direction of travel
    pub fn heading(&self) -> Vec3 {
        (self.final_position - self.initial_position).normalize_or_zero()
    }

    pub fn spin(&self) -> f32 {
        self.spin
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    /// Health at spawn
    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    pub fn hit_flash(&self) -> f32 {
        self.hit_flash
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub(crate) fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0.0
    }

    pub fn should_be_removed(&self) -> bool {
        self.t >= 1.0 || self.health <= 0.0
    }

    /// Move along the chord, spin, and fade the hit flash
    pub fn advance(&mut self, dt: f32) {
        if self.frozen {
            return;
        }
        self.t += self.speed * dt;
        self.position = self.initial_position.lerp(self.final_position, self.t);

        self.spin += self.rotation_speed * dt;
        if self.spin >= TAU {
            self.spin -= TAU;
        }

        self.hit_flash = (self.hit_flash - dt).max(0.0);
    }

    /// Apply laser damage (already distance-adjusted)
    pub fn on_laser_hit(&mut self, damage: f32) -> HitOutcome {
        if self.health <= 0.0 {
            return HitOutcome::Ignored;
        }
        self.health -= damage;
        self.hit_flash = ASTEROID_HIT_FLASH_TIME;
        if self.health <= 0.0 {
            HitOutcome::Destroyed {
                critical: damage > self.max_health,
            }
        } else {
            HitOutcome::Damaged
        }
    }

    /// Destroy outright (collision). Returns false if it was already destroyed.
    pub fn destroy(&mut self) -> bool {
        if self.health <= 0.0 {
            return false;
        }
        self.health = 0.0;
        true
    }

    /// Model transform for rendering
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_scale(Vec3::splat(ASTEROID_SIZE))
            * Mat4::from_rotation_x(self.rotation_x)
            * Mat4::from_rotation_y(self.rotation_y)
            * Mat4::from_rotation_z(self.spin)
    }

    /// White, blending toward red while the hit flash is active
    pub fn tint(&self) -> Vec4 {
        let flash = (self.hit_flash / ASTEROID_HIT_FLASH_TIME).clamp(0.0, 1.0);
        Vec4::new(1.0, 1.0 - 0.7 * flash, 1.0 - 0.7 * flash, 1.0)
    }
}

impl Aabb for Asteroid {
    fn min(&self) -> Vec3 {
        let half = ASTEROID_SIZE / 2.0;
        Vec3::new(self.position.x - half, self.position.y - half, self.position.z)
    }

    fn max(&self) -> Vec3 {
        let half = ASTEROID_SIZE / 2.0;
        Vec3::new(self.position.x + half, self.position.y + half, self.position.z)
    }
}
