//! Asteroid Shooter - asteroids vs. a lone spaceship
//!
//! Core modules:
//! - `sim`: Entity simulation (spawning, collisions, damage, lifecycle)
//! - `renderer`: Per-frame draw list handed to the graphics backend
//! - `audio`: Sound cue queue with explicit source handles
//! - `persistence`: JSON load/save helpers
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::{Vec2, Vec3};
use rand::Rng;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Largest frame delta the simulation accepts (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Asteroid box and render scale (NDC units)
    pub const ASTEROID_SIZE: f32 = 0.15;
    /// Spawn circle radius for normal asteroids
    pub const ASTEROID_SPAWN_DISTANCE: f32 = 1.4;
    /// Spawn circle radius for death asteroids
    pub const DEATH_ASTEROID_SPAWN_DISTANCE: f32 = 5.0;
    /// Placement attempts before accepting an overlapping asteroid
    pub const ASTEROID_SPAWN_ATTEMPTS: usize = 5;
    /// Red tint duration after a laser hit (seconds)
    pub const ASTEROID_HIT_FLASH_TIME: f32 = 0.15;
    /// Explosion pitch for critical hits
    pub const CRITICAL_HIT_PITCH: f32 = 0.5;
    /// Half extent of the central death zone
    pub const DEATH_ZONE_HALF_EXTENT: f32 = 0.45;

    pub const ASTEROID_DEBRIS_SPEED: f32 = 0.5;
    pub const ASTEROID_DEBRIS_SCALE: f32 = 0.06;
    pub const ASTEROID_DEBRIS_FADE_TIME: f32 = 1.5;

    /// Spaceship box (NDC units)
    pub const SPACESHIP_SIZE: f32 = 0.12;
    pub const SPACESHIP_RENDER_SCALE: f32 = 0.02;
    pub const SPACESHIP_SHOT_LEFT_OFFSET: Vec2 = Vec2::new(-0.0225, 0.09);
    pub const SPACESHIP_SHOT_RIGHT_OFFSET: Vec2 = Vec2::new(0.0225, 0.09);
    pub const SPACESHIP_DEATH_ZONE_ALERT_OFFSET: Vec2 = Vec2::new(0.0, -0.078);
    pub const SPACESHIP_ALARM_OFFSET: Vec2 = Vec2::new(0.0, -0.024);
    /// How long the death asteroid alarm light stays on (seconds)
    pub const SPACESHIP_ALARM_TIME: f32 = 1.0;

    pub const SPACESHIP_DEBRIS_SPEED: f32 = 0.4;
    pub const SPACESHIP_DEBRIS_SCALE: f32 = 0.02;
    pub const SPACESHIP_DEBRIS_FADE_TIME: f32 = 3.0;
    /// Spread of spaceship debris around the killer's heading (radians, total)
    pub const SPACESHIP_DEBRIS_SPREAD: f32 = std::f32::consts::FRAC_PI_2;

    /// Laser box and render scale
    pub const LASER_SIZE: f32 = 0.03;

    /// Score for a single asteroid kill
    pub const BASE_SCORE: u64 = 10_000;
    pub const DEATH_ASTEROID_SCORE_MULTIPLIER: u64 = 8;
    pub const CRITICAL_HIT_SCORE_MULTIPLIER: u64 = 4;
    /// Highest score shipped with the game
    pub const DEFAULT_HIGHEST_SCORE: u64 = 31_700;
}

/// Rotate a vector about the Z axis
#[inline]
pub fn rotate_z(v: Vec3, angle: f32) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    Vec3::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos, v.z)
}

/// Uniformly distributed unit direction in the XY plane
pub fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let angle = rng.random_range(0.0..std::f32::consts::TAU);
    Vec3::new(angle.cos(), angle.sin(), 0.0)
}

/// Per-axis correction keeping shapes square on a non-square window
pub fn aspect_scale(window_size: (u32, u32)) -> Vec2 {
    let (width, height) = window_size;
    if width == 0 || height == 0 || width == height {
        return Vec2::ONE;
    }
    if width > height {
        Vec2::new(height as f32 / width as f32, 1.0)
    } else {
        Vec2::new(1.0, width as f32 / height as f32)
    }
}

/// Convert a cursor position in window pixels to normalized device coordinates
pub fn cursor_to_ndc(cursor: Vec2, window_size: (u32, u32)) -> Vec2 {
    let (width, height) = window_size;
    let x = cursor.x / width as f32;
    let y = 1.0 - cursor.y / height as f32;
    Vec2::new((x - 0.5) * 2.0, (y - 0.5) * 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_rotate_z_quarter_turn() {
        let v = rotate_z(Vec3::new(0.0, 1.0, 0.0), -FRAC_PI_2);
        assert!((v.x - 1.0).abs() < 1e-6);
        assert!(v.y.abs() < 1e-6);
    }

    #[test]
    fn test_aspect_scale() {
        assert_eq!(aspect_scale((800, 800)), Vec2::ONE);
        assert_eq!(aspect_scale((1600, 800)), Vec2::new(0.5, 1.0));
        assert_eq!(aspect_scale((800, 1600)), Vec2::new(1.0, 0.5));
    }

    #[test]
    fn test_cursor_to_ndc_flips_y() {
        let top_left = cursor_to_ndc(Vec2::ZERO, (800, 600));
        assert_eq!(top_left, Vec2::new(-1.0, 1.0));
        let center = cursor_to_ndc(Vec2::new(400.0, 300.0), (800, 600));
        assert_eq!(center, Vec2::ZERO);
    }
}
