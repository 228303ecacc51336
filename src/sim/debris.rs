//! Debris particles left behind by explosions

use std::f32::consts::TAU;

use glam::{Mat4, Vec3};
use rand::Rng;

use crate::consts::*;

/// Spin of every debris piece (radians/sec)
const DEBRIS_SPIN_SPEED: f32 = 2.0;

/// Shared flight state of a debris piece
#[derive(Debug, Clone)]
struct Fragment {
    position: Vec3,
    direction: Vec3,
    rotation_x: f32,
    rotation_y: f32,
    spin: f32,
    fade: f32,
    frozen: bool,
}

impl Fragment {
    fn new<R: Rng + ?Sized>(position: Vec3, direction: Vec3, fade: f32, rng: &mut R) -> Self {
        Self {
            position,
            direction,
            rotation_x: rng.random_range(0.0..TAU),
            rotation_y: rng.random_range(0.0..TAU),
            spin: 0.0,
            fade,
            frozen: false,
        }
    }

    fn advance(&mut self, speed: f32, dt: f32) {
        if self.frozen {
            return;
        }
        self.fade -= dt;
        self.position += self.direction * speed * dt;
        self.spin += DEBRIS_SPIN_SPEED * dt;
        if self.spin > TAU {
            self.spin = 0.0;
        }
    }

    fn model_matrix(&self, scale: f32) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_scale(Vec3::splat(scale))
            * Mat4::from_rotation_x(self.rotation_x)
            * Mat4::from_rotation_y(self.rotation_y)
            * Mat4::from_rotation_z(self.spin)
    }
}

/// Rock fragment from a destroyed asteroid
#[derive(Debug, Clone)]
pub struct AsteroidDebris(Fragment);

impl AsteroidDebris {
    pub fn new<R: Rng + ?Sized>(position: Vec3, direction: Vec3, rng: &mut R) -> Self {
        Self(Fragment::new(
            position,
            direction,
            ASTEROID_DEBRIS_FADE_TIME,
            rng,
        ))
    }

    pub fn position(&self) -> Vec3 {
        self.0.position
    }

    pub fn direction(&self) -> Vec3 {
        self.0.direction
    }

    pub fn is_frozen(&self) -> bool {
        self.0.frozen
    }

    pub(crate) fn set_frozen(&mut self, frozen: bool) {
        self.0.frozen = frozen;
    }

    pub fn should_be_removed(&self) -> bool {
        self.0.fade <= 0.0
    }

    pub fn advance(&mut self, dt: f32) {
        self.0.advance(ASTEROID_DEBRIS_SPEED, dt);
    }

    /// 1.0 when fresh, 0.0 when faded out
    pub fn opacity(&self) -> f32 {
        (self.0.fade / ASTEROID_DEBRIS_FADE_TIME).clamp(0.0, 1.0)
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.0.model_matrix(ASTEROID_DEBRIS_SCALE)
    }
}

/// Pieces a spaceship breaks into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebrisPart {
    Body,
    Cockpit,
    LeftWing,
    RightWing,
}

impl DebrisPart {
    pub const ALL: [DebrisPart; 4] = [
        DebrisPart::Body,
        DebrisPart::Cockpit,
        DebrisPart::LeftWing,
        DebrisPart::RightWing,
    ];
}

/// Spaceship fragment
#[derive(Debug, Clone)]
pub struct SpaceshipDebris {
    part: DebrisPart,
    fragment: Fragment,
}

impl SpaceshipDebris {
    pub fn new<R: Rng + ?Sized>(
        part: DebrisPart,
        position: Vec3,
        direction: Vec3,
        rng: &mut R,
    ) -> Self {
        Self {
            part,
            fragment: Fragment::new(position, direction, SPACESHIP_DEBRIS_FADE_TIME, rng),
        }
    }

    pub fn part(&self) -> DebrisPart {
        self.part
    }

    pub fn position(&self) -> Vec3 {
        self.fragment.position
    }

    pub fn direction(&self) -> Vec3 {
        self.fragment.direction
    }

    pub fn is_frozen(&self) -> bool {
        self.fragment.frozen
    }

    pub(crate) fn set_frozen(&mut self, frozen: bool) {
        self.fragment.frozen = frozen;
    }

    pub fn should_be_removed(&self) -> bool {
        self.fragment.fade <= 0.0
    }

    pub fn advance(&mut self, dt: f32) {
        self.fragment.advance(SPACESHIP_DEBRIS_SPEED, dt);
    }

    pub fn opacity(&self) -> f32 {
        (self.fragment.fade / SPACESHIP_DEBRIS_FADE_TIME).clamp(0.0, 1.0)
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.fragment.model_matrix(SPACESHIP_DEBRIS_SCALE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_asteroid_debris_fades_out() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut debris = AsteroidDebris::new(Vec3::ZERO, Vec3::X, &mut rng);
        assert_eq!(debris.opacity(), 1.0);

        debris.advance(1.0);
        assert!((debris.position().x - 0.5).abs() < 1e-6);
        assert!(!debris.should_be_removed());
        assert!((debris.opacity() - 1.0 / 3.0).abs() < 1e-5);

        debris.advance(0.5);
        assert!(debris.should_be_removed());
        assert_eq!(debris.opacity(), 0.0);
    }

    #[test]
    fn test_spaceship_debris_outlives_asteroid_debris() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut debris = SpaceshipDebris::new(DebrisPart::Cockpit, Vec3::ZERO, Vec3::Y, &mut rng);
        debris.advance(2.0);
        assert!(!debris.should_be_removed());
        assert!((debris.position().y - 0.8).abs() < 1e-6);
        debris.advance(1.0);
        assert!(debris.should_be_removed());
    }

    #[test]
    fn test_frozen_debris_keeps_fading_state() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut debris = AsteroidDebris::new(Vec3::ZERO, Vec3::X, &mut rng);
        debris.set_frozen(true);
        debris.advance(10.0);
        assert_eq!(debris.position(), Vec3::ZERO);
        assert!(!debris.should_be_removed());
    }
}
