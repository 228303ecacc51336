//! Laser shots

use glam::{Mat4, Vec3};
use rand::Rng;

use super::aabb::{overlaps_2d, Aabb, Bounds, SCREEN};
use super::asteroid_controller::AsteroidController;
use super::context::SimContext;
use crate::audio::{SoundEffect, SourceHandle};
use crate::consts::LASER_SIZE;
use crate::tuning::LaserTuning;

/// A laser shot in flight
#[derive(Debug, Clone)]
pub struct LaserShot {
    position: Vec3,
    direction: Vec3,
    /// Where the shooter was last seen; damage falls off with distance to it
    shooter_position: Vec3,
    damage: f32,
    speed: f32,
    max_falloff_damage: f32,
    frozen: bool,
    audio_enabled: bool,
    /// Hit something or left the screen
    resolved: bool,
    audio_source: Option<SourceHandle>,
}

impl LaserShot {
    pub fn new<R: Rng + ?Sized>(
        position: Vec3,
        direction: Vec3,
        shooter_position: Vec3,
        tuning: &LaserTuning,
        rng: &mut R,
    ) -> Self {
        let damage = if tuning.max_damage > tuning.min_damage {
            rng.random_range(tuning.min_damage..tuning.max_damage)
        } else {
            tuning.min_damage
        };
        Self {
            position,
            direction,
            shooter_position,
            damage,
            speed: tuning.speed,
            max_falloff_damage: tuning.max_falloff_damage,
            frozen: false,
            audio_enabled: true,
            resolved: false,
            audio_source: None,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn shooter_position(&self) -> Vec3 {
        self.shooter_position
    }

    /// Base damage before falloff
    pub fn damage(&self) -> f32 {
        self.damage
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub(crate) fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    pub(crate) fn set_audio_enabled(&mut self, enabled: bool) {
        self.audio_enabled = enabled;
    }

    pub fn audio_source(&self) -> Option<SourceHandle> {
        self.audio_source
    }

    pub(crate) fn attach_audio(&mut self, source: SourceHandle) {
        self.audio_source = Some(source);
    }

    /// Hand back the tracked audio source, if any
    pub(crate) fn take_audio(&mut self) -> Option<SourceHandle> {
        self.audio_source.take()
    }

    pub fn should_be_removed(&self) -> bool {
        self.resolved
    }

    /// Damage scaled by the inverse distance to the shooter, capped
    pub fn damage_with_falloff(&self) -> f32 {
        let d = self.damage / self.position.distance(self.shooter_position);
        if d.is_finite() {
            d.min(self.max_falloff_damage)
        } else {
            self.max_falloff_damage
        }
    }

    /// Fly, then resolve against the first live asteroid hit or the screen edge
    pub fn advance(
        &mut self,
        shooter_position: Vec3,
        asteroids: &mut AsteroidController,
        ctx: &mut SimContext,
    ) {
        if self.resolved || self.frozen {
            return;
        }
        self.shooter_position = shooter_position;

        let velocity = self.direction * self.speed;
        self.position += velocity * ctx.dt;
        if let Some(source) = self.audio_source {
            ctx.audio.move_source(source, self.position, velocity);
        }

        if let Some(index) = asteroids.first_live_overlap(self) {
            self.resolved = true;
            if self.audio_enabled {
                ctx.audio
                    .play_one_shot(SoundEffect::Hit, self.position, 1.0);
            }
            asteroids.on_laser_hit(index, self.damage_with_falloff(), ctx);
            return;
        }

        if !overlaps_2d(&Bounds::point(self.position), &SCREEN) {
            self.resolved = true;
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        let rotation = (-self.direction.x).atan2(self.direction.y);
        Mat4::from_translation(self.position)
            * Mat4::from_scale(Vec3::splat(LASER_SIZE))
            * Mat4::from_rotation_z(rotation)
    }
}

impl Aabb for LaserShot {
    fn min(&self) -> Vec3 {
        let half = LASER_SIZE / 2.0;
        Vec3::new(self.position.x - half, self.position.y - half, self.position.z)
    }

    fn max(&self) -> Vec3 {
        let half = LASER_SIZE / 2.0;
        Vec3::new(self.position.x + half, self.position.y + half, self.position.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::asteroid::AsteroidKind;
    use crate::sim::context::{DestructionCause, GameEvent, TestWorld};
    use crate::tuning::AsteroidTuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn shot_at(position: Vec3, direction: Vec3, shooter: Vec3) -> LaserShot {
        let mut rng = Pcg32::seed_from_u64(3);
        LaserShot::new(position, direction, shooter, &LaserTuning::default(), &mut rng)
    }

    #[test]
    fn test_damage_in_band() {
        let mut rng = Pcg32::seed_from_u64(9);
        let tuning = LaserTuning::default();
        for _ in 0..100 {
            let shot = LaserShot::new(Vec3::ZERO, Vec3::Y, Vec3::ZERO, &tuning, &mut rng);
            assert!(shot.damage() >= 10.0 && shot.damage() < 25.0);
        }
    }

    #[test]
    fn test_falloff_at_zero_distance_is_capped() {
        let shot = shot_at(Vec3::ZERO, Vec3::Y, Vec3::ZERO);
        assert_eq!(shot.damage_with_falloff(), 10_000.0);
        assert!(shot.damage_with_falloff().is_finite());
    }

    #[test]
    fn test_falloff_divides_by_distance() {
        let shot = shot_at(Vec3::new(0.0, 0.5, 0.0), Vec3::Y, Vec3::ZERO);
        let expected = shot.damage() / 0.5;
        assert!((shot.damage_with_falloff() - expected).abs() < 1e-4);
    }

    #[test]
    fn test_leaving_screen_resolves_silently() {
        let mut asteroids = AsteroidController::new(AsteroidTuning::default());
        let mut world = TestWorld::new(1);

        let mut shot = shot_at(Vec3::new(0.0, 0.95, 0.0), Vec3::Y, Vec3::ZERO);
        shot.advance(Vec3::ZERO, &mut asteroids, &mut world.ctx(0.1));
        assert!(shot.is_resolved());
        assert!(shot.should_be_removed());
        assert_eq!(world.audio.pending_effects().count(), 0);

        // Resolved shots never move again
        let position = shot.position();
        shot.advance(Vec3::ZERO, &mut asteroids, &mut world.ctx(0.1));
        assert_eq!(shot.position(), position);
    }

    #[test]
    fn test_hit_damages_asteroid_and_plays_hit() {
        let tuning = AsteroidTuning {
            min_health: 100.0,
            max_health: 100.0,
            ..AsteroidTuning::default()
        };
        let mut asteroids = AsteroidController::new(tuning);
        let mut world = TestWorld::new(1);
        asteroids.spawn_asteroid(AsteroidKind::Normal, Vec3::ZERO, &mut world.rng);
        let target = asteroids.asteroids()[0].position();

        // Point blank: falloff caps at the maximum and kills outright
        let mut shot = shot_at(target, Vec3::Y, target);
        shot.advance(target, &mut asteroids, &mut world.ctx(0.0));
        assert!(shot.is_resolved());

        let effects: Vec<_> = world.audio.pending_effects().collect();
        assert_eq!(effects, vec![SoundEffect::Hit, SoundEffect::Explosion]);
        assert!(matches!(
            world.events.as_slice(),
            [GameEvent::AsteroidDestroyed(e)] if e.cause == DestructionCause::Laser && e.critical
        ));
    }

    #[test]
    fn test_audio_follows_shot() {
        let mut asteroids = AsteroidController::new(AsteroidTuning::default());
        let mut world = TestWorld::new(1);
        let mut shot = shot_at(Vec3::ZERO, Vec3::Y, Vec3::ZERO);
        let source = world
            .audio
            .play_tracked(SoundEffect::Laser, Vec3::ZERO, 1.0)
            .unwrap();
        shot.attach_audio(source);
        world.audio.drain_commands();

        shot.advance(Vec3::ZERO, &mut asteroids, &mut world.ctx(0.1));
        assert!(matches!(
            world.audio.pending(),
            [crate::audio::AudioCommand::Move { source: s, .. }] if *s == source
        ));
        assert_eq!(shot.take_audio(), Some(source));
        assert_eq!(shot.audio_source(), None);
    }

    #[test]
    fn test_frozen_shot_stays_put() {
        let mut asteroids = AsteroidController::new(AsteroidTuning::default());
        let mut world = TestWorld::new(1);
        let mut shot = shot_at(Vec3::ZERO, Vec3::Y, Vec3::ZERO);
        shot.set_frozen(true);
        shot.advance(Vec3::ZERO, &mut asteroids, &mut world.ctx(0.1));
        assert_eq!(shot.position(), Vec3::ZERO);
        assert!(!shot.is_resolved());
    }
}
