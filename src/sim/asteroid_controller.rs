//! Asteroid field
//!
//! Owns every asteroid and asteroid debris piece, paces spawning, watches the
//! death zone and resolves asteroid/asteroid and asteroid/spaceship contact.

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;

use super::aabb::{overlaps_2d, Aabb, DEATH_ZONE};
use super::asteroid::{Asteroid, AsteroidKind, HitOutcome};
use super::context::{AsteroidDestroyed, DestructionCause, SimContext};
use super::debris::AsteroidDebris;
use super::spaceship::Spaceship;
use crate::audio::SoundEffect;
use crate::consts::{ASTEROID_SPAWN_ATTEMPTS, CRITICAL_HIT_PITCH};
use crate::tuning::AsteroidTuning;
use crate::{random_direction, rotate_z};

#[derive(Debug, Clone)]
pub struct AsteroidController {
    tuning: AsteroidTuning,
    asteroids: Vec<Asteroid>,
    debris: Vec<AsteroidDebris>,
    frozen: bool,
    audio_enabled: bool,
    /// Seconds since the last normal spawn
    spawn_timer: f32,
    /// Seconds the spaceship has lingered in the death zone; starts negative
    death_zone_timer: f32,
}

impl AsteroidController {
    pub fn new(tuning: AsteroidTuning) -> Self {
        Self {
            tuning,
            asteroids: Vec::new(),
            debris: Vec::new(),
            frozen: false,
            audio_enabled: true,
            spawn_timer: 0.0,
            death_zone_timer: -tuning.death_zone_grace,
        }
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    pub fn debris(&self) -> &[AsteroidDebris] {
        &self.debris
    }

    /// True while any asteroid is still in play
    pub fn has_live_asteroids(&self) -> bool {
        self.asteroids.iter().any(|a| !a.should_be_removed())
    }

    pub fn death_zone_timer(&self) -> f32 {
        self.death_zone_timer
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Freeze or thaw the field and everything in it
    pub fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
        for asteroid in &mut self.asteroids {
            asteroid.set_frozen(frozen);
        }
        for debris in &mut self.debris {
            debris.set_frozen(frozen);
        }
    }

    pub fn is_audio_enabled(&self) -> bool {
        self.audio_enabled
    }

    pub fn set_audio_enabled(&mut self, enabled: bool) {
        self.audio_enabled = enabled;
    }

    fn candidate(&self, kind: AsteroidKind, target: Vec3, rng: &mut Pcg32) -> Asteroid {
        let distance = kind.spawn_distance();
        let initial = random_direction(rng) * distance;
        let final_position = match kind {
            AsteroidKind::Normal => {
                let spread = rng.random_range(-FRAC_PI_2..FRAC_PI_2);
                rotate_z(-initial.normalize(), spread) * distance
            }
            // Measured from the spawn point, not the origin, so the chord
            // crosses the target; twice the radius clears the far side
            AsteroidKind::Death => {
                initial + (target - initial).normalize_or_zero() * 2.0 * distance
            }
        };
        Asteroid::new(kind, initial, final_position, &self.tuning, rng)
    }

    /// Spawn an asteroid on the spawn circle, retrying placement a few times
    /// to avoid landing on another asteroid. Returns its index.
    pub fn spawn_asteroid(&mut self, kind: AsteroidKind, target: Vec3, rng: &mut Pcg32) -> usize {
        let mut asteroid = self.candidate(kind, target, rng);
        for _ in 1..ASTEROID_SPAWN_ATTEMPTS {
            if self.first_live_overlap(&asteroid).is_none() {
                break;
            }
            asteroid = self.candidate(kind, target, rng);
        }
        asteroid.set_frozen(self.frozen);
        log::debug!(
            "Spawned {:?} asteroid at {} heading to {}",
            kind,
            asteroid.initial_position(),
            asteroid.final_position()
        );
        self.asteroids.push(asteroid);
        self.asteroids.len() - 1
    }

    /// Index of the first asteroid still in play whose box overlaps `other`
    pub fn first_live_overlap<A: Aabb + ?Sized>(&self, other: &A) -> Option<usize> {
        self.asteroids
            .iter()
            .position(|a| !a.should_be_removed() && overlaps_2d(a, other))
    }

    /// Apply laser damage to the asteroid at `index`
    pub fn on_laser_hit(&mut self, index: usize, damage: f32, ctx: &mut SimContext) -> HitOutcome {
        let Some(asteroid) = self.asteroids.get_mut(index) else {
            return HitOutcome::Ignored;
        };
        let outcome = asteroid.on_laser_hit(damage);
        if let HitOutcome::Destroyed { critical } = outcome {
            let (kind, position) = (asteroid.kind(), asteroid.position());
            self.explode(kind, position, DestructionCause::Laser, critical, ctx);
        }
        outcome
    }

    fn destroy_at(&mut self, index: usize, cause: DestructionCause, ctx: &mut SimContext) {
        let asteroid = &mut self.asteroids[index];
        if asteroid.destroy() {
            let (kind, position) = (asteroid.kind(), asteroid.position());
            self.explode(kind, position, cause, false, ctx);
        }
    }

    /// Sound, debris burst and destruction report
    fn explode(
        &mut self,
        kind: AsteroidKind,
        position: Vec3,
        cause: DestructionCause,
        critical: bool,
        ctx: &mut SimContext,
    ) {
        if self.audio_enabled {
            let effect = match cause {
                DestructionCause::Laser => SoundEffect::Explosion,
                DestructionCause::Asteroid | DestructionCause::Spaceship => SoundEffect::RockHit,
            };
            let pitch = if critical { CRITICAL_HIT_PITCH } else { 1.0 };
            ctx.audio.play_one_shot(effect, position, pitch);
        }

        let mut count = if self.tuning.max_debris > self.tuning.min_debris {
            ctx.rng
                .random_range(self.tuning.min_debris..self.tuning.max_debris)
        } else {
            self.tuning.min_debris
        };
        if critical {
            count *= 2;
        }
        for _ in 0..count {
            let direction = random_direction(ctx.rng);
            let mut debris = AsteroidDebris::new(position, direction, ctx.rng);
            debris.set_frozen(self.frozen);
            self.debris.push(debris);
        }

        log::debug!(
            "{:?} asteroid destroyed by {:?} at {} (critical: {})",
            kind,
            cause,
            position,
            critical
        );
        ctx.sink.on_asteroid_destroyed(&AsteroidDestroyed {
            kind,
            position,
            cause,
            critical,
        });
    }

    fn watch_death_zone(&mut self, ship: &mut Spaceship, ctx: &mut SimContext) {
        if !overlaps_2d(ship, &DEATH_ZONE) {
            self.death_zone_timer = 0.0;
            return;
        }
        self.death_zone_timer += ctx.dt;
        if self.death_zone_timer < self.tuning.death_zone_interval {
            return;
        }
        self.death_zone_timer = 0.0;
        if ctx.rng.random::<f32>() < self.tuning.death_chance {
            self.spawn_asteroid(AsteroidKind::Death, ship.position(), ctx.rng);
            log::info!("Death asteroid incoming");
            ship.on_death_asteroid_incoming(ctx);
        }
    }

    /// One frame of the field: spawning, movement, contact resolution, debris
    pub fn tick(&mut self, mut ship: Option<&mut Spaceship>, ctx: &mut SimContext) {
        if !self.frozen {
            if let Some(ship) = ship.as_deref_mut().filter(|s| !s.is_dead()) {
                self.spawn_timer += ctx.dt;
                if self.spawn_timer > self.tuning.spawn_interval {
                    self.spawn_asteroid(AsteroidKind::Normal, ship.position(), ctx.rng);
                    self.spawn_timer = 0.0;
                }
                self.watch_death_zone(ship, ctx);
            }
        }

        self.asteroids.retain(|a| !a.should_be_removed());

        for i in 0..self.asteroids.len() {
            let asteroid = &mut self.asteroids[i];
            if asteroid.is_frozen() || asteroid.is_destroyed() {
                continue;
            }
            asteroid.advance(ctx.dt);
            if asteroid.should_be_removed() {
                continue;
            }

            if let Some(ship) = ship.as_deref_mut().filter(|s| !s.is_dead()) {
                if overlaps_2d(ship, &self.asteroids[i]) {
                    ship.on_asteroid_hit(self.asteroids[i].final_position());
                    self.destroy_at(i, DestructionCause::Spaceship, ctx);
                    continue;
                }
            }

            let current = &self.asteroids[i];
            let other = self
                .asteroids
                .iter()
                .enumerate()
                .position(|(j, b)| j != i && !b.should_be_removed() && overlaps_2d(current, b));
            if let Some(j) = other {
                self.destroy_at(i, DestructionCause::Asteroid, ctx);
                self.destroy_at(j, DestructionCause::Asteroid, ctx);
            }
        }

        self.debris.retain(|d| !d.should_be_removed());
        for debris in &mut self.debris {
            debris.advance(ctx.dt);
        }
    }
}
