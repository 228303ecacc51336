//! Spaceship lifecycle, laser shots and spaceship debris

use glam::Vec3;
use rand::Rng;

use super::asteroid_controller::AsteroidController;
use super::context::SimContext;
use super::debris::{DebrisPart, SpaceshipDebris};
use super::game::FrameInput;
use super::laser::LaserShot;
use super::spaceship::Spaceship;
use crate::audio::{AudioManager, SoundEffect};
use crate::consts::SPACESHIP_DEBRIS_SPREAD;
use crate::tuning::{LaserTuning, SpaceshipTuning};
use crate::{random_direction, rotate_z};

/// Where the player is in the spawn/die cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpaceshipState {
    /// No spaceship; waiting for the field to clear
    Absent,
    /// No spaceship; respawn delay still counting down
    Spawning { remaining: f32 },
    Alive,
    /// Out of lives
    GameOver,
}

#[derive(Debug, Clone)]
pub struct SpaceshipController {
    tuning: SpaceshipTuning,
    laser: LaserTuning,
    spaceship: Option<Spaceship>,
    shots: Vec<LaserShot>,
    debris: Vec<SpaceshipDebris>,
    lives: u32,
    spawn_delay: f32,
    game_over: bool,
    frozen: bool,
    audio_enabled: bool,
    /// Falloff origin for shots once their shooter is gone
    last_ship_position: Vec3,
}

impl SpaceshipController {
    pub fn new(tuning: SpaceshipTuning, laser: LaserTuning) -> Self {
        Self {
            tuning,
            laser,
            spaceship: None,
            shots: Vec::new(),
            debris: Vec::new(),
            lives: tuning.lives,
            spawn_delay: 0.0,
            game_over: false,
            frozen: false,
            audio_enabled: true,
            last_ship_position: Vec3::ZERO,
        }
    }

    pub fn spaceship(&self) -> Option<&Spaceship> {
        self.spaceship.as_ref()
    }

    pub(crate) fn spaceship_mut(&mut self) -> Option<&mut Spaceship> {
        self.spaceship.as_mut()
    }

    pub fn shots(&self) -> &[LaserShot] {
        &self.shots
    }

    pub fn debris(&self) -> &[SpaceshipDebris] {
        &self.debris
    }

    /// Lives not yet used
    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn state(&self) -> SpaceshipState {
        if self.game_over {
            SpaceshipState::GameOver
        } else if self.spaceship.is_some() {
            SpaceshipState::Alive
        } else if self.spawn_delay > 0.0 {
            SpaceshipState::Spawning {
                remaining: self.spawn_delay,
            }
        } else {
            SpaceshipState::Absent
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
        if let Some(ship) = self.spaceship.as_mut() {
            ship.set_frozen(frozen);
        }
        for shot in &mut self.shots {
            shot.set_frozen(frozen);
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
        if let Some(ship) = self.spaceship.as_mut() {
            ship.set_audio_enabled(enabled);
        }
        for shot in &mut self.shots {
            shot.set_audio_enabled(enabled);
        }
    }

    /// Drop every tracked laser source, for when the controller is discarded
    pub(crate) fn release_audio(&mut self, audio: &mut AudioManager) {
        for shot in &mut self.shots {
            if let Some(source) = shot.take_audio() {
                audio.release(source);
            }
        }
    }

    fn spawn_spaceship(&mut self) {
        let mut ship = Spaceship::new(&self.tuning, &self.laser);
        ship.set_frozen(self.frozen);
        ship.set_audio_enabled(self.audio_enabled);
        self.last_ship_position = ship.position();
        self.spaceship = Some(ship);
    }

    fn on_spaceship_destroyed(&mut self, ship: Spaceship, ctx: &mut SimContext) {
        let position = ship.position();
        let heading = match ship.debris_direction() {
            Some(direction) => direction,
            None => random_direction(ctx.rng),
        };
        let half_spread = SPACESHIP_DEBRIS_SPREAD / 2.0;
        for part in DebrisPart::ALL {
            let direction =
                rotate_z(heading, ctx.rng.random_range(-half_spread..half_spread)).normalize_or_zero();
            let mut debris = SpaceshipDebris::new(part, position, direction, ctx.rng);
            debris.set_frozen(self.frozen);
            self.debris.push(debris);
        }

        if self.audio_enabled {
            ctx.audio
                .play_one_shot(SoundEffect::SpaceshipExplosion, position, 1.0);
        }
        log::info!(
            "Spaceship destroyed at {}, {} lives left",
            position,
            self.lives
        );
        ctx.sink.on_spaceship_destroyed(position);
        self.spawn_delay = self.tuning.spawn_delay;
    }

    /// One frame: respawn or game over, the spaceship, its shots, its debris
    pub fn tick(
        &mut self,
        input: &FrameInput,
        asteroids: &mut AsteroidController,
        ctx: &mut SimContext,
    ) {
        if !self.frozen && !self.game_over {
            self.spawn_delay = (self.spawn_delay - ctx.dt).max(0.0);
            let field_clear = self.spaceship.is_none()
                && !asteroids.has_live_asteroids()
                && self.debris.is_empty();
            if self.spawn_delay <= 0.0 && field_clear {
                if self.lives == 0 {
                    self.game_over = true;
                    if self.audio_enabled {
                        ctx.audio
                            .play_one_shot(SoundEffect::GameOver, Vec3::ZERO, 1.0);
                    }
                    log::info!("Game over");
                    ctx.sink.on_game_over();
                } else {
                    self.spawn_spaceship();
                    self.lives -= 1;
                    log::info!("Spaceship spawned, {} lives left", self.lives);
                }
            }
        }

        if let Some(ship) = self.spaceship.as_mut() {
            if let Some(shot) = ship.advance(input, ctx) {
                self.shots.push(shot);
            }
            self.last_ship_position = ship.position();
        }
        if let Some(ship) = self.spaceship.take_if(|s| s.should_be_removed()) {
            self.on_spaceship_destroyed(ship, ctx);
        }

        self.shots.retain_mut(|shot| {
            if !shot.should_be_removed() {
                return true;
            }
            if let Some(source) = shot.take_audio() {
                ctx.audio.release(source);
            }
            false
        });
        let shooter = self.last_ship_position;
        for shot in &mut self.shots {
            shot.advance(shooter, asteroids, ctx);
        }

        self.debris.retain(|d| !d.should_be_removed());
        for debris in &mut self.debris {
            debris.advance(ctx.dt);
        }
    }
}
