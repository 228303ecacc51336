//! The player spaceship
//!
//! Movement is clamped to the play field by trial and rollback: each held
//! direction key moves one axis, and the move is undone if the ship's box no
//! longer touches the screen box. Axes are tested independently, so a ship
//! pinned against one edge still slides along the other.

use glam::{Mat4, Vec2, Vec3};

use super::aabb::{overlaps_2d, Aabb, DEATH_ZONE, SCREEN};
use super::context::SimContext;
use super::game::FrameInput;
use super::laser::LaserShot;
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::tuning::{LaserTuning, SpaceshipTuning};
use crate::{aspect_scale, cursor_to_ndc, rotate_z};

/// Height above the ship of its indicator lights
const LIGHT_HEIGHT: f32 = 0.02;

#[derive(Debug, Clone)]
pub struct Spaceship {
    position: Vec3,
    /// Unit aim direction
    direction: Vec3,
    /// Rotation about Z; zero faces +Y
    rotation: f32,
    shot_cooldown: f32,
    /// Next shot leaves from the left muzzle
    shoot_left: bool,
    dead: bool,
    frozen: bool,
    audio_enabled: bool,
    in_death_zone: bool,
    alarm_time: f32,
    /// Direction the wreck scatters in, set when an asteroid rams the ship
    debris_direction: Option<Vec3>,
    aspect: Vec2,
    speed: f32,
    shot_delay: f32,
    laser: LaserTuning,
}

impl Spaceship {
    /// New spaceship at the origin facing up
    pub fn new(tuning: &SpaceshipTuning, laser: &LaserTuning) -> Self {
        Self {
            position: Vec3::ZERO,
            direction: Vec3::Y,
            rotation: 0.0,
            shot_cooldown: 0.0,
            shoot_left: false,
            dead: false,
            frozen: false,
            audio_enabled: true,
            in_death_zone: false,
            alarm_time: 0.0,
            debris_direction: None,
            aspect: Vec2::ONE,
            speed: tuning.speed,
            shot_delay: tuning.shot_delay,
            laser: *laser,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    #[cfg(test)]
    pub(crate) fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn should_be_removed(&self) -> bool {
        self.dead
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

    /// Box overlapped the death zone as of the last advance
    pub fn in_death_zone(&self) -> bool {
        self.in_death_zone
    }

    /// Alarm light strength, 1.0 right after a death asteroid spawns
    pub fn alarm_intensity(&self) -> f32 {
        (self.alarm_time / SPACESHIP_ALARM_TIME).clamp(0.0, 1.0)
    }

    pub fn debris_direction(&self) -> Option<Vec3> {
        self.debris_direction
    }

    /// An asteroid flying toward `asteroid_final_position` rammed the ship
    pub fn on_asteroid_hit(&mut self, asteroid_final_position: Vec3) {
        self.dead = true;
        self.debris_direction = Some(-asteroid_final_position.normalize_or_zero());
    }

    /// A death asteroid was sent at the ship
    pub fn on_death_asteroid_incoming(&mut self, ctx: &mut SimContext) {
        self.alarm_time = SPACESHIP_ALARM_TIME;
        if self.audio_enabled {
            ctx.audio
                .play_one_shot(SoundEffect::Alarm, self.position, 1.0);
        }
    }

    /// World position of a ship-relative offset, following the ship's facing
    fn attached(&self, offset: Vec2) -> Vec3 {
        rotate_z(offset.extend(LIGHT_HEIGHT), self.rotation) + self.position
    }

    pub fn death_zone_alert_position(&self) -> Vec3 {
        self.attached(SPACESHIP_DEATH_ZONE_ALERT_OFFSET)
    }

    pub fn alarm_position(&self) -> Vec3 {
        self.attached(SPACESHIP_ALARM_OFFSET)
    }

    fn try_move(&mut self, delta: Vec3) {
        self.position += delta;
        if !overlaps_2d(self, &SCREEN) {
            self.position -= delta;
        }
    }

    /// One frame of input handling; returns the shot fired this frame, if any
    pub fn advance(&mut self, input: &FrameInput, ctx: &mut SimContext) -> Option<LaserShot> {
        self.aspect = aspect_scale(input.window_size);
        self.in_death_zone = overlaps_2d(self, &DEATH_ZONE);

        if self.frozen {
            return None;
        }

        if self.shot_cooldown > 0.0 {
            self.shot_cooldown -= ctx.dt;
        }
        self.alarm_time = (self.alarm_time - ctx.dt).max(0.0);

        let step = self.speed * ctx.dt;
        if input.up {
            self.try_move(Vec3::new(0.0, step, 0.0));
        }
        if input.left {
            self.try_move(Vec3::new(-step, 0.0, 0.0));
        }
        if input.down {
            self.try_move(Vec3::new(0.0, -step, 0.0));
        }
        if input.right {
            self.try_move(Vec3::new(step, 0.0, 0.0));
        }

        let cursor = cursor_to_ndc(input.cursor, input.window_size);
        let direction = (cursor.extend(0.0) - self.position).normalize();
        self.direction = if direction.is_finite() {
            direction
        } else {
            Vec3::Y
        };
        self.rotation = (-self.direction.x).atan2(self.direction.y);

        let shot = if input.fire && self.shot_cooldown <= 0.0 && !self.dead {
            Some(self.fire(ctx))
        } else {
            None
        };

        if input.self_destruct {
            log::debug!("Spaceship self-destructed");
            self.dead = true;
        }

        shot
    }

    fn fire(&mut self, ctx: &mut SimContext) -> LaserShot {
        let offset = if self.shoot_left {
            SPACESHIP_SHOT_LEFT_OFFSET
        } else {
            SPACESHIP_SHOT_RIGHT_OFFSET
        };
        self.shoot_left = !self.shoot_left;
        self.shot_cooldown = self.shot_delay;

        let muzzle = rotate_z(offset.extend(0.0), self.rotation)
            * Vec3::new(self.aspect.x, self.aspect.y, 1.0)
            + self.position;

        let mut shot = LaserShot::new(muzzle, self.direction, self.position, &self.laser, ctx.rng);
        shot.set_frozen(self.frozen);
        shot.set_audio_enabled(self.audio_enabled);
        if self.audio_enabled {
            if let Some(source) = ctx.audio.play_tracked(SoundEffect::Laser, muzzle, 1.0) {
                shot.attach_audio(source);
            }
        }
        shot
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_scale(Vec3::new(
                SPACESHIP_RENDER_SCALE * self.aspect.x,
                SPACESHIP_RENDER_SCALE * self.aspect.y,
                SPACESHIP_RENDER_SCALE,
            ))
            * Mat4::from_rotation_z(self.rotation)
    }
}

impl Aabb for Spaceship {
    fn min(&self) -> Vec3 {
        let half = SPACESHIP_SIZE / 2.0;
        Vec3::new(self.position.x - half, self.position.y - half, self.position.z)
    }

    fn max(&self) -> Vec3 {
        let half = SPACESHIP_SIZE / 2.0;
        Vec3::new(self.position.x + half, self.position.y + half, self.position.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioCommand;
    use crate::sim::context::TestWorld;

    fn ship() -> Spaceship {
        Spaceship::new(&SpaceshipTuning::default(), &LaserTuning::default())
    }

    #[test]
    fn test_corner_rolls_back_only_blocked_axis() {
        let mut ship = ship();
        ship.position = Vec3::new(1.05, 0.0, 0.0);
        let mut world = TestWorld::new(1);
        let input = FrameInput {
            up: true,
            right: true,
            ..FrameInput::default()
        };

        ship.advance(&input, &mut world.ctx(0.1));

        // Moving right would push the box off screen; moving up is fine
        assert!((ship.position().x - 1.05).abs() < 1e-6);
        assert!((ship.position().y - 0.08).abs() < 1e-6);
    }

    #[test]
    fn test_ship_never_leaves_screen() {
        let mut ship = ship();
        let mut world = TestWorld::new(1);
        let input = FrameInput {
            up: true,
            left: true,
            ..FrameInput::default()
        };
        for _ in 0..100 {
            ship.advance(&input, &mut world.ctx(0.1));
            assert!(overlaps_2d(&ship, &SCREEN));
        }
        assert!(ship.position().x < -0.9 && ship.position().y > 0.9);
    }

    #[test]
    fn test_degenerate_aim_faces_up() {
        let mut ship = ship();
        let mut world = TestWorld::new(1);
        // Cursor at the window center, which is the ship's position
        ship.advance(&FrameInput::default(), &mut world.ctx(0.1));
        assert_eq!(ship.direction(), Vec3::Y);
        assert_eq!(ship.rotation(), 0.0);
    }

    #[test]
    fn test_aim_follows_cursor() {
        let mut ship = ship();
        let mut world = TestWorld::new(1);
        let input = FrameInput {
            cursor: Vec2::new(800.0, 400.0),
            ..FrameInput::default()
        };
        ship.advance(&input, &mut world.ctx(0.1));
        assert!((ship.direction() - Vec3::X).length() < 1e-6);
        assert!((ship.rotation() + std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_muzzles_alternate_starting_right() {
        let mut ship = ship();
        let mut world = TestWorld::new(1);
        let input = FrameInput {
            fire: true,
            ..FrameInput::default()
        };

        let first = ship.advance(&input, &mut world.ctx(0.1)).unwrap();
        assert!((first.position().x - 0.0225).abs() < 1e-6);
        assert!((first.position().y - 0.09).abs() < 1e-6);

        // Still cooling down
        assert!(ship.advance(&input, &mut world.ctx(0.1)).is_none());

        let second = ship.advance(&input, &mut world.ctx(0.3)).unwrap();
        assert!((second.position().x + 0.0225).abs() < 1e-6);
        assert!(first.audio_source().is_some());
        assert_eq!(world.audio.tracked_sources(), 2);
    }

    #[test]
    fn test_muzzle_scaled_by_aspect() {
        let mut ship = ship();
        let mut world = TestWorld::new(1);
        let input = FrameInput {
            fire: true,
            window_size: (1600, 800),
            cursor: Vec2::new(800.0, 0.0),
            ..FrameInput::default()
        };
        let shot = ship.advance(&input, &mut world.ctx(0.1)).unwrap();
        assert!((shot.position().x - 0.01125).abs() < 1e-6);
    }

    #[test]
    fn test_self_destruct_stops_firing() {
        let mut ship = ship();
        let mut world = TestWorld::new(1);
        let input = FrameInput {
            self_destruct: true,
            ..FrameInput::default()
        };
        ship.advance(&input, &mut world.ctx(0.1));
        assert!(ship.is_dead());
        assert!(ship.should_be_removed());

        let fire = FrameInput {
            fire: true,
            ..FrameInput::default()
        };
        assert!(ship.advance(&fire, &mut world.ctx(0.5)).is_none());
    }

    #[test]
    fn test_frozen_ship_refreshes_death_zone_only() {
        let mut ship = ship();
        ship.set_frozen(true);
        let mut world = TestWorld::new(1);
        let input = FrameInput {
            up: true,
            fire: true,
            ..FrameInput::default()
        };
        assert!(ship.advance(&input, &mut world.ctx(0.1)).is_none());
        assert_eq!(ship.position(), Vec3::ZERO);
        assert!(ship.in_death_zone());
    }

    #[test]
    fn test_alarm_decays() {
        let mut ship = ship();
        let mut world = TestWorld::new(1);
        ship.on_death_asteroid_incoming(&mut world.ctx(0.0));
        assert_eq!(ship.alarm_intensity(), 1.0);
        assert!(matches!(
            world.audio.pending(),
            [AudioCommand::Play { effect: SoundEffect::Alarm, .. }]
        ));

        ship.advance(&FrameInput::default(), &mut world.ctx(0.5));
        assert!((ship.alarm_intensity() - 0.5).abs() < 1e-6);
        ship.advance(&FrameInput::default(), &mut world.ctx(0.6));
        assert_eq!(ship.alarm_intensity(), 0.0);
    }

    #[test]
    fn test_asteroid_hit_scatters_away_from_its_target() {
        let mut ship = ship();
        ship.on_asteroid_hit(Vec3::new(0.0, -1.4, 0.0));
        assert!(ship.is_dead());
        assert_eq!(ship.debris_direction(), Some(Vec3::Y));
    }
}
