//! Frame snapshot for the graphics backend
//!
//! The simulation never draws. Once per frame the backend builds a
//! [`DrawList`] from the [`Game`] and turns each command into a draw call
//! with the mesh and texture it names.

use glam::{Mat4, Vec3, Vec4};

use super::instance::{colors, lights, Instance};
use crate::sim::aabb::{Aabb, Bounds, DEATH_ZONE};
use crate::sim::debris::DebrisPart;
use crate::sim::Game;

/// Meshes the backend must provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshId {
    Asteroid,
    AsteroidDebris,
    Spaceship,
    SpaceshipDebris(DebrisPart),
    Laser,
}

/// Textures the backend must provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureId {
    Asteroid,
    Spaceship,
    Laser,
}

impl MeshId {
    pub fn texture(&self) -> TextureId {
        match self {
            MeshId::Asteroid | MeshId::AsteroidDebris => TextureId::Asteroid,
            MeshId::Spaceship | MeshId::SpaceshipDebris(_) => TextureId::Spaceship,
            MeshId::Laser => TextureId::Laser,
        }
    }

    /// Lasers glow on their own
    pub fn lit(&self) -> bool {
        !matches!(self, MeshId::Laser)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub mesh: MeshId,
    pub instance: Instance,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
}

impl PointLight {
    fn new(position: Vec3, (ambient, diffuse): ([f32; 3], [f32; 3]), power: f32) -> Self {
        Self {
            position,
            ambient: Vec3::from_array(ambient) * power,
            diffuse: Vec3::from_array(diffuse) * power,
        }
    }
}

/// Everything visible this frame
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
    pub lights: Vec<PointLight>,
    /// Debug overlay boxes, empty unless requested
    pub hitboxes: Vec<Bounds>,
}

impl DrawList {
    pub fn build(game: &Game, show_hitboxes: bool) -> Self {
        let mut list = DrawList::default();
        let asteroids = game.asteroids();
        let spaceships = game.spaceships();

        for asteroid in asteroids.asteroids().iter().filter(|a| !a.should_be_removed()) {
            list.push(MeshId::Asteroid, Instance::new(asteroid.model_matrix(), asteroid.tint()));
            if show_hitboxes {
                list.hitboxes.push(asteroid.bounds());
            }
        }
        for debris in asteroids.debris() {
            list.push(
                MeshId::AsteroidDebris,
                Instance::faded(debris.model_matrix(), colors::WHITE, debris.opacity()),
            );
        }

        if let Some(ship) = spaceships.spaceship() {
            list.push(MeshId::Spaceship, Instance::new(ship.model_matrix(), Vec4::ONE));
            if ship.in_death_zone() {
                list.lights.push(PointLight::new(
                    ship.death_zone_alert_position(),
                    lights::DEATH_ZONE_ALERT,
                    1.0,
                ));
            }
            let alarm = ship.alarm_intensity();
            if alarm > 0.0 {
                list.lights
                    .push(PointLight::new(ship.alarm_position(), lights::ALARM, alarm));
            }
            if show_hitboxes {
                list.hitboxes.push(ship.bounds());
            }
        }

        for shot in spaceships.shots().iter().filter(|s| !s.is_resolved()) {
            list.push(MeshId::Laser, Instance::new(shot.model_matrix(), Vec4::from_array(colors::LASER)));
            list.lights
                .push(PointLight::new(shot.position(), lights::LASER, 1.0));
            if show_hitboxes {
                list.hitboxes.push(shot.bounds());
            }
        }

        for debris in spaceships.debris() {
            list.push(
                MeshId::SpaceshipDebris(debris.part()),
                Instance::faded(debris.model_matrix(), colors::WHITE, debris.opacity()),
            );
        }

        if show_hitboxes {
            list.hitboxes.push(DEATH_ZONE);
        }
        list
    }

    fn push(&mut self, mesh: MeshId, instance: Instance) {
        self.commands.push(DrawCommand { mesh, instance });
    }

    /// Instances grouped by mesh, in first-seen order, ready for instanced draws
    pub fn batches(&self) -> Vec<(MeshId, Vec<Instance>)> {
        let mut batches: Vec<(MeshId, Vec<Instance>)> = Vec::new();
        for command in &self.commands {
            match batches.iter_mut().find(|(mesh, _)| *mesh == command.mesh) {
                Some((_, instances)) => instances.push(command.instance),
                None => batches.push((command.mesh, vec![command.instance])),
            }
        }
        batches
    }

    /// Number of draw calls the batched list needs
    pub fn draw_calls(&self) -> usize {
        self.batches().len()
    }
}

/// Orthographic camera covering the [-1, 1] play field
pub fn projection_view() -> Mat4 {
    Mat4::orthographic_rh(-1.0, 1.0, -1.0, 1.0, -10.0, 10.0)
}
