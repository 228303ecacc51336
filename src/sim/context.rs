//! Per-frame simulation context and destruction reporting

use glam::Vec3;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::asteroid::AsteroidKind;
use crate::audio::AudioManager;

/// What destroyed an asteroid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DestructionCause {
    /// A laser shot brought its health to zero
    Laser,
    /// It collided with another asteroid
    Asteroid,
    /// It rammed the spaceship
    Spaceship,
}

/// Report of a single asteroid destruction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AsteroidDestroyed {
    pub kind: AsteroidKind,
    pub position: Vec3,
    pub cause: DestructionCause,
    /// The killing blow alone exceeded the asteroid's full health
    pub critical: bool,
}

/// Notable things that happened during a frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    AsteroidDestroyed(AsteroidDestroyed),
    SpaceshipDestroyed { position: Vec3 },
    HighScoreBeaten { score: u64 },
    GameOver,
}

/// Receiver for destruction callbacks raised by the controllers
pub trait DestructionSink {
    fn on_asteroid_destroyed(&mut self, event: &AsteroidDestroyed);

    fn on_spaceship_destroyed(&mut self, position: Vec3);

    fn on_game_over(&mut self) {}
}

impl DestructionSink for Vec<GameEvent> {
    fn on_asteroid_destroyed(&mut self, event: &AsteroidDestroyed) {
        self.push(GameEvent::AsteroidDestroyed(*event));
    }

    fn on_spaceship_destroyed(&mut self, position: Vec3) {
        self.push(GameEvent::SpaceshipDestroyed { position });
    }

    fn on_game_over(&mut self) {
        self.push(GameEvent::GameOver);
    }
}

/// Everything a controller needs for one step besides its own state
pub struct SimContext<'a> {
    /// Elapsed seconds this frame
    pub dt: f32,
    pub rng: &'a mut Pcg32,
    pub audio: &'a mut AudioManager,
    pub sink: &'a mut dyn DestructionSink,
}

/// Owned backing state for a [`SimContext`] in unit tests
#[cfg(test)]
pub(crate) struct TestWorld {
    pub rng: Pcg32,
    pub audio: AudioManager,
    pub events: Vec<GameEvent>,
}

#[cfg(test)]
impl TestWorld {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self {
            rng: Pcg32::seed_from_u64(seed),
            audio: AudioManager::new(),
            events: Vec::new(),
        }
    }

    pub fn ctx(&mut self, dt: f32) -> SimContext<'_> {
        SimContext {
            dt,
            rng: &mut self.rng,
            audio: &mut self.audio,
            sink: &mut self.events,
        }
    }
}
