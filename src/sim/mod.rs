//! Entity simulation
//!
//! All gameplay logic lives here. Nothing in this module renders or touches
//! a device:
//! - Randomness comes from a seeded `Pcg32`
//! - Sound cues go through the [`crate::audio::AudioManager`] queue
//! - Frame deltas are clamped by [`Game::tick`]

pub mod aabb;
pub mod asteroid;
pub mod asteroid_controller;
pub mod context;
pub mod debris;
pub mod game;
pub mod laser;
pub mod score;
pub mod spaceship;
pub mod spaceship_controller;

pub use aabb::{overlaps_2d, overlaps_3d, Aabb, Bounds, DEATH_ZONE, SCREEN};
pub use asteroid::{Asteroid, AsteroidKind, HitOutcome};
pub use asteroid_controller::AsteroidController;
pub use context::{AsteroidDestroyed, DestructionCause, DestructionSink, GameEvent, SimContext};
pub use debris::{AsteroidDebris, DebrisPart, SpaceshipDebris};
pub use game::{FrameInput, FrameStats, Game};
pub use laser::LaserShot;
pub use score::Score;
pub use spaceship::Spaceship;
pub use spaceship_controller::{SpaceshipController, SpaceshipState};
