//! Top-level game step
//!
//! Owns the RNG, the audio queue, both controllers and the score, and wires
//! them together once per frame.

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::asteroid_controller::AsteroidController;
use super::context::{AsteroidDestroyed, DestructionSink, GameEvent, SimContext};
use super::score::Score;
use super::spaceship_controller::{SpaceshipController, SpaceshipState};
use crate::audio::{AudioManager, SoundEffect};
use crate::consts::MAX_FRAME_DT;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Player input sampled for a single frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// W
    pub up: bool,
    /// S
    pub down: bool,
    /// A
    pub left: bool,
    /// D
    pub right: bool,
    /// Space
    pub fire: bool,
    /// R
    pub self_destruct: bool,
    /// Cursor position in window pixels, origin top-left
    pub cursor: Vec2,
    /// Window size in pixels
    pub window_size: (u32, u32),
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            up: false,
            down: false,
            left: false,
            right: false,
            fire: false,
            self_destruct: false,
            cursor: Vec2::new(400.0, 400.0),
            window_size: (800, 800),
        }
    }
}

/// Counters describing the world after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    pub frame: u64,
    pub asteroids: usize,
    pub asteroid_debris: usize,
    pub laser_shots: usize,
    pub spaceship_debris: usize,
    pub asteroids_destroyed: u32,
    pub lives: u32,
    pub score: u64,
    pub highest_score: u64,
    pub game_over: bool,
}

/// Routes destruction reports to the score and the event log
struct GameSink<'a> {
    score: &'a mut Score,
    events: &'a mut Vec<GameEvent>,
}

impl DestructionSink for GameSink<'_> {
    fn on_asteroid_destroyed(&mut self, event: &AsteroidDestroyed) {
        self.score.on_asteroid_destroyed(event);
        self.events.on_asteroid_destroyed(event);
    }

    fn on_spaceship_destroyed(&mut self, position: Vec3) {
        self.events.on_spaceship_destroyed(position);
    }

    fn on_game_over(&mut self) {
        self.events.on_game_over();
    }
}

/// A complete game session
#[derive(Debug)]
pub struct Game {
    seed: u64,
    tuning: Tuning,
    rng: Pcg32,
    audio: AudioManager,
    asteroids: AsteroidController,
    spaceships: SpaceshipController,
    score: Score,
    events: Vec<GameEvent>,
    frame: u64,
    frozen: bool,
    audio_enabled: bool,
}

impl Game {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        log::info!("Starting game with seed {seed}");
        Self {
            seed,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            audio: AudioManager::new(),
            asteroids: AsteroidController::new(tuning.asteroids),
            spaceships: SpaceshipController::new(tuning.spaceship, tuning.laser),
            score: Score::default(),
            events: Vec::new(),
            frame: 0,
            frozen: false,
            audio_enabled: true,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn asteroids(&self) -> &AsteroidController {
        &self.asteroids
    }

    pub fn spaceships(&self) -> &SpaceshipController {
        &self.spaceships
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn audio(&self) -> &AudioManager {
        &self.audio
    }

    /// The backend drains sound commands through this
    pub fn audio_mut(&mut self) -> &mut AudioManager {
        &mut self.audio
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn state(&self) -> SpaceshipState {
        self.spaceships.state()
    }

    pub fn is_game_over(&self) -> bool {
        self.spaceships.is_game_over()
    }

    /// Raise the highest score to a persisted record, if it is higher
    pub fn set_highest_score(&mut self, highest: u64) {
        self.score.raise_highest(highest);
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Pause or resume the whole simulation
    pub fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
        self.asteroids.set_frozen(frozen);
        self.spaceships.set_frozen(frozen);
    }

    pub fn set_audio_enabled(&mut self, enabled: bool) {
        self.audio_enabled = enabled;
        self.asteroids.set_audio_enabled(enabled);
        self.spaceships.set_audio_enabled(enabled);
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_audio_enabled(settings.audio_enabled);
        self.audio.set_muted(!settings.audio_enabled);
        self.audio.set_master_volume(settings.master_volume);
        self.audio.set_sfx_volume(settings.sfx_volume);
    }

    /// Start a new run, keeping the highest score and the RNG stream
    pub fn restart(&mut self) {
        log::info!("Restarting after {} frames", self.frame);
        self.spaceships.release_audio(&mut self.audio);
        self.asteroids = AsteroidController::new(self.tuning.asteroids);
        self.spaceships = SpaceshipController::new(self.tuning.spaceship, self.tuning.laser);
        self.asteroids.set_frozen(self.frozen);
        self.spaceships.set_frozen(self.frozen);
        self.asteroids.set_audio_enabled(self.audio_enabled);
        self.spaceships.set_audio_enabled(self.audio_enabled);
        self.score.reset_run();
        self.events.clear();
    }

    /// Events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advance one frame of `dt` seconds
    pub fn tick(&mut self, input: &FrameInput, dt: f32) -> FrameStats {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };

        let mut sink = GameSink {
            score: &mut self.score,
            events: &mut self.events,
        };
        let mut ctx = SimContext {
            dt,
            rng: &mut self.rng,
            audio: &mut self.audio,
            sink: &mut sink,
        };
        self.asteroids
            .tick(self.spaceships.spaceship_mut(), &mut ctx);
        self.spaceships.tick(input, &mut self.asteroids, &mut ctx);

        if self.score.take_record_broken() {
            let score = self.score.score();
            log::info!("Highest score beaten: {score}");
            if self.audio_enabled {
                self.audio
                    .play_one_shot(SoundEffect::PartyWhistle, Vec3::ZERO, 1.0);
            }
            self.events.push(GameEvent::HighScoreBeaten { score });
        }

        self.frame += 1;
        self.stats()
    }

    pub fn stats(&self) -> FrameStats {
        FrameStats {
            frame: self.frame,
            asteroids: self
                .asteroids
                .asteroids()
                .iter()
                .filter(|a| !a.should_be_removed())
                .count(),
            asteroid_debris: self.asteroids.debris().len(),
            laser_shots: self
                .spaceships
                .shots()
                .iter()
                .filter(|s| !s.is_resolved())
                .count(),
            spaceship_debris: self.spaceships.debris().len(),
            asteroids_destroyed: self.score.asteroids_destroyed(),
            lives: self.spaceships.lives(),
            score: self.score.score(),
            highest_score: self.score.highest(),
            game_over: self.spaceships.is_game_over(),
        }
    }
}
