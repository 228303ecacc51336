//! Run score and the highest score

use super::asteroid::AsteroidKind;
use super::context::{AsteroidDestroyed, DestructionCause};
use crate::consts::*;

/// Points for a laser kill
pub fn kill_value(kind: AsteroidKind, critical: bool) -> u64 {
    let mut value = BASE_SCORE;
    if kind == AsteroidKind::Death {
        value *= DEATH_ASTEROID_SCORE_MULTIPLIER;
    }
    if critical {
        value *= CRITICAL_HIT_SCORE_MULTIPLIER;
    }
    value
}

#[derive(Debug, Clone)]
pub struct Score {
    score: u64,
    highest: u64,
    asteroids_destroyed: u32,
    /// The highest score has been beaten at least once
    default_beaten: bool,
    /// This run already beat the highest score
    beaten_this_run: bool,
    /// Record broken since the last `take_record_broken`
    record_pending: bool,
}

impl Default for Score {
    fn default() -> Self {
        Self::new(DEFAULT_HIGHEST_SCORE)
    }
}

impl Score {
    pub fn new(highest: u64) -> Self {
        Self {
            score: 0,
            highest,
            asteroids_destroyed: 0,
            default_beaten: false,
            beaten_this_run: false,
            record_pending: false,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn highest(&self) -> u64 {
        self.highest
    }

    /// Asteroids shot down this run
    pub fn asteroids_destroyed(&self) -> u32 {
        self.asteroids_destroyed
    }

    /// False while the highest score is still the one shipped with the game
    pub fn default_beaten(&self) -> bool {
        self.default_beaten
    }

    /// Adopt a persisted record if it beats the current highest score
    pub fn raise_highest(&mut self, highest: u64) {
        if highest > self.highest {
            self.highest = highest;
            self.default_beaten = true;
        }
    }

    /// Credit a destruction; only laser kills pay out
    pub fn on_asteroid_destroyed(&mut self, event: &AsteroidDestroyed) {
        if event.cause != DestructionCause::Laser {
            return;
        }
        self.asteroids_destroyed += 1;
        self.score += kill_value(event.kind, event.critical);
        if self.score > self.highest {
            self.highest = self.score;
            if !self.beaten_this_run {
                self.beaten_this_run = true;
                self.default_beaten = true;
                self.record_pending = true;
            }
        }
    }

    /// True once after the run first beats the highest score
    pub fn take_record_broken(&mut self) -> bool {
        std::mem::take(&mut self.record_pending)
    }

    /// Start a new run, keeping the highest score
    pub fn reset_run(&mut self) {
        self.score = 0;
        self.asteroids_destroyed = 0;
        self.beaten_this_run = false;
        self.record_pending = false;
    }
}
