//! Sound cue queue
//!
//! The simulation never talks to an audio device. It asks the
//! [`AudioManager`] to play cues, and the platform backend drains the
//! resulting [`AudioCommand`]s once per frame.
//!
//! Sources come in two flavours:
//! - one-shots are fire-and-forget; the backend reclaims them when they stop.
//! - tracked sources carry a reference count; the owner moves them while it
//!   lives and releases them when it is removed.

use std::collections::HashMap;

use glam::Vec3;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Laser fired
    Laser,
    /// Laser hits an asteroid
    Hit,
    /// Asteroid destroyed by a laser
    Explosion,
    /// Asteroid destroyed by a collision
    RockHit,
    /// Death asteroid incoming
    Alarm,
    /// Highest score beaten
    PartyWhistle,
    /// Spaceship destroyed
    SpaceshipExplosion,
    /// No lives left
    GameOver,
}

impl SoundEffect {
    /// Asset file the backend should load for this cue
    pub fn file_name(&self) -> &'static str {
        match self {
            SoundEffect::Laser => "laser.ogg",
            SoundEffect::Hit => "hit.ogg",
            SoundEffect::Explosion => "explosion.ogg",
            SoundEffect::RockHit => "rock_hit.ogg",
            SoundEffect::Alarm => "alarm.ogg",
            SoundEffect::PartyWhistle => "whistle.ogg",
            SoundEffect::SpaceshipExplosion => "spaceship_explosion.ogg",
            SoundEffect::GameOver => "game_over.ogg",
        }
    }
}

/// Handle to a playing source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceHandle(u32);

impl SourceHandle {
    pub fn id(&self) -> u32 {
        self.0
    }
}

/// Work for the audio backend
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCommand {
    Play {
        source: SourceHandle,
        effect: SoundEffect,
        position: Vec3,
        pitch: f32,
        gain: f32,
    },
    Move {
        source: SourceHandle,
        position: Vec3,
        velocity: Vec3,
    },
    /// The simulation no longer references this source
    Release(SourceHandle),
}

/// Audio manager for the game
#[derive(Debug)]
pub struct AudioManager {
    commands: Vec<AudioCommand>,
    /// Tracked sources and their reference counts
    tracked: HashMap<SourceHandle, u32>,
    next_source: u32,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            tracked: HashMap::new(),
            next_source: 1,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    fn start(&mut self, effect: SoundEffect, position: Vec3, pitch: f32) -> Option<SourceHandle> {
        let gain = self.effective_volume();
        if gain <= 0.0 {
            return None;
        }
        let source = SourceHandle(self.next_source);
        self.next_source = self.next_source.wrapping_add(1).max(1);
        self.commands.push(AudioCommand::Play {
            source,
            effect,
            position,
            pitch,
            gain,
        });
        Some(source)
    }

    /// Play a sound the simulation will not touch again
    pub fn play_one_shot(&mut self, effect: SoundEffect, position: Vec3, pitch: f32) {
        let _ = self.start(effect, position, pitch);
    }

    /// Play a sound whose source follows its owner; holds one reference
    pub fn play_tracked(
        &mut self,
        effect: SoundEffect,
        position: Vec3,
        pitch: f32,
    ) -> Option<SourceHandle> {
        let source = self.start(effect, position, pitch)?;
        self.tracked.insert(source, 1);
        Some(source)
    }

    /// Add a reference to a tracked source
    pub fn retain(&mut self, source: SourceHandle) -> bool {
        match self.tracked.get_mut(&source) {
            Some(count) => {
                *count += 1;
                true
            }
            None => false,
        }
    }

    /// Drop a reference; the last one hands the source back to the backend.
    /// Returns true when the source was fully released.
    pub fn release(&mut self, source: SourceHandle) -> bool {
        let Some(count) = self.tracked.get_mut(&source) else {
            return false;
        };
        *count -= 1;
        if *count > 0 {
            return false;
        }
        self.tracked.remove(&source);
        self.commands.push(AudioCommand::Release(source));
        true
    }

    /// Update position and velocity of a tracked source
    pub fn move_source(&mut self, source: SourceHandle, position: Vec3, velocity: Vec3) {
        if self.tracked.contains_key(&source) {
            self.commands.push(AudioCommand::Move {
                source,
                position,
                velocity,
            });
        }
    }

    /// Number of tracked sources still referenced by the simulation
    pub fn tracked_sources(&self) -> usize {
        self.tracked.len()
    }

    /// Pending commands, without draining them
    pub fn pending(&self) -> &[AudioCommand] {
        &self.commands
    }

    /// Take every command queued since the last drain
    pub fn drain_commands(&mut self) -> Vec<AudioCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Effects queued for playback since the last drain, in order
    pub fn pending_effects(&self) -> impl Iterator<Item = SoundEffect> + '_ {
        self.commands.iter().filter_map(|c| match c {
            AudioCommand::Play { effect, .. } => Some(*effect),
            _ => None,
        })
    }
}
