//! Game settings and preferences
//!
//! Persisted to `settings.json` next to the binary's working directory.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigResult;
use crate::persistence;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Play sound effects at all
    pub audio_enabled: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === Debug ===
    /// Draw collision boxes and the death zone
    pub show_hitboxes: bool,
    /// Log frame statistics
    pub show_stats: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            audio_enabled: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            show_hitboxes: false,
            show_stats: false,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let settings: Settings = persistence::load_json(path)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults
    pub fn load_or_default(path: &Path) -> Self {
        persistence::load_json_or_default(path)
    }

    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        persistence::save_json(path, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}
