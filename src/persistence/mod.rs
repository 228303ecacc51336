//! JSON persistence for settings, tuning and high scores
//!
//! Saves go through a temporary sibling file that is renamed into place,
//! so a crash mid-write never leaves a truncated file behind.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ConfigError, ConfigResult};

/// Read and deserialize a JSON file
pub fn load_json<T: DeserializeOwned>(path: &Path) -> ConfigResult<T> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize a value as pretty JSON and atomically replace `path`
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> ConfigResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let tmp = path.with_extension("json.tmp");
    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    fs::write(&tmp, json).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)?;
    Ok(())
}

/// Load a JSON file, falling back to `T::default()` when missing or broken
pub fn load_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    match load_json(path) {
        Ok(value) => {
            log::info!("Loaded {}", path.display());
            value
        }
        Err(ConfigError::Io { source, .. })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            log::info!("No {} found, using defaults", path.display());
            T::default()
        }
        Err(e) => {
            log::warn!("{e}; using defaults");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        value: u32,
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.json");
        let sample = Sample {
            name: "rock".to_string(),
            value: 7,
        };

        save_json(&path, &sample).unwrap();
        assert!(!path.with_extension("json.tmp").exists());

        let loaded: Sample = load_json(&path).unwrap();
        assert_eq!(loaded, sample);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result: ConfigResult<Sample> = load_json(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_broken_json_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            load_json::<Sample>(&path),
            Err(ConfigError::Json { .. })
        ));
        assert_eq!(load_json_or_default::<Sample>(&path), Sample::default());
    }
}
