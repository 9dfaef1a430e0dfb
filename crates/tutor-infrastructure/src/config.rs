//! Application configuration.
//!
//! Loaded from `<config_dir>/tutor/config.toml`. A missing file yields
//! the defaults; a file that exists but cannot be read or parsed is an
//! error (unlike diary data, a broken config is worth surfacing).

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use tutor_core::capture::CropSettings;
use tutor_core::error::{Result, TutorError};

use crate::paths::TutorPaths;

/// Process-wide configuration for the tutor client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Endpoint of the remote answer capability.
    pub backend_url: String,
    /// Optional bearer key for the backend.
    pub api_key: Option<String>,
    /// Per-request timeout for the backend, in seconds.
    pub request_timeout_secs: u64,
    /// BCP 47 language tag used for speech playback.
    pub speech_language: String,
    /// Fraction of image width the default crop region covers.
    pub crop_width_fraction: f64,
    /// Fixed aspect ratio of the crop region.
    pub crop_aspect_ratio: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:3000/api/answer".to_string(),
            api_key: None,
            request_timeout_secs: 30,
            speech_language: "vi-VN".to_string(),
            crop_width_fraction: 0.9,
            crop_aspect_ratio: 1.0,
        }
    }
}

impl AppConfig {
    /// Loads configuration from the default path. A missing file returns
    /// the defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(TutorPaths::config_file()?)
    }

    /// Loads configuration from an explicit path.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(?path, "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| TutorError::config(format!("Failed to read config at {:?}: {}", path, e)))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        toml::from_str(&content)
            .map_err(|e| TutorError::config(format!("Failed to parse config at {:?}: {}", path, e)))
    }

    /// Writes the configuration to the default path, creating the config
    /// directory if needed.
    pub fn save(&self) -> Result<()> {
        let dir = TutorPaths::config_dir()?;
        fs::create_dir_all(&dir).map_err(|e| {
            TutorError::config(format!("Failed to create config directory at {:?}: {}", dir, e))
        })?;
        self.save_to(TutorPaths::config_file()?)
    }

    /// Writes the configuration to an explicit path.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| TutorError::config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, toml_string)
            .map_err(|e| TutorError::config(format!("Failed to write config at {:?}: {}", path, e)))
    }

    /// The crop defaults carried by this configuration.
    pub fn crop_settings(&self) -> CropSettings {
        CropSettings {
            width_fraction: self.crop_width_fraction,
            aspect_ratio: self.crop_aspect_ratio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(dir.path().join("config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.speech_language, "vi-VN");
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = AppConfig {
            backend_url: "https://tutor.example/api".to_string(),
            api_key: Some("secret".to_string()),
            request_timeout_secs: 10,
            speech_language: "en-US".to_string(),
            crop_width_fraction: 0.8,
            crop_aspect_ratio: 1.5,
        };
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.crop_settings().width_fraction, 0.8);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "backend_url = \"https://tutor.example/api\"\n").unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.backend_url, "https://tutor.example/api");
        assert_eq!(loaded.request_timeout_secs, 30);
    }

    #[test]
    fn test_broken_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "backend_url = [not toml").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }
}
