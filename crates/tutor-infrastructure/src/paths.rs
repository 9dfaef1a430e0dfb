//! Unified path management for tutor data and configuration files.
//!
//! All tutor state lives under per-user platform directories resolved via
//! the `dirs` crate, so the layout is consistent across Linux, macOS and
//! Windows.
//!
//! # Directory Structure
//!
//! ```text
//! <config_dir>/tutor/          # e.g. ~/.config/tutor/
//! └── config.toml              # Application configuration
//!
//! <data_dir>/tutor/            # e.g. ~/.local/share/tutor/
//! └── diary.json               # The persisted diary sequence
//! ```

use std::path::PathBuf;

use tutor_core::error::{Result, TutorError};

/// Unified path resolution for tutor.
pub struct TutorPaths;

impl TutorPaths {
    /// Returns the tutor configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: e.g. `~/.config/tutor/`
    /// - `Err(_)`: the platform config directory could not be determined
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("tutor"))
            .ok_or_else(|| TutorError::config("Cannot find config directory"))
    }

    /// Returns the tutor data directory, used for the diary file.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: e.g. `~/.local/share/tutor/`
    /// - `Err(_)`: the platform data directory could not be determined
    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join("tutor"))
            .ok_or_else(|| TutorError::config("Cannot find data directory"))
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}
