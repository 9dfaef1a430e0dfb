//! Error types for the tutor application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::Screen;

/// A shared error type for the entire tutor application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
///
/// Only `EmptyInput` and `Busy` are meant to reach the user as blocking
/// notices; every other variant is recovered with a degraded behavior by
/// the component that produced it.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum TutorError {
    /// Submission attempted with no capture and no dictated text
    #[error("Submission rejected: no capture or dictated text present")]
    EmptyInput,

    /// A second submission arrived while a dispatch was still in flight
    #[error("Submission rejected: a dispatch is already in flight")]
    Busy,

    /// An operation was requested from a screen it is not valid on
    #[error("Invalid transition: {action} is not available on {screen:?}")]
    InvalidTransition {
        screen: Screen,
        action: &'static str,
    },

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Data access error (repository/storage layer)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "JSON", "TOML", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Capture/crop pipeline error (undecodable image payload, etc.)
    #[error("Capture error: {0}")]
    Capture(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TutorError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Capture error
    pub fn capture(message: impl Into<String>) -> Self {
        Self::Capture(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is an EmptyInput error
    pub fn is_empty_input(&self) -> bool {
        matches!(self, Self::EmptyInput)
    }

    /// Check if this is a Busy error
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy)
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for TutorError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for TutorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<image::ImageError> for TutorError {
    fn from(err: image::ImageError) -> Self {
        Self::Capture(err.to_string())
    }
}

/// A type alias for `Result<T, TutorError>`.
pub type Result<T> = std::result::Result<T, TutorError>;
