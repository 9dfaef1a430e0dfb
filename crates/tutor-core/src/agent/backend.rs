//! The backend seam of the agent dispatcher.
//!
//! The session controller and capture pipeline depend only on the
//! `AnswerBackend` contract, never on how answers are produced. This is
//! what allows swapping a live inference service for fixed stand-in data
//! at process wiring time.

use async_trait::async_trait;
use thiserror::Error;

use super::model::{AgentRequest, AnswerPayload};

/// Failures of the remote answer capability.
///
/// These never reach the UI as a crash: the dispatcher recovers every
/// variant with fixed fallback text.
#[derive(Error, Debug, Clone)]
pub enum BackendError {
    /// The request could not be completed (network error, non-success status).
    #[error("Backend request failed: {message}")]
    Request {
        status_code: Option<u16>,
        message: String,
        is_retryable: bool,
    },

    /// The reply arrived but could not be parsed.
    #[error("Malformed backend response: {0}")]
    MalformedResponse(String),

    /// The reply parsed but carried no usable content.
    #[error("Backend returned no usable content")]
    EmptyContent,
}

impl BackendError {
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request {
            status_code: None,
            message: message.into(),
            is_retryable: false,
        }
    }

    /// Whether retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Request {
                is_retryable: true,
                ..
            }
        )
    }
}

/// An opaque remote capability that turns a request into a raw reply.
#[async_trait]
pub trait AnswerBackend: Send + Sync {
    /// Short human-readable description of the backend, for logging.
    fn description(&self) -> &str;

    /// Produces one raw reply for one request. No coalescing or caching:
    /// each call is independent.
    async fn generate(&self, request: &AgentRequest) -> Result<AnswerPayload, BackendError>;
}
