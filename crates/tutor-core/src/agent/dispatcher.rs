//! Agent dispatcher: normalizes raw backend replies into tagged results.

use std::sync::Arc;
use tracing::{debug, warn};

use super::backend::{AnswerBackend, BackendError};
use super::model::{AgentKind, AgentRequest, AgentResult, AnswerPayload};
use crate::subject::Subject;

/// Fixed, user-readable text served when the backend cannot answer.
pub const FALLBACK_TEXT: &str =
    "The assistant is temporarily unavailable. Please try again in a moment.";

/// Routes a request to the configured backend and normalizes the reply
/// to one string per requested agent kind.
///
/// `dispatch` is infallible from the caller's perspective: a transient
/// backend failure is retried once, and any remaining failure degrades
/// to [`FALLBACK_TEXT`] tagged with the requested kind, so downstream
/// tab rendering stays consistent.
#[derive(Clone)]
pub struct Dispatcher {
    backend: Arc<dyn AnswerBackend>,
}

impl Dispatcher {
    pub fn new(backend: Arc<dyn AnswerBackend>) -> Self {
        Self { backend }
    }

    /// Dispatches one request and returns the normalized result.
    pub async fn dispatch(&self, request: &AgentRequest) -> AgentResult {
        let tag = request.agent_kind;
        match self.generate(request).await {
            Ok(payload) => {
                let text = match tag {
                    AgentKind::Fast => payload.answer,
                    AgentKind::Guided => payload.hint,
                    AgentKind::Practice => payload.practice,
                };
                if text.trim().is_empty() {
                    warn!(backend = self.backend.description(), %tag, "backend reply had no content for the requested kind");
                    return Self::fallback(tag);
                }
                debug!(backend = self.backend.description(), %tag, "dispatch succeeded");
                AgentResult { tag, text }
            }
            Err(err) => {
                warn!(backend = self.backend.description(), %tag, error = %err, "dispatch failed, serving fallback");
                Self::fallback(tag)
            }
        }
    }

    /// Compresses an answer into a single short sentence for speech
    /// playback, with the same fallback-on-failure policy as `dispatch`.
    pub async fn summarize(&self, full_text: &str) -> String {
        let request =
            match AgentRequest::with_text(AgentKind::Fast, Subject::Unknown, full_text) {
                Ok(request) => request,
                Err(_) => return FALLBACK_TEXT.to_string(),
            };
        match self.generate(&request).await {
            Ok(payload) if !payload.summary.trim().is_empty() => payload.summary,
            Ok(_) => {
                warn!(backend = self.backend.description(), "backend reply had no summary");
                FALLBACK_TEXT.to_string()
            }
            Err(err) => {
                warn!(backend = self.backend.description(), error = %err, "summarize failed, serving fallback");
                FALLBACK_TEXT.to_string()
            }
        }
    }

    /// One backend call, retried once when the failure is transient
    /// (connect/timeout errors, overload and gateway statuses).
    async fn generate(&self, request: &AgentRequest) -> Result<AnswerPayload, BackendError> {
        match self.backend.generate(request).await {
            Err(err) if err.is_retryable() => {
                warn!(backend = self.backend.description(), error = %err, "transient backend failure, retrying once");
                self.backend.generate(request).await
            }
            outcome => outcome,
        }
    }

    fn fallback(tag: AgentKind) -> AgentResult {
        AgentResult {
            tag,
            text: FALLBACK_TEXT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::backend::BackendError;
    use crate::agent::model::AnswerPayload;
    use async_trait::async_trait;

    struct FixedBackend(AnswerPayload);

    #[async_trait]
    impl AnswerBackend for FixedBackend {
        fn description(&self) -> &str {
            "fixed"
        }

        async fn generate(&self, _request: &AgentRequest) -> Result<AnswerPayload, BackendError> {
            Ok(self.0.clone())
        }
    }

    struct FailingBackend;

    #[async_trait]
    impl AnswerBackend for FailingBackend {
        fn description(&self) -> &str {
            "failing"
        }

        async fn generate(&self, _request: &AgentRequest) -> Result<AnswerPayload, BackendError> {
            Err(BackendError::request("connection refused"))
        }
    }

    /// Fails the first `failures` calls, then succeeds.
    struct FlakyBackend {
        failures: usize,
        retryable: bool,
        calls: std::sync::atomic::AtomicUsize,
    }

    impl FlakyBackend {
        fn new(failures: usize, retryable: bool) -> Self {
            Self {
                failures,
                retryable,
                calls: std::sync::atomic::AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl AnswerBackend for FlakyBackend {
        fn description(&self) -> &str {
            "flaky"
        }

        async fn generate(&self, _request: &AgentRequest) -> Result<AnswerPayload, BackendError> {
            let call = self
                .calls
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            if call < self.failures {
                Err(BackendError::Request {
                    status_code: Some(503),
                    message: "service unavailable".into(),
                    is_retryable: self.retryable,
                })
            } else {
                Ok(payload())
            }
        }
    }

    fn payload() -> AnswerPayload {
        AnswerPayload {
            answer: "x = 5".into(),
            hint: "Move the constant to the right side.".into(),
            practice: "Solve 3x - 15 = 0.".into(),
            quiz: None,
            summary: "A linear equation with solution x = 5.".into(),
        }
    }

    #[tokio::test]
    async fn test_dispatch_selects_field_by_kind() {
        let dispatcher = Dispatcher::new(Arc::new(FixedBackend(payload())));

        for (kind, expected) in [
            (AgentKind::Fast, "x = 5"),
            (AgentKind::Guided, "Move the constant to the right side."),
            (AgentKind::Practice, "Solve 3x - 15 = 0."),
        ] {
            let request = AgentRequest::with_text(kind, Subject::Math, "2x+10=20").unwrap();
            let result = dispatcher.dispatch(&request).await;
            assert_eq!(result.tag, kind);
            assert_eq!(result.text, expected);
        }
    }

    #[tokio::test]
    async fn test_dispatch_failure_yields_tagged_fallback() {
        let dispatcher = Dispatcher::new(Arc::new(FailingBackend));
        for kind in [AgentKind::Fast, AgentKind::Guided, AgentKind::Practice] {
            let request = AgentRequest::with_text(kind, Subject::Math, "2x+10=20").unwrap();
            let result = dispatcher.dispatch(&request).await;
            assert_eq!(result.tag, kind);
            assert!(!result.text.is_empty());
            assert_eq!(result.text, FALLBACK_TEXT);
        }
    }

    #[tokio::test]
    async fn test_dispatch_empty_field_degrades_to_fallback() {
        let mut sparse = payload();
        sparse.hint = String::new();
        let dispatcher = Dispatcher::new(Arc::new(FixedBackend(sparse)));
        let request = AgentRequest::with_text(AgentKind::Guided, Subject::Math, "q").unwrap();
        assert_eq!(dispatcher.dispatch(&request).await.text, FALLBACK_TEXT);
    }

    #[tokio::test]
    async fn test_transient_failure_is_retried_once() {
        let backend = Arc::new(FlakyBackend::new(1, true));
        let dispatcher = Dispatcher::new(backend.clone());
        let request = AgentRequest::with_text(AgentKind::Fast, Subject::Math, "2x+10=20").unwrap();

        let result = dispatcher.dispatch(&request).await;
        assert_eq!(result.text, "x = 5");
        assert_eq!(backend.calls.load(std::sync::atomic::Ordering::SeqCst), 2);

        // A retry that fails again degrades to the fallback
        let exhausted = Arc::new(FlakyBackend::new(2, true));
        let dispatcher = Dispatcher::new(exhausted.clone());
        assert_eq!(dispatcher.dispatch(&request).await.text, FALLBACK_TEXT);
        assert_eq!(exhausted.calls.load(std::sync::atomic::Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_non_retryable_failure_is_not_retried() {
        let backend = Arc::new(FlakyBackend::new(1, false));
        let dispatcher = Dispatcher::new(backend.clone());
        let request = AgentRequest::with_text(AgentKind::Fast, Subject::Math, "2x+10=20").unwrap();

        assert_eq!(dispatcher.dispatch(&request).await.text, FALLBACK_TEXT);
        assert_eq!(backend.calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_summarize_returns_summary_or_fallback() {
        let dispatcher = Dispatcher::new(Arc::new(FixedBackend(payload())));
        assert_eq!(
            dispatcher.summarize("long answer text").await,
            "A linear equation with solution x = 5."
        );

        let failing = Dispatcher::new(Arc::new(FailingBackend));
        assert_eq!(failing.summarize("long answer text").await, FALLBACK_TEXT);
    }
}
