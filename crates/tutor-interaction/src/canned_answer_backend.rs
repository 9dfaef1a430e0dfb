//! Fixed stand-in backend for development and tests.
//!
//! Interchangeable with the HTTP backend at wiring time: the controller
//! only sees the `AnswerBackend` contract.

use async_trait::async_trait;

use tutor_core::agent::{AgentRequest, AnswerBackend, AnswerPayload, BackendError, QuizItem};

/// Answers every request with the same fixed payload, immediately.
pub struct CannedAnswerBackend {
    payload: AnswerPayload,
}

impl CannedAnswerBackend {
    /// A backend serving the given payload.
    pub fn with_payload(payload: AnswerPayload) -> Self {
        Self { payload }
    }
}

impl Default for CannedAnswerBackend {
    fn default() -> Self {
        Self::with_payload(AnswerPayload {
            answer: "The answer is x = 5: from 2x + 10 = 20 we get 2x = 10, so x = 5.".into(),
            hint: "Hint: move the constant terms to the right side and flip their signs.".into(),
            practice: "Similar exercise: solve 3x - 15 = 0. Answer: x = 5.".into(),
            quiz: Some(QuizItem {
                question: "What is the perimeter of a rectangle with sides 3 and 4?".into(),
                options: vec!["7".into(), "12".into(), "14".into(), "10".into()],
                correct_index: 2,
            }),
            summary: "The solution of a linear equation is the value that balances both sides."
                .into(),
        })
    }
}

#[async_trait]
impl AnswerBackend for CannedAnswerBackend {
    fn description(&self) -> &str {
        "canned stand-in data"
    }

    async fn generate(&self, _request: &AgentRequest) -> Result<AnswerPayload, BackendError> {
        Ok(self.payload.clone())
    }
}
