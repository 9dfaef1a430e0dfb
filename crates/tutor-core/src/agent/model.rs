//! Agent request/result types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, TutorError};
use crate::subject::Subject;

/// A named answer style that shapes the requested response format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    /// Fast-answer agent: the direct answer to the problem.
    Fast,
    /// Explanatory agent: a hint / guided explanation.
    Guided,
    /// Practice-generation agent: a similar exercise.
    Practice,
}

impl AgentKind {
    /// Wire name used by the remote answer capability.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentKind::Fast => "fast",
            AgentKind::Guided => "guided",
            AgentKind::Practice => "practice",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An ephemeral request to the remote answer capability.
///
/// At least one of `input_text` / `image_payload` is present; the
/// constructors enforce this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRequest {
    pub agent_kind: AgentKind,
    pub subject: Subject,
    pub input_text: Option<String>,
    pub image_payload: Option<String>,
}

impl AgentRequest {
    /// Builds a request; rejects the combination of no text and no image.
    pub fn new(
        agent_kind: AgentKind,
        subject: Subject,
        input_text: Option<String>,
        image_payload: Option<String>,
    ) -> Result<Self> {
        let has_text = input_text.as_deref().is_some_and(|t| !t.trim().is_empty());
        let has_image = image_payload.as_deref().is_some_and(|p| !p.is_empty());
        if !has_text && !has_image {
            return Err(TutorError::EmptyInput);
        }
        Ok(Self {
            agent_kind,
            subject,
            input_text,
            image_payload,
        })
    }

    /// Builds a text-only request.
    pub fn with_text(agent_kind: AgentKind, subject: Subject, text: impl Into<String>) -> Result<Self> {
        Self::new(agent_kind, subject, Some(text.into()), None)
    }

    /// Builds an image-only request.
    pub fn with_image(
        agent_kind: AgentKind,
        subject: Subject,
        payload: impl Into<String>,
    ) -> Result<Self> {
        Self::new(agent_kind, subject, None, Some(payload.into()))
    }
}

/// The normalized outcome of one dispatch: one string, tagged with the
/// agent kind that was requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentResult {
    pub tag: AgentKind,
    pub text: String,
}

/// A multiple-choice exercise attached to a backend reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizItem {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

/// The raw reply shape of the remote answer capability, before the
/// dispatcher normalizes it down to a single tagged string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerPayload {
    /// Direct answer (fast-answer agents).
    pub answer: String,
    /// Hint / guided explanation (explanatory agents).
    pub hint: String,
    /// A similar exercise (practice agents).
    pub practice: String,
    /// Optional structured quiz accompanying the practice text.
    pub quiz: Option<QuizItem>,
    /// One-sentence compression of the answer, for speech playback.
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_requires_some_input() {
        let err = AgentRequest::new(AgentKind::Fast, Subject::Math, None, None).unwrap_err();
        assert!(err.is_empty_input());

        // Whitespace-only text does not count as input
        let err =
            AgentRequest::new(AgentKind::Fast, Subject::Math, Some("   ".into()), None).unwrap_err();
        assert!(err.is_empty_input());
    }

    #[test]
    fn test_request_accepts_either_input() {
        assert!(AgentRequest::with_text(AgentKind::Guided, Subject::Physics, "2x+10=20").is_ok());
        assert!(AgentRequest::with_image(AgentKind::Practice, Subject::Unknown, "aGVsbG8=").is_ok());
    }
}
