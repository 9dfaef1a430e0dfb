//! Agent dispatch: request/result types, the backend seam, and the
//! dispatcher that normalizes raw replies.
//!
//! # Module Structure
//!
//! - `model`: request/result types (`AgentKind`, `AgentRequest`, `AgentResult`, `AnswerPayload`)
//! - `backend`: the `AnswerBackend` trait and `BackendError`
//! - `dispatcher`: the `Dispatcher` (normalization + fixed fallback)

mod backend;
mod dispatcher;
mod model;

pub use backend::{AnswerBackend, BackendError};
pub use dispatcher::{Dispatcher, FALLBACK_TEXT};
pub use model::{AgentKind, AgentRequest, AgentResult, AnswerPayload, QuizItem};
