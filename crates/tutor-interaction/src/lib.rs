//! Tutor interaction: backend implementations behind the core's seams.
//!
//! The answer backends (HTTP service, canned stand-in) implement
//! `tutor_core::agent::AnswerBackend`; which one a process uses is a
//! wiring decision made here, never inside the session controller. The
//! speech presenter and its synthesizer trait live here as well.

pub mod canned_answer_backend;
pub mod http_answer_backend;
pub mod speech;

pub use canned_answer_backend::CannedAnswerBackend;
pub use http_answer_backend::HttpAnswerBackend;
pub use speech::{NullSynthesizer, SpeechError, SpeechPresenter, SpeechSynthesizer};
