//! Tutor core: domain layer of the study-assistant session client.
//!
//! The pieces with real invariants live here: the session controller's
//! finite-state screen flow, the capture/crop pipeline, the agent
//! dispatch abstraction and the diary store. Backends (HTTP answer
//! service, speech synthesis) and persistence (JSON file repository,
//! configuration) plug in from the sibling crates through the traits
//! defined in this one.

pub mod agent;
pub mod capture;
pub mod diary;
pub mod error;
pub mod session;
pub mod subject;

// Re-export common error type
pub use error::TutorError;
