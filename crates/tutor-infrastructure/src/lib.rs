//! Tutor infrastructure: persistence and configuration.
//!
//! Implements the storage traits defined in `tutor-core` (the JSON diary
//! repository) and owns process configuration and path resolution.

pub mod config;
pub mod json_diary_repository;
pub mod paths;

pub use config::AppConfig;
pub use json_diary_repository::JsonDiaryRepository;
pub use paths::TutorPaths;
