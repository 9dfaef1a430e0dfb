//! Diary domain module: the durable journal of past captures.
//!
//! # Module Structure
//!
//! - `model`: the immutable `DiaryEntry`
//! - `repository`: the `DiaryRepository` persistence trait
//! - `store`: the `DiaryStore` (ordered sequence + write-through)

mod model;
mod repository;
mod store;

pub use model::DiaryEntry;
pub use repository::DiaryRepository;
pub use store::DiaryStore;
