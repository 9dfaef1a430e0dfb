//! Session domain module.
//!
//! Contains the transient session state, the screen types and the
//! controller that drives the finite-state screen flow.
//!
//! # Module Structure
//!
//! - `screen`: UI state types (`Screen`, `ResultTab`)
//! - `model`: transient session state (`Session`)
//! - `controller`: the state machine (`SessionController`)

mod controller;
mod model;
mod screen;

pub use controller::SessionController;
pub use model::Session;
pub use screen::{ResultTab, Screen};
