//! Subject categories selectable on the home screen.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The topical category selected before entering the input screen.
///
/// `Unknown` is the sentinel recorded when a diary entry is created
/// without a subject selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    Math,
    Physics,
    Chemistry,
    Unknown,
}

impl Subject {
    /// All subjects offered on the home screen, in display order.
    pub fn all() -> [Subject; 3] {
        [Subject::Math, Subject::Physics, Subject::Chemistry]
    }

    /// Human-readable label for display and diary records.
    pub fn label(&self) -> &'static str {
        match self {
            Subject::Math => "Math",
            Subject::Physics => "Physics",
            Subject::Chemistry => "Chemistry",
            Subject::Unknown => "Unknown",
        }
    }
}

impl Default for Subject {
    fn default() -> Self {
        Subject::Unknown
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
