//! Screen and result-tab types for session state management.

use serde::{Deserialize, Serialize};

/// The current UI state of a session.
///
/// The session is a long-lived loop: there is no terminal screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    /// Subject selection and diary entry point.
    Home,
    /// Capture screen: attach an image or dictate text.
    Input,
    /// Interactive crop of a pending image capture.
    Crop,
    /// Tabbed result view for the last dispatch.
    Analysis,
    /// The persisted journal of past captures.
    Diary,
}

impl Screen {
    /// Where back-navigation leads, following the "one level up" rule.
    ///
    /// `None` means back is a no-op (already at the home screen).
    pub fn back_target(self) -> Option<Screen> {
        match self {
            Screen::Home => None,
            Screen::Input | Screen::Diary => Some(Screen::Home),
            Screen::Crop | Screen::Analysis => Some(Screen::Input),
        }
    }
}

impl Default for Screen {
    fn default() -> Self {
        Screen::Home
    }
}

/// Which of the three result views the analysis screen displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultTab {
    FastAnswer,
    GuidedExplanation,
    Quiz,
}

impl Default for ResultTab {
    fn default() -> Self {
        ResultTab::FastAnswer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_goes_one_level_up() {
        assert_eq!(Screen::Analysis.back_target(), Some(Screen::Input));
        assert_eq!(Screen::Crop.back_target(), Some(Screen::Input));
        assert_eq!(Screen::Input.back_target(), Some(Screen::Home));
        assert_eq!(Screen::Diary.back_target(), Some(Screen::Home));
        assert_eq!(Screen::Home.back_target(), None);
    }

    #[test]
    fn test_default_tab_is_fast_answer() {
        assert_eq!(ResultTab::default(), ResultTab::FastAnswer);
    }
}
