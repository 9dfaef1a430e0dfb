//! Session domain model.
//!
//! This module contains the transient Session state that the controller
//! mutates. Nothing here is durable: the diary store is the only state
//! that survives a restart.

use serde::{Deserialize, Serialize};

use super::screen::{ResultTab, Screen};
use crate::agent::AgentResult;
use crate::capture::Capture;
use crate::subject::Subject;

/// Transient UI-visible session state, exclusively owned by the
/// session controller.
///
/// The speaking flag lives with the speech presenter, which owns speech
/// playback; everything else the screens observe is here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Current UI state.
    pub screen: Screen,
    /// Selected topic; set on entering Input, cleared on return to Home.
    pub subject: Option<Subject>,
    /// The pending input. Mutually exclusive by kind: selecting one kind
    /// discards a pending capture of the other.
    pub capture: Option<Capture>,
    /// Which result view the analysis screen displays.
    pub active_tab: ResultTab,
    /// True for the entire duration of a dispatch, cleared on every exit
    /// path.
    pub is_loading: bool,
    /// Dictation on/off flip; the dictated text itself arrives externally.
    pub is_recording: bool,
    /// What the analysis screen shows: the normalized result of the most
    /// recent non-stale dispatch.
    pub last_result: Option<AgentResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_session_defaults() {
        let session = Session::default();
        assert_eq!(session.screen, Screen::Home);
        assert!(session.subject.is_none());
        assert!(session.capture.is_none());
        assert_eq!(session.active_tab, ResultTab::FastAnswer);
        assert!(!session.is_loading);
        assert!(!session.is_recording);
        assert!(session.last_result.is_none());
    }
}
