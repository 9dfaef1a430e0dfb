//! Session controller: the finite-state screen flow.
//!
//! Wires Capture -> Dispatcher -> Diary. All transitions execute on one
//! logical actor; the dispatcher's remote call is the only suspension
//! point, and the session stays interactive (back-navigation, but not a
//! second submission) while it is in flight.

use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use super::model::Session;
use super::screen::{ResultTab, Screen};
use crate::agent::{AgentKind, AgentRequest, AgentResult, Dispatcher};
use crate::capture::{
    Capture, CaptureKind, CropRegion, CropSettings, centered_region, crop_image_payload,
    image_dimensions,
};
use crate::diary::{DiaryEntry, DiaryStore};
use crate::error::{Result, TutorError};

struct ControllerState {
    session: Session,
    /// Uncropped source image shown on the Crop screen. Confirm always
    /// crops from this, so re-confirming the same region yields the same
    /// payload.
    pending_image: Option<String>,
    /// Bumped on every submission and on every transition away from the
    /// Input screen; a completed dispatch whose generation no longer
    /// matches is stale and its result is discarded.
    generation: u64,
}

/// Orchestrates screens, input capture, agent dispatch and diary
/// persistence for one long-lived session.
///
/// `SessionController` is responsible for:
/// - Enforcing the screen transition rules (Home/Input/Crop/Analysis/Diary)
/// - Holding the pending capture and its mutual-exclusivity rule
/// - Running the submit flow: diary append, loading flag, dispatch,
///   result presentation
/// - Routing diary mutations through the store
///
/// Cloning is cheap and shares the same session.
#[derive(Clone)]
pub struct SessionController {
    state: Arc<RwLock<ControllerState>>,
    diary: Arc<Mutex<DiaryStore>>,
    dispatcher: Dispatcher,
    crop_settings: CropSettings,
}

impl SessionController {
    /// Creates a controller on the Home screen.
    ///
    /// The dispatcher and diary store are the wiring-time seams: which
    /// backend answers and where the diary persists are decided here,
    /// never branched on inside the controller.
    pub fn new(dispatcher: Dispatcher, diary: DiaryStore, crop_settings: CropSettings) -> Self {
        Self {
            state: Arc::new(RwLock::new(ControllerState {
                session: Session::default(),
                pending_image: None,
                generation: 0,
            })),
            diary: Arc::new(Mutex::new(diary)),
            dispatcher,
            crop_settings,
        }
    }

    /// A point-in-time copy of the observable session state.
    pub async fn session(&self) -> Session {
        self.state.read().await.session.clone()
    }

    /// Current ordered diary sequence, newest-first.
    pub async fn diary_entries(&self) -> Vec<DiaryEntry> {
        self.diary.lock().await.entries().to_vec()
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Home -> Input on subject selection.
    pub async fn select_subject(&self, subject: crate::subject::Subject) -> Result<()> {
        let mut state = self.state.write().await;
        Self::require(&state.session, Screen::Home, "select_subject")?;
        state.session.subject = Some(subject);
        state.session.screen = Screen::Input;
        debug!(%subject, "entered input screen");
        Ok(())
    }

    /// Home -> Diary.
    pub async fn open_diary(&self) -> Result<()> {
        let mut state = self.state.write().await;
        Self::require(&state.session, Screen::Home, "open_diary")?;
        state.session.screen = Screen::Diary;
        Ok(())
    }

    /// Back-navigation, one level up: Analysis/Crop -> Input,
    /// Input/Diary -> Home. On Home this is a no-op.
    ///
    /// Returning to Home clears the subject and any pending capture;
    /// leaving Crop discards the crop source without persisting anything.
    /// Back is allowed while a dispatch is in flight: the in-flight result
    /// is then discarded on delivery.
    pub async fn back(&self) -> Screen {
        let mut state = self.state.write().await;
        let current = state.session.screen;
        let Some(target) = current.back_target() else {
            return current;
        };

        if current == Screen::Crop {
            state.pending_image = None;
        }
        if current == Screen::Input {
            // Leaving Input invalidates any dispatch still in flight, even
            // if the session later re-enters Input.
            state.generation += 1;
        }
        if target == Screen::Home {
            state.session.subject = None;
            state.session.capture = None;
            state.session.is_recording = false;
            state.session.last_result = None;
        }
        state.session.screen = target;
        debug!(?current, ?target, "back navigation");
        target
    }

    // ========================================================================
    // Capture pipeline
    // ========================================================================

    /// Attaches an image capture (file or camera), discarding any pending
    /// voice capture.
    pub async fn attach_image(&self, payload: impl Into<String>) -> Result<()> {
        let mut state = self.state.write().await;
        Self::require(&state.session, Screen::Input, "attach_image")?;
        state.session.capture = Some(Capture::image(payload));
        Ok(())
    }

    /// Stores dictated text verbatim as a voice capture, discarding any
    /// pending image capture. Empty text clears a pending voice capture.
    pub async fn set_dictated_text(&self, text: impl Into<String>) -> Result<()> {
        let mut state = self.state.write().await;
        Self::require(&state.session, Screen::Input, "set_dictated_text")?;
        let text = text.into();
        if text.trim().is_empty() {
            if matches!(
                state.session.capture,
                Some(Capture {
                    kind: CaptureKind::Voice,
                    ..
                })
            ) {
                state.session.capture = None;
            }
        } else {
            state.session.capture = Some(Capture::voice(text));
        }
        Ok(())
    }

    /// Flips the dictation on/off flag; returns the new value.
    pub async fn toggle_recording(&self) -> Result<bool> {
        let mut state = self.state.write().await;
        Self::require(&state.session, Screen::Input, "toggle_recording")?;
        state.session.is_recording = !state.session.is_recording;
        Ok(state.session.is_recording)
    }

    /// Input -> Crop. Requires a pending image capture to crop.
    pub async fn begin_crop(&self) -> Result<()> {
        let mut state = self.state.write().await;
        Self::require(&state.session, Screen::Input, "begin_crop")?;
        let source = match &state.session.capture {
            Some(Capture {
                kind: CaptureKind::Image,
                payload,
            }) => payload.clone(),
            _ => return Err(TutorError::capture("no pending image capture to crop")),
        };
        state.pending_image = Some(source);
        state.generation += 1;
        state.session.screen = Screen::Crop;
        Ok(())
    }

    /// The default crop anchor for the image on the Crop screen: centered,
    /// covering the configured fraction of the image width at the fixed
    /// aspect ratio.
    pub async fn default_crop_region(&self) -> Result<CropRegion> {
        let state = self.state.read().await;
        Self::require(&state.session, Screen::Crop, "default_crop_region")?;
        let source = state
            .pending_image
            .as_deref()
            .ok_or_else(|| TutorError::capture("no crop source image"))?;
        let (width, height) = image_dimensions(source)?;
        Ok(centered_region(width, height, &self.crop_settings))
    }

    /// Crop -> Input on confirm. Crops the source to `region` (default
    /// anchor when `None`), stores the result as the session capture and,
    /// when `save_to_diary` is set, appends it to the diary.
    pub async fn confirm_crop(&self, region: Option<CropRegion>, save_to_diary: bool) -> Result<()> {
        let (source, subject) = {
            let state = self.state.read().await;
            Self::require(&state.session, Screen::Crop, "confirm_crop")?;
            let source = state
                .pending_image
                .clone()
                .ok_or_else(|| TutorError::capture("no crop source image"))?;
            (source, state.session.subject.unwrap_or_default())
        };

        let region = match region {
            Some(region) => region,
            None => {
                let (width, height) = image_dimensions(&source)?;
                centered_region(width, height, &self.crop_settings)
            }
        };
        let cropped = crop_image_payload(&source, region)?;

        if save_to_diary {
            let entry = DiaryEntry::pending(subject, CaptureKind::Image, cropped.clone());
            if let Err(err) = self.diary.lock().await.append(entry).await {
                warn!(error = %err, "diary append of cropped capture failed");
            }
        }

        let mut state = self.state.write().await;
        state.session.capture = Some(Capture::image(cropped));
        state.pending_image = None;
        state.session.screen = Screen::Input;
        Ok(())
    }

    /// Crop -> Input on cancel: nothing is persisted, the capture is left
    /// as it was.
    pub async fn cancel_crop(&self) -> Result<()> {
        let mut state = self.state.write().await;
        Self::require(&state.session, Screen::Crop, "cancel_crop")?;
        state.pending_image = None;
        state.session.screen = Screen::Input;
        Ok(())
    }

    // ========================================================================
    // Submission and result presentation
    // ========================================================================

    /// Input -> Analysis on submit.
    ///
    /// Hard preconditions: a capture must be present (`EmptyInput`
    /// otherwise, no state change, the dispatcher is never called) and no
    /// dispatch may already be in flight (`Busy`).
    ///
    /// Side effects, in order: the capture is appended to the diary
    /// before dispatch (the diary records intent, not success), the
    /// loading flag is set for the whole dispatch and cleared on every
    /// exit path, and on completion the session moves to Analysis with
    /// the fast-answer tab selected. If the session left the Input
    /// screen while the dispatch was in flight the result is discarded
    /// and `Ok(None)` is returned, even when Input was re-entered in
    /// the meantime.
    pub async fn submit(&self, agent_kind: AgentKind) -> Result<Option<AgentResult>> {
        let (request, entry, generation) = {
            let mut state = self.state.write().await;
            Self::require(&state.session, Screen::Input, "submit")?;
            if state.session.is_loading {
                return Err(TutorError::Busy);
            }
            let capture = state.session.capture.clone().ok_or(TutorError::EmptyInput)?;
            if capture.payload.trim().is_empty() {
                return Err(TutorError::EmptyInput);
            }

            let subject = state.session.subject.unwrap_or_default();
            let request = match capture.kind {
                CaptureKind::Voice => {
                    AgentRequest::with_text(agent_kind, subject, capture.payload.clone())?
                }
                CaptureKind::Image => {
                    AgentRequest::with_image(agent_kind, subject, capture.payload.clone())?
                }
            };
            let entry = DiaryEntry::pending(subject, capture.kind, capture.payload);

            state.session.is_loading = true;
            state.generation += 1;
            (request, entry, state.generation)
        };

        // The raw capture is recorded whether or not the agent succeeds.
        if let Err(err) = self.diary.lock().await.append(entry).await {
            warn!(error = %err, "diary append before dispatch failed, continuing");
        }

        info!(kind = %agent_kind, "dispatching capture");
        let result = self.dispatcher.dispatch(&request).await;

        let mut state = self.state.write().await;
        state.session.is_loading = false;
        if state.generation != generation {
            debug!(kind = %agent_kind, "session moved on, discarding dispatch result");
            return Ok(None);
        }
        state.session.last_result = Some(result.clone());
        state.session.active_tab = ResultTab::FastAnswer;
        state.session.screen = Screen::Analysis;
        Ok(Some(result))
    }

    /// Switches the displayed result view on the analysis screen.
    pub async fn select_tab(&self, tab: ResultTab) -> Result<()> {
        let mut state = self.state.write().await;
        Self::require(&state.session, Screen::Analysis, "select_tab")?;
        state.session.active_tab = tab;
        Ok(())
    }

    /// One-sentence compression of the active result, for speech playback.
    /// Returns `None` when there is no result to summarize.
    pub async fn summarize_active_result(&self) -> Option<String> {
        let text = {
            let state = self.state.read().await;
            state.session.last_result.as_ref()?.text.clone()
        };
        Some(self.dispatcher.summarize(&text).await)
    }

    // ========================================================================
    // Diary operations (routed through the store)
    // ========================================================================

    /// Removes a diary entry by id; a nonexistent id is a no-op.
    pub async fn remove_diary_entry(&self, id: &str) -> Result<()> {
        self.diary.lock().await.remove(id).await
    }

    /// Empties the diary. The "are you sure" gate is the caller's concern.
    pub async fn clear_diary(&self) -> Result<()> {
        self.diary.lock().await.clear().await
    }

    fn require(session: &Session, screen: Screen, action: &'static str) -> Result<()> {
        if session.screen == screen {
            Ok(())
        } else {
            Err(TutorError::InvalidTransition {
                screen: session.screen,
                action,
            })
        }
    }
}
