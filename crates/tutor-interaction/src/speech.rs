//! Speech presenter: toggleable text-to-speech for the active result.
//!
//! The platform utterance API sits behind the `SpeechSynthesizer` trait;
//! the presenter owns the single speaking flag and the one-utterance-at-a-
//! time rule.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Speech synthesis failure. Never fatal: the presenter simply does not
/// flip to speaking.
#[derive(Error, Debug, Clone)]
pub enum SpeechError {
    #[error("Speech synthesis failed: {0}")]
    Synthesis(String),
}

/// Platform-provided utterance API. Implement for the host platform's
/// speech engine, or use [`NullSynthesizer`] where none exists.
pub trait SpeechSynthesizer: Send + Sync {
    /// Starts speaking `text` in the given BCP 47 language.
    fn speak(&self, text: &str, language: &str) -> Result<(), SpeechError>;

    /// Cancels any active utterance. Must be safe to call when idle.
    fn stop(&self);
}

/// Synthesizer that accepts every utterance and produces no audio. Lets
/// the presenter's state machine run on platforms without speech output.
#[derive(Debug, Default)]
pub struct NullSynthesizer;

impl SpeechSynthesizer for NullSynthesizer {
    fn speak(&self, _text: &str, _language: &str) -> Result<(), SpeechError> {
        Ok(())
    }

    fn stop(&self) {}
}

/// Owns the `is_speaking` flag and drives the synthesizer.
///
/// Only one utterance is active at a time: toggling while speaking stops
/// playback instead of queueing.
pub struct SpeechPresenter {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    language: String,
    is_speaking: bool,
}

impl SpeechPresenter {
    /// Creates a presenter speaking in the given language tag.
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>, language: impl Into<String>) -> Self {
        Self {
            synthesizer,
            language: language.into(),
            is_speaking: false,
        }
    }

    pub fn is_speaking(&self) -> bool {
        self.is_speaking
    }

    /// Toggles playback of `text`.
    ///
    /// Speaking: cancels playback and clears the flag (idempotent stop).
    /// Idle: strips markup control characters, starts playback and sets
    /// the flag; if the synthesizer fails the flag simply stays false.
    ///
    /// Returns the new value of the speaking flag.
    pub fn toggle(&mut self, text: &str) -> bool {
        if self.is_speaking {
            self.synthesizer.stop();
            self.is_speaking = false;
            debug!("speech stopped");
            return false;
        }

        let cleaned = strip_markup(text);
        match self.synthesizer.speak(&cleaned, &self.language) {
            Ok(()) => {
                self.is_speaking = true;
                debug!(language = %self.language, "speech started");
            }
            Err(err) => {
                warn!(error = %err, "speech synthesis unavailable");
            }
        }
        self.is_speaking
    }

    /// Called when playback ends naturally.
    pub fn on_playback_end(&mut self) {
        self.is_speaking = false;
    }
}

/// Removes markdown/markup control characters before synthesis.
fn strip_markup(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '$' | '#' | '*' | '`'))
        .collect()
}
