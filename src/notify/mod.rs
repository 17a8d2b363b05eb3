//! Notification side effects for the countdown engine.
//!
//! The engine does not talk to audio hardware or the terminal directly; it
//! is handed a [`NotificationPort`] at construction and fires its two
//! capabilities fire-and-forget:
//!
//! - `play_sound` when a period expires
//! - `set_status_text` with a `"<glyph> MM:SS"` label once per running tick,
//!   and with `None` when the countdown stops, so the host can restore its
//!   own default label
//!
//! Adapter failures are the adapter's problem: the engine logs and drops
//! them. A host without audio or without a terminal installs a partial or
//! no-op adapter and the engine behaves identically.

mod error;
mod terminal;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

pub use error::NotifyError;
pub use terminal::TerminalNotifier;

use crate::types::TimerMode;

// ============================================================================
// NotificationPort
// ============================================================================

/// Capability interface the engine uses for side effects.
///
/// Injected at engine construction; the engine consumes but never owns the
/// underlying resources.
pub trait NotificationPort: Send + Sync {
    /// Plays the expiry chime. Fire-and-forget.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails; the engine discards it.
    fn play_sound(&self) -> Result<(), NotifyError>;

    /// Updates the host's status label.
    ///
    /// `Some(label)` carries the countdown text; `None` asks the host to
    /// restore its default label.
    ///
    /// # Errors
    ///
    /// Returns an error if the host surface rejects the update; the engine
    /// discards it.
    fn set_status_text(&self, text: Option<&str>) -> Result<(), NotifyError>;
}

/// Formats the status label pushed through the port on every running tick.
pub fn status_label(mode: TimerMode, seconds_remaining: u32) -> String {
    let minutes = seconds_remaining / 60;
    let seconds = seconds_remaining % 60;
    format!("{} {:02}:{:02}", mode.glyph(), minutes, seconds)
}

// ============================================================================
// MockNotificationPort
// ============================================================================

/// A recorded call on the mock port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyCall {
    /// `play_sound` was invoked
    Sound,
    /// `set_status_text` was invoked with this value
    Status(Option<String>),
}

/// Mock notification port for testing.
#[derive(Debug, Default)]
pub struct MockNotificationPort {
    calls: Mutex<Vec<NotifyCall>>,
    fail_sound: AtomicBool,
    fail_status: AtomicBool,
}

impl MockNotificationPort {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent `play_sound` calls fail.
    pub fn set_fail_sound(&self, fail: bool) {
        self.fail_sound.store(fail, Ordering::SeqCst);
    }

    /// Makes subsequent `set_status_text` calls fail.
    pub fn set_fail_status(&self, fail: bool) {
        self.fail_status.store(fail, Ordering::SeqCst);
    }

    /// Returns all recorded calls in order.
    #[must_use]
    pub fn calls(&self) -> Vec<NotifyCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns how many times the chime was played.
    #[must_use]
    pub fn sound_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| matches!(c, NotifyCall::Sound))
            .count()
    }

    /// Returns the recorded status values in order.
    #[must_use]
    pub fn status_calls(&self) -> Vec<Option<String>> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|c| match c {
                NotifyCall::Status(value) => Some(value.clone()),
                NotifyCall::Sound => None,
            })
            .collect()
    }

    /// Returns the most recent status value, if any was recorded.
    #[must_use]
    pub fn last_status(&self) -> Option<Option<String>> {
        self.status_calls().last().cloned()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }
}

impl NotificationPort for MockNotificationPort {
    fn play_sound(&self) -> Result<(), NotifyError> {
        if self.fail_sound.load(Ordering::SeqCst) {
            return Err(NotifyError::Sound(crate::sound::SoundError::PlaybackError(
                "mock failure".to_string(),
            )));
        }
        self.calls.lock().unwrap().push(NotifyCall::Sound);
        Ok(())
    }

    fn set_status_text(&self, text: Option<&str>) -> Result<(), NotifyError> {
        if self.fail_status.load(Ordering::SeqCst) {
            return Err(NotifyError::Status("mock status failure".to_string()));
        }
        self.calls
            .lock()
            .unwrap()
            .push(NotifyCall::Status(text.map(str::to_string)));
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
