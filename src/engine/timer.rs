//! The countdown engine.
//!
//! `TimerEngine` is an explicit state machine driven by an external 1 Hz
//! scheduler: the host calls [`TimerEngine::tick`] once per second and reads
//! state back through [`TimerEngine::snapshot`]. The engine owns no clock,
//! no audio device, and no terminal; side effects go through the injected
//! [`NotificationPort`] and failures there are logged and dropped.

use std::sync::Arc;

use tracing::warn;

use crate::engine::resolver;
use crate::notify::{status_label, NotificationPort};
use crate::types::{ConfigError, CycleState, TimerConfig, TimerMode, TimerSnapshot};

// ============================================================================
// TimerEngine
// ============================================================================

/// State machine for the countdown.
///
/// Observable state is the cross product of the active [`TimerMode`] and the
/// running flag; expiry handling is an instantaneous step inside a single
/// `tick` call and is never visible through `snapshot`.
pub struct TimerEngine {
    /// Active configuration; replaced wholesale, never field-mutated
    config: TimerConfig,
    /// Active mode
    mode: TimerMode,
    /// Seconds left in the active period
    seconds_remaining: u32,
    /// Whether ticks advance the countdown
    running: bool,
    /// Rotation counters
    cycle: CycleState,
    /// Side-effect sink
    notifier: Arc<dyn NotificationPort>,
    /// Whether a status label is currently shown on the host surface;
    /// guarantees at most one clear per running episode
    status_shown: bool,
}

impl TimerEngine {
    /// Creates an engine in focus mode with the full focus duration, not
    /// running.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration violates its bounds;
    /// nothing is constructed in that case.
    pub fn new(
        config: TimerConfig,
        notifier: Arc<dyn NotificationPort>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let seconds_remaining = config.duration_seconds(TimerMode::Focus);

        Ok(Self {
            config,
            mode: TimerMode::Focus,
            seconds_remaining,
            running: false,
            cycle: CycleState::default(),
            notifier,
            status_shown: false,
        })
    }

    /// Starts (or resumes) the countdown.
    ///
    /// No-op if already running or if the period has no time left.
    pub fn start(&mut self) {
        if self.running || self.seconds_remaining == 0 {
            return;
        }
        self.running = true;
    }

    /// Pauses the countdown. No-op if not running.
    pub fn pause(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.clear_status();
    }

    /// Restores the current mode's full duration and stops the countdown.
    ///
    /// Mode and cycle counters are untouched.
    pub fn reset(&mut self) {
        self.seconds_remaining = self.config.duration_seconds(self.mode);
        self.running = false;
        self.clear_status();
    }

    /// Manually switches to a mode, stopped at its full duration.
    ///
    /// Entering focus from a break abandons the partial cycle: the in-cycle
    /// counter resets while `cycles_completed` is kept.
    pub fn switch_mode(&mut self, mode: TimerMode) {
        if mode == TimerMode::Focus && self.mode != TimerMode::Focus {
            self.cycle.focus_units_completed = 0;
        }
        self.mode = mode;
        self.seconds_remaining = self.config.duration_seconds(mode);
        self.running = false;
        self.clear_status();
    }

    /// Replaces the configuration.
    ///
    /// If the active mode's duration changed, the remaining time is reset to
    /// the new full duration — the countdown is not pro-rated. The running
    /// flag and cycle counters are untouched.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the new configuration violates its
    /// bounds; the engine keeps its previous state.
    pub fn apply_config(&mut self, config: TimerConfig) -> Result<(), ConfigError> {
        config.validate()?;

        let duration_changed =
            config.duration_seconds(self.mode) != self.config.duration_seconds(self.mode);
        self.config = config;
        if duration_changed {
            self.seconds_remaining = self.config.duration_seconds(self.mode);
        }
        Ok(())
    }

    /// Advances the countdown by one second.
    ///
    /// No-op while paused. On expiry the chime fires for the period that
    /// just completed, then the resolver picks the next mode; whether the
    /// new period starts running is decided solely by `auto_advance`.
    pub fn tick(&mut self) {
        if !self.running || self.seconds_remaining == 0 {
            return;
        }

        self.seconds_remaining -= 1;

        if self.seconds_remaining == 0 {
            self.running = false;

            // Chime belongs to the completed mode; fire before the mode
            // variable is overwritten.
            if self.config.play_sound_on_expiry {
                if let Err(e) = self.notifier.play_sound() {
                    warn!("期限切れチャイムの再生に失敗しました: {}", e);
                }
            }

            let transition = resolver::resolve(self.mode, self.cycle, &self.config);
            self.mode = transition.next_mode;
            self.cycle = transition.next_cycle;
            self.seconds_remaining = self.config.duration_seconds(self.mode);
            self.running = self.config.auto_advance;
        }

        if self.running {
            self.push_status();
        } else {
            self.clear_status();
        }
    }

    /// Returns a read-only snapshot of the current state.
    pub fn snapshot(&self) -> TimerSnapshot {
        let duration = self.config.duration_seconds(self.mode);
        TimerSnapshot {
            mode: self.mode,
            seconds_remaining: self.seconds_remaining,
            progress: f64::from(duration - self.seconds_remaining) / f64::from(duration),
            is_running: self.running,
            cycle: self.cycle,
        }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// Pushes the countdown label to the host surface.
    fn push_status(&mut self) {
        let label = status_label(self.mode, self.seconds_remaining);
        if let Err(e) = self.notifier.set_status_text(Some(&label)) {
            warn!("ステータス表示の更新に失敗しました: {}", e);
        }
        self.status_shown = true;
    }

    /// Asks the host to restore its default label, at most once per
    /// running episode.
    fn clear_status(&mut self) {
        if !self.status_shown {
            return;
        }
        if let Err(e) = self.notifier.set_status_text(None) {
            warn!("ステータス表示の復元に失敗しました: {}", e);
        }
        self.status_shown = false;
    }
}

impl std::fmt::Debug for TimerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerEngine")
            .field("mode", &self.mode)
            .field("seconds_remaining", &self.seconds_remaining)
            .field("running", &self.running)
            .field("cycle", &self.cycle)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
