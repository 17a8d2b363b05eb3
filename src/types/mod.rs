//! Core data types for Focustick.
//!
//! This module defines the data structures used for:
//! - Timer modes and cycle bookkeeping
//! - Timer configuration with validation
//! - Read-only snapshots for rendering
//! - IPC request/response serialization

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================================================
// TimerMode
// ============================================================================

/// The period the timer is counting down.
///
/// Exactly one mode is active at any time; there is no separate "paused"
/// mode — pausing is a property of the engine, not of the period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    /// A focus (work) period
    Focus,
    /// A short rest between focus periods
    ShortBreak,
    /// The long rest closing out a full cycle
    LongBreak,
}

impl TimerMode {
    /// Returns the string representation of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerMode::Focus => "focus",
            TimerMode::ShortBreak => "short_break",
            TimerMode::LongBreak => "long_break",
        }
    }

    /// Returns the glyph used in status labels.
    pub fn glyph(&self) -> &'static str {
        match self {
            TimerMode::Focus => "🍅",
            TimerMode::ShortBreak => "☕",
            TimerMode::LongBreak => "🌙",
        }
    }

    /// Returns true if this mode is a break of either length.
    pub fn is_break(&self) -> bool {
        matches!(self, TimerMode::ShortBreak | TimerMode::LongBreak)
    }
}

impl Default for TimerMode {
    fn default() -> Self {
        TimerMode::Focus
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown mode name.
///
/// This is the boundary at which a mode request outside the closed
/// enumeration is rejected; no engine state is touched on failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("不明なモードです: {0}（focus / short_break / long_break のいずれかを指定してください）")]
pub struct ParseModeError(pub String);

impl FromStr for TimerMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "focus" => Ok(TimerMode::Focus),
            "short_break" | "short" => Ok(TimerMode::ShortBreak),
            "long_break" | "long" => Ok(TimerMode::LongBreak),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

// ============================================================================
// DisplayStyle
// ============================================================================

/// Rendering hint for the countdown display.
///
/// Carried in the configuration and echoed back to clients; the engine
/// itself never consults it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayStyle {
    /// Plain numeric countdown
    Classic,
    /// Countdown with a progress bar
    Animated,
}

impl DisplayStyle {
    /// Returns the string representation of the style.
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayStyle::Classic => "classic",
            DisplayStyle::Animated => "animated",
        }
    }
}

impl Default for DisplayStyle {
    fn default() -> Self {
        DisplayStyle::Classic
    }
}

impl FromStr for DisplayStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "classic" => Ok(DisplayStyle::Classic),
            "animated" => Ok(DisplayStyle::Animated),
            other => Err(format!(
                "不明な表示スタイルです: {other}（classic / animated のいずれかを指定してください）"
            )),
        }
    }
}

// ============================================================================
// TimerConfig
// ============================================================================

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Focus duration outside 1-60 minutes.
    #[error("集中時間は1-60分の範囲で指定してください")]
    FocusMinutesOutOfRange,

    /// Short break duration outside 1-30 minutes.
    #[error("短い休憩時間は1-30分の範囲で指定してください")]
    ShortBreakMinutesOutOfRange,

    /// Long break duration outside 1-60 minutes.
    #[error("長い休憩時間は1-60分の範囲で指定してください")]
    LongBreakMinutesOutOfRange,

    /// Focus units per cycle outside 1-10.
    #[error("サイクルあたりの集中回数は1-10回の範囲で指定してください")]
    FocusUnitsPerCycleOutOfRange,
}

/// Configuration for the countdown engine.
///
/// Immutable once handed to the engine; `apply_config` swaps the whole
/// object rather than mutating fields in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Focus duration in minutes (1-60)
    pub focus_minutes: u32,
    /// Short break duration in minutes (1-30)
    pub short_break_minutes: u32,
    /// Long break duration in minutes (1-60)
    pub long_break_minutes: u32,
    /// Focus periods completed before a long break is inserted (1-10)
    pub focus_units_per_cycle: u32,
    /// Whether the next period starts counting down automatically on expiry
    pub auto_advance: bool,
    /// Whether to play a chime when a period expires
    pub play_sound_on_expiry: bool,
    /// Rendering hint for clients
    pub display_style: DisplayStyle,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            focus_units_per_cycle: 4,
            auto_advance: false,
            play_sound_on_expiry: true,
            display_style: DisplayStyle::Classic,
        }
    }
}

impl TimerConfig {
    /// Creates a new configuration with the specified focus duration.
    pub fn with_focus_minutes(mut self, minutes: u32) -> Self {
        self.focus_minutes = minutes;
        self
    }

    /// Creates a new configuration with the specified short break duration.
    pub fn with_short_break_minutes(mut self, minutes: u32) -> Self {
        self.short_break_minutes = minutes;
        self
    }

    /// Creates a new configuration with the specified long break duration.
    pub fn with_long_break_minutes(mut self, minutes: u32) -> Self {
        self.long_break_minutes = minutes;
        self
    }

    /// Creates a new configuration with the specified cycle length.
    pub fn with_focus_units_per_cycle(mut self, units: u32) -> Self {
        self.focus_units_per_cycle = units;
        self
    }

    /// Creates a new configuration with auto-advance enabled or disabled.
    pub fn with_auto_advance(mut self, auto_advance: bool) -> Self {
        self.auto_advance = auto_advance;
        self
    }

    /// Validates the configuration bounds.
    ///
    /// The engine refuses an out-of-bounds configuration rather than
    /// clamping it; clamping belongs to whatever produced the values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.focus_minutes < 1 || self.focus_minutes > 60 {
            return Err(ConfigError::FocusMinutesOutOfRange);
        }
        if self.short_break_minutes < 1 || self.short_break_minutes > 30 {
            return Err(ConfigError::ShortBreakMinutesOutOfRange);
        }
        if self.long_break_minutes < 1 || self.long_break_minutes > 60 {
            return Err(ConfigError::LongBreakMinutesOutOfRange);
        }
        if self.focus_units_per_cycle < 1 || self.focus_units_per_cycle > 10 {
            return Err(ConfigError::FocusUnitsPerCycleOutOfRange);
        }
        Ok(())
    }

    /// Returns the configured duration of a mode in seconds.
    ///
    /// Never returns 0: every duration field is bounded to at least one
    /// minute by `validate`.
    pub fn duration_seconds(&self, mode: TimerMode) -> u32 {
        let minutes = match mode {
            TimerMode::Focus => self.focus_minutes,
            TimerMode::ShortBreak => self.short_break_minutes,
            TimerMode::LongBreak => self.long_break_minutes,
        };
        minutes * 60
    }
}

// ============================================================================
// CycleState
// ============================================================================

/// Progress counters within the configured rotation.
///
/// Owned exclusively by the engine; mutated only through resolver output
/// and the manual switch-to-focus reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CycleState {
    /// Focus periods completed in the current cycle
    /// (always below `focus_units_per_cycle`)
    #[serde(rename = "focusUnitsCompleted")]
    pub focus_units_completed: u32,
    /// Full cycles completed since the engine was created; never decreases
    #[serde(rename = "cyclesCompleted")]
    pub cycles_completed: u32,
}

// ============================================================================
// TimerSnapshot
// ============================================================================

/// Read-only projection of engine state for rendering.
///
/// Produced on demand; mutating a snapshot has no effect on the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct TimerSnapshot {
    /// Active mode
    pub mode: TimerMode,
    /// Seconds left in the active period
    pub seconds_remaining: u32,
    /// Elapsed fraction of the active period, in `[0, 1]`
    pub progress: f64,
    /// Whether the countdown is advancing
    pub is_running: bool,
    /// Cycle counters
    pub cycle: CycleState,
}

// ============================================================================
// IPC Types
// ============================================================================

/// Partial configuration patch carried by the configure command.
///
/// Absent fields leave the corresponding setting unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigParams {
    /// Focus duration in minutes
    #[serde(rename = "focusMinutes", skip_serializing_if = "Option::is_none")]
    pub focus_minutes: Option<u32>,
    /// Short break duration in minutes
    #[serde(rename = "shortBreakMinutes", skip_serializing_if = "Option::is_none")]
    pub short_break_minutes: Option<u32>,
    /// Long break duration in minutes
    #[serde(rename = "longBreakMinutes", skip_serializing_if = "Option::is_none")]
    pub long_break_minutes: Option<u32>,
    /// Focus periods per cycle
    #[serde(rename = "focusUnitsPerCycle", skip_serializing_if = "Option::is_none")]
    pub focus_units_per_cycle: Option<u32>,
    /// Auto-advance flag
    #[serde(rename = "autoAdvance", skip_serializing_if = "Option::is_none")]
    pub auto_advance: Option<bool>,
    /// Sound-on-expiry flag
    #[serde(rename = "playSound", skip_serializing_if = "Option::is_none")]
    pub play_sound_on_expiry: Option<bool>,
    /// Rendering hint
    #[serde(rename = "displayStyle", skip_serializing_if = "Option::is_none")]
    pub display_style: Option<DisplayStyle>,
}

impl ConfigParams {
    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.focus_minutes.is_none()
            && self.short_break_minutes.is_none()
            && self.long_break_minutes.is_none()
            && self.focus_units_per_cycle.is_none()
            && self.auto_advance.is_none()
            && self.play_sound_on_expiry.is_none()
            && self.display_style.is_none()
    }

    /// Merges this patch over a base configuration.
    ///
    /// The result is not validated here; the engine validates on apply.
    pub fn apply_to(&self, base: &TimerConfig) -> TimerConfig {
        TimerConfig {
            focus_minutes: self.focus_minutes.unwrap_or(base.focus_minutes),
            short_break_minutes: self.short_break_minutes.unwrap_or(base.short_break_minutes),
            long_break_minutes: self.long_break_minutes.unwrap_or(base.long_break_minutes),
            focus_units_per_cycle: self
                .focus_units_per_cycle
                .unwrap_or(base.focus_units_per_cycle),
            auto_advance: self.auto_advance.unwrap_or(base.auto_advance),
            play_sound_on_expiry: self
                .play_sound_on_expiry
                .unwrap_or(base.play_sound_on_expiry),
            display_style: self.display_style.unwrap_or(base.display_style),
        }
    }
}

/// IPC request from client to daemon.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum IpcRequest {
    /// Start (or resume) the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Restore the current mode's full duration and stop
    Reset,
    /// Manually switch to a mode
    Switch {
        /// Target mode
        mode: TimerMode,
    },
    /// Replace parts of the configuration
    Configure {
        /// Configuration patch
        #[serde(flatten)]
        params: ConfigParams,
    },
    /// Query the current snapshot
    Status,
}

/// Response data for IPC responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseData {
    /// Active mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// Remaining seconds
    #[serde(rename = "remainingSeconds", skip_serializing_if = "Option::is_none")]
    pub remaining_seconds: Option<u32>,
    /// Elapsed fraction of the active period
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    /// Whether the countdown is advancing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub running: Option<bool>,
    /// Focus periods completed in the current cycle
    #[serde(rename = "focusUnitsCompleted", skip_serializing_if = "Option::is_none")]
    pub focus_units_completed: Option<u32>,
    /// Full cycles completed
    #[serde(rename = "cyclesCompleted", skip_serializing_if = "Option::is_none")]
    pub cycles_completed: Option<u32>,
    /// Rendering hint for the client
    #[serde(rename = "displayStyle", skip_serializing_if = "Option::is_none")]
    pub display_style: Option<DisplayStyle>,
}

impl ResponseData {
    /// Creates response data from an engine snapshot.
    pub fn from_snapshot(snapshot: &TimerSnapshot, style: DisplayStyle) -> Self {
        Self {
            mode: Some(snapshot.mode.as_str().to_string()),
            remaining_seconds: Some(snapshot.seconds_remaining),
            progress: Some(snapshot.progress),
            running: Some(snapshot.is_running),
            focus_units_completed: Some(snapshot.cycle.focus_units_completed),
            cycles_completed: Some(snapshot.cycle.cycles_completed),
            display_style: Some(style),
        }
    }
}

/// IPC response from daemon to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpcResponse {
    /// Response status ("success" or "error")
    pub status: String,
    /// Human-readable message
    pub message: String,
    /// Optional response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

impl IpcResponse {
    /// Creates a success response.
    pub fn success(message: impl Into<String>, data: Option<ResponseData>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
            data,
        }
    }

    /// Creates an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            data: None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
