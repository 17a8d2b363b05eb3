//! Focustick Library
//!
//! This library provides the core functionality for the Focustick timer.
//! It includes:
//! - Countdown engine with mode/cycle state machine
//! - Pure mode transition resolver
//! - Notification port abstraction (chime + status label)
//! - Sound playback for expiry chimes
//! - 1 Hz tick driver and IPC server/client for daemon-CLI communication
//! - CLI command parsing and display utilities
//! - Type definitions for configuration and snapshots

pub mod cli;
pub mod daemon;
pub mod engine;
pub mod notify;
pub mod sound;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    ConfigError, ConfigParams, CycleState, DisplayStyle, IpcRequest, IpcResponse, ParseModeError,
    ResponseData, TimerConfig, TimerMode, TimerSnapshot,
};

// Re-export engine types
pub use engine::{resolve, TimerEngine, Transition};

// Re-export notification types
pub use notify::{
    status_label, MockNotificationPort, NotificationPort, NotifyCall, NotifyError,
    TerminalNotifier,
};

// Re-export sound types
pub use sound::{
    custom_sound, default_sound, try_create_player, RodioSoundPlayer, SoundError, SoundSource,
};

// Re-export daemon types
pub use daemon::{default_socket_path, IpcError, IpcServer, RequestHandler, TickDriver};
