//! Sound playback for expiry chimes.
//!
//! This module provides audio notification capabilities:
//!
//! - Embedded chime playback with no external assets
//! - Optional user-supplied chime files
//! - Non-blocking audio playback
//! - Graceful degradation when audio is unavailable
//!
//! A daemon host on a machine without an audio device simply runs without
//! sound; nothing in the timer depends on playback succeeding.
//!
//! Output streams are not portable across threads, so long-lived hosts
//! keep the player on the thread that created it (see the terminal
//! notification adapter).

mod embedded;
mod error;
mod player;
mod source;

pub use embedded::{get_chime, get_chime_format, CHIME_DATA};
pub use error::SoundError;
pub use player::{try_create_player, RodioSoundPlayer};
pub use source::{custom_sound, default_sound, SoundSource};
