//! Notification port error types.

use thiserror::Error;

use crate::sound::SoundError;

/// Errors raised by notification adapters.
///
/// The engine catches these at the call site and discards them; a broken
/// speaker or an unwritable terminal never stops the tick loop.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Chime playback failed.
    #[error("サウンド再生に失敗しました: {0}")]
    Sound(#[from] SoundError),

    /// Status text could not be written to the host surface.
    #[error("ステータス表示の更新に失敗しました: {0}")]
    Status(String),
}

impl From<std::io::Error> for NotifyError {
    fn from(e: std::io::Error) -> Self {
        NotifyError::Status(e.to_string())
    }
}
