//! Terminal-hosted notification adapter.
//!
//! The daemon's own terminal is the rendering host: the countdown label is
//! mirrored into the terminal window title (OSC 0 escape sequence) and the
//! expiry chime goes through the sound module. When the engine clears the
//! status, the title configured at construction is written back — a
//! terminal title cannot be read, so the restore value is fixed up front.
//!
//! Audio output streams must stay on the thread that created them, so the
//! chime player lives on a dedicated thread and `play_sound` only posts the
//! source over a channel.

use std::io::{self, Write};
use std::sync::mpsc::{self, Sender};
use std::sync::Mutex;

use tracing::warn;

use super::error::NotifyError;
use super::NotificationPort;
use crate::sound::{default_sound, try_create_player, SoundError, SoundSource};

/// Production notification adapter for a terminal-hosted daemon.
pub struct TerminalNotifier {
    /// Channel into the audio thread; `None` runs silent
    chime_tx: Option<Mutex<Sender<SoundSource>>>,
    /// Chime to play on expiry
    chime: SoundSource,
    /// Title restored when the engine clears the status
    default_title: String,
}

impl TerminalNotifier {
    /// Creates a notifier with the embedded chime and no audio output.
    ///
    /// Without audio, `play_sound` is a silent success — the degradation
    /// policy for hosts without sound hardware.
    #[must_use]
    pub fn new(default_title: impl Into<String>) -> Self {
        Self {
            chime_tx: None,
            chime: default_sound(),
            default_title: default_title.into(),
        }
    }

    /// Spawns the audio thread and routes chimes to it.
    ///
    /// The thread owns the output stream for its whole lifetime. If no
    /// audio device is available the thread exits immediately and later
    /// chime requests fail, which the engine logs and ignores.
    #[must_use]
    pub fn with_audio(mut self) -> Self {
        let (tx, rx) = mpsc::channel::<SoundSource>();

        std::thread::spawn(move || {
            let Some(player) = try_create_player(false) else {
                return;
            };
            while let Ok(source) = rx.recv() {
                if let Err(e) = player.play(&source) {
                    warn!("チャイムの再生に失敗しました: {}", e);
                }
            }
        });

        self.chime_tx = Some(Mutex::new(tx));
        self
    }

    /// Replaces the chime source.
    #[must_use]
    pub fn with_chime(mut self, chime: SoundSource) -> Self {
        self.chime = chime;
        self
    }

    /// Returns the title restored when the status is cleared.
    #[must_use]
    pub fn default_title(&self) -> &str {
        &self.default_title
    }

    /// Writes a terminal title via the OSC 0 escape sequence.
    fn write_title(&self, title: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        write!(out, "\x1b]0;{}\x07", title)?;
        out.flush()
    }
}

impl NotificationPort for TerminalNotifier {
    fn play_sound(&self) -> Result<(), NotifyError> {
        let Some(tx) = &self.chime_tx else {
            return Ok(());
        };

        tx.lock()
            .map_err(|_| NotifyError::Status("audio channel poisoned".to_string()))?
            .send(self.chime.clone())
            .map_err(|_| {
                NotifyError::Sound(SoundError::DeviceNotAvailable(
                    "audio thread stopped".to_string(),
                ))
            })
    }

    fn set_status_text(&self, text: Option<&str>) -> Result<(), NotifyError> {
        let title = text.unwrap_or(&self.default_title);
        self.write_title(title)?;
        Ok(())
    }
}

impl std::fmt::Debug for TerminalNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalNotifier")
            .field("chime", &self.chime)
            .field("default_title", &self.default_title)
            .field("has_audio", &self.chime_tx.is_some())
            .finish()
    }
}
