//! Sound player implementation using rodio.

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::embedded::get_chime;
use super::error::SoundError;
use super::source::SoundSource;

/// A sound player that uses rodio for audio playback.
///
/// This player is thread-safe and can be shared across threads using `Arc`.
/// Playback is non-blocking; sounds continue playing in the background.
pub struct RodioSoundPlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
    /// Whether sound playback is disabled.
    disabled: AtomicBool,
}

impl RodioSoundPlayer {
    /// Creates a new sound player.
    ///
    /// # Arguments
    ///
    /// * `disabled` - If true, all sound playback is silently skipped.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new(disabled: bool) -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
            disabled: AtomicBool::new(disabled),
        })
    }

    /// Creates a disabled sound player.
    ///
    /// All calls to `play` will silently succeed without producing sound.
    ///
    /// # Errors
    ///
    /// May still fail if the audio stream cannot be initialized.
    pub fn disabled() -> Result<Self, SoundError> {
        Self::new(true)
    }

    /// Plays a sound from the given source.
    ///
    /// Non-blocking; the sound plays in the background. If a file-backed
    /// source cannot be played, playback falls back to the embedded chime.
    ///
    /// # Errors
    ///
    /// Returns an error if the sound cannot be decoded or the sink cannot
    /// be created.
    pub fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        if self.disabled.load(Ordering::Relaxed) {
            debug!("Sound playback disabled, skipping");
            return Ok(());
        }

        match source {
            SoundSource::File { path, name } => {
                debug!("Playing sound file: {}", name);
                match self.play_file(path) {
                    Ok(()) => Ok(()),
                    Err(e) => {
                        warn!(
                            "Failed to play sound file '{}': {}, falling back to embedded chime",
                            name, e
                        );
                        self.play_chime()
                    }
                }
            }
            SoundSource::Embedded { name } => {
                debug!("Playing embedded sound: {}", name);
                self.play_chime()
            }
        }
    }

    /// Plays a sound file from the filesystem.
    fn play_file(&self, path: &std::path::Path) -> Result<(), SoundError> {
        let file = File::open(path)
            .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e)))?;

        let reader = BufReader::new(file);
        let decoder = Decoder::new(reader).map_err(|e| SoundError::DecodeError(e.to_string()))?;

        self.play_decoder(decoder)
    }

    /// Plays the embedded chime.
    fn play_chime(&self) -> Result<(), SoundError> {
        let cursor = Cursor::new(get_chime());
        let decoder = Decoder::new(cursor)
            .map_err(|e| SoundError::DecodeError(format!("embedded chime: {}", e)))?;

        self.play_decoder(decoder)
    }

    /// Plays a decoded audio source.
    fn play_decoder<R>(&self, decoder: Decoder<R>) -> Result<(), SoundError>
    where
        R: std::io::Read + std::io::Seek + Send + Sync + 'static,
    {
        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| SoundError::StreamError(e.to_string()))?;

        sink.append(decoder);
        sink.detach(); // Non-blocking: sound continues after function returns

        debug!("Sound playback started (detached)");
        Ok(())
    }

    /// Returns true if sound playback is currently disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::Relaxed)
    }

    /// Enables sound playback.
    pub fn enable(&self) {
        self.disabled.store(false, Ordering::Relaxed);
        debug!("Sound playback enabled");
    }

    /// Disables sound playback.
    pub fn disable(&self) {
        self.disabled.store(true, Ordering::Relaxed);
        debug!("Sound playback disabled");
    }

    /// Returns true if the audio system is available.
    ///
    /// Always true once the player exists; the stream is initialized during
    /// construction.
    #[must_use]
    pub fn is_available(&self) -> bool {
        true
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer")
            .field("disabled", &self.disabled.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

/// Creates a sound player, returning None if audio is unavailable.
///
/// If audio initialization fails, a warning is logged and the daemon keeps
/// running without sound.
#[must_use]
pub fn try_create_player(disabled: bool) -> Option<Arc<RodioSoundPlayer>> {
    match RodioSoundPlayer::new(disabled) {
        Ok(player) => Some(Arc::new(player)),
        Err(e) => {
            warn!("Audio not available, sound disabled: {}", e);
            None
        }
    }
}
