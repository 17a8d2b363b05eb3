//! Sound source selection.
//!
//! A chime either comes from a user-supplied audio file or from the sound
//! embedded in the binary. The embedded chime is the default and the
//! fallback when a file cannot be played.

use std::path::{Path, PathBuf};

/// Represents the source of a sound to be played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    /// An audio file on disk, chosen by the user.
    File {
        /// Display name of the sound
        name: String,
        /// Path to the audio file
        path: PathBuf,
    },
    /// The chime compiled into the binary.
    Embedded {
        /// Display name of the sound
        name: String,
    },
}

impl SoundSource {
    /// Creates a file-backed sound source.
    #[must_use]
    pub fn file(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::File {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Creates an embedded sound source.
    #[must_use]
    pub fn embedded(name: impl Into<String>) -> Self {
        Self::Embedded { name: name.into() }
    }

    /// Returns the name of the sound source.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } | Self::Embedded { name } => name,
        }
    }

    /// Returns true if this is a file-backed sound.
    #[must_use]
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }

    /// Returns true if this is the embedded sound.
    #[must_use]
    pub fn is_embedded(&self) -> bool {
        matches!(self, Self::Embedded { .. })
    }

    /// Returns the file path if this is a file-backed sound.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File { path, .. } => Some(path),
            Self::Embedded { .. } => None,
        }
    }
}

/// Returns the default chime.
#[must_use]
pub fn default_sound() -> SoundSource {
    SoundSource::embedded("chime")
}

/// Builds a sound source from a user-supplied file path.
///
/// The display name is the file stem, falling back to the whole path when
/// there is none.
#[must_use]
pub fn custom_sound(path: impl Into<PathBuf>) -> SoundSource {
    let path = path.into();
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    SoundSource::File { name, path }
}
