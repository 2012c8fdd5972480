//! Error taxonomy for the media toolchain wrappers.
//!
//! Each stage of the composition core has its own failure variant carrying
//! the offending asset path(s) and the underlying toolchain diagnostic.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure from one of the media toolchain operations.
#[derive(Error, Debug)]
pub enum MediaError {
    /// Probing a file for its duration failed.
    #[error("Probe failed for '{path}': {detail}")]
    ProbeFailure { path: PathBuf, detail: String },

    /// Mixing the voice and music tracks failed.
    #[error("Mix failed for '{primary}' + '{secondary}': {detail}")]
    MixFailure {
        primary: PathBuf,
        secondary: PathBuf,
        detail: String,
    },

    /// Looping/trimming the video to the target duration failed.
    #[error("Conform failed for '{path}': {detail}")]
    ConformFailure { path: PathBuf, detail: String },

    /// Joining the video and audio streams failed.
    #[error("Mux failed for '{video}' + '{audio}': {detail}")]
    MuxFailure {
        video: PathBuf,
        audio: PathBuf,
        detail: String,
    },

    /// Burning text overlays onto the video failed.
    #[error("Overlay render failed for '{path}': {detail}")]
    OverlayFailure { path: PathBuf, detail: String },
}

impl MediaError {
    pub fn probe(path: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        Self::ProbeFailure {
            path: path.into(),
            detail: detail.into(),
        }
    }

    pub fn mix(
        primary: impl Into<PathBuf>,
        secondary: impl Into<PathBuf>,
        detail: impl Into<String>,
    ) -> Self {
        Self::MixFailure {
            primary: primary.into(),
            secondary: secondary.into(),
            detail: detail.into(),
        }
    }

    pub fn conform(path: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        Self::ConformFailure {
            path: path.into(),
            detail: detail.into(),
        }
    }

    pub fn mux(
        video: impl Into<PathBuf>,
        audio: impl Into<PathBuf>,
        detail: impl Into<String>,
    ) -> Self {
        Self::MuxFailure {
            video: video.into(),
            audio: audio.into(),
            detail: detail.into(),
        }
    }

    pub fn overlay(path: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        Self::OverlayFailure {
            path: path.into(),
            detail: detail.into(),
        }
    }

    /// The stage name this error belongs to.
    pub fn stage(&self) -> &'static str {
        match self {
            MediaError::ProbeFailure { .. } => "probe",
            MediaError::MixFailure { .. } => "mix",
            MediaError::ConformFailure { .. } => "conform",
            MediaError::MuxFailure { .. } => "mux",
            MediaError::OverlayFailure { .. } => "overlay",
        }
    }
}

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// A reference to an audio or video resource on storage.
///
/// Duration is probed lazily and never cached across runs; the file is the
/// single source of truth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAsset {
    path: PathBuf,
}

impl MediaAsset {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

impl From<PathBuf> for MediaAsset {
    fn from(path: PathBuf) -> Self {
        Self { path }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_carry_paths_and_diagnostics() {
        let err = MediaError::mix("/tmp/voice.mp3", "/tmp/bgm.mp3", "exit code 1");
        let msg = err.to_string();
        assert!(msg.contains("/tmp/voice.mp3"));
        assert!(msg.contains("/tmp/bgm.mp3"));
        assert!(msg.contains("exit code 1"));
        assert_eq!(err.stage(), "mix");
    }

    #[test]
    fn stage_names_cover_taxonomy() {
        assert_eq!(MediaError::probe("a", "x").stage(), "probe");
        assert_eq!(MediaError::conform("a", "x").stage(), "conform");
        assert_eq!(MediaError::mux("a", "b", "x").stage(), "mux");
        assert_eq!(MediaError::overlay("a", "x").stage(), "overlay");
    }
}
