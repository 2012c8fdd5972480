//! Manifest-backed background music library.
//!
//! Tracks are declared in a TOML manifest loaded at startup; nothing is
//! discovered by scanning directories or pattern-matching filenames.
//! An empty library is not an error: the composition pipeline substitutes
//! silence when no track is available.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::models::{Mood, Niche};

/// Errors from loading the music manifest.
#[derive(Error, Debug)]
pub enum MusicLibraryError {
    #[error("Failed to read music manifest '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse music manifest '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// One background music track.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MusicTrack {
    pub id: String,
    pub name: String,
    /// Audio file, relative to the manifest's directory.
    pub file: PathBuf,
    pub mood: Mood,
    /// Track length in seconds, as declared.
    #[serde(default)]
    pub duration_secs: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default, rename = "track")]
    tracks: Vec<MusicTrack>,
}

/// The loaded music library.
#[derive(Debug, Clone)]
pub struct MusicLibrary {
    tracks: Vec<MusicTrack>,
}

impl MusicLibrary {
    /// Load the library from a TOML manifest.
    ///
    /// File paths are resolved relative to the manifest's directory.
    /// Tracks whose files are missing on storage are skipped with a
    /// warning rather than failing the whole library.
    pub fn load(manifest_path: &Path) -> Result<Self, MusicLibraryError> {
        let content =
            std::fs::read_to_string(manifest_path).map_err(|source| MusicLibraryError::Read {
                path: manifest_path.to_path_buf(),
                source,
            })?;

        let manifest: Manifest =
            toml::from_str(&content).map_err(|source| MusicLibraryError::Parse {
                path: manifest_path.to_path_buf(),
                source,
            })?;

        let base = manifest_path.parent().unwrap_or(Path::new("."));
        let mut tracks = Vec::new();
        for mut track in manifest.tracks {
            if track.file.is_relative() {
                track.file = base.join(&track.file);
            }
            if !track.file.exists() {
                tracing::warn!(
                    "Music track '{}' file missing, skipping: {}",
                    track.id,
                    track.file.display()
                );
                continue;
            }
            tracks.push(track);
        }

        tracing::info!("Music library loaded: {} tracks available", tracks.len());
        Ok(Self { tracks })
    }

    /// Build an empty library (no music available anywhere).
    pub fn empty() -> Self {
        Self { tracks: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Moods that fit a niche, in preference order.
    pub fn moods_for_niche(niche: Niche) -> &'static [Mood] {
        match niche {
            Niche::AiTools => &[Mood::Energetic, Mood::Hype],
            Niche::OnlineBusiness => &[Mood::Inspirational, Mood::Energetic],
            Niche::FacelessStories => &[Mood::Inspirational, Mood::Relaxed],
        }
    }

    /// Tracks tagged with the given mood.
    pub fn tracks_with_mood(&self, mood: Mood) -> Vec<&MusicTrack> {
        self.tracks.iter().filter(|t| t.mood == mood).collect()
    }

    /// Deterministically pick a track that fits the niche.
    ///
    /// Tries each preferred mood in order, then falls back to any track.
    /// Returns `None` only when the library holds nothing at all - the
    /// caller then takes the silence-substitution path.
    pub fn select_for_niche(&self, niche: Niche, seed: u64) -> Option<&MusicTrack> {
        for mood in Self::moods_for_niche(niche) {
            let candidates = self.tracks_with_mood(*mood);
            if !candidates.is_empty() {
                return Some(candidates[seed as usize % candidates.len()]);
            }
        }

        if self.tracks.is_empty() {
            return None;
        }
        Some(&self.tracks[seed as usize % self.tracks.len()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_library(dir: &Path, manifest: &str, files: &[&str]) -> PathBuf {
        for file in files {
            fs::write(dir.join(file), b"audio").unwrap();
        }
        let path = dir.join("manifest.toml");
        fs::write(&path, manifest).unwrap();
        path
    }

    const MANIFEST: &str = r#"
        [[track]]
        id = "upbeat-tech-1"
        name = "Digital Dreams"
        file = "digital-dreams.mp3"
        mood = "energetic"
        duration_secs = 120

        [[track]]
        id = "motivational-1"
        name = "Rise Up"
        file = "rise-up.mp3"
        mood = "inspirational"
        duration_secs = 150

        [[track]]
        id = "trap-1"
        name = "Street Beats"
        file = "street-beats.mp3"
        mood = "hype"
    "#;

    #[test]
    fn manifest_loads_and_resolves_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_library(
            dir.path(),
            MANIFEST,
            &["digital-dreams.mp3", "rise-up.mp3", "street-beats.mp3"],
        );

        let library = MusicLibrary::load(&path).unwrap();
        assert_eq!(library.len(), 3);

        let track = library.select_for_niche(Niche::AiTools, 0).unwrap();
        assert!(track.file.starts_with(dir.path()));
    }

    #[test]
    fn missing_files_are_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        // Only two of the three declared files exist.
        let path = write_library(dir.path(), MANIFEST, &["digital-dreams.mp3", "rise-up.mp3"]);

        let library = MusicLibrary::load(&path).unwrap();
        assert_eq!(library.len(), 2);
    }

    #[test]
    fn selection_prefers_niche_moods() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_library(
            dir.path(),
            MANIFEST,
            &["digital-dreams.mp3", "rise-up.mp3", "street-beats.mp3"],
        );
        let library = MusicLibrary::load(&path).unwrap();

        // ai_tools prefers energetic first.
        let track = library.select_for_niche(Niche::AiTools, 0).unwrap();
        assert_eq!(track.mood, Mood::Energetic);

        // faceless_stories prefers inspirational.
        let track = library.select_for_niche(Niche::FacelessStories, 0).unwrap();
        assert_eq!(track.mood, Mood::Inspirational);
    }

    #[test]
    fn selection_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_library(
            dir.path(),
            MANIFEST,
            &["digital-dreams.mp3", "rise-up.mp3", "street-beats.mp3"],
        );
        let library = MusicLibrary::load(&path).unwrap();

        let a = library.select_for_niche(Niche::OnlineBusiness, 9).unwrap();
        let b = library.select_for_niche(Niche::OnlineBusiness, 9).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_library_yields_none() {
        let library = MusicLibrary::empty();
        assert!(library.select_for_niche(Niche::AiTools, 0).is_none());
    }

    #[test]
    fn bad_manifest_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.toml");
        fs::write(&path, "this is not [valid").unwrap();

        assert!(matches!(
            MusicLibrary::load(&path),
            Err(MusicLibraryError::Parse { .. })
        ));
    }
}
