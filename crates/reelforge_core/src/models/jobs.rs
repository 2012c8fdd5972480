//! Job-related data structures (composition requests, job results).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::content::TextSegment;
use super::enums::GenerationStatus;

/// Default attenuation applied to the music track during mixing.
pub const DEFAULT_MUSIC_VOLUME: f64 = 0.15;

/// Everything the composition pipeline needs for one video.
///
/// Constructed per job and consumed once. Source assets are caller-owned;
/// the pipeline only ever deletes its own scratch intermediates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositionRequest {
    /// Voiceover audio track.
    pub voice_path: PathBuf,
    /// Background music track. `None` means no music is available and a
    /// silent bed of matching duration is substituted.
    pub music_path: Option<PathBuf>,
    /// Stock video clip (portrait orientation expected).
    pub stock_video_path: PathBuf,
    /// Timed text cues to burn in, in render order.
    pub text_segments: Vec<TextSegment>,
    /// Destination for the finished file.
    pub output_path: PathBuf,
    /// Music amplitude scalar in [0, 1].
    #[serde(default = "default_music_volume")]
    pub music_volume: f64,
}

fn default_music_volume() -> f64 {
    DEFAULT_MUSIC_VOLUME
}

impl CompositionRequest {
    pub fn new(
        voice_path: impl Into<PathBuf>,
        music_path: Option<PathBuf>,
        stock_video_path: impl Into<PathBuf>,
        text_segments: Vec<TextSegment>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            voice_path: voice_path.into(),
            music_path,
            stock_video_path: stock_video_path.into(),
            text_segments,
            output_path: output_path.into(),
            music_volume: DEFAULT_MUSIC_VOLUME,
        }
    }

    /// Override the music volume.
    pub fn with_music_volume(mut self, volume: f64) -> Self {
        self.music_volume = volume;
        self
    }
}

/// Successful outcome of a composition run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionResult {
    /// Path of the finished video file (the caller-specified destination).
    pub output_path: PathBuf,
}

/// Result of a complete generation job (content through publishing).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Final status.
    pub status: GenerationStatus,
    /// Path to the composed video (if composed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_path: Option<PathBuf>,
    /// Path to the synthesized voice track (if synthesized).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_path: Option<PathBuf>,
    /// Platform post id (if published).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
    /// Error message (if failed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// When the job finished, RFC 3339.
    pub generated_at: String,
}

impl GenerationResult {
    fn now() -> String {
        chrono::Local::now().to_rfc3339()
    }

    /// Composed and published.
    pub fn published(video_path: PathBuf, audio_path: PathBuf, post_id: String) -> Self {
        Self {
            status: GenerationStatus::Published,
            video_path: Some(video_path),
            audio_path: Some(audio_path),
            post_id: Some(post_id),
            error: None,
            generated_at: Self::now(),
        }
    }

    /// Composed without publishing.
    pub fn composed(video_path: PathBuf, audio_path: PathBuf) -> Self {
        Self {
            status: GenerationStatus::Composed,
            video_path: Some(video_path),
            audio_path: Some(audio_path),
            post_id: None,
            error: None,
            generated_at: Self::now(),
        }
    }

    /// Content generated only.
    pub fn content_only() -> Self {
        Self {
            status: GenerationStatus::ContentOnly,
            video_path: None,
            audio_path: None,
            post_id: None,
            error: None,
            generated_at: Self::now(),
        }
    }

    /// Failed with error. Carries no output paths so callers can safely
    /// skip the publish step.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            status: GenerationStatus::Failed,
            video_path: None,
            audio_path: None,
            post_id: None,
            error: Some(error.into()),
            generated_at: Self::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status != GenerationStatus::Failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::SegmentKind;

    #[test]
    fn request_defaults_music_volume() {
        let req = CompositionRequest::new(
            "/tmp/voice.mp3",
            None,
            "/tmp/stock.mp4",
            vec![TextSegment::new(SegmentKind::Hook, 0.0, 3.0, "Hey")],
            "/tmp/out.mp4",
        );
        assert!((req.music_volume - 0.15).abs() < f64::EPSILON);
    }

    #[test]
    fn failed_result_omits_paths() {
        let result = GenerationResult::failed("mix blew up");
        assert!(!result.is_success());
        assert!(result.video_path.is_none());
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("video_path"));
        assert!(json.contains("mix blew up"));
    }
}
