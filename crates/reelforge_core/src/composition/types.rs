//! Core types for the composition pipeline.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::CompositionSettings;
use crate::logging::JobLogger;
use crate::media::Toolchain;
use crate::models::CompositionRequest;

/// Read-only context passed to pipeline steps.
///
/// Contains the request and shared resources that steps can read but not
/// modify. Mutable state goes in `JobState`.
pub struct Context {
    /// The composition request being processed.
    pub request: CompositionRequest,
    /// Composition settings (volume, preset, toolchain paths).
    pub settings: CompositionSettings,
    /// Unique job identifier; scratch filenames derive from it so
    /// concurrent jobs never collide.
    pub job_id: String,
    /// Job-specific scratch directory.
    pub scratch_dir: PathBuf,
    /// External toolchain handle.
    pub tools: Toolchain,
    /// Per-job logger.
    pub logger: Arc<JobLogger>,
}

impl Context {
    pub fn new(
        request: CompositionRequest,
        settings: CompositionSettings,
        job_id: impl Into<String>,
        scratch_dir: PathBuf,
        logger: Arc<JobLogger>,
    ) -> Self {
        let tools = settings.toolchain();
        Self {
            request,
            settings,
            job_id: job_id.into(),
            scratch_dir,
            tools,
            logger,
        }
    }

    /// Path of a scratch file for this job.
    pub fn scratch_path(&self, name: &str) -> PathBuf {
        self.scratch_dir.join(format!("{}-{}", name, self.job_id))
    }
}

/// Output of the MixAudio step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MixOutput {
    /// Path to the mixed audio track.
    pub path: PathBuf,
    /// Whether a generated silent bed stood in for missing music.
    pub silence_substituted: bool,
}

/// Output of the ConformVideo step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConformOutput {
    /// Path to the conformed video.
    pub path: PathBuf,
    /// Source clip duration as probed.
    pub source_duration_secs: f64,
}

/// Output of the Mux step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MuxOutput {
    /// Path to the muxed file.
    pub path: PathBuf,
}

/// Output of the RenderOverlays step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayOutput {
    /// Path to the rendered file (the final top-level intermediate).
    pub path: PathBuf,
    /// Number of segments burned in.
    pub segments_rendered: usize,
}

/// Mutable job state that accumulates results from pipeline steps.
///
/// Steps add new data but never overwrite earlier sections. Scratch files
/// are registered here as they are created so the runner can delete them
/// on any terminal state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobState {
    /// Unique job identifier.
    pub job_id: String,
    /// When the job started.
    pub started_at: Option<String>,
    /// Mixed audio (from MixAudio).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mixed_audio: Option<MixOutput>,
    /// Target duration in seconds (from ProbeDuration).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_duration_secs: Option<f64>,
    /// Conformed video (from ConformVideo).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conformed: Option<ConformOutput>,
    /// Muxed file (from Mux).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muxed: Option<MuxOutput>,
    /// Rendered file (from RenderOverlays).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rendered: Option<OverlayOutput>,
    /// Pipeline-owned intermediates, deleted on any terminal state.
    #[serde(default)]
    pub scratch_files: Vec<PathBuf>,
}

impl JobState {
    /// Create a new job state with the given ID.
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            started_at: Some(chrono::Local::now().to_rfc3339()),
            ..Default::default()
        }
    }

    /// Register a pipeline-owned scratch file for terminal-state cleanup.
    pub fn register_scratch(&mut self, path: impl Into<PathBuf>) {
        self.scratch_files.push(path.into());
    }

    pub fn has_mixed_audio(&self) -> bool {
        self.mixed_audio.is_some()
    }

    /// Path of the mixed audio track, if mixed.
    pub fn mixed_audio_path(&self) -> Option<&Path> {
        self.mixed_audio.as_ref().map(|m| m.path.as_path())
    }

    /// Path of the conformed video, if conformed.
    pub fn conformed_path(&self) -> Option<&Path> {
        self.conformed.as_ref().map(|c| c.path.as_path())
    }

    /// Path of the muxed file, if muxed.
    pub fn muxed_path(&self) -> Option<&Path> {
        self.muxed.as_ref().map(|m| m.path.as_path())
    }

    /// Path of the rendered file, if rendered.
    pub fn rendered_path(&self) -> Option<&Path> {
        self.rendered.as_ref().map(|r| r.path.as_path())
    }
}
