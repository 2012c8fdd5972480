//! Full generation job orchestration.
//!
//! Runs the async sequence topic → content → speech → footage → music →
//! composition → publish. Collaborators are trait parameters so the
//! runner can be exercised with mocks.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::composition::{CompositionPipeline, Context, PipelineError};
use crate::config::Settings;
use crate::content::{generate_video_content, topic_for_day};
use crate::library::MusicLibrary;
use crate::logging::{JobLogger, LogConfig};
use crate::models::{
    CompositionRequest, CompositionResult, GenerationResult, Topic, VideoContent,
};
use crate::services::{FootageProvider, ServiceError, SpeechSynthesizer, VideoPublisher};

/// Errors from a generation job.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("I/O error in {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Composition task failed: {0}")]
    Join(String),
}

impl GenerationError {
    fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }
}

/// Connection health of all configured collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionStatus {
    pub speech: bool,
    pub footage: bool,
    /// None when no publisher is configured.
    pub publisher: Option<bool>,
}

/// Generate content for a day without producing any media.
pub fn preview(day_of_year: u32) -> (&'static Topic, VideoContent) {
    let topic = topic_for_day(day_of_year);
    let content = generate_video_content(topic, day_of_year as u64);
    (topic, content)
}

/// Orchestrates one video job end to end.
pub struct VideoGenerator<S, F, P> {
    speech: S,
    footage: F,
    publisher: Option<P>,
    music: MusicLibrary,
    settings: Settings,
}

impl<S, F, P> VideoGenerator<S, F, P>
where
    S: SpeechSynthesizer,
    F: FootageProvider,
    P: VideoPublisher,
{
    pub fn new(
        speech: S,
        footage: F,
        publisher: Option<P>,
        music: MusicLibrary,
        settings: Settings,
    ) -> Self {
        Self {
            speech,
            footage,
            publisher,
            music,
            settings,
        }
    }

    /// Run a complete job for the given rotation day.
    ///
    /// Never panics or propagates; any failure is folded into a `Failed`
    /// result so schedulers can log and move on.
    pub async fn generate_and_post(&self, day_of_year: u32, publish: bool) -> GenerationResult {
        tracing::info!("Starting video generation pipeline (day {})", day_of_year);

        match self.run_job(day_of_year, publish).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("Video generation failed: {}", e);
                GenerationResult::failed(e.to_string())
            }
        }
    }

    async fn run_job(
        &self,
        day_of_year: u32,
        publish: bool,
    ) -> Result<GenerationResult, GenerationError> {
        let topic = topic_for_day(day_of_year);
        tracing::info!(
            "Topic selected: niche={} angle='{}'",
            topic.niche,
            topic.angle
        );

        let seed = day_of_year as u64;
        let content = generate_video_content(topic, seed);
        tracing::info!(
            "Content generated: {} words, {} segments, {} hashtags",
            content.script.split_whitespace().count(),
            content.text_segments.len(),
            content.hashtags.len()
        );

        let job_id = new_job_id();
        let paths = &self.settings.paths;
        std::fs::create_dir_all(&paths.output_dir)
            .map_err(|e| GenerationError::io("creating output directory", e))?;

        // Voice track
        let audio_path = PathBuf::from(&paths.output_dir).join(format!("audio-{}.mp3", job_id));
        self.speech
            .synthesize(&content.script, &content.voice, &audio_path)
            .await?;
        tracing::info!("Voice track ready: {}", audio_path.display());

        // Stock footage
        let stock_path = self
            .footage
            .fetch_clip(topic.niche, seed, Path::new(&paths.stock_cache_dir))
            .await?;

        // Background music (explicit none -> silent bed downstream)
        let music_path = match self.music.select_for_niche(topic.niche, seed) {
            Some(track) => {
                tracing::info!("Selected music track '{}' ({})", track.name, track.mood);
                Some(track.file.clone())
            }
            None => {
                tracing::warn!("No music available; composition will use a silent bed");
                None
            }
        };

        // Composition (blocking toolchain work off the async runtime)
        let output_path = PathBuf::from(&paths.output_dir).join(format!("video-{}.mp4", job_id));
        let request = CompositionRequest::new(
            audio_path.clone(),
            music_path,
            stock_path,
            content.text_segments.clone(),
            output_path.clone(),
        )
        .with_music_volume(self.settings.composition.music_volume);

        let composed = self.compose(request, &job_id).await?;
        tracing::info!("Video composed: {}", composed.output_path.display());

        // Publish
        if publish && self.settings.publish.enabled {
            if let Some(publisher) = &self.publisher {
                let post_id = publisher
                    .publish(
                        &composed.output_path,
                        &content.full_caption(),
                        self.settings.publish.privacy_level,
                    )
                    .await?;
                tracing::info!("Published: {}", post_id);
                return Ok(GenerationResult::published(
                    composed.output_path,
                    audio_path,
                    post_id,
                ));
            }
            tracing::warn!("Publishing requested but no publisher configured");
        }

        Ok(GenerationResult::composed(composed.output_path, audio_path))
    }

    async fn compose(
        &self,
        request: CompositionRequest,
        job_id: &str,
    ) -> Result<CompositionResult, GenerationError> {
        let comp_settings = self.settings.composition.clone();
        let scratch_dir = PathBuf::from(&self.settings.paths.scratch_dir).join(job_id);
        let logs_dir = PathBuf::from(&self.settings.paths.logs_dir);
        let job_id = job_id.to_string();

        let result = tokio::task::spawn_blocking(move || {
            let logger = JobLogger::new(&job_id, &logs_dir, LogConfig::default())
                .map_err(|e| GenerationError::io("creating job logger", e))?;

            let pipeline = CompositionPipeline::standard();
            let ctx = Context::new(
                request,
                comp_settings,
                &job_id,
                scratch_dir,
                Arc::new(logger),
            );
            Ok(pipeline.run(&ctx)?)
        })
        .await
        .map_err(|e| GenerationError::Join(e.to_string()))?;

        result
    }

    /// Test all configured collaborators.
    pub async fn test_connections(&self) -> ConnectionStatus {
        tracing::info!("Testing service connections");

        let speech = self.speech.test_connection().await;
        let footage = self.footage.test_connection().await;
        let publisher = match &self.publisher {
            Some(p) => Some(p.test_connection().await),
            None => None,
        };

        let status = ConnectionStatus {
            speech,
            footage,
            publisher,
        };
        tracing::info!("Connection test results: {:?}", status);
        status
    }
}

/// Unique job id: local timestamp plus a random suffix, collision-free
/// under concurrent runs.
fn new_job_id() -> String {
    let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}", timestamp, &suffix[..8])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Niche, PrivacyLevel, VoiceParams};
    use crate::services::ServiceResult;

    struct MockSpeech {
        ok: bool,
    }

    impl SpeechSynthesizer for MockSpeech {
        async fn synthesize(
            &self,
            _text: &str,
            _voice: &VoiceParams,
            output: &Path,
        ) -> ServiceResult<()> {
            if !self.ok {
                return Err(ServiceError::api("mock-tts", "synth unavailable"));
            }
            std::fs::write(output, b"audio").map_err(|e| ServiceError::io("mock write", e))
        }

        async fn test_connection(&self) -> bool {
            self.ok
        }
    }

    struct MockFootage;

    impl FootageProvider for MockFootage {
        async fn fetch_clip(
            &self,
            _niche: Niche,
            _seed: u64,
            output_dir: &Path,
        ) -> ServiceResult<PathBuf> {
            std::fs::create_dir_all(output_dir).map_err(|e| ServiceError::io("mock mkdir", e))?;
            let path = output_dir.join("stock.mp4");
            std::fs::write(&path, b"video").map_err(|e| ServiceError::io("mock write", e))?;
            Ok(path)
        }

        async fn test_connection(&self) -> bool {
            true
        }
    }

    struct MockPublisher;

    impl VideoPublisher for MockPublisher {
        async fn publish(
            &self,
            _video_path: &Path,
            _caption: &str,
            _privacy: PrivacyLevel,
        ) -> ServiceResult<String> {
            Ok("post-123".to_string())
        }

        async fn test_connection(&self) -> bool {
            true
        }
    }

    fn test_settings(dir: &Path) -> Settings {
        let mut settings = Settings::default();
        settings.paths.output_dir = dir.join("out").display().to_string();
        settings.paths.scratch_dir = dir.join("scratch").display().to_string();
        settings.paths.logs_dir = dir.join("logs").display().to_string();
        settings.paths.stock_cache_dir = dir.join("stock").display().to_string();
        settings
    }

    #[test]
    fn preview_is_deterministic() {
        let (topic_a, content_a) = preview(42);
        let (topic_b, content_b) = preview(42);
        assert_eq!(topic_a, topic_b);
        assert_eq!(content_a, content_b);
    }

    #[test]
    fn job_ids_do_not_collide() {
        assert_ne!(new_job_id(), new_job_id());
    }

    #[tokio::test]
    async fn speech_failure_folds_into_failed_result() {
        let dir = tempfile::tempdir().unwrap();
        let generator = VideoGenerator::<_, _, MockPublisher>::new(
            MockSpeech { ok: false },
            MockFootage,
            None,
            MusicLibrary::empty(),
            test_settings(dir.path()),
        );

        let result = generator.generate_and_post(5, false).await;
        assert!(!result.is_success());
        assert!(result.error.unwrap().contains("synth unavailable"));
        assert!(result.video_path.is_none());
    }

    #[tokio::test]
    async fn connection_status_reflects_collaborators() {
        let dir = tempfile::tempdir().unwrap();

        let generator = VideoGenerator::new(
            MockSpeech { ok: false },
            MockFootage,
            Some(MockPublisher),
            MusicLibrary::empty(),
            test_settings(dir.path()),
        );
        let status = generator.test_connections().await;
        assert!(!status.speech);
        assert!(status.footage);
        assert_eq!(status.publisher, Some(true));

        let generator = VideoGenerator::<_, _, MockPublisher>::new(
            MockSpeech { ok: true },
            MockFootage,
            None,
            MusicLibrary::empty(),
            test_settings(dir.path()),
        );
        assert_eq!(generator.test_connections().await.publisher, None);
    }
}
