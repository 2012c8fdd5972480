//! Composition pipeline for assembling finished videos.
//!
//! Given a voice track, an optional music track, a stock clip and a list
//! of text segments, the pipeline produces one finished file via a fixed
//! stage sequence:
//!
//! ```text
//! CompositionPipeline
//!     ├── Step: MixAudio        (voice + attenuated music)
//!     ├── Step: ProbeDuration   (measure the mixed track)
//!     ├── Step: ConformVideo    (loop/trim clip to that duration)
//!     ├── Step: Mux             (join video + audio)
//!     └── Step: RenderOverlays  (burn timed captions)
//! ```
//!
//! Every stage invokes the external toolchain out-of-process and awaits
//! completion. On any terminal state the runner deletes the scratch
//! intermediates it created; source assets are caller-owned and never
//! touched.
//!
//! # Example
//!
//! ```ignore
//! use reelforge_core::composition::{CompositionPipeline, Context};
//!
//! let pipeline = CompositionPipeline::standard();
//! let ctx = Context::new(request, settings, job_id, scratch_dir, logger);
//! let result = pipeline.run(&ctx)?;
//! println!("Finished: {}", result.output_path.display());
//! ```

mod errors;
mod pipeline;
mod step;
pub mod steps;
mod types;

pub use errors::{PipelineError, PipelineResult, StepError, StepResult};
pub use pipeline::{CancelHandle, CompositionPipeline};
pub use step::CompositionStep;
pub use steps::{ConformVideoStep, MixAudioStep, MuxStep, ProbeDurationStep, RenderOverlaysStep};
pub use types::{ConformOutput, Context, JobState, MixOutput, MuxOutput, OverlayOutput};

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::Path;
    use std::sync::Arc;

    use super::Context;
    use crate::config::CompositionSettings;
    use crate::logging::{JobLogger, LogConfig};
    use crate::models::CompositionRequest;

    /// Build a context rooted in a temp directory. Source paths point
    /// inside the directory but are not created; tests that need them
    /// write the files themselves.
    pub(crate) fn test_context(dir: &Path, job_id: &str) -> Context {
        let request = CompositionRequest::new(
            dir.join("voice.mp3"),
            None,
            dir.join("stock.mp4"),
            vec![],
            dir.join("final.mp4"),
        );
        let logger =
            Arc::new(JobLogger::new(job_id, dir.join("logs"), LogConfig::default()).unwrap());
        Context::new(
            request,
            CompositionSettings::default(),
            job_id,
            dir.join("scratch").join(job_id),
            logger,
        )
    }
}
