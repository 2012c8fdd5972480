//! Pipeline runner that executes the composition stages in sequence.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::errors::{PipelineError, PipelineResult};
use super::step::CompositionStep;
use super::steps::{ConformVideoStep, MixAudioStep, MuxStep, ProbeDurationStep, RenderOverlaysStep};
use super::types::{Context, JobState};
use crate::models::CompositionResult;

/// Pipeline that runs the composition stages in a fixed sequence.
///
/// Stages run strictly one after another; each stage's artifact is on
/// storage before the next starts. A failure at any stage aborts the run,
/// but cleanup of already-created intermediates still happens. Cleanup
/// failures are logged and never mask the original error.
pub struct CompositionPipeline {
    /// Steps to execute in order.
    steps: Vec<Box<dyn CompositionStep>>,
    /// Cancellation flag, checked at step boundaries.
    cancelled: Arc<AtomicBool>,
}

impl CompositionPipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create the standard pipeline with all stages in the correct order:
    ///
    /// 1. MixAudio - voice + attenuated music (silence substituted if none)
    /// 2. ProbeDuration - measure the mixed track
    /// 3. ConformVideo - loop/trim the stock clip to that duration
    /// 4. Mux - join conformed video with mixed audio
    /// 5. RenderOverlays - burn timed captions
    pub fn standard() -> Self {
        Self::new()
            .with_step(MixAudioStep::new())
            .with_step(ProbeDurationStep::new())
            .with_step(ConformVideoStep::new())
            .with_step(MuxStep::new())
            .with_step(RenderOverlaysStep::new())
    }

    /// Add a step (builder pattern).
    pub fn with_step<S: CompositionStep + 'static>(mut self, step: S) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Get a cancellation handle.
    ///
    /// Call `cancel()` on the returned handle to stop the pipeline at the
    /// next step boundary. A toolchain call already in flight is treated
    /// as atomic and is not interrupted.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            flag: Arc::clone(&self.cancelled),
        }
    }

    /// Check if pipeline has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Get step names in order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Run the pipeline for the context's request.
    ///
    /// On success the final intermediate is moved to the caller's
    /// destination and a `CompositionResult` is returned. On any failure
    /// the run yields the failing stage's error; in both cases every
    /// registered scratch file is deleted before returning.
    pub fn run(&self, ctx: &Context) -> PipelineResult<CompositionResult> {
        let mut state = JobState::new(&ctx.job_id);

        self.validate_request(ctx)?;

        fs::create_dir_all(&ctx.scratch_dir)
            .map_err(|e| PipelineError::setup_failed(&ctx.job_id, e.to_string()))?;

        let result = self
            .run_steps(ctx, &mut state)
            .and_then(|_| self.deliver(ctx, &state));

        // Terminal state: scratch files go away whether we succeeded or not.
        self.cleanup(ctx, &state);

        match &result {
            Ok(r) => ctx
                .logger
                .success(&format!("Composition complete: {}", r.output_path.display())),
            Err(e) => ctx.logger.error(&format!("Composition failed: {}", e)),
        }

        result
    }

    /// Pre-flight checks on the request itself.
    fn validate_request(&self, ctx: &Context) -> PipelineResult<()> {
        let volume = ctx.request.music_volume;
        if !(0.0..=1.0).contains(&volume) {
            return Err(PipelineError::validation_failed(
                &ctx.job_id,
                format!("music volume {} outside [0, 1]", volume),
            ));
        }

        for (i, segment) in ctx.request.text_segments.iter().enumerate() {
            if !segment.is_valid() {
                return Err(PipelineError::validation_failed(
                    &ctx.job_id,
                    format!(
                        "text segment {} has start {} >= end {}",
                        i, segment.start_second, segment.end_second
                    ),
                ));
            }
        }

        Ok(())
    }

    fn run_steps(&self, ctx: &Context, state: &mut JobState) -> PipelineResult<()> {
        for step in &self.steps {
            if self.is_cancelled() {
                ctx.logger
                    .warn(&format!("Pipeline cancelled before step '{}'", step.name()));
                return Err(PipelineError::cancelled(&ctx.job_id));
            }

            let step_name = step.name();
            ctx.logger.phase(step_name);

            ctx.logger
                .debug(&format!("Validating input for '{}'", step_name));
            if let Err(e) = step.validate_input(ctx, state) {
                ctx.logger.error(&format!("Input validation failed: {}", e));
                return Err(PipelineError::step_failed(&ctx.job_id, step_name, e));
            }

            ctx.logger.debug(&format!("Executing '{}'", step_name));
            if let Err(e) = step.execute(ctx, state) {
                ctx.logger.error(&format!("Execution failed: {}", e));
                return Err(PipelineError::step_failed(&ctx.job_id, step_name, e));
            }

            ctx.logger
                .debug(&format!("Validating output for '{}'", step_name));
            if let Err(e) = step.validate_output(ctx, state) {
                ctx.logger
                    .error(&format!("Output validation failed: {}", e));
                return Err(PipelineError::step_failed(&ctx.job_id, step_name, e));
            }

            ctx.logger.success(&format!("{} completed", step_name));
        }

        Ok(())
    }

    /// Move the final intermediate to the caller-specified destination.
    fn deliver(&self, ctx: &Context, state: &JobState) -> PipelineResult<CompositionResult> {
        let rendered = state.rendered_path().ok_or_else(|| {
            PipelineError::delivery_failed(&ctx.job_id, "no rendered output recorded")
        })?;

        let destination = &ctx.request.output_path;
        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| PipelineError::delivery_failed(&ctx.job_id, e.to_string()))?;
            }
        }

        move_file(rendered, destination)
            .map_err(|e| PipelineError::delivery_failed(&ctx.job_id, e.to_string()))?;

        Ok(CompositionResult {
            output_path: destination.clone(),
        })
    }

    /// Delete every registered scratch file, best-effort.
    ///
    /// Failures are logged, never re-raised; they must not mask whatever
    /// brought the pipeline to its terminal state.
    fn cleanup(&self, ctx: &Context, state: &JobState) {
        for file in &state.scratch_files {
            if !file.exists() {
                continue;
            }
            if let Err(e) = fs::remove_file(file) {
                ctx.logger
                    .warn(&format!("Failed to clean up '{}': {}", file.display(), e));
            }
        }

        // Remove the job's scratch directory if nothing is left in it.
        let _ = fs::remove_dir(&ctx.scratch_dir);
    }
}

impl Default for CompositionPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

/// Rename with copy+remove fallback for cross-device destinations.
fn move_file(from: &Path, to: &Path) -> std::io::Result<()> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }
    fs::copy(from, to)?;
    fs::remove_file(from)
}

/// Handle for cancelling a running pipeline.
#[derive(Clone)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    /// Cancel the pipeline at the next step boundary.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Check if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::errors::{StepError, StepResult};
    use crate::composition::test_support::test_context;
    use parking_lot::Mutex;
    use std::sync::atomic::AtomicUsize;

    /// Step that drops a scratch file and records its execution order.
    struct ScratchStep {
        name: &'static str,
        order: Arc<Mutex<Vec<&'static str>>>,
        fail: bool,
        finalize: bool,
    }

    impl CompositionStep for ScratchStep {
        fn name(&self) -> &str {
            self.name
        }

        fn validate_input(&self, _ctx: &Context, _state: &JobState) -> StepResult<()> {
            Ok(())
        }

        fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<()> {
            self.order.lock().push(self.name);

            let path = ctx.scratch_path(self.name);
            fs::write(&path, b"intermediate").map_err(|e| StepError::io("writing scratch", e))?;
            state.register_scratch(&path);

            if self.fail {
                return Err(StepError::invalid_input("synthetic failure"));
            }

            if self.finalize {
                // Final intermediates stay out of the scratch registry; the
                // runner moves them to the destination.
                let final_path = ctx.scratch_dir.join(format!("final-{}.mp4", ctx.job_id));
                fs::write(&final_path, b"finished video")
                    .map_err(|e| StepError::io("writing final", e))?;
                state.rendered = Some(crate::composition::types::OverlayOutput {
                    path: final_path,
                    segments_rendered: 0,
                });
            }
            Ok(())
        }

        fn validate_output(&self, _ctx: &Context, _state: &JobState) -> StepResult<()> {
            Ok(())
        }
    }

    #[test]
    fn standard_pipeline_has_fixed_stage_order() {
        let pipeline = CompositionPipeline::standard();
        assert_eq!(
            pipeline.step_names(),
            vec![
                "MixAudio",
                "ProbeDuration",
                "ConformVideo",
                "Mux",
                "RenderOverlays"
            ]
        );
    }

    #[test]
    fn steps_run_in_sequence_and_output_is_delivered() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path(), "seq");
        let order = Arc::new(Mutex::new(Vec::new()));

        let pipeline = CompositionPipeline::new()
            .with_step(ScratchStep {
                name: "First",
                order: Arc::clone(&order),
                fail: false,
                finalize: false,
            })
            .with_step(ScratchStep {
                name: "Second",
                order: Arc::clone(&order),
                fail: false,
                finalize: true,
            });

        let result = pipeline.run(&ctx).unwrap();

        assert_eq!(*order.lock(), vec!["First", "Second"]);
        assert_eq!(result.output_path, dir.path().join("final.mp4"));
        assert!(result.output_path.exists());
    }

    #[test]
    fn failure_aborts_remaining_steps() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path(), "abort");
        let order = Arc::new(Mutex::new(Vec::new()));

        let pipeline = CompositionPipeline::new()
            .with_step(ScratchStep {
                name: "First",
                order: Arc::clone(&order),
                fail: true,
                finalize: false,
            })
            .with_step(ScratchStep {
                name: "Never",
                order: Arc::clone(&order),
                fail: false,
                finalize: true,
            });

        let err = pipeline.run(&ctx).unwrap_err();
        assert!(matches!(err, PipelineError::StepFailed { ref step_name, .. } if step_name == "First"));
        assert_eq!(*order.lock(), vec!["First"]);
    }

    #[test]
    fn scratch_files_are_gone_after_success_and_failure() {
        for fail in [false, true] {
            let dir = tempfile::tempdir().unwrap();
            let job_id = if fail { "clean-fail" } else { "clean-ok" };
            let ctx = test_context(dir.path(), job_id);
            let order = Arc::new(Mutex::new(Vec::new()));

            let pipeline = CompositionPipeline::new().with_step(ScratchStep {
                name: "Stage",
                order,
                fail,
                finalize: !fail,
            });

            let _ = pipeline.run(&ctx);

            let scratch = ctx.scratch_path("Stage");
            assert!(
                !scratch.exists(),
                "scratch file survived terminal state (fail={})",
                fail
            );
        }
    }

    #[test]
    fn cleanup_failure_does_not_mask_step_error() {
        // A scratch path that no longer exists is skipped silently; the
        // original step error must come through untouched.
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path(), "mask");

        struct VanishingStep;
        impl CompositionStep for VanishingStep {
            fn name(&self) -> &str {
                "Vanishing"
            }
            fn validate_input(&self, _ctx: &Context, _state: &JobState) -> StepResult<()> {
                Ok(())
            }
            fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<()> {
                state.register_scratch(ctx.scratch_path("already-gone"));
                Err(StepError::invalid_output("the real failure"))
            }
            fn validate_output(&self, _ctx: &Context, _state: &JobState) -> StepResult<()> {
                Ok(())
            }
        }

        let pipeline = CompositionPipeline::new().with_step(VanishingStep);
        let err = pipeline.run(&ctx).unwrap_err();
        assert!(err.to_string().contains("the real failure"));
    }

    #[test]
    fn validation_rejects_bad_volume_and_segments() {
        use crate::models::{SegmentKind, TextSegment};

        let dir = tempfile::tempdir().unwrap();
        let mut ctx = test_context(dir.path(), "validate");
        ctx.request.music_volume = 1.5;

        let pipeline = CompositionPipeline::standard();
        assert!(matches!(
            pipeline.run(&ctx),
            Err(PipelineError::ValidationFailed { .. })
        ));

        let mut ctx = test_context(dir.path(), "validate2");
        ctx.request.text_segments =
            vec![TextSegment::new(SegmentKind::Hook, 5.0, 2.0, "backwards")];
        assert!(matches!(
            pipeline.run(&ctx),
            Err(PipelineError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn cancel_stops_at_step_boundary() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path(), "cancel");

        struct CountingStep {
            count: Arc<AtomicUsize>,
        }
        impl CompositionStep for CountingStep {
            fn name(&self) -> &str {
                "Counting"
            }
            fn validate_input(&self, _ctx: &Context, _state: &JobState) -> StepResult<()> {
                Ok(())
            }
            fn execute(&self, _ctx: &Context, _state: &mut JobState) -> StepResult<()> {
                self.count.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
            fn validate_output(&self, _ctx: &Context, _state: &JobState) -> StepResult<()> {
                Ok(())
            }
        }

        let count = Arc::new(AtomicUsize::new(0));
        let pipeline = CompositionPipeline::new().with_step(CountingStep {
            count: Arc::clone(&count),
        });

        let handle = pipeline.cancel_handle();
        handle.cancel();

        let err = pipeline.run(&ctx).unwrap_err();
        assert!(matches!(err, PipelineError::Cancelled { .. }));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
