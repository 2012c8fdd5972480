//! RenderOverlays step - burns timed captions onto the muxed video.

use crate::composition::errors::{StepError, StepResult};
use crate::composition::step::CompositionStep;
use crate::composition::types::{Context, JobState, OverlayOutput};
use crate::media;

/// Burns the request's text segments onto the muxed video.
///
/// With no segments the stage is a plain copy, so the pipeline shape is
/// the same either way.
pub struct RenderOverlaysStep;

impl RenderOverlaysStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RenderOverlaysStep {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositionStep for RenderOverlaysStep {
    fn name(&self) -> &str {
        "RenderOverlays"
    }

    fn description(&self) -> &str {
        "Burn timed text overlays onto the video"
    }

    fn validate_input(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        let muxed = state
            .muxed_path()
            .ok_or_else(|| StepError::invalid_input("muxed video not available"))?;
        if !muxed.exists() {
            return Err(StepError::invalid_input(format!(
                "muxed video missing on storage: {}",
                muxed.display()
            )));
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<()> {
        let muxed = state
            .muxed_path()
            .ok_or_else(|| StepError::invalid_input("muxed video not available"))?
            .to_path_buf();

        let segments = &ctx.request.text_segments;
        let rendered = ctx.scratch_path("final").with_extension("mp4");

        if segments.is_empty() {
            ctx.logger.info("No text segments; passing video through");
        } else {
            ctx.logger
                .info(&format!("Rendering {} text segments", segments.len()));
        }

        media::render_overlays(
            &ctx.tools,
            &muxed,
            segments,
            &ctx.settings.video_preset,
            &rendered,
        )?;
        // Registered so a failed delivery still gets cleaned up; after a
        // successful move the file is gone and cleanup skips it.
        state.register_scratch(&rendered);

        state.rendered = Some(OverlayOutput {
            path: rendered,
            segments_rendered: segments.len(),
        });
        Ok(())
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        let rendered = state
            .rendered
            .as_ref()
            .ok_or_else(|| StepError::invalid_output("overlay result not recorded"))?;

        if !rendered.path.exists() {
            return Err(StepError::invalid_output(format!(
                "rendered file not created: {}",
                rendered.path.display()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::test_support::test_context;
    use crate::composition::types::MuxOutput;

    #[test]
    fn passthrough_copy_with_no_segments() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path(), "overlay-copy");
        std::fs::create_dir_all(&ctx.scratch_dir).unwrap();

        let muxed = ctx.scratch_dir.join("combined.mp4");
        std::fs::write(&muxed, b"muxed bytes").unwrap();

        let mut state = JobState::new("overlay-copy");
        state.muxed = Some(MuxOutput {
            path: muxed.clone(),
        });

        let step = RenderOverlaysStep::new();
        step.validate_input(&ctx, &state).unwrap();
        step.execute(&ctx, &mut state).unwrap();
        step.validate_output(&ctx, &state).unwrap();

        let rendered = state.rendered.as_ref().unwrap();
        assert_eq!(rendered.segments_rendered, 0);
        assert_eq!(std::fs::read(&rendered.path).unwrap(), b"muxed bytes");
        // The muxed input survives; it is cleaned by the runner, not here.
        assert!(muxed.exists());
    }

    #[test]
    fn missing_muxed_video_fails_input_validation() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path(), "overlay-nomux");
        let state = JobState::new("overlay-nomux");

        let err = RenderOverlaysStep::new()
            .validate_input(&ctx, &state)
            .unwrap_err();
        assert!(err.to_string().contains("muxed video not available"));
    }
}
