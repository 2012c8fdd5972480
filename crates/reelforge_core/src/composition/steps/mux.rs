//! Mux step - joins the conformed video with the mixed audio.

use crate::composition::errors::{StepError, StepResult};
use crate::composition::step::CompositionStep;
use crate::composition::types::{Context, JobState, MuxOutput};
use crate::media;

/// Joins the conformed video stream and the mixed audio stream.
///
/// The result is truncated to the shorter stream; the conformer has
/// already matched the durations, so this only absorbs rounding drift.
pub struct MuxStep;

impl MuxStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MuxStep {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositionStep for MuxStep {
    fn name(&self) -> &str {
        "Mux"
    }

    fn description(&self) -> &str {
        "Join video and audio into one container"
    }

    fn validate_input(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        let video = state
            .conformed_path()
            .ok_or_else(|| StepError::invalid_input("conformed video not available"))?;
        if !video.exists() {
            return Err(StepError::invalid_input(format!(
                "conformed video missing on storage: {}",
                video.display()
            )));
        }

        let audio = state
            .mixed_audio_path()
            .ok_or_else(|| StepError::invalid_input("mixed audio not available"))?;
        if !audio.exists() {
            return Err(StepError::invalid_input(format!(
                "mixed audio missing on storage: {}",
                audio.display()
            )));
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<()> {
        let video = state
            .conformed_path()
            .ok_or_else(|| StepError::invalid_input("conformed video not available"))?
            .to_path_buf();
        let audio = state
            .mixed_audio_path()
            .ok_or_else(|| StepError::invalid_input("mixed audio not available"))?
            .to_path_buf();

        let muxed = ctx.scratch_path("combined").with_extension("mp4");
        ctx.logger.info(&format!(
            "Muxing '{}' + '{}'",
            video.display(),
            audio.display()
        ));

        media::mux(
            &ctx.tools,
            &video,
            &audio,
            &ctx.settings.video_preset,
            &ctx.settings.audio_bitrate,
            &muxed,
        )?;
        state.register_scratch(&muxed);

        state.muxed = Some(MuxOutput { path: muxed });
        Ok(())
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        let muxed = state
            .muxed
            .as_ref()
            .ok_or_else(|| StepError::invalid_output("mux result not recorded"))?;

        if !muxed.path.exists() {
            return Err(StepError::invalid_output(format!(
                "muxed file not created: {}",
                muxed.path.display()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::test_support::test_context;

    #[test]
    fn mux_requires_both_upstream_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path(), "mux-in");
        let state = JobState::new("mux-in");

        let err = MuxStep::new().validate_input(&ctx, &state).unwrap_err();
        assert!(err.to_string().contains("conformed video not available"));
    }
}
