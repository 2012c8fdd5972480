//! ConformVideo step - loops or trims the stock clip to the target duration.

use crate::composition::errors::{StepError, StepResult};
use crate::composition::step::CompositionStep;
use crate::composition::types::{ConformOutput, Context, JobState};
use crate::media;

/// Conforms the stock clip to the mixed audio's duration.
pub struct ConformVideoStep;

impl ConformVideoStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConformVideoStep {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositionStep for ConformVideoStep {
    fn name(&self) -> &str {
        "ConformVideo"
    }

    fn description(&self) -> &str {
        "Loop/trim the stock clip to the target duration"
    }

    fn validate_input(&self, ctx: &Context, state: &JobState) -> StepResult<()> {
        if !ctx.request.stock_video_path.exists() {
            return Err(StepError::invalid_input(format!(
                "stock video not found: {}",
                ctx.request.stock_video_path.display()
            )));
        }
        if state.target_duration_secs.is_none() {
            return Err(StepError::invalid_input("target duration not available"));
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<()> {
        let target = state
            .target_duration_secs
            .ok_or_else(|| StepError::invalid_input("target duration not available"))?;

        let source = &ctx.request.stock_video_path;
        let source_secs = media::duration_secs(&ctx.tools, source)?;

        let conformed = ctx.scratch_path("conformed-video").with_extension("mp4");
        ctx.logger.info(&format!(
            "Conforming '{}' ({:.3}s) to {:.3}s",
            source.display(),
            source_secs,
            target
        ));

        media::conform(
            &ctx.tools,
            source,
            target,
            &ctx.settings.video_preset,
            &conformed,
        )?;
        state.register_scratch(&conformed);

        state.conformed = Some(ConformOutput {
            path: conformed,
            source_duration_secs: source_secs,
        });
        Ok(())
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        let conformed = state
            .conformed
            .as_ref()
            .ok_or_else(|| StepError::invalid_output("conformed video not recorded"))?;

        if !conformed.path.exists() {
            return Err(StepError::invalid_output(format!(
                "conformed video not created: {}",
                conformed.path.display()
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
    fn missing_stock_video_fails_input_validation() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path(), "conform-nostock");
        let state = JobState::new("conform-nostock");

        let err = ConformVideoStep::new()
            .validate_input(&ctx, &state)
            .unwrap_err();
        assert!(err.to_string().contains("stock video not found"));
    }

    #[test]
    fn missing_target_duration_fails_input_validation() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path(), "conform-notarget");
        std::fs::write(&ctx.request.stock_video_path, b"video").unwrap();

        let state = JobState::new("conform-notarget");
        let err = ConformVideoStep::new()
            .validate_input(&ctx, &state)
            .unwrap_err();
        assert!(err.to_string().contains("target duration"));
    }
}
