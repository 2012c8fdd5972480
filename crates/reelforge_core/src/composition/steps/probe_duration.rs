//! ProbeDuration step - measures the mixed audio track.

use crate::composition::errors::{StepError, StepResult};
use crate::composition::step::CompositionStep;
use crate::composition::types::{Context, JobState};
use crate::media;

/// Probes the mixed audio to fix the target duration for the video.
pub struct ProbeDurationStep;

impl ProbeDurationStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ProbeDurationStep {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositionStep for ProbeDurationStep {
    fn name(&self) -> &str {
        "ProbeDuration"
    }

    fn description(&self) -> &str {
        "Measure the mixed audio duration"
    }

    fn validate_input(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        let mixed = state
            .mixed_audio_path()
            .ok_or_else(|| StepError::invalid_input("mixed audio not available"))?;
        if !mixed.exists() {
            return Err(StepError::invalid_input(format!(
                "mixed audio missing on storage: {}",
                mixed.display()
            )));
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<()> {
        let mixed = state
            .mixed_audio_path()
            .ok_or_else(|| StepError::invalid_input("mixed audio not available"))?;

        let secs = media::duration_secs(&ctx.tools, mixed)?;
        ctx.logger
            .info(&format!("Mixed audio duration: {:.3}s", secs));

        state.target_duration_secs = Some(secs);
        Ok(())
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        match state.target_duration_secs {
            Some(secs) if secs > 0.0 => Ok(()),
            Some(secs) => Err(StepError::invalid_output(format!(
                "probed duration {} is not positive",
                secs
            ))),
            None => Err(StepError::invalid_output("target duration not recorded")),
        }
    }
}
