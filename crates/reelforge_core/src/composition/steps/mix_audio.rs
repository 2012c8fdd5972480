//! MixAudio step - blends the voice track with the music bed.

use crate::composition::errors::{StepError, StepResult};
use crate::composition::step::CompositionStep;
use crate::composition::types::{Context, JobState, MixOutput};
use crate::media;

/// Mixes the voiceover with attenuated background music.
///
/// When no music is available, a silent bed of the voice's duration is
/// generated and mixed in its place, so every run goes through the same
/// stage sequence.
pub struct MixAudioStep;

impl MixAudioStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MixAudioStep {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositionStep for MixAudioStep {
    fn name(&self) -> &str {
        "MixAudio"
    }

    fn description(&self) -> &str {
        "Mix voiceover with background music"
    }

    fn validate_input(&self, ctx: &Context, _state: &JobState) -> StepResult<()> {
        if !ctx.request.voice_path.exists() {
            return Err(StepError::invalid_input(format!(
                "voice track not found: {}",
                ctx.request.voice_path.display()
            )));
        }
        if let Some(music) = &ctx.request.music_path {
            if !music.exists() {
                return Err(StepError::invalid_input(format!(
                    "music track not found: {}",
                    music.display()
                )));
            }
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<()> {
        let voice = &ctx.request.voice_path;

        let (music, silence_substituted) = match &ctx.request.music_path {
            Some(path) => (path.clone(), false),
            None => {
                ctx.logger
                    .warn("No music track available; substituting silence");
                let voice_secs = media::duration_secs(&ctx.tools, voice)?;
                let silence = ctx.scratch_path("silence").with_extension("mp3");
                media::generate_silence(&ctx.tools, voice_secs, &silence)?;
                state.register_scratch(&silence);
                (silence, true)
            }
        };

        let mixed = ctx.scratch_path("mixed-audio").with_extension("mp3");
        ctx.logger.info(&format!(
            "Mixing '{}' + '{}' at volume {}",
            voice.display(),
            music.display(),
            ctx.request.music_volume
        ));

        media::mix(&ctx.tools, voice, &music, ctx.request.music_volume, &mixed)?;
        state.register_scratch(&mixed);

        state.mixed_audio = Some(MixOutput {
            path: mixed,
            silence_substituted,
        });
        Ok(())
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        let mixed = state
            .mixed_audio
            .as_ref()
            .ok_or_else(|| StepError::invalid_output("mixed audio not recorded"))?;

        if !mixed.path.exists() {
            return Err(StepError::invalid_output(format!(
                "mixed audio not created: {}",
                mixed.path.display()
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
    fn step_has_correct_name() {
        assert_eq!(MixAudioStep::new().name(), "MixAudio");
    }

    #[test]
    fn missing_voice_track_fails_input_validation() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path(), "mix-novoice");
        let state = JobState::new("mix-novoice");

        let err = MixAudioStep::new().validate_input(&ctx, &state).unwrap_err();
        assert!(err.to_string().contains("voice track not found"));
    }

    #[test]
    fn provided_but_missing_music_fails_input_validation() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = test_context(dir.path(), "mix-nomusic");
        std::fs::write(&ctx.request.voice_path, b"audio").unwrap();
        ctx.request.music_path = Some(dir.path().join("gone.mp3"));

        let state = JobState::new("mix-nomusic");
        let err = MixAudioStep::new().validate_input(&ctx, &state).unwrap_err();
        assert!(err.to_string().contains("music track not found"));
    }

    #[test]
    fn output_validation_requires_recorded_mix() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path(), "mix-out");
        let state = JobState::new("mix-out");

        let err = MixAudioStep::new().validate_output(&ctx, &state).unwrap_err();
        assert!(err.to_string().contains("not recorded"));
    }
}
