//! Silent-track generation for the music-unavailable path.

use std::path::Path;

use super::error::{MediaAsset, MediaError, MediaResult};
use super::ffmpeg::{format_secs, Toolchain};

/// Generate a stereo silent track of the given duration.
///
/// Used when no background music is available so the mix stage still runs
/// with two inputs and the pipeline stage count stays uniform.
pub fn generate_silence(
    tools: &Toolchain,
    duration_secs: f64,
    output: &Path,
) -> MediaResult<MediaAsset> {
    if !duration_secs.is_finite() || duration_secs <= 0.0 {
        return Err(MediaError::mix(
            output,
            output,
            format!("silence duration {} is not positive", duration_secs),
        ));
    }

    let args = vec![
        "-f".to_string(),
        "lavfi".to_string(),
        "-t".to_string(),
        format_secs(duration_secs),
        "-i".to_string(),
        "anullsrc=r=44100:cl=stereo".to_string(),
        output.display().to_string(),
    ];

    tools
        .run_ffmpeg(&args)
        .map_err(|detail| MediaError::mix(output, output, detail))?;

    Ok(MediaAsset::new(output))
}
