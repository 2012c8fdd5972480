//! Audio mixing: voice + attenuated music into one track.

use std::path::Path;

use super::error::{MediaAsset, MediaError, MediaResult};
use super::ffmpeg::Toolchain;

/// Build the amix filter graph.
///
/// The secondary input is scaled by `volume` before summation.
/// `duration=first` pins the output length to the primary track: a longer
/// secondary is truncated, a shorter one is padded with silence, and the
/// primary is never clipped.
pub fn mix_filter(volume: f64) -> String {
    format!(
        "[1:a]volume={}[bgm];[0:a][bgm]amix=inputs=2:duration=first:dropout_transition=2[aout]",
        volume
    )
}

/// Mix `primary` (voice) with `secondary` (music) at the given attenuation.
///
/// Output duration equals the primary's duration exactly. Any transcoding
/// failure propagates as `MixFailure`; there is no silent fallback to a
/// voice-only output.
pub fn mix(
    tools: &Toolchain,
    primary: &Path,
    secondary: &Path,
    volume: f64,
    output: &Path,
) -> MediaResult<MediaAsset> {
    if !primary.exists() {
        return Err(MediaError::mix(primary, secondary, "primary track not found"));
    }
    if !secondary.exists() {
        return Err(MediaError::mix(primary, secondary, "secondary track not found"));
    }

    let args = vec![
        "-i".to_string(),
        primary.display().to_string(),
        "-i".to_string(),
        secondary.display().to_string(),
        "-filter_complex".to_string(),
        mix_filter(volume),
        "-map".to_string(),
        "[aout]".to_string(),
        output.display().to_string(),
    ];

    tools
        .run_ffmpeg(&args)
        .map_err(|detail| MediaError::mix(primary, secondary, detail))?;

    Ok(MediaAsset::new(output))
}
