//! Muxing: join one video stream and one audio stream into a container.

use std::path::Path;

use super::error::{MediaAsset, MediaError, MediaResult};
use super::ffmpeg::Toolchain;

/// Build the mux argument list.
///
/// Stream selection is explicit (`0:v:0` + `1:a:0`) so a stray audio track
/// in the video input can never win the default-mapping contest.
/// `-shortest` truncates to the shorter stream; the conformer has already
/// matched the video to the audio, so this only absorbs rounding drift.
pub fn mux_args(
    video: &Path,
    audio: &Path,
    preset: &str,
    audio_bitrate: &str,
    output: &Path,
) -> Vec<String> {
    vec![
        "-i".to_string(),
        video.display().to_string(),
        "-i".to_string(),
        audio.display().to_string(),
        "-map".to_string(),
        "0:v:0".to_string(),
        "-map".to_string(),
        "1:a:0".to_string(),
        "-c:v".to_string(),
        "libx264".to_string(),
        "-c:a".to_string(),
        "aac".to_string(),
        "-b:a".to_string(),
        audio_bitrate.to_string(),
        "-shortest".to_string(),
        "-preset".to_string(),
        preset.to_string(),
        output.display().to_string(),
    ]
}

/// Combine a video stream and an audio stream into a single file.
pub fn mux(
    tools: &Toolchain,
    video: &Path,
    audio: &Path,
    preset: &str,
    audio_bitrate: &str,
    output: &Path,
) -> MediaResult<MediaAsset> {
    if !video.exists() {
        return Err(MediaError::mux(video, audio, "video stream not found"));
    }
    if !audio.exists() {
        return Err(MediaError::mux(video, audio, "audio stream not found"));
    }

    let args = mux_args(video, audio, preset, audio_bitrate, output);
    tools
        .run_ffmpeg(&args)
        .map_err(|detail| MediaError::mux(video, audio, detail))?;

    Ok(MediaAsset::new(output))
}
