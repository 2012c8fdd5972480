//! Media probing: duration discovery via ffprobe.

use std::path::Path;
use std::process::Command;

use super::error::{MediaError, MediaResult};
use super::ffmpeg::{stderr_tail, Toolchain};

/// Get the duration of a media file in seconds.
///
/// No side effects; repeated probes of the same immutable file yield the
/// same value within floating-point tolerance.
pub fn duration_secs(tools: &Toolchain, path: &Path) -> MediaResult<f64> {
    if !path.exists() {
        return Err(MediaError::probe(path, "file not found"));
    }

    let output = Command::new(tools.ffprobe_cmd())
        .arg("-v")
        .arg("error")
        .arg("-show_entries")
        .arg("format=duration")
        .arg("-of")
        .arg("default=noprint_wrappers=1:nokey=1")
        .arg(path)
        .output()
        .map_err(|e| {
            MediaError::probe(path, format!("failed to run {}: {}", tools.ffprobe_cmd(), e))
        })?;

    if !output.status.success() {
        return Err(MediaError::probe(
            path,
            format!(
                "{} exited with code {}: {}",
                tools.ffprobe_cmd(),
                output.status.code().unwrap_or(-1),
                stderr_tail(&output.stderr, 20)
            ),
        ));
    }

    let duration_str = String::from_utf8_lossy(&output.stdout);
    let trimmed = duration_str.trim();
    if trimmed.is_empty() || trimmed == "N/A" {
        return Err(MediaError::probe(path, "no discoverable duration"));
    }

    trimmed
        .parse::<f64>()
        .map_err(|e| MediaError::probe(path, format!("failed to parse duration '{}': {}", trimmed, e)))
}
