//! Toolchain invocation helpers.
//!
//! All media operations shell out to ffmpeg/ffprobe and await process
//! completion; nothing here streams or runs concurrently within a job.

use std::path::PathBuf;
use std::process::Command;

/// Paths to the external media tools.
#[derive(Debug, Clone)]
pub struct Toolchain {
    /// ffmpeg executable (None = find in PATH).
    ffmpeg_path: Option<PathBuf>,
    /// ffprobe executable (None = find in PATH).
    ffprobe_path: Option<PathBuf>,
}

impl Toolchain {
    pub fn new() -> Self {
        Self {
            ffmpeg_path: None,
            ffprobe_path: None,
        }
    }

    /// Set a custom path to the ffmpeg executable.
    pub fn with_ffmpeg_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ffmpeg_path = Some(path.into());
        self
    }

    /// Set a custom path to the ffprobe executable.
    pub fn with_ffprobe_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ffprobe_path = Some(path.into());
        self
    }

    pub fn ffmpeg_cmd(&self) -> &str {
        self.ffmpeg_path
            .as_ref()
            .and_then(|p| p.to_str())
            .unwrap_or("ffmpeg")
    }

    pub fn ffprobe_cmd(&self) -> &str {
        self.ffprobe_path
            .as_ref()
            .and_then(|p| p.to_str())
            .unwrap_or("ffprobe")
    }

    /// Run ffmpeg with the given arguments, waiting for completion.
    ///
    /// `-y` and `-v error` are prepended so runs overwrite their outputs
    /// and stderr carries only diagnostics. On failure the returned string
    /// is the tail of stderr plus the exit code.
    pub fn run_ffmpeg(&self, args: &[String]) -> Result<(), String> {
        let mut cmd = Command::new(self.ffmpeg_cmd());
        cmd.arg("-y").arg("-v").arg("error").args(args);

        tracing::debug!("Running ffmpeg: {:?}", cmd);

        let output = cmd
            .output()
            .map_err(|e| format!("Failed to spawn {}: {}", self.ffmpeg_cmd(), e))?;

        if output.status.success() {
            return Ok(());
        }

        let code = output.status.code().unwrap_or(-1);
        Err(format!(
            "{} exited with code {}: {}",
            self.ffmpeg_cmd(),
            code,
            stderr_tail(&output.stderr, 20)
        ))
    }
}

impl Default for Toolchain {
    fn default() -> Self {
        Self::new()
    }
}

/// Last `max_lines` lines of a stderr buffer, for error diagnostics.
pub(crate) fn stderr_tail(stderr: &[u8], max_lines: usize) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(max_lines);
    lines[start..].join("\n")
}

/// Format a seconds value for ffmpeg arguments (millisecond precision).
pub(crate) fn format_secs(secs: f64) -> String {
    format!("{:.3}", secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toolchain_defaults_to_path_lookup() {
        let tools = Toolchain::new();
        assert_eq!(tools.ffmpeg_cmd(), "ffmpeg");
        assert_eq!(tools.ffprobe_cmd(), "ffprobe");
    }

    #[test]
    fn toolchain_with_custom_paths() {
        let tools = Toolchain::new()
            .with_ffmpeg_path("/opt/ffmpeg/bin/ffmpeg")
            .with_ffprobe_path("/opt/ffmpeg/bin/ffprobe");
        assert_eq!(tools.ffmpeg_cmd(), "/opt/ffmpeg/bin/ffmpeg");
        assert_eq!(tools.ffprobe_cmd(), "/opt/ffmpeg/bin/ffprobe");
    }

    #[test]
    fn stderr_tail_keeps_last_lines() {
        let stderr = b"line1\nline2\nline3\nline4";
        assert_eq!(stderr_tail(stderr, 2), "line3\nline4");
        assert_eq!(stderr_tail(stderr, 10), "line1\nline2\nline3\nline4");
    }

    #[test]
    fn format_secs_is_millisecond_precise() {
        assert_eq!(format_secs(12.0), "12.000");
        assert_eq!(format_secs(0.1234), "0.123");
    }
}
