//! Video conforming: loop or trim a clip to a target duration.

use std::path::Path;

use super::error::{MediaAsset, MediaError, MediaResult};
use super::ffmpeg::{format_secs, Toolchain};
use super::probe;

/// How a source clip is reconciled against the target duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConformPlan {
    /// Source is long enough: trim from the start to the target.
    Trim,
    /// Source is too short: repeat it `repetitions` times (total plays),
    /// then trim to the target.
    Loop { repetitions: u32 },
}

impl ConformPlan {
    /// Decide trim-vs-loop for the given durations.
    ///
    /// Rejects non-positive source durations explicitly; they would
    /// otherwise produce an unbounded loop count.
    pub fn for_durations(source_secs: f64, target_secs: f64) -> Result<Self, String> {
        if !source_secs.is_finite() || source_secs <= 0.0 {
            return Err(format!(
                "source duration {} is zero or negative; cannot conform",
                source_secs
            ));
        }
        if !target_secs.is_finite() || target_secs <= 0.0 {
            return Err(format!("target duration {} is not positive", target_secs));
        }

        if source_secs >= target_secs {
            Ok(ConformPlan::Trim)
        } else {
            let repetitions = (target_secs / source_secs).ceil() as u32;
            Ok(ConformPlan::Loop { repetitions })
        }
    }
}

/// Build the ffmpeg argument list for a plan.
///
/// Looping uses `-stream_loop`, which takes the number of *additional*
/// plays, so `repetitions` total plays means `repetitions - 1` extra loops.
/// Re-encoding is required for frame-accurate cuts.
pub fn conform_args(
    plan: ConformPlan,
    source: &Path,
    target_secs: f64,
    preset: &str,
    output: &Path,
) -> Vec<String> {
    let mut args = Vec::new();

    if let ConformPlan::Loop { repetitions } = plan {
        args.push("-stream_loop".to_string());
        args.push((repetitions.saturating_sub(1)).to_string());
    }

    args.extend([
        "-i".to_string(),
        source.display().to_string(),
        "-t".to_string(),
        format_secs(target_secs),
        "-c:v".to_string(),
        "libx264".to_string(),
        "-preset".to_string(),
        preset.to_string(),
        "-an".to_string(),
        output.display().to_string(),
    ]);

    args
}

/// Conform a video clip to exactly `target_secs`.
///
/// Trims from the start when the source is long enough; loops the minimum
/// number of repetitions (`ceil(target / source)`) and trims otherwise.
pub fn conform(
    tools: &Toolchain,
    source: &Path,
    target_secs: f64,
    preset: &str,
    output: &Path,
) -> MediaResult<MediaAsset> {
    let source_secs = probe::duration_secs(tools, source)
        .map_err(|e| MediaError::conform(source, e.to_string()))?;

    let plan = ConformPlan::for_durations(source_secs, target_secs)
        .map_err(|detail| MediaError::conform(source, detail))?;

    if let ConformPlan::Loop { repetitions } = plan {
        tracing::debug!(
            "Looping {} {}x ({}s -> {}s)",
            source.display(),
            repetitions,
            source_secs,
            target_secs
        );
    }

    let args = conform_args(plan, source, target_secs, preset, output);
    tools
        .run_ffmpeg(&args)
        .map_err(|detail| MediaError::conform(source, detail))?;

    Ok(MediaAsset::new(output))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_source_is_trimmed() {
        assert_eq!(
            ConformPlan::for_durations(30.0, 10.0).unwrap(),
            ConformPlan::Trim
        );
    }

    #[test]
    fn exact_fit_is_trimmed() {
        assert_eq!(
            ConformPlan::for_durations(10.0, 10.0).unwrap(),
            ConformPlan::Trim
        );
    }

    #[test]
    fn short_source_loops_ceil_times() {
        // 4s source, 10s target: ceil(10/4) = 3 total plays, never fewer.
        assert_eq!(
            ConformPlan::for_durations(4.0, 10.0).unwrap(),
            ConformPlan::Loop { repetitions: 3 }
        );
        assert_eq!(
            ConformPlan::for_durations(5.0, 12.0).unwrap(),
            ConformPlan::Loop { repetitions: 3 }
        );
    }

    #[test]
    fn zero_or_negative_source_is_rejected() {
        assert!(ConformPlan::for_durations(0.0, 10.0).is_err());
        assert!(ConformPlan::for_durations(-2.0, 10.0).is_err());
        assert!(ConformPlan::for_durations(f64::NAN, 10.0).is_err());
    }

    #[test]
    fn trim_args_have_no_loop_and_take_from_start() {
        let args = conform_args(
            ConformPlan::Trim,
            Path::new("/tmp/clip.mp4"),
            10.0,
            "fast",
            Path::new("/tmp/out.mp4"),
        );
        assert!(!args.contains(&"-stream_loop".to_string()));
        assert!(!args.contains(&"-ss".to_string()));
        let t_pos = args.iter().position(|a| a == "-t").unwrap();
        assert_eq!(args[t_pos + 1], "10.000");
    }

    #[test]
    fn loop_args_request_extra_plays() {
        let args = conform_args(
            ConformPlan::Loop { repetitions: 3 },
            Path::new("/tmp/clip.mp4"),
            10.0,
            "fast",
            Path::new("/tmp/out.mp4"),
        );
        let loop_pos = args.iter().position(|a| a == "-stream_loop").unwrap();
        assert_eq!(args[loop_pos + 1], "2");
        assert!(args.contains(&"-t".to_string()));
        assert!(args.contains(&"libx264".to_string()));
    }
}
