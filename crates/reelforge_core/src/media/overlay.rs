//! Overlay rendering: burn timed text captions onto video frames.

use std::fs;
use std::path::Path;

use crate::models::{SegmentKind, TextSegment};

use super::error::{MediaAsset, MediaError, MediaResult};
use super::ffmpeg::Toolchain;

/// Escape caption text for the drawtext filter.
///
/// Backslashes must be escaped before the other classes so the escapes
/// inserted for quotes, colons and brackets survive intact.
pub fn escape_drawtext(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('\'', "'\\''")
        .replace(':', "\\:")
        .replace('[', "\\[")
        .replace(']', "\\]")
}

/// Vertical position expression for a segment kind.
///
/// Subtitles anchor near the bottom; hooks and emphasis text sit at
/// vertical center.
fn y_expr(kind: SegmentKind) -> &'static str {
    match kind {
        SegmentKind::Subtitle => "h-th-100",
        SegmentKind::Hook | SegmentKind::Emphasis => "(h-th)/2",
    }
}

/// Build one drawtext filter for a segment.
///
/// The segment is visible only during `[start, end)` via the `between`
/// enable expression; horizontal centering uses the rendered text width.
pub fn drawtext_filter(segment: &TextSegment) -> String {
    format!(
        "drawtext=text='{}':fontsize={}:fontcolor=white:borderw=3:bordercolor=black:\
         x=(w-tw)/2:y={}:enable='between(t,{},{})'",
        escape_drawtext(&segment.text),
        segment.kind.font_size(),
        y_expr(segment.kind),
        segment.start_second,
        segment.end_second,
    )
}

/// Build the full filter chain for a segment list.
///
/// Returns `None` for an empty list (the stage is then a plain copy).
/// Segments are applied independently, in list order.
pub fn overlay_filter(segments: &[TextSegment]) -> Option<String> {
    if segments.is_empty() {
        return None;
    }
    Some(
        segments
            .iter()
            .map(drawtext_filter)
            .collect::<Vec<_>>()
            .join(","),
    )
}

/// Burn the given segments onto `input`, writing `output`.
///
/// An empty segment list copies the file unchanged. The audio stream is
/// passed through untouched.
pub fn render_overlays(
    tools: &Toolchain,
    input: &Path,
    segments: &[TextSegment],
    preset: &str,
    output: &Path,
) -> MediaResult<MediaAsset> {
    if !input.exists() {
        return Err(MediaError::overlay(input, "input video not found"));
    }

    let Some(filter) = overlay_filter(segments) else {
        fs::copy(input, output)
            .map_err(|e| MediaError::overlay(input, format!("copy failed: {}", e)))?;
        return Ok(MediaAsset::new(output));
    };

    let args = vec![
        "-i".to_string(),
        input.display().to_string(),
        "-vf".to_string(),
        filter,
        "-c:a".to_string(),
        "copy".to_string(),
        "-preset".to_string(),
        preset.to_string(),
        output.display().to_string(),
    ];

    tools
        .run_ffmpeg(&args)
        .map_err(|detail| MediaError::overlay(input, detail))?;

    Ok(MediaAsset::new(output))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(kind: SegmentKind, start: f64, end: f64, text: &str) -> TextSegment {
        TextSegment::new(kind, start, end, text)
    }

    #[test]
    fn escaping_neutralizes_filter_metacharacters() {
        let escaped = escape_drawtext(r"it's [a]: test\");
        assert_eq!(escaped, r"it'\''s \[a\]\: test\\");
    }

    #[test]
    fn escaping_backslash_first_keeps_inserted_escapes() {
        // A lone backslash followed by a colon must become \\ then \: and
        // not have the colon escape swallowed.
        assert_eq!(escape_drawtext(r"\:"), r"\\\:");
    }

    #[test]
    fn hook_is_centered_and_largest() {
        let filter = drawtext_filter(&segment(SegmentKind::Hook, 0.0, 3.0, "Stop scrolling"));
        assert!(filter.contains("fontsize=72"));
        assert!(filter.contains("y=(h-th)/2"));
        assert!(filter.contains("enable='between(t,0,3)'"));
    }

    #[test]
    fn subtitle_anchors_to_lower_third() {
        let filter = drawtext_filter(&segment(
            SegmentKind::Subtitle,
            6.0,
            10.0,
            "This is the secret",
        ));
        assert!(filter.contains("fontsize=42"));
        assert!(filter.contains("y=h-th-100"));
    }

    #[test]
    fn segments_chain_in_list_order() {
        let filter = overlay_filter(&[
            segment(SegmentKind::Hook, 0.0, 3.0, "first"),
            segment(SegmentKind::Emphasis, 8.0, 12.0, "second"),
        ])
        .unwrap();
        let first = filter.find("first").unwrap();
        let second = filter.find("second").unwrap();
        assert!(first < second);
        assert_eq!(filter.matches("drawtext=").count(), 2);
    }

    #[test]
    fn hostile_text_stays_inside_its_own_filter() {
        // Quotes and brackets in one caption must not leak into the next
        // drawtext definition in the chain.
        let filter = overlay_filter(&[
            segment(SegmentKind::Hook, 0.0, 3.0, "don't [stop]"),
            segment(SegmentKind::Subtitle, 3.0, 6.0, "plain"),
        ])
        .unwrap();
        assert!(filter.contains(r"don'\''t \[stop\]"));
        assert_eq!(filter.matches("drawtext=").count(), 2);
    }

    #[test]
    fn empty_list_yields_no_filter() {
        assert!(overlay_filter(&[]).is_none());
    }

    #[test]
    fn empty_segments_copy_input_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.mp4");
        let output = dir.path().join("out.mp4");
        fs::write(&input, b"fake video bytes").unwrap();

        let tools = Toolchain::new();
        let asset = render_overlays(&tools, &input, &[], "fast", &output).unwrap();

        assert_eq!(asset.path(), output.as_path());
        assert_eq!(fs::read(&output).unwrap(), b"fake video bytes");
        // Source is caller-owned and must survive.
        assert!(input.exists());
    }
}
