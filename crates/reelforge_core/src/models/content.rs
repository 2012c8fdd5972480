//! Content data structures (topics, generated scripts, text segments).

use serde::{Deserialize, Serialize};

use super::enums::{Niche, SegmentKind};

/// A topic from the rotating database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Topic {
    /// Content niche this topic belongs to.
    pub niche: Niche,
    /// Content angle (what the video is about).
    pub angle: &'static str,
    /// Opening hook line for the script.
    pub hook_format: &'static str,
    /// Intended audience description.
    pub target_audience: &'static str,
}

/// Voice parameters for speech synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceParams {
    pub language_code: String,
    pub name: String,
    pub ssml_gender: String,
    pub speaking_rate: f64,
    pub pitch: f64,
    pub audio_encoding: String,
}

impl Default for VoiceParams {
    fn default() -> Self {
        Self {
            language_code: "en-US".to_string(),
            name: "en-US-Neural2-D".to_string(),
            ssml_gender: "MALE".to_string(),
            speaking_rate: 1.08,
            pitch: 0.5,
            audio_encoding: "MP3".to_string(),
        }
    }
}

/// One on-screen text cue.
///
/// Visible during `[start_second, end_second)` of the output timeline.
/// Invariant: `start_second < end_second`. Segments may overlap in time
/// and are rendered independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSegment {
    #[serde(rename = "type")]
    pub kind: SegmentKind,
    pub start_second: f64,
    pub end_second: f64,
    pub text: String,
    pub style_hint: String,
}

impl TextSegment {
    /// Create a segment with an empty style hint.
    pub fn new(
        kind: SegmentKind,
        start_second: f64,
        end_second: f64,
        text: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            start_second,
            end_second,
            text: text.into(),
            style_hint: String::new(),
        }
    }

    /// Set the free-form style hint.
    pub fn with_style_hint(mut self, hint: impl Into<String>) -> Self {
        self.style_hint = hint.into();
        self
    }

    /// Check the `start < end` invariant.
    pub fn is_valid(&self) -> bool {
        self.start_second < self.end_second
    }
}

/// B-roll suggestion attached to generated content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrollSuggestion {
    pub time_hint: String,
    pub description: String,
    pub source_hint: String,
}

/// Complete generated content for one video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoContent {
    /// Script to feed to speech synthesis.
    pub script: String,
    /// Voice parameters for the synthesizer.
    pub voice: VoiceParams,
    /// Estimated voiceover duration in seconds (~3 words/second).
    pub estimated_duration_secs: u32,
    /// Timed on-screen text cues.
    pub text_segments: Vec<TextSegment>,
    /// Post caption (without hashtags).
    pub caption: String,
    /// Hashtags to append to the caption.
    pub hashtags: Vec<String>,
    /// B-roll suggestions for manual enrichment.
    pub broll_suggestions: Vec<BrollSuggestion>,
}

impl VideoContent {
    /// Caption plus hashtags, as published.
    pub fn full_caption(&self) -> String {
        if self.hashtags.is_empty() {
            return self.caption.clone();
        }
        format!("{}\n\n{}", self.caption, self.hashtags.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_invariant_checks_window() {
        let good = TextSegment::new(SegmentKind::Hook, 0.0, 3.0, "Stop scrolling");
        assert!(good.is_valid());

        let bad = TextSegment::new(SegmentKind::Subtitle, 5.0, 5.0, "zero width");
        assert!(!bad.is_valid());
    }

    #[test]
    fn segment_serializes_kind_as_type() {
        let seg = TextSegment::new(SegmentKind::Emphasis, 8.0, 12.0, "Game changer");
        let json = serde_json::to_string(&seg).unwrap();
        assert!(json.contains("\"type\":\"emphasis\""));
    }

    #[test]
    fn full_caption_joins_hashtags() {
        let content = VideoContent {
            script: String::new(),
            voice: VoiceParams::default(),
            estimated_duration_secs: 0,
            text_segments: vec![],
            caption: "This changed everything".to_string(),
            hashtags: vec!["#fyp".to_string(), "#viral".to_string()],
            broll_suggestions: vec![],
        };
        assert_eq!(
            content.full_caption(),
            "This changed everything\n\n#fyp #viral"
        );
    }
}
