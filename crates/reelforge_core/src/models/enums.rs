//! Core enums used throughout the application.

use serde::{Deserialize, Serialize};

/// Content niche the generator can produce videos for.
///
/// This is a closed set: requests for a niche outside it are rejected
/// explicitly instead of silently falling back to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Niche {
    AiTools,
    OnlineBusiness,
    FacelessStories,
}

impl Niche {
    /// Get all niches.
    pub fn all() -> &'static [Niche] {
        &[Self::AiTools, Self::OnlineBusiness, Self::FacelessStories]
    }

    /// The string key used in configs and manifests.
    pub fn key(&self) -> &'static str {
        match self {
            Niche::AiTools => "ai_tools",
            Niche::OnlineBusiness => "online_business",
            Niche::FacelessStories => "faceless_stories",
        }
    }
}

impl std::fmt::Display for Niche {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Error for niche strings outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown niche: '{0}'")]
pub struct UnknownNiche(pub String);

impl std::str::FromStr for Niche {
    type Err = UnknownNiche;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ai_tools" => Ok(Niche::AiTools),
            "online_business" => Ok(Niche::OnlineBusiness),
            "faceless_stories" => Ok(Niche::FacelessStories),
            other => Err(UnknownNiche(other.to_string())),
        }
    }
}

/// Kind of an on-screen text segment.
///
/// The kind implies the default font size and the vertical anchor used
/// by the overlay renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Opening attention-grab, largest text, vertically centered.
    Hook,
    /// Lower-third caption, smallest text.
    Subtitle,
    /// Mid-video callout, vertically centered.
    Emphasis,
}

impl SegmentKind {
    /// Default font size in points. Ordered hook > emphasis > subtitle.
    pub fn font_size(&self) -> u32 {
        match self {
            SegmentKind::Hook => 72,
            SegmentKind::Emphasis => 56,
            SegmentKind::Subtitle => 42,
        }
    }
}

impl std::fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SegmentKind::Hook => write!(f, "hook"),
            SegmentKind::Subtitle => write!(f, "subtitle"),
            SegmentKind::Emphasis => write!(f, "emphasis"),
        }
    }
}

/// Mood tag for background music tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Energetic,
    Inspirational,
    Relaxed,
    Hype,
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mood::Energetic => write!(f, "energetic"),
            Mood::Inspirational => write!(f, "inspirational"),
            Mood::Relaxed => write!(f, "relaxed"),
            Mood::Hype => write!(f, "hype"),
        }
    }
}

/// Privacy level for published posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrivacyLevel {
    #[default]
    Public,
    MutualFollowFriends,
    SelfOnly,
}

impl PrivacyLevel {
    /// The wire value sent to the publishing API.
    pub fn as_api_str(&self) -> &'static str {
        match self {
            PrivacyLevel::Public => "PUBLIC",
            PrivacyLevel::MutualFollowFriends => "MUTUAL_FOLLOW_FRIENDS",
            PrivacyLevel::SelfOnly => "SELF_ONLY",
        }
    }
}

/// Final status of a generation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationStatus {
    /// Video composed and published.
    Published,
    /// Video composed but not published (publishing disabled or skipped).
    Composed,
    /// Content generated only (no media produced).
    ContentOnly,
    /// Job failed with error.
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn niche_parses_known_keys() {
        assert_eq!(Niche::from_str("ai_tools"), Ok(Niche::AiTools));
        assert_eq!(
            Niche::from_str("faceless_stories"),
            Ok(Niche::FacelessStories)
        );
    }

    #[test]
    fn niche_rejects_unknown_keys() {
        let err = Niche::from_str("crypto_bros").unwrap_err();
        assert_eq!(err, UnknownNiche("crypto_bros".to_string()));
    }

    #[test]
    fn niche_serializes_snake_case() {
        let json = serde_json::to_string(&Niche::OnlineBusiness).unwrap();
        assert_eq!(json, "\"online_business\"");
    }

    #[test]
    fn font_sizes_are_strictly_ordered() {
        assert!(SegmentKind::Hook.font_size() > SegmentKind::Emphasis.font_size());
        assert!(SegmentKind::Emphasis.font_size() > SegmentKind::Subtitle.font_size());
    }

    #[test]
    fn privacy_level_api_strings() {
        assert_eq!(PrivacyLevel::Public.as_api_str(), "PUBLIC");
        assert_eq!(PrivacyLevel::SelfOnly.as_api_str(), "SELF_ONLY");
    }
}
