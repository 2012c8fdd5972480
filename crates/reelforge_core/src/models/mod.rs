//! Data models for ReelForge.
//!
//! This module contains the core data structures used throughout the
//! application:
//! - Enums for niches, segment kinds, moods, job status
//! - Content structures (topics, scripts, text segments)
//! - Job structures (composition requests, generation results)

mod content;
mod enums;
mod jobs;

// Re-export all public types
pub use content::{BrollSuggestion, TextSegment, Topic, VideoContent, VoiceParams};
pub use enums::{GenerationStatus, Mood, Niche, PrivacyLevel, SegmentKind, UnknownNiche};
pub use jobs::{
    CompositionRequest, CompositionResult, GenerationResult, DEFAULT_MUSIC_VOLUME,
};
