//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Secrets (API keys, OAuth client credentials) are not stored here; they
//! come from the environment at startup.

use serde::{Deserialize, Serialize};

use crate::models::PrivacyLevel;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Path-related settings.
    #[serde(default)]
    pub paths: PathSettings,

    /// Composition / toolchain settings.
    #[serde(default)]
    pub composition: CompositionSettings,

    /// Speech synthesis settings.
    #[serde(default)]
    pub speech: SpeechSettings,

    /// Stock footage settings.
    #[serde(default)]
    pub stock: StockSettings,

    /// Publishing settings.
    #[serde(default)]
    pub publish: PublishSettings,

    /// Scheduler settings.
    #[serde(default)]
    pub schedule: ScheduleSettings,
}

/// Path configuration for output, scratch, and logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Output folder for finished videos.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Root folder for pipeline scratch files.
    #[serde(default = "default_scratch_dir")]
    pub scratch_dir: String,

    /// Folder for per-job log files.
    #[serde(default = "default_logs_dir")]
    pub logs_dir: String,

    /// Folder where downloaded stock clips are kept.
    #[serde(default = "default_stock_cache_dir")]
    pub stock_cache_dir: String,

    /// Music library manifest (TOML).
    #[serde(default = "default_music_manifest")]
    pub music_manifest: String,
}

fn default_output_dir() -> String {
    "output".to_string()
}

fn default_scratch_dir() -> String {
    "output/tmp".to_string()
}

fn default_logs_dir() -> String {
    ".logs".to_string()
}

fn default_stock_cache_dir() -> String {
    "output/stock-videos".to_string()
}

fn default_music_manifest() -> String {
    "music/manifest.toml".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            scratch_dir: default_scratch_dir(),
            logs_dir: default_logs_dir(),
            stock_cache_dir: default_stock_cache_dir(),
            music_manifest: default_music_manifest(),
        }
    }
}

/// Composition pipeline and toolchain configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositionSettings {
    /// Music attenuation in [0, 1].
    #[serde(default = "default_music_volume")]
    pub music_volume: f64,

    /// x264 encoder preset for re-encoding stages.
    #[serde(default = "default_video_preset")]
    pub video_preset: String,

    /// AAC bitrate for the mux stage.
    #[serde(default = "default_audio_bitrate")]
    pub audio_bitrate: String,

    /// Custom ffmpeg path (empty = find in PATH).
    #[serde(default)]
    pub ffmpeg_path: String,

    /// Custom ffprobe path (empty = find in PATH).
    #[serde(default)]
    pub ffprobe_path: String,
}

fn default_music_volume() -> f64 {
    crate::models::DEFAULT_MUSIC_VOLUME
}

fn default_video_preset() -> String {
    "fast".to_string()
}

fn default_audio_bitrate() -> String {
    "192k".to_string()
}

impl Default for CompositionSettings {
    fn default() -> Self {
        Self {
            music_volume: default_music_volume(),
            video_preset: default_video_preset(),
            audio_bitrate: default_audio_bitrate(),
            ffmpeg_path: String::new(),
            ffprobe_path: String::new(),
        }
    }
}

impl CompositionSettings {
    /// Build a toolchain handle from the configured paths.
    pub fn toolchain(&self) -> crate::media::Toolchain {
        let mut tools = crate::media::Toolchain::new();
        if !self.ffmpeg_path.is_empty() {
            tools = tools.with_ffmpeg_path(&self.ffmpeg_path);
        }
        if !self.ffprobe_path.is_empty() {
            tools = tools.with_ffprobe_path(&self.ffprobe_path);
        }
        tools
    }
}

/// Speech synthesis configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechSettings {
    #[serde(default = "default_language_code")]
    pub language_code: String,

    #[serde(default = "default_voice_name")]
    pub voice_name: String,

    #[serde(default = "default_speaking_rate")]
    pub speaking_rate: f64,

    #[serde(default = "default_pitch")]
    pub pitch: f64,
}

fn default_language_code() -> String {
    "en-US".to_string()
}

fn default_voice_name() -> String {
    "en-US-Neural2-D".to_string()
}

fn default_speaking_rate() -> f64 {
    1.08
}

fn default_pitch() -> f64 {
    0.5
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            language_code: default_language_code(),
            voice_name: default_voice_name(),
            speaking_rate: default_speaking_rate(),
            pitch: default_pitch(),
        }
    }
}

/// Stock footage search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockSettings {
    /// Results requested per search.
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Candidate pool size for the deterministic pick.
    #[serde(default = "default_candidate_pool")]
    pub candidate_pool: usize,
}

fn default_per_page() -> u32 {
    15
}

fn default_candidate_pool() -> usize {
    5
}

impl Default for StockSettings {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            candidate_pool: default_candidate_pool(),
        }
    }
}

/// Publishing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishSettings {
    /// Privacy level for published posts.
    #[serde(default)]
    pub privacy_level: PrivacyLevel,

    /// Token store file.
    #[serde(default = "default_token_file")]
    pub token_file: String,

    /// Whether publishing is enabled at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_token_file() -> String {
    "tiktok-tokens.json".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for PublishSettings {
    fn default() -> Self {
        Self {
            privacy_level: PrivacyLevel::default(),
            token_file: default_token_file(),
            enabled: true,
        }
    }
}

/// Scheduler configuration for the daemon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSettings {
    /// Local time of day to post, "HH:MM".
    #[serde(default = "default_post_time")]
    pub post_time: String,

    /// Generate a video immediately when the daemon starts.
    #[serde(default)]
    pub generate_on_startup: bool,
}

fn default_post_time() -> String {
    "09:00".to_string()
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            post_time: default_post_time(),
            generate_on_startup: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_product_contract() {
        let settings = Settings::default();
        assert!((settings.composition.music_volume - 0.15).abs() < f64::EPSILON);
        assert_eq!(settings.composition.video_preset, "fast");
        assert_eq!(settings.composition.audio_bitrate, "192k");
        assert_eq!(settings.schedule.post_time, "09:00");
    }

    #[test]
    fn empty_toml_parses_to_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings.paths.output_dir, "output");
        assert_eq!(settings.stock.per_page, 15);
        assert!(settings.publish.enabled);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [composition]
            music_volume = 0.25
            "#,
        )
        .unwrap();
        assert!((settings.composition.music_volume - 0.25).abs() < f64::EPSILON);
        assert_eq!(settings.composition.video_preset, "fast");
    }

    #[test]
    fn settings_roundtrip_through_toml() {
        let settings = Settings::default();
        let serialized = toml::to_string(&settings).unwrap();
        let parsed: Settings = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.paths.scratch_dir, settings.paths.scratch_dir);
        assert_eq!(parsed.speech.voice_name, settings.speech.voice_name);
    }
}
