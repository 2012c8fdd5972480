//! Media toolchain wrappers.
//!
//! Thin, single-purpose operations over ffmpeg/ffprobe: probing, mixing,
//! conforming, muxing, overlay rendering, and silence generation. Each
//! invocation is an awaited out-of-process call; the composition pipeline
//! sequences them.

mod conformer;
mod error;
mod ffmpeg;
mod mixer;
mod muxer;
mod overlay;
mod probe;
mod silence;

pub use conformer::{conform, conform_args, ConformPlan};
pub use error::{MediaAsset, MediaError, MediaResult};
pub use ffmpeg::Toolchain;
pub use mixer::{mix, mix_filter};
pub use muxer::{mux, mux_args};
pub use overlay::{drawtext_filter, escape_drawtext, overlay_filter, render_overlays};
pub use probe::duration_secs;
pub use silence::generate_silence;
