//! Composition pipeline step implementations.

mod conform_video;
mod mix_audio;
mod mux;
mod overlays;
mod probe_duration;

pub use conform_video::ConformVideoStep;
pub use mix_audio::MixAudioStep;
pub use mux::MuxStep;
pub use overlays::RenderOverlaysStep;
pub use probe_duration::ProbeDurationStep;
