//! End-to-end generation job orchestration.

mod runner;

pub use runner::{preview, ConnectionStatus, GenerationError, VideoGenerator};
