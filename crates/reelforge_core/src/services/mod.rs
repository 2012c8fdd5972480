//! Cloud collaborators: speech synthesis, stock footage, publishing.
//!
//! The generation runner only sees the traits here, so each collaborator
//! can be swapped for a mock in tests. The concrete clients are thin
//! wrappers over the vendors' HTTP APIs.

mod publisher;
mod speech;
mod stock;
mod token_store;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::{Niche, PrivacyLevel, VoiceParams};

pub use publisher::TikTokClient;
pub use speech::GoogleTtsClient;
pub use stock::{PexelsClient, StockVideo, StockVideoFile};
pub use token_store::{StoredTokens, TokenStore};

/// Errors from service collaborators.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote API answered with an error.
    #[error("{service} API error: {message}")]
    Api { service: String, message: String },

    /// Authentication/credential problem.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Response payload could not be decoded.
    #[error("Failed to decode {what}: {message}")]
    Decode { what: String, message: String },

    /// Local file I/O failure.
    #[error("I/O error in {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

impl ServiceError {
    pub fn api(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            service: service.into(),
            message: message.into(),
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    pub fn decode(what: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            what: what.into(),
            message: message.into(),
        }
    }

    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Turns a script into a voice track on storage.
#[allow(async_fn_in_trait)]
pub trait SpeechSynthesizer {
    /// Synthesize `text` with the given voice and write the audio to
    /// `output`.
    async fn synthesize(&self, text: &str, voice: &VoiceParams, output: &Path)
        -> ServiceResult<()>;

    /// Check that the service is reachable and configured.
    async fn test_connection(&self) -> bool;
}

/// Supplies a downloaded vertical stock clip for a niche.
#[allow(async_fn_in_trait)]
pub trait FootageProvider {
    /// Search, pick and download one portrait clip; returns its path.
    async fn fetch_clip(&self, niche: Niche, seed: u64, output_dir: &Path)
        -> ServiceResult<PathBuf>;

    /// Check that the service is reachable and configured.
    async fn test_connection(&self) -> bool;
}

/// Publishes a finished video to the platform.
#[allow(async_fn_in_trait)]
pub trait VideoPublisher {
    /// Upload and publish; returns the platform post id.
    async fn publish(
        &self,
        video_path: &Path,
        caption: &str,
        privacy: PrivacyLevel,
    ) -> ServiceResult<String>;

    /// Check that the service is reachable and authenticated.
    async fn test_connection(&self) -> bool;
}
