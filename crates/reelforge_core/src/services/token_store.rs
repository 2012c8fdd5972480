//! File-backed OAuth token storage.
//!
//! The publishing client reads and writes tokens through this store only;
//! nothing in the core touches process-wide mutable state for credentials.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Refresh the access token this long before it actually expires.
const EXPIRY_BUFFER_SECS: i64 = 5 * 60;

/// Tokens as persisted on storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredTokens {
    pub access_token: String,
    pub refresh_token: String,
    /// Lifetime reported by the token endpoint, seconds.
    pub expires_in: i64,
    /// Absolute expiry, unix seconds.
    pub expires_at: i64,
}

/// Load/current/persist access to the token file.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist a fresh token pair, stamping the absolute expiry.
    pub fn persist(
        &self,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires_in: i64,
    ) -> std::io::Result<StoredTokens> {
        let tokens = StoredTokens {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            expires_in,
            expires_at: chrono::Utc::now().timestamp() + expires_in,
        };

        let json = serde_json::to_string_pretty(&tokens)?;
        std::fs::write(&self.path, json)?;
        tracing::info!("Tokens saved to {}", self.path.display());
        Ok(tokens)
    }

    /// Load whatever is on storage, if anything parseable.
    pub fn load(&self) -> Option<StoredTokens> {
        if !self.path.exists() {
            return None;
        }
        let data = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&data) {
            Ok(tokens) => Some(tokens),
            Err(e) => {
                tracing::warn!("Token file {} unreadable: {}", self.path.display(), e);
                None
            }
        }
    }

    /// Access token, only if it is still valid past the expiry buffer.
    pub fn current_access_token(&self) -> Option<String> {
        let tokens = self.load()?;
        if chrono::Utc::now().timestamp() >= tokens.expires_at - EXPIRY_BUFFER_SECS {
            tracing::warn!("Access token is expired or about to expire");
            return None;
        }
        Some(tokens.access_token)
    }

    /// Refresh token, regardless of access-token expiry.
    pub fn refresh_token(&self) -> Option<String> {
        self.load().map(|t| t.refresh_token)
    }

    /// Whether a usable access token is available right now.
    pub fn has_valid_tokens(&self) -> bool {
        self.current_access_token().is_some()
    }
}
