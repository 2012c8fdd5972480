//! TikTok open API publishing client.
//!
//! Flow: initialize an inbox upload, PUT the file bytes, then publish.
//! Credentials come exclusively from the `TokenStore`; an expired access
//! token is refreshed and persisted transparently.

use std::path::Path;

use serde::Deserialize;
use serde_json::json;

use crate::models::PrivacyLevel;

use super::token_store::{StoredTokens, TokenStore};
use super::{ServiceError, ServiceResult, VideoPublisher};

const DEFAULT_BASE_URL: &str = "https://open.tiktokapis.com/v2";

/// TikTok API client.
pub struct TikTokClient {
    http: reqwest::Client,
    client_key: String,
    client_secret: String,
    base_url: String,
    token_store: TokenStore,
}

#[derive(Debug, Deserialize)]
struct TokenEnvelope {
    data: TokenData,
}

#[derive(Debug, Deserialize)]
struct TokenData {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
}

#[derive(Debug, Deserialize)]
struct InitEnvelope {
    data: InitData,
}

#[derive(Debug, Deserialize)]
struct InitData {
    upload_url: String,
    publish_id: String,
}

#[derive(Debug, Deserialize)]
struct PublishEnvelope {
    data: PublishData,
}

#[derive(Debug, Deserialize)]
struct PublishData {
    publish_id: String,
}

impl TikTokClient {
    pub fn new(
        client_key: impl Into<String>,
        client_secret: impl Into<String>,
        token_store: TokenStore,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_key: client_key.into(),
            client_secret: client_secret.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            token_store,
        }
    }

    /// Override the API base URL (for testing).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// A valid access token, refreshing through the store if needed.
    async fn access_token(&self) -> ServiceResult<String> {
        if let Some(token) = self.token_store.current_access_token() {
            return Ok(token);
        }

        let refresh = self.token_store.refresh_token().ok_or_else(|| {
            ServiceError::auth("no stored tokens; run the auth flow to seed the token store")
        })?;

        let tokens = self.exchange_refresh_token(&refresh).await?;
        Ok(tokens.access_token)
    }

    /// Exchange a refresh token for a fresh pair and persist it.
    pub async fn exchange_refresh_token(
        &self,
        refresh_token: &str,
    ) -> ServiceResult<StoredTokens> {
        let response = self
            .http
            .post(format!("{}/oauth/token/", self.base_url))
            .form(&[
                ("client_key", self.client_key.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::auth(format!(
                "token refresh failed with status {}: {}",
                status, body
            )));
        }

        let envelope: TokenEnvelope = response.json().await?;
        let tokens = self
            .token_store
            .persist(
                envelope.data.access_token,
                envelope.data.refresh_token,
                envelope.data.expires_in,
            )
            .map_err(|e| ServiceError::io("persisting tokens", e))?;

        tracing::info!("Access token refreshed");
        Ok(tokens)
    }

    /// Initialize an upload slot for a file of the given size.
    async fn init_upload(&self, video_size: u64) -> ServiceResult<InitData> {
        let token = self.access_token().await?;
        let response = self
            .http
            .post(format!("{}/post/publish/inbox/video/init/", self.base_url))
            .bearer_auth(&token)
            .json(&json!({
                "source_info": {
                    "source": "FILE_UPLOAD",
                    "video_size": video_size,
                }
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::api(
                "tiktok",
                format!("upload init status {}: {}", status, body),
            ));
        }

        let envelope: InitEnvelope = response.json().await?;
        Ok(envelope.data)
    }

    /// PUT the video bytes to the upload URL.
    async fn upload_file(&self, upload_url: &str, video_path: &Path) -> ServiceResult<()> {
        let bytes = tokio::fs::read(video_path)
            .await
            .map_err(|e| ServiceError::io("reading video file", e))?;

        let response = self
            .http
            .put(upload_url)
            .header("Content-Type", "video/mp4")
            .body(bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ServiceError::api(
                "tiktok",
                format!("file upload status {}", response.status()),
            ));
        }

        tracing::info!("Video file uploaded");
        Ok(())
    }

    /// Publish the uploaded video.
    async fn publish_upload(
        &self,
        publish_id: &str,
        caption: &str,
        privacy: PrivacyLevel,
    ) -> ServiceResult<String> {
        let token = self.access_token().await?;
        let response = self
            .http
            .post(format!("{}/post/publish/video/init/", self.base_url))
            .bearer_auth(&token)
            .json(&json!({
                "post_info": {
                    "title": caption,
                    "privacy_level": privacy.as_api_str(),
                    "disable_duet": false,
                    "disable_comment": false,
                    "disable_stitch": false,
                    "video_cover_timestamp_ms": 1000,
                },
                "source_info": {
                    "source": "FILE_UPLOAD",
                    "publish_id": publish_id,
                }
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::api(
                "tiktok",
                format!("publish status {}: {}", status, body),
            ));
        }

        let envelope: PublishEnvelope = response.json().await?;
        Ok(envelope.data.publish_id)
    }
}

impl VideoPublisher for TikTokClient {
    async fn publish(
        &self,
        video_path: &Path,
        caption: &str,
        privacy: PrivacyLevel,
    ) -> ServiceResult<String> {
        tracing::info!("Posting video to TikTok: {}", video_path.display());

        let size = tokio::fs::metadata(video_path)
            .await
            .map_err(|e| ServiceError::io("reading video metadata", e))?
            .len();

        let init = self.init_upload(size).await?;
        self.upload_file(&init.upload_url, video_path).await?;
        let post_id = self
            .publish_upload(&init.publish_id, caption, privacy)
            .await?;

        tracing::info!("Video published: {}", post_id);
        Ok(post_id)
    }

    async fn test_connection(&self) -> bool {
        let token = match self.access_token().await {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("TikTok not authenticated: {}", e);
                return false;
            }
        };

        let result = self
            .http
            .get(format!("{}/user/info/", self.base_url))
            .bearer_auth(&token)
            .query(&[("fields", "open_id,union_id,avatar_url")])
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                tracing::info!("TikTok API connection successful");
                true
            }
            Ok(response) => {
                tracing::error!("TikTok API connection failed: status {}", response.status());
                false
            }
            Err(e) => {
                tracing::error!("TikTok API connection failed: {}", e);
                false
            }
        }
    }
}
