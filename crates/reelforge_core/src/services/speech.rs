//! Google Cloud Text-to-Speech client.

use std::path::Path;

use base64::Engine;
use serde::Deserialize;
use serde_json::json;

use crate::models::VoiceParams;

use super::{ServiceError, ServiceResult, SpeechSynthesizer};

const DEFAULT_ENDPOINT: &str = "https://texttospeech.googleapis.com/v1";

/// REST client for Google Cloud TTS (API-key auth).
pub struct GoogleTtsClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct SynthesizeResponse {
    #[serde(rename = "audioContent")]
    audio_content: Option<String>,
}

impl GoogleTtsClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Override the API endpoint (for testing).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

/// Build the synthesize request body for a script and voice.
pub fn synthesize_request(text: &str, voice: &VoiceParams) -> serde_json::Value {
    json!({
        "input": { "text": text },
        "voice": {
            "languageCode": voice.language_code,
            "name": voice.name,
            "ssmlGender": voice.ssml_gender,
        },
        "audioConfig": {
            "audioEncoding": voice.audio_encoding,
            "speakingRate": voice.speaking_rate,
            "pitch": voice.pitch,
        },
    })
}

impl SpeechSynthesizer for GoogleTtsClient {
    async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceParams,
        output: &Path,
    ) -> ServiceResult<()> {
        tracing::info!("Synthesizing speech ({} chars)", text.len());

        let url = format!("{}/text:synthesize?key={}", self.endpoint, self.api_key);
        let response = self
            .http
            .post(&url)
            .json(&synthesize_request(text, voice))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::api(
                "google-tts",
                format!("status {}: {}", status, body),
            ));
        }

        let payload: SynthesizeResponse = response.json().await?;
        let encoded = payload
            .audio_content
            .ok_or_else(|| ServiceError::api("google-tts", "no audio content in response"))?;

        let audio = base64::engine::general_purpose::STANDARD
            .decode(&encoded)
            .map_err(|e| ServiceError::decode("audio content", e.to_string()))?;

        tokio::fs::write(output, audio)
            .await
            .map_err(|e| ServiceError::io("writing audio file", e))?;

        tracing::info!("Audio written to {}", output.display());
        Ok(())
    }

    async fn test_connection(&self) -> bool {
        if self.api_key.is_empty() {
            tracing::warn!("Google TTS API key not configured");
            return false;
        }

        let url = format!(
            "{}/voices?languageCode=en-US&key={}",
            self.endpoint, self.api_key
        );
        match self.http.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::info!("Google TTS connection successful");
                true
            }
            Ok(response) => {
                tracing::error!("Google TTS connection failed: status {}", response.status());
                false
            }
            Err(e) => {
                tracing::error!("Google TTS connection failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_carries_voice_params() {
        let voice = VoiceParams::default();
        let body = synthesize_request("Stop scrolling.", &voice);

        assert_eq!(body["input"]["text"], "Stop scrolling.");
        assert_eq!(body["voice"]["languageCode"], "en-US");
        assert_eq!(body["voice"]["name"], "en-US-Neural2-D");
        assert_eq!(body["audioConfig"]["audioEncoding"], "MP3");
        assert!((body["audioConfig"]["speakingRate"].as_f64().unwrap() - 1.08).abs() < 1e-9);
    }
}
