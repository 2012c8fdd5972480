//! Pexels stock footage client: search, pick, download.

use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use serde::Deserialize;
use tokio::io::AsyncWriteExt;

use crate::config::StockSettings;
use crate::models::Niche;

use super::{FootageProvider, ServiceError, ServiceResult};

const DEFAULT_BASE_URL: &str = "https://api.pexels.com/videos";

/// Search queries per niche, cycled deterministically.
const SEARCH_QUERIES_AI_TOOLS: &[&str] = &[
    "technology computer",
    "coding programming",
    "robot artificial intelligence",
    "futuristic technology",
    "digital interface",
    "laptop working",
];

const SEARCH_QUERIES_ONLINE_BUSINESS: &[&str] = &[
    "entrepreneur laptop",
    "money success",
    "working coffee shop",
    "business meeting",
    "startup office",
    "typing keyboard",
];

const SEARCH_QUERIES_FACELESS_STORIES: &[&str] = &[
    "motivation success",
    "city lights night",
    "sunrise inspiration",
    "walking alone",
    "thinking contemplating",
    "journey path",
];

/// One downloadable rendition of a stock video.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StockVideoFile {
    #[serde(default)]
    pub quality: String,
    pub link: String,
    pub width: u32,
    pub height: u32,
}

impl StockVideoFile {
    /// Portrait orientation check.
    pub fn is_vertical(&self) -> bool {
        self.height > self.width
    }
}

/// A stock video search hit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StockVideo {
    pub id: u64,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub duration: u32,
    #[serde(rename = "video_files")]
    pub files: Vec<StockVideoFile>,
}

impl StockVideo {
    /// Pick the best vertical rendition: HD vertical, then SD vertical,
    /// then any vertical, then whatever is first.
    pub fn best_file(&self) -> Option<&StockVideoFile> {
        self.files
            .iter()
            .find(|f| f.quality == "hd" && f.is_vertical())
            .or_else(|| self.files.iter().find(|f| f.quality == "sd" && f.is_vertical()))
            .or_else(|| self.files.iter().find(|f| f.is_vertical()))
            .or_else(|| self.files.first())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    videos: Vec<StockVideo>,
}

/// Deterministic query for a niche.
pub fn search_query(niche: Niche, seed: u64) -> &'static str {
    let queries = match niche {
        Niche::AiTools => SEARCH_QUERIES_AI_TOOLS,
        Niche::OnlineBusiness => SEARCH_QUERIES_ONLINE_BUSINESS,
        Niche::FacelessStories => SEARCH_QUERIES_FACELESS_STORIES,
    };
    queries[seed as usize % queries.len()]
}

/// Pexels API client.
pub struct PexelsClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    settings: StockSettings,
}

impl PexelsClient {
    pub fn new(api_key: impl Into<String>, settings: StockSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            settings,
        }
    }

    /// Override the API base URL (for testing).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Search portrait videos for a query.
    async fn search(&self, query: &str) -> ServiceResult<Vec<StockVideo>> {
        let response = self
            .http
            .get(format!("{}/search", self.base_url))
            .header("Authorization", &self.api_key)
            .query(&[
                ("query", query),
                ("orientation", "portrait"),
                ("per_page", &self.settings.per_page.to_string()),
                ("size", "medium"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(ServiceError::api("pexels", format!("search status {}", status)));
        }

        let payload: SearchResponse = response.json().await?;
        Ok(payload.videos)
    }

    /// Stream a rendition to storage.
    async fn download(&self, video: &StockVideo, output_dir: &Path) -> ServiceResult<PathBuf> {
        let file = video
            .best_file()
            .ok_or_else(|| ServiceError::api("pexels", "no suitable video file found"))?;

        tracing::info!(
            "Downloading stock video {} ({}x{}, {})",
            video.id,
            file.width,
            file.height,
            file.quality
        );

        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|e| ServiceError::io("creating stock cache directory", e))?;

        let filename = format!(
            "stock-{}-{}.mp4",
            video.id,
            chrono::Utc::now().timestamp_millis()
        );
        let output_path = output_dir.join(filename);

        let response = self
            .http
            .get(&file.link)
            .send()
            .await?
            .error_for_status()?;

        let mut out = tokio::fs::File::create(&output_path)
            .await
            .map_err(|e| ServiceError::io("creating stock video file", e))?;

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            out.write_all(&chunk)
                .await
                .map_err(|e| ServiceError::io("writing stock video file", e))?;
        }
        out.flush()
            .await
            .map_err(|e| ServiceError::io("flushing stock video file", e))?;

        Ok(output_path)
    }
}

impl FootageProvider for PexelsClient {
    async fn fetch_clip(
        &self,
        niche: Niche,
        seed: u64,
        output_dir: &Path,
    ) -> ServiceResult<PathBuf> {
        let query = search_query(niche, seed);
        tracing::info!("Searching stock video: niche={} query='{}'", niche, query);

        let videos = self.search(query).await?;
        if videos.is_empty() {
            return Err(ServiceError::api(
                "pexels",
                format!("no videos found for query: {}", query),
            ));
        }

        let pool = videos.len().min(self.settings.candidate_pool);
        let selected = &videos[seed as usize % pool];

        let path = self.download(selected, output_dir).await?;
        tracing::info!("Stock video downloaded: {}", path.display());
        Ok(path)
    }

    async fn test_connection(&self) -> bool {
        if self.api_key.is_empty() {
            tracing::warn!("Pexels API key not configured");
            return false;
        }

        let result = self
            .http
            .get(format!("{}/popular", self.base_url))
            .header("Authorization", &self.api_key)
            .query(&[("per_page", "1")])
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                tracing::info!("Pexels API connection successful");
                true
            }
            Ok(response) => {
                tracing::error!("Pexels API connection failed: status {}", response.status());
                false
            }
            Err(e) => {
                tracing::error!("Pexels API connection failed: {}", e);
                false
            }
        }
    }
}
