//! YouTube Data API v3 search provider.

use super::{ProviderError, VideoHit, VideoQuery, VideoSearchProvider};
use crate::config::{has_secret, YouTubeConfig};
use crate::services::metrics;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use service_core::observability::TracedClientExt;
use std::time::Instant;

const PROVIDER: &str = "youtube";

pub struct YouTubeSearchProvider {
    client: Client,
    api_key: Option<Secret<String>>,
    base_url: String,
}

impl YouTubeSearchProvider {
    pub fn new(config: &YouTubeConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn send(&self, api_key: &str, query: &VideoQuery) -> Result<Vec<VideoHit>, ProviderError> {
        let url = format!("{}/search", self.base_url);
        let max_results = query.max_results.to_string();

        let params = [
            ("part", "snippet"),
            ("q", query.query.as_str()),
            ("type", "video"),
            ("videoEmbeddable", "true"),
            ("maxResults", max_results.as_str()),
            ("relevanceLanguage", query.relevance_language.as_str()),
            ("safeSearch", query.safe_search.as_str()),
            ("key", api_key),
        ];

        tracing::debug!(query = %query.query, max_results = query.max_results, "Searching YouTube");

        let response = self.client.traced_get(&url).query(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                return Err(ProviderError::RateLimited);
            }

            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let search: SearchListResponse = response.json().await?;

        Ok(search
            .items
            .into_iter()
            .map(|item| VideoHit {
                video_id: item.id.video_id,
                title: item.snippet.title,
                description: item.snippet.description,
                thumbnail_url: item.snippet.thumbnails.high.url,
            })
            .collect())
    }
}

#[async_trait]
impl VideoSearchProvider for YouTubeSearchProvider {
    fn is_configured(&self) -> bool {
        has_secret(&self.api_key)
    }

    async fn search(&self, query: &VideoQuery) -> Result<Vec<VideoHit>, ProviderError> {
        let api_key = match &self.api_key {
            Some(key) if self.is_configured() => key.expose_secret(),
            _ => {
                return Err(ProviderError::NotConfigured(
                    "YouTube API key not configured".to_string(),
                ));
            }
        };

        let start = Instant::now();
        let result = self.send(api_key, query).await;
        metrics::record_upstream_call(PROVIDER, &result, start.elapsed());

        result
    }
}

// ============================================================================
// YouTube API Response Types
// ============================================================================
//
// Every field the frontend needs is required; an item missing one fails the
// whole decode rather than producing a half-filled card.

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: ResourceId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceId {
    video_id: String,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: String,
    #[serde(default)]
    description: String,
    thumbnails: Thumbnails,
}

#[derive(Debug, Deserialize)]
struct Thumbnails {
    high: Thumbnail,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}
