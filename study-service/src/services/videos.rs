//! Lecture video recommendations.

use super::metrics;
use super::providers::{VideoHit, VideoQuery, VideoSearchProvider};
use crate::config::YouTubeConfig;
use crate::models::VideoResult;
use std::sync::Arc;

/// Appended to every topic to bias results toward teaching material.
pub const QUERY_SUFFIX: &str = "course lecture tutorial concepts";

pub const DESCRIPTION_LIMIT: usize = 100;
const ELLIPSIS: &str = "...";
const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// Cut a description to [`DESCRIPTION_LIMIT`] characters, marking the cut.
pub fn truncate_description(description: &str) -> String {
    match description.char_indices().nth(DESCRIPTION_LIMIT) {
        Some((cut, _)) => format!("{}{}", &description[..cut], ELLIPSIS),
        None => description.to_string(),
    }
}

impl From<VideoHit> for VideoResult {
    fn from(hit: VideoHit) -> Self {
        VideoResult {
            title: hit.title,
            url: format!("{}{}", WATCH_URL, hit.video_id),
            thumbnail: hit.thumbnail_url,
            description: truncate_description(&hit.description),
        }
    }
}

#[derive(Clone)]
pub struct VideoRecommender {
    provider: Arc<dyn VideoSearchProvider>,
    max_results: u32,
    relevance_language: String,
    safe_search: String,
}

impl VideoRecommender {
    pub fn new(provider: Arc<dyn VideoSearchProvider>, config: &YouTubeConfig) -> Self {
        Self {
            provider,
            max_results: config.max_results,
            relevance_language: config.relevance_language.clone(),
            safe_search: config.safe_search.clone(),
        }
    }

    fn query_for(&self, topic: &str) -> VideoQuery {
        VideoQuery {
            query: format!("{} {}", topic, QUERY_SUFFIX),
            max_results: self.max_results,
            relevance_language: self.relevance_language.clone(),
            safe_search: self.safe_search.clone(),
        }
    }

    /// Up to `max_results` videos for `topic`.
    ///
    /// `None` means either no hits or a failed search; callers cannot and do
    /// not tell the two apart.
    pub async fn recommend(&self, topic: &str) -> Option<Vec<VideoResult>> {
        let query = self.query_for(topic);

        let hits = match self.provider.search(&query).await {
            Ok(hits) => hits,
            Err(e) => {
                tracing::error!(
                    course = %topic,
                    error = %e,
                    "Error getting video recommendation"
                );
                if !self.provider.is_configured() {
                    tracing::error!("YouTube API key is missing");
                }
                metrics::record_recommendation("video", false);
                return None;
            }
        };

        let videos: Vec<VideoResult> = hits
            .into_iter()
            .take(self.max_results as usize)
            .map(VideoResult::from)
            .collect();

        metrics::record_recommendation("video", !videos.is_empty());

        if videos.is_empty() {
            tracing::info!(course = %topic, "No videos found");
            return None;
        }

        tracing::info!(course = %topic, count = videos.len(), "Video recommendations ready");
        Some(videos)
    }
}
