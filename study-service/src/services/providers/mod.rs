//! Upstream provider abstractions and implementations.
//!
//! Handlers never talk to OpenAI or YouTube directly; they go through these
//! traits so tests can swap in the mocks.

pub mod mock;
pub mod openai;
pub mod youtube;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Rate limited")]
    RateLimited,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::Api { .. } => "api_error",
            ProviderError::RateLimited => "rate_limited",
            ProviderError::Network(_) => "network_error",
            ProviderError::InvalidResponse(_) => "invalid_response",
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::InvalidResponse(err.to_string())
        } else {
            ProviderError::Network(err.to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptRole {
    System,
    User,
}

impl PromptRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptRole::System => "system",
            PromptRole::User => "user",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PromptMessage {
    pub role: PromptRole,
    pub content: String,
}

impl PromptMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::User,
            content: content.into(),
        }
    }
}

/// Sampling parameters for a completion call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Trait for chat-completion providers (e.g., OpenAI).
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Whether a credential is present. Callers short-circuit when false.
    fn is_configured(&self) -> bool;

    /// Run one completion and return the raw text of the first choice.
    async fn complete(
        &self,
        messages: &[PromptMessage],
        params: &GenerationParams,
    ) -> Result<String, ProviderError>;
}

/// Search filters for a video lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoQuery {
    pub query: String,
    pub max_results: u32,
    pub relevance_language: String,
    pub safe_search: String,
}

/// One search hit, before it is reshaped for the frontend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoHit {
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
}

/// Trait for video-search providers (e.g., YouTube Data API).
///
/// Implementations only return embeddable videos, never channels or
/// playlists, ranked by the upstream's relevance order.
#[async_trait]
pub trait VideoSearchProvider: Send + Sync {
    fn is_configured(&self) -> bool;

    async fn search(&self, query: &VideoQuery) -> Result<Vec<VideoHit>, ProviderError>;
}
