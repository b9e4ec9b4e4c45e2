//! Mock provider implementations for testing.

use super::{
    ChatProvider, GenerationParams, PromptMessage, ProviderError, VideoHit, VideoQuery,
    VideoSearchProvider,
};
use async_trait::async_trait;
use std::sync::Mutex;

/// A chat call as the mock saw it.
#[derive(Debug, Clone)]
pub struct RecordedCompletion {
    pub messages: Vec<PromptMessage>,
    pub params: GenerationParams,
}

enum ChatBehaviour {
    Reply(String),
    Fail,
    Unconfigured,
}

/// Mock chat provider that returns a canned reply or fails.
pub struct MockChatProvider {
    behaviour: ChatBehaviour,
    calls: Mutex<Vec<RecordedCompletion>>,
}

impl MockChatProvider {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self::with(ChatBehaviour::Reply(reply.into()))
    }

    pub fn failing() -> Self {
        Self::with(ChatBehaviour::Fail)
    }

    pub fn unconfigured() -> Self {
        Self::with(ChatBehaviour::Unconfigured)
    }

    fn with(behaviour: ChatBehaviour) -> Self {
        Self {
            behaviour,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCompletion> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ChatProvider for MockChatProvider {
    fn is_configured(&self) -> bool {
        !matches!(self.behaviour, ChatBehaviour::Unconfigured)
    }

    async fn complete(
        &self,
        messages: &[PromptMessage],
        params: &GenerationParams,
    ) -> Result<String, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCompletion {
                messages: messages.to_vec(),
                params: *params,
            });
        }

        match &self.behaviour {
            ChatBehaviour::Reply(text) => Ok(text.clone()),
            ChatBehaviour::Fail => Err(ProviderError::Network("connection reset".to_string())),
            ChatBehaviour::Unconfigured => Err(ProviderError::NotConfigured(
                "Mock chat provider not configured".to_string(),
            )),
        }
    }
}

enum VideoBehaviour {
    Hits(Vec<VideoHit>),
    Fail,
    Unconfigured,
}

/// Mock video search provider.
pub struct MockVideoSearchProvider {
    behaviour: VideoBehaviour,
    queries: Mutex<Vec<VideoQuery>>,
}

impl MockVideoSearchProvider {
    pub fn returning(hits: Vec<VideoHit>) -> Self {
        Self::with(VideoBehaviour::Hits(hits))
    }

    pub fn failing() -> Self {
        Self::with(VideoBehaviour::Fail)
    }

    pub fn unconfigured() -> Self {
        Self::with(VideoBehaviour::Unconfigured)
    }

    fn with(behaviour: VideoBehaviour) -> Self {
        Self {
            behaviour,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<VideoQuery> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl VideoSearchProvider for MockVideoSearchProvider {
    fn is_configured(&self) -> bool {
        !matches!(self.behaviour, VideoBehaviour::Unconfigured)
    }

    async fn search(&self, query: &VideoQuery) -> Result<Vec<VideoHit>, ProviderError> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.clone());
        }

        match &self.behaviour {
            VideoBehaviour::Hits(hits) => Ok(hits.clone()),
            VideoBehaviour::Fail => Err(ProviderError::Api {
                status: 403,
                body: "quotaExceeded".to_string(),
            }),
            VideoBehaviour::Unconfigured => Err(ProviderError::NotConfigured(
                "Mock video provider not configured".to_string(),
            )),
        }
    }
}

/// Build a hit with predictable ids and URLs.
pub fn sample_hit(n: usize, description: &str) -> VideoHit {
    VideoHit {
        video_id: format!("vid{}", n),
        title: format!("Lecture {}", n),
        description: description.to_string(),
        thumbnail_url: format!("https://i.ytimg.com/vi/vid{}/hqdefault.jpg", n),
    }
}
