//! OpenAI chat-completions provider.
//!
//! Speaks the `/chat/completions` wire format, so any compatible endpoint can
//! be used by pointing `openai.api_base_url` at it.

use super::{ChatProvider, GenerationParams, PromptMessage, ProviderError};
use crate::config::{has_secret, OpenAiConfig};
use crate::services::metrics;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use service_core::observability::TracedClientExt;
use std::time::Instant;

const PROVIDER: &str = "openai";

pub struct OpenAiChatProvider {
    client: Client,
    api_key: Option<Secret<String>>,
    base_url: String,
    model: String,
}

impl OpenAiChatProvider {
    pub fn new(config: &OpenAiConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        }
    }

    async fn send(
        &self,
        api_key: &str,
        request: &ChatCompletionRequest<'_>,
    ) -> Result<String, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);

        tracing::debug!(
            model = %self.model,
            messages = request.messages.len(),
            max_tokens = request.max_tokens,
            "Sending request to OpenAI API"
        );

        let response = self
            .client
            .traced_post(&url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?;

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

        let completion: ChatCompletionResponse = response.json().await?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ProviderError::InvalidResponse("No choices in completion".to_string()))
    }
}

#[async_trait]
impl ChatProvider for OpenAiChatProvider {
    fn is_configured(&self) -> bool {
        has_secret(&self.api_key)
    }

    async fn complete(
        &self,
        messages: &[PromptMessage],
        params: &GenerationParams,
    ) -> Result<String, ProviderError> {
        let api_key = match &self.api_key {
            Some(key) if self.is_configured() => key.expose_secret(),
            _ => {
                return Err(ProviderError::NotConfigured(
                    "OpenAI API key not configured".to_string(),
                ));
            }
        };

        let request = ChatCompletionRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            max_tokens: params.max_tokens,
            temperature: params.temperature,
        };

        let start = Instant::now();
        let result = self.send(api_key, &request).await;
        metrics::record_upstream_call(PROVIDER, &result, start.elapsed());

        result
    }
}

// ============================================================================
// OpenAI API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}
