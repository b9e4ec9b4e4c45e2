//! Tutoring chat: forwards a student's message to the language model behind a
//! fixed "supportive teacher" instruction.

use super::providers::{ChatProvider, GenerationParams, PromptMessage};
use std::sync::Arc;

pub const TUTOR_INSTRUCTION: &str = "You are a kind and supportive teacher who helps students \
succeed. Keep responses concise (3-4 sentences max). Be clear, encouraging, and practical. Use \
simple formatting - no markdown or special characters. Focus on giving actionable advice and \
clear explanations and also try not give the user the direct answer they are seeking rather \
seek to guide them to the correct answer.";

/// Returned instead of calling upstream when no credential is configured.
pub const NOT_CONFIGURED_REPLY: &str =
    "OpenAI API key not configured. Please set OPENAI_API_KEY in your environment.";

/// Returned when the upstream call fails for any reason.
pub const APOLOGY_REPLY: &str = "I apologize, but I'm having trouble processing your request \
right now. Please try again later.";

#[derive(Clone)]
pub struct ChatResponder {
    provider: Arc<dyn ChatProvider>,
    params: GenerationParams,
}

impl ChatResponder {
    pub fn new(provider: Arc<dyn ChatProvider>, params: GenerationParams) -> Self {
        Self { provider, params }
    }

    /// Always yields a string: the trimmed model reply, or one of the fixed
    /// fallback sentences.
    pub async fn respond(&self, prompt: &str) -> String {
        if !self.provider.is_configured() {
            tracing::error!("OpenAI API key not found, returning configuration notice");
            return NOT_CONFIGURED_REPLY.to_string();
        }

        tracing::info!(prompt_len = prompt.len(), "Requesting tutoring reply");

        let messages = [
            PromptMessage::system(TUTOR_INSTRUCTION),
            PromptMessage::user(prompt),
        ];

        match self.provider.complete(&messages, &self.params).await {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                tracing::error!(error = %e, "Error generating AI response");
                APOLOGY_REPLY.to_string()
            }
        }
    }
}
