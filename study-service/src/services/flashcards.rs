//! Flashcard generation through the language model.
//!
//! The model is asked for a JSON array of `{question, answer}` objects. Its
//! reply is untrusted text: it is decoded against that exact shape and any
//! deviation discards the whole batch.

use super::providers::{ChatProvider, GenerationParams, PromptMessage};
use crate::models::Flashcard;
use std::sync::Arc;
use thiserror::Error;

pub const FLASHCARD_COUNT: usize = 5;

pub const FLASHCARD_INSTRUCTION: &str = "You are an expert in creating educational flashcards. \
Generate 5 question-answer pairs for studying. Focus on key concepts, definitions, and important \
facts. Keep questions clear and concise. Answers should be brief but comprehensive.";

fn user_instruction(course: &str) -> String {
    format!(
        "Create {} flashcards for studying {}. Return them in this format: \
         [{{\"question\": \"Q1\", \"answer\": \"A1\"}}, {{\"question\": \"Q2\", \"answer\": \"A2\"}}]",
        FLASHCARD_COUNT, course
    )
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlashcardParseError {
    #[error("reply is not a JSON list of question/answer objects: {0}")]
    Malformed(String),

    #[error("expected at least {expected} flashcards, got {actual}")]
    TooFew { expected: usize, actual: usize },

    #[error("flashcard {0} has a blank question or answer")]
    Blank(usize),
}

/// Decode a model reply into [`FLASHCARD_COUNT`] cards.
///
/// A single enclosing Markdown code fence is tolerated; anything else that is
/// not the expected JSON array is rejected. Cards past the first
/// [`FLASHCARD_COUNT`] are dropped.
pub fn parse_flashcards(reply: &str) -> Result<Vec<Flashcard>, FlashcardParseError> {
    let body = strip_code_fence(reply.trim());

    let cards: Vec<Flashcard> = serde_json::from_str(body)
        .map_err(|e| FlashcardParseError::Malformed(e.to_string()))?;

    if cards.len() < FLASHCARD_COUNT {
        return Err(FlashcardParseError::TooFew {
            expected: FLASHCARD_COUNT,
            actual: cards.len(),
        });
    }

    cards
        .into_iter()
        .take(FLASHCARD_COUNT)
        .enumerate()
        .map(|(i, card)| {
            let question = card.question.trim();
            let answer = card.answer.trim();
            if question.is_empty() || answer.is_empty() {
                return Err(FlashcardParseError::Blank(i));
            }
            Ok(Flashcard {
                question: question.to_string(),
                answer: answer.to_string(),
            })
        })
        .collect()
}

fn strip_code_fence(text: &str) -> &str {
    let Some(inner) = text.strip_prefix("```") else {
        return text;
    };
    let Some(inner) = inner.strip_suffix("```") else {
        return text;
    };
    // Drop an info string such as `json` on the opening fence line.
    match inner.split_once('\n') {
        Some((info, rest)) if !info.trim_start().starts_with('[') => rest.trim(),
        _ => inner.trim(),
    }
}

#[derive(Clone)]
pub struct FlashcardGenerator {
    provider: Arc<dyn ChatProvider>,
    params: GenerationParams,
}

impl FlashcardGenerator {
    pub fn new(provider: Arc<dyn ChatProvider>, params: GenerationParams) -> Self {
        Self { provider, params }
    }

    /// `None` covers a missing credential, an upstream failure, and a reply in
    /// the wrong shape alike.
    pub async fn generate(&self, course: &str) -> Option<Vec<Flashcard>> {
        if !self.provider.is_configured() {
            tracing::error!("OpenAI API key not found, cannot generate flashcards");
            return None;
        }

        tracing::info!(course = %course, "Generating flashcards");

        let messages = [
            PromptMessage::system(FLASHCARD_INSTRUCTION),
            PromptMessage::user(user_instruction(course)),
        ];

        let reply = match self.provider.complete(&messages, &self.params).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(course = %course, error = %e, "Error generating flashcards");
                return None;
            }
        };

        match parse_flashcards(&reply) {
            Ok(cards) => Some(cards),
            Err(e) => {
                tracing::error!(
                    course = %course,
                    error = %e,
                    reply_len = reply.len(),
                    "Model reply rejected"
                );
                None
            }
        }
    }
}
