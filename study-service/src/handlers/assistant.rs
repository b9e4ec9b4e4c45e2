//! Language-model backed endpoints: tutoring chat and flashcards.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    Json,
};
use service_core::error::AppError;

use crate::{
    dtos::{extract_required, read_body, AskAiResponse, COURSE_FIELD, MESSAGE_FIELD},
    models::Flashcard,
    AppState,
};

/// `POST /api/ask-ai`
///
/// Always 200 once the message is present: upstream problems surface as a
/// fixed sentence in `response`, not as an error status.
pub async fn ask_ai(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<AskAiResponse>, AppError> {
    tracing::info!("Received ask-ai request");

    let message = extract_required(&read_body(body)?, MESSAGE_FIELD)?;
    let response = state.chat.respond(&message).await;

    tracing::info!(response_len = response.len(), "AI response ready");
    Ok(Json(AskAiResponse { response }))
}

/// `POST /api/generate-flashcards`
///
/// A missing result is reported as a 500, unlike the recommendation routes'
/// 404; the frontend depends on this.
pub async fn generate_flashcards(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Vec<Flashcard>>, AppError> {
    let course = extract_required(&read_body(body)?, COURSE_FIELD)?;

    state
        .flashcards
        .generate(&course)
        .await
        .map(Json)
        .ok_or_else(|| AppError::failure("Failed to generate flashcards"))
}
