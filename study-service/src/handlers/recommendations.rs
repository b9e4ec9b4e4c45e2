//! Video and textbook recommendation endpoints.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    Json,
};
use service_core::error::AppError;

use crate::{
    dtos::{extract_required, read_body, MAJOR_FIELD},
    models::{Textbook, VideoResult},
    AppState,
};

/// `POST /api/recommend-video`
pub async fn recommend_video(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Vec<VideoResult>>, AppError> {
    let major = extract_required(&read_body(body)?, MAJOR_FIELD)?;

    state
        .videos
        .recommend(&major)
        .await
        .map(Json)
        .ok_or_else(|| AppError::not_found("No video recommendations found"))
}

/// `POST /api/recommend-textbook`
pub async fn recommend_textbook(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Vec<Textbook>>, AppError> {
    let major = extract_required(&read_body(body)?, MAJOR_FIELD)?;

    state
        .textbooks
        .recommend(&major)
        .await
        .map(Json)
        .ok_or_else(|| AppError::not_found("No textbook recommendations found"))
}
