use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(anyhow::Error),

    #[error("Not found: {0}")]
    NotFound(anyhow::Error),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// A handled failure whose short message is safe to show the client.
    #[error("Failure: {0}")]
    Failure(String),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(anyhow::anyhow!(msg.into()))
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(anyhow::anyhow!(msg.into()))
    }

    pub fn payload_too_large(msg: impl Into<String>) -> Self {
        AppError::PayloadTooLarge(msg.into())
    }

    pub fn failure(msg: impl Into<String>) -> Self {
        AppError::Failure(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Failure(_) | AppError::InternalError(_) | AppError::ConfigError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

/// JSON body shared by every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let error_message = match self {
            AppError::BadRequest(err) => err.to_string(),
            AppError::NotFound(err) => err.to_string(),
            AppError::PayloadTooLarge(msg) | AppError::Failure(msg) => msg,
            AppError::InternalError(err) => {
                tracing::error!(error = ?err, "Unhandled internal error");
                "Internal server error".to_string()
            }
            AppError::ConfigError(err) => {
                tracing::error!(error = %err, "Configuration error");
                "Configuration error".to_string()
            }
        };

        (status, Json(ErrorResponse::new(error_message))).into_response()
    }
}
