//! Request/response bodies and the shared body-validation step.

use axum::{body::Bytes, extract::rejection::BytesRejection, http::StatusCode};
use serde::Serialize;
use serde_json::Value;
use service_core::error::AppError;

pub const INVALID_JSON_MESSAGE: &str = "Request body must be valid JSON";
pub const BODY_TOO_LARGE_MESSAGE: &str = "Request body too large";
pub const UNREADABLE_BODY_MESSAGE: &str = "Request body could not be read";

/// Turn a body extraction failure into the usual `{"error": ...}` response.
pub fn read_body(body: Result<Bytes, BytesRejection>) -> Result<Bytes, AppError> {
    body.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "Rejecting request body");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::payload_too_large(BODY_TOO_LARGE_MESSAGE)
        } else {
            AppError::bad_request(UNREADABLE_BODY_MESSAGE)
        }
    })
}

/// A JSON key a route requires, plus the label used in its 400 message.
#[derive(Debug, Clone, Copy)]
pub struct RequiredField {
    pub key: &'static str,
    pub label: &'static str,
}

pub const MESSAGE_FIELD: RequiredField = RequiredField {
    key: "message",
    label: "Message",
};

pub const MAJOR_FIELD: RequiredField = RequiredField {
    key: "major",
    label: "Major",
};

pub const COURSE_FIELD: RequiredField = RequiredField {
    key: "course",
    label: "Course",
};

/// Parse a raw body and pull out one required string field.
///
/// An unparseable body is a server-side failure (500); a body that parses but
/// lacks the field, holds `null`, or is not an object is a client error (400).
pub fn extract_required(body: &[u8], field: RequiredField) -> Result<String, AppError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        tracing::warn!(error = %e, "Rejecting unparseable request body");
        AppError::failure(INVALID_JSON_MESSAGE)
    })?;

    match value.get(field.key) {
        None | Some(Value::Null) => {
            tracing::warn!(field = field.key, "Required field missing from request");
            Err(AppError::bad_request(format!("{} is required", field.label)))
        }
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(AppError::bad_request(format!(
            "{} must be a string",
            field.label
        ))),
    }
}

#[derive(Debug, Serialize)]
pub struct AskAiResponse {
    pub response: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn returns_the_field() {
        let body = br#"{"message": "help me with fractions", "extra": 1}"#;
        assert_eq!(
            extract_required(body, MESSAGE_FIELD).unwrap(),
            "help me with fractions"
        );
    }

    #[test]
    fn empty_string_is_present() {
        assert_eq!(extract_required(br#"{"major": ""}"#, MAJOR_FIELD).unwrap(), "");
    }

    #[test]
    fn missing_field_is_400() {
        for body in [
            &br#"{}"#[..],
            br#"{"course": "Biology"}"#,
            br#"{"major": null}"#,
            br#"[]"#,
            br#"null"#,
            br#""major""#,
        ] {
            let err = extract_required(body, MAJOR_FIELD).unwrap_err();
            assert_eq!(err.status(), StatusCode::BAD_REQUEST);
            assert_eq!(err.to_string(), "Bad request: Major is required");
        }
    }

    #[test]
    fn non_string_field_is_400() {
        let err = extract_required(br#"{"course": 101}"#, COURSE_FIELD).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unparseable_body_is_500() {
        for body in [&b""[..], b"{not json", b"message=hi"] {
            let err = extract_required(body, MESSAGE_FIELD).unwrap_err();
            assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
