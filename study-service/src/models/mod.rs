//! Records returned to the frontend.

use serde::{Deserialize, Serialize};

/// Text shown when a dataset row has no edition.
pub const EDITION_NOT_AVAILABLE: &str = "Edition not available";

/// A textbook suggestion, projected from a dataset row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Textbook {
    pub title: String,
    pub edition: String,
}

/// An embeddable lecture/tutorial video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoResult {
    pub title: String,
    pub url: String,
    pub thumbnail: String,
    pub description: String,
}

/// One study card. Deserialized strictly from the model's reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}
