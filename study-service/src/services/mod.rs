pub mod chat;
pub mod flashcards;
pub mod metrics;
pub mod providers;
pub mod textbooks;
pub mod videos;

pub use chat::ChatResponder;
pub use flashcards::FlashcardGenerator;
pub use textbooks::TextbookRecommender;
pub use videos::VideoRecommender;
