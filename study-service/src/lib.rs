pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

use config::Config;
use services::providers::openai::OpenAiChatProvider;
use services::providers::youtube::YouTubeSearchProvider;
use services::providers::{ChatProvider, GenerationParams, VideoSearchProvider};
use services::{ChatResponder, FlashcardGenerator, TextbookRecommender, VideoRecommender};
use std::sync::Arc;

pub use startup::Application;

/// Shared application state. Every field is cheap to clone and immutable;
/// requests share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub chat: ChatResponder,
    pub flashcards: FlashcardGenerator,
    pub videos: VideoRecommender,
    pub textbooks: TextbookRecommender,
}

impl AppState {
    /// State backed by the real OpenAI and YouTube clients.
    pub fn from_config(config: Config) -> Self {
        let chat_provider: Arc<dyn ChatProvider> = Arc::new(OpenAiChatProvider::new(&config.openai));
        let video_provider: Arc<dyn VideoSearchProvider> =
            Arc::new(YouTubeSearchProvider::new(&config.youtube));

        Self::with_providers(config, chat_provider, video_provider)
    }

    /// State with explicit providers, e.g. the mocks in tests.
    pub fn with_providers(
        config: Config,
        chat_provider: Arc<dyn ChatProvider>,
        video_provider: Arc<dyn VideoSearchProvider>,
    ) -> Self {
        let chat = ChatResponder::new(
            chat_provider.clone(),
            GenerationParams {
                temperature: config.openai.temperature,
                max_tokens: config.openai.chat_max_tokens,
            },
        );
        let flashcards = FlashcardGenerator::new(
            chat_provider,
            GenerationParams {
                temperature: config.openai.temperature,
                max_tokens: config.openai.flashcard_max_tokens,
            },
        );
        let videos = VideoRecommender::new(video_provider, &config.youtube);
        let textbooks = TextbookRecommender::new(config.textbooks.csv_path.clone());

        Self {
            config: Arc::new(config),
            chat,
            flashcards,
            videos,
            textbooks,
        }
    }
}
