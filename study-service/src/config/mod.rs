use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use service_core::config::{self as core_config, ServerConfig, TelemetryConfig};
use service_core::error::AppError;
use service_core::middleware::cors::CorsConfig;
use std::path::PathBuf;

pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const YOUTUBE_API_KEY_ENV: &str = "YOUTUBE_API_KEY";

/// Relative to the working directory; override with `APP_TEXTBOOKS__CSV_PATH`.
pub const DEFAULT_CSV_PATH: &str = "data/textbooks.csv";

const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:4000",
    "https://localhost:4000",
    "https://hivemind-app.firebaseapp.com",
    "https://hivemind-app.web.app",
    "https://murayeeto.github.io",
    "https://hivemind-d8z8.onrender.com",
];

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub server: ServerConfig,
    pub openai: OpenAiConfig,
    pub youtube: YouTubeConfig,
    pub textbooks: TextbookConfig,
    pub cors: CorsConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    pub service_name: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct OpenAiConfig {
    #[serde(default)]
    pub api_key: Option<Secret<String>>,
    pub api_base_url: String,
    pub model: String,
    pub temperature: f32,
    /// Output bound for the tutoring chat reply.
    pub chat_max_tokens: u32,
    /// Output bound for a flashcard batch; five Q/A pairs need more room.
    pub flashcard_max_tokens: u32,
}

#[derive(Deserialize, Clone, Debug)]
pub struct YouTubeConfig {
    #[serde(default)]
    pub api_key: Option<Secret<String>>,
    pub api_base_url: String,
    pub max_results: u32,
    pub relevance_language: String,
    pub safe_search: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct TextbookConfig {
    pub csv_path: PathBuf,
}

impl OpenAiConfig {
    pub fn has_api_key(&self) -> bool {
        has_secret(&self.api_key)
    }
}

impl YouTubeConfig {
    pub fn has_api_key(&self) -> bool {
        has_secret(&self.api_key)
    }
}

/// A credential counts only when it is set and not blank.
pub fn has_secret(secret: &Option<Secret<String>>) -> bool {
    secret
        .as_ref()
        .is_some_and(|s| !s.expose_secret().trim().is_empty())
}

impl Config {
    /// Load defaults, then the optional `configuration` file, then `APP_*`
    /// variables. `OPENAI_API_KEY` / `YOUTUBE_API_KEY` override the layered
    /// credentials.
    pub fn load() -> Result<Self, AppError> {
        let origins: Vec<String> = DEFAULT_ALLOWED_ORIGINS
            .iter()
            .map(|s| s.to_string())
            .collect();

        let builder = core_config::layered_builder()
            .set_default("service_name", "study-service")?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("openai.api_base_url", "https://api.openai.com/v1")?
            .set_default("openai.model", "gpt-3.5-turbo")?
            .set_default("openai.temperature", 0.7)?
            .set_default("openai.chat_max_tokens", 150)?
            .set_default("openai.flashcard_max_tokens", 500)?
            .set_default(
                "youtube.api_base_url",
                "https://www.googleapis.com/youtube/v3",
            )?
            .set_default("youtube.max_results", 3)?
            .set_default("youtube.relevance_language", "en")?
            .set_default("youtube.safe_search", "strict")?
            .set_default("textbooks.csv_path", DEFAULT_CSV_PATH)?
            .set_default("cors.allowed_origins", origins)?
            .set_default("telemetry.log_level", "info")?
            .set_override_option(
                "openai.api_key",
                core_config::non_empty_env(OPENAI_API_KEY_ENV),
            )?
            .set_override_option(
                "youtube.api_key",
                core_config::non_empty_env(YOUTUBE_API_KEY_ENV),
            )?;

        core_config::build(builder)
    }

    /// Missing credentials degrade single features; they never stop startup.
    pub fn warn_missing_credentials(&self) {
        if !self.openai.has_api_key() {
            tracing::warn!(
                "{} not set - chat answers and flashcards will be unavailable",
                OPENAI_API_KEY_ENV
            );
        }
        if !self.youtube.has_api_key() {
            tracing::warn!(
                "{} not set - video recommendations will be unavailable",
                YOUTUBE_API_KEY_ENV
            );
        }
    }

    /// Configuration for local runs and tests: no credentials, ephemeral port.
    pub fn for_tests(csv_path: impl Into<PathBuf>) -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            openai: OpenAiConfig {
                api_key: None,
                api_base_url: "http://127.0.0.1:9".to_string(),
                model: "gpt-3.5-turbo".to_string(),
                temperature: 0.7,
                chat_max_tokens: 150,
                flashcard_max_tokens: 500,
            },
            youtube: YouTubeConfig {
                api_key: None,
                api_base_url: "http://127.0.0.1:9".to_string(),
                max_results: 3,
                relevance_language: "en".to_string(),
                safe_search: "strict".to_string(),
            },
            textbooks: TextbookConfig {
                csv_path: csv_path.into(),
            },
            cors: CorsConfig {
                allowed_origins: DEFAULT_ALLOWED_ORIGINS
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            },
            telemetry: TelemetryConfig::default(),
            service_name: "study-service-test".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_credentials_count_as_absent() {
        assert!(!has_secret(&None));
        assert!(!has_secret(&Some(Secret::new(String::new()))));
        assert!(!has_secret(&Some(Secret::new("   ".to_string()))));
        assert!(has_secret(&Some(Secret::new("sk-test".to_string()))));
    }

    #[test]
    fn dataset_path_has_a_single_default() {
        let config = Config::load().expect("defaults should load");

        if std::env::var_os("APP_TEXTBOOKS__CSV_PATH").is_none() {
            assert_eq!(config.textbooks.csv_path, PathBuf::from(DEFAULT_CSV_PATH));
        }
    }
}
