use crate::error::AppError;
use config::{Config as Cfg, ConfigBuilder, Environment, File, builder::DefaultState};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// OTLP collector endpoint; spans are only exported when set.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}

/// Builder with the layers every service shares: an optional `configuration`
/// file in the working directory, then `APP_*` environment variables using
/// `__` for nesting. Services add their own defaults and overrides on top.
pub fn layered_builder() -> ConfigBuilder<DefaultState> {
    dotenvy::dotenv().ok();

    Cfg::builder()
        .add_source(File::with_name("configuration").required(false))
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("cors.allowed_origins")
                .try_parsing(true),
        )
}

/// Read an environment variable, treating blank values as unset.
pub fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn build<T: serde::de::DeserializeOwned>(
    builder: ConfigBuilder<DefaultState>,
) -> Result<T, AppError> {
    let config = builder.build()?;
    Ok(config.try_deserialize()?)
}
