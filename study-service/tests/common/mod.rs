#![allow(dead_code)]

use secrecy::Secret;
use serde_json::Value;
use std::path::PathBuf;
use study_service::config::Config;
use study_service::Application;

pub const OPENAI_TEST_KEY: &str = "test-openai-key";
pub const YOUTUBE_TEST_KEY: &str = "test-youtube-key";

pub const DATASET: &str = "\
title,edition,isbn,subject
Intro to Biology,3rd,111,Biology
Advanced Biology Lab,,222,Biology
Chemistry Basics,2nd,333,Chemistry
";

/// Write a dataset to a unique temp file and return its path.
pub fn write_dataset(contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("textbooks_{}.csv", uuid::Uuid::new_v4()));
    std::fs::write(&path, contents).expect("Failed to write test dataset");
    path
}

/// Config with the default dataset and no credentials.
pub fn test_config() -> Config {
    Config::for_tests(write_dataset(DATASET))
}

/// Point the language-model client at a mock server with a valid key.
pub fn with_openai(mut config: Config, base_url: &str) -> Config {
    config.openai.api_base_url = base_url.to_string();
    config.openai.api_key = Some(Secret::new(OPENAI_TEST_KEY.to_string()));
    config
}

/// Point the video client at a mock server with a valid key.
pub fn with_youtube(mut config: Config, base_url: &str) -> Config {
    config.youtube.api_base_url = base_url.to_string();
    config.youtube.api_key = Some(Secret::new(YOUTUBE_TEST_KEY.to_string()));
    config
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub csv_path: PathBuf,
    client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn(config: Config) -> Self {
        let csv_path = config.textbooks.csv_path.clone();

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            csv_path,
            client,
        }
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_raw(&self, path: &str, body: &'static str) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Remove the temporary dataset.
    pub fn cleanup(&self) {
        let _ = std::fs::remove_file(&self.csv_path);
    }
}

/// An OpenAI chat-completions response carrying `content`.
pub fn completion_body(content: &str) -> Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "gpt-3.5-turbo",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 42, "completion_tokens": 17, "total_tokens": 59 }
    })
}

/// A YouTube search item.
pub fn search_item(video_id: &str, title: &str, description: &str) -> Value {
    serde_json::json!({
        "kind": "youtube#searchResult",
        "id": { "kind": "youtube#video", "videoId": video_id },
        "snippet": {
            "title": title,
            "description": description,
            "channelTitle": "Open Lectures",
            "thumbnails": {
                "default": { "url": format!("https://i.ytimg.com/vi/{}/default.jpg", video_id) },
                "high": { "url": format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", video_id) }
            }
        }
    })
}
