mod common;

use common::{completion_body, test_config, with_openai, TestApp, OPENAI_TEST_KEY};
use serde_json::json;
use study_service::services::chat::{APOLOGY_REPLY, NOT_CONFIGURED_REPLY, TUTOR_INSTRUCTION};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn ask_ai_returns_trimmed_model_reply() {
    let openai = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", format!("Bearer {}", OPENAI_TEST_KEY).as_str()))
        .and(body_partial_json(json!({
            "model": "gpt-3.5-turbo",
            "max_tokens": 150,
            "temperature": 0.7,
            "messages": [
                { "role": "system", "content": TUTOR_INSTRUCTION },
                { "role": "user", "content": "What is a derivative?" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(
            "  Think about how fast something changes at a single point.  \n",
        )))
        .expect(1)
        .mount(&openai)
        .await;

    let app = TestApp::spawn(with_openai(test_config(), &openai.uri())).await;

    let response = app
        .post_json("/api/ask-ai", &json!({ "message": "What is a derivative?" }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "response": "Think about how fast something changes at a single point." })
    );

    app.cleanup();
}

#[tokio::test]
async fn ask_ai_without_credential_returns_notice() {
    let app = TestApp::spawn(test_config()).await;

    let response = app
        .post_json("/api/ask-ai", &json!({ "message": "Help me with recursion" }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["response"], NOT_CONFIGURED_REPLY);

    app.cleanup();
}

#[tokio::test]
async fn ask_ai_upstream_failure_returns_apology() {
    let openai = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(1)
        .mount(&openai)
        .await;

    let app = TestApp::spawn(with_openai(test_config(), &openai.uri())).await;

    let response = app
        .post_json("/api/ask-ai", &json!({ "message": "Explain entropy" }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["response"], APOLOGY_REPLY);

    app.cleanup();
}

#[tokio::test]
async fn ask_ai_rate_limited_returns_apology() {
    let openai = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&openai)
        .await;

    let app = TestApp::spawn(with_openai(test_config(), &openai.uri())).await;

    let response = app
        .post_json("/api/ask-ai", &json!({ "message": "Explain entropy" }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["response"], APOLOGY_REPLY);

    app.cleanup();
}

#[tokio::test]
async fn ask_ai_missing_message_is_rejected_without_upstream_call() {
    let openai = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("unused")))
        .expect(0)
        .mount(&openai)
        .await;

    let app = TestApp::spawn(with_openai(test_config(), &openai.uri())).await;

    for body in [json!({}), json!({ "message": null }), json!({ "text": "hi" })] {
        let response = app.post_json("/api/ask-ai", &body).await;

        assert_eq!(response.status().as_u16(), 400, "body: {}", body);
        let error: serde_json::Value = response.json().await.unwrap();
        assert_eq!(error, json!({ "error": "Message is required" }));
    }

    app.cleanup();
}

#[tokio::test]
async fn ask_ai_non_string_message_is_rejected() {
    let app = TestApp::spawn(test_config()).await;

    let response = app.post_json("/api/ask-ai", &json!({ "message": 42 })).await;

    assert_eq!(response.status().as_u16(), 400);
    let error: serde_json::Value = response.json().await.unwrap();
    assert_eq!(error["error"], "Message must be a string");

    app.cleanup();
}

#[tokio::test]
async fn ask_ai_unparseable_body_is_a_server_error() {
    let app = TestApp::spawn(test_config()).await;

    let response = app.post_raw("/api/ask-ai", "{not json").await;

    assert_eq!(response.status().as_u16(), 500);
    let error: serde_json::Value = response.json().await.unwrap();
    assert!(error["error"].is_string());

    app.cleanup();
}
