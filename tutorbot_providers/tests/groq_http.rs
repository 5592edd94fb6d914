//! HTTP-level tests for `GroqProvider` against a local mock server.

use serde_json::json;
use std::time::Duration;
use tutorbot_core::{
    ChatMessage, CompletionRequest, GenerationParams, LLMProvider, ProviderError,
};
use tutorbot_providers::GroqProvider;
use wiremock::matchers::{bearer_token, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request(params: GenerationParams) -> CompletionRequest {
    CompletionRequest::new(
        "llama3-test".to_string(),
        vec![ChatMessage::system("be brief"), ChatMessage::user("hi")],
        params,
    )
}

fn provider(server: &MockServer) -> GroqProvider {
    GroqProvider::new("test-key".to_string()).with_base_url(server.uri())
}

#[tokio::test]
async fn sends_messages_and_generation_params() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(bearer_token("test-key"))
        .and(body_partial_json(json!({
            "model": "llama3-test",
            "messages": [
                {"role": "system", "content": "be brief"},
                {"role": "user", "content": "hi"}
            ],
            "max_tokens": 1200,
            "stop": ["\n\n\n"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "hello there"}}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 3, "total_tokens": 13}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = provider(&server)
        .chat(&request(GenerationParams::default()))
        .await
        .unwrap();

    assert_eq!(response.content, "hello there");
    let usage = response.usage.unwrap();
    assert_eq!(usage.total_tokens, 13);
    assert_eq!(usage.completion_tokens, 3);
}

#[tokio::test]
async fn maps_429_to_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
        .mount(&server)
        .await;

    let err = provider(&server)
        .chat(&request(GenerationParams::default()))
        .await
        .unwrap_err();

    match ProviderError::find(&err) {
        Some(ProviderError::RateLimited { retry_after }) => {
            assert_eq!(*retry_after, Some(Duration::from_secs(7)));
        }
        other => panic!("expected rate limit, got {other:?}"),
    }
}

#[tokio::test]
async fn maps_server_error_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let err = provider(&server)
        .chat(&request(GenerationParams::default()))
        .await
        .unwrap_err();

    match ProviderError::find(&err) {
        Some(ProviderError::Api { status, body }) => {
            assert_eq!(*status, 500);
            assert_eq!(body, "upstream down");
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(2))
                .set_body_json(json!({"choices": [{"message": {"content": "late"}}]})),
        )
        .mount(&server)
        .await;

    let params = GenerationParams {
        timeout: Some(Duration::from_millis(100)),
        ..GenerationParams::default()
    };
    let err = provider(&server).chat(&request(params)).await.unwrap_err();

    assert!(matches!(
        ProviderError::find(&err),
        Some(ProviderError::Timeout)
    ));
}
