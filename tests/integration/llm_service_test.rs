// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{completion_response, concept_content, provider, raw_completion_response};
use conceptrs::config::settings::AiSettings;
use conceptrs::domain::services::prompt_builder::SYSTEM_INSTRUCTION;
use conceptrs::domain::services::llm_service::{
    ChatCompletionProvider, CompletionRequest, LlmProvider, ProviderChain, ProviderError,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request() -> CompletionRequest {
    CompletionRequest {
        prompt: "Describe Joe's Cafe".to_string(),
        max_tokens: 3_000,
        timeout: Duration::from_secs(5),
    }
}

/// OpenRouter 请求携带鉴权与来源请求头
#[tokio::test]
async fn test_openrouter_sends_expected_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer or-key"))
        .and(header("HTTP-Referer", "https://builder.example.com"))
        .and(header("X-Title", "AI Web Builder"))
        .and(body_partial_json(json!({
            "model": "anthropic/claude-3.5-sonnet",
            "max_tokens": 3000,
            "messages": [
                {"role": "system", "content": SYSTEM_INSTRUCTION},
                {"role": "user", "content": "Describe Joe's Cafe"}
            ]
        })))
        .respond_with(completion_response(&concept_content()))
        .expect(1)
        .mount(&server)
        .await;

    let settings = AiSettings {
        openrouter_api_key: Some("or-key".to_string()),
        openrouter_base_url: server.uri(),
        site_url: "https://builder.example.com".to_string(),
        ..Default::default()
    };
    let provider = ChatCompletionProvider::openrouter(&settings);

    let completion = provider.complete(&request()).await.unwrap();
    assert_eq!(completion.content["concept"]["title"], "Joe's Cafe");
    assert_eq!(completion.usage.total_tokens, 1500);
}

#[tokio::test]
async fn test_provider_error_classification() {
    let server = MockServer::start().await;
    let provider = provider("openai", &server);

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    match provider.complete(&request()).await {
        Err(ProviderError::Status { status, body }) => {
            assert_eq!(status, 429);
            assert_eq!(body, "slow down");
        }
        other => panic!("unexpected result: {:?}", other.map(|c| c.content)),
    }

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    assert!(matches!(
        provider.complete(&request()).await,
        Err(ProviderError::InvalidBody(_))
    ));

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    assert!(matches!(
        provider.complete(&request()).await,
        Err(ProviderError::MissingContent)
    ));

    Mock::given(method("POST"))
        .respond_with(raw_completion_response("not json at all"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    let err = provider.complete(&request()).await.unwrap_err();
    assert!(err.is_content_error());
}

#[tokio::test]
async fn test_provider_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(completion_response(&concept_content()).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let provider = provider("openai", &server);
    let request = CompletionRequest {
        timeout: Duration::from_millis(50),
        ..request()
    };

    assert!(matches!(
        provider.complete(&request).await,
        Err(ProviderError::Timeout(_))
    ));
}

/// 未配置密钥的提供商被跳过，不发出请求
#[tokio::test]
async fn test_chain_skips_unconfigured_provider() {
    let unconfigured = MockServer::start().await;
    let configured = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(completion_response(&concept_content()))
        .expect(0)
        .mount(&unconfigured)
        .await;
    Mock::given(method("POST"))
        .respond_with(completion_response(&concept_content()))
        .expect(1)
        .mount(&configured)
        .await;

    let chain = ProviderChain::new(vec![
        Arc::new(ChatCompletionProvider::new_with_config(
            "openai",
            Some("  ".to_string()),
            "gpt-4".to_string(),
            unconfigured.uri(),
        )),
        provider("openrouter", &configured),
    ]);

    let success = chain
        .complete_with(&request(), |value: Value| Ok::<_, String>(value))
        .await
        .unwrap();
    assert_eq!(success.provider, "openrouter");
    assert_eq!(success.usage.total_tokens, 1500);
}

#[tokio::test]
async fn test_chain_without_keys_fails_without_attempts() {
    let chain = ProviderChain::from_settings(&AiSettings::default());
    assert!(!chain.has_configured_provider());

    let failure = chain
        .complete_with(&request(), |value: Value| Ok::<_, String>(value))
        .await
        .unwrap_err();
    assert!(failure.attempts.is_empty());
    assert!(!failure.is_parse_failure());
}
