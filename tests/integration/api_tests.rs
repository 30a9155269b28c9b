// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{
    completion_response, concept_content, create_test_app, create_test_app_with_options,
    demo_content, mount_completion, TestAppOptions,
};
use axum::http::StatusCode;
use serde_json::{json, Value};
use wiremock::ResponseTemplate;

fn cafe_body() -> Value {
    json!({
        "businessType": "Joe's Cafe",
        "industry": "Restaurant & Food",
        "websiteType": "Business Website",
        "businessGoal": "Generate Leads",
        "features": ["Online Booking"]
    })
}

#[tokio::test]
async fn test_health_and_version() {
    let app = create_test_app().await;

    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "OK");

    let response = app.server.get("/v1/version").await;
    assert_eq!(response.text(), env!("CARGO_PKG_VERSION"));
}

/// 概念生成后再生成演示站点，记录ID贯穿两个请求
#[tokio::test]
async fn test_concept_then_demo_flow() {
    // Given: 首选提供商先返回概念，再返回演示站点
    let app = create_test_app().await;
    mount_completion(&app.primary, completion_response(&concept_content()), 1).await;

    // When: 生成概念
    let response = app.server.post("/v1/concepts").json(&cafe_body()).await;

    // Then: 返回概念与记录ID
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["cached"], false);
    assert_eq!(body["data"]["concept"]["title"], "Joe's Cafe");
    assert_eq!(body["data"]["wireframe"]["homepage"]["sections"][0]["type"], "navigation");
    let record_id = body["record_id"].as_i64().unwrap();

    // When: 相同请求再次提交
    let again: Value = app.server.post("/v1/concepts").json(&cafe_body()).await.json();
    assert_eq!(again["cached"], true);

    // When: 生成演示站点
    app.primary.reset().await;
    mount_completion(&app.primary, completion_response(&demo_content()), 1).await;
    let response = app
        .server
        .post("/v1/demos")
        .json(&json!({
            "concept": body["data"],
            "form_data": cafe_body(),
            "record_id": record_id
        }))
        .await;

    // Then: 演示站点可以通过静态路由访问
    assert_eq!(response.status_code(), StatusCode::OK);
    let demo: Value = response.json();
    assert_eq!(demo["success"], true);
    let demo_id = demo["demo_id"].as_str().unwrap();
    assert!(demo["demo_url"].as_str().unwrap().ends_with("/index.html"));

    let page = app.server.get(&format!("/demos/{}/index.html", demo_id)).await;
    assert_eq!(page.status_code(), StatusCode::OK);
    assert!(page.text().contains("Joe's Cafe"));

    let stats: Value = app.server.get("/v1/stats").await.json();
    assert_eq!(stats["data"]["total"], 1);
}

#[tokio::test]
async fn test_concept_validation_error() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/v1/concepts")
        .json(&json!({"businessType": "", "industry": "Consulting"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Business name and industry are required");
}

#[tokio::test]
async fn test_invalid_json_body() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/v1/concepts")
        .content_type("application/json")
        .text("{not json")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body, json!({"success": false, "error": "Invalid form data"}));
}

/// 所有提供商失败时返回统一的错误信息
#[tokio::test]
async fn test_provider_failure_envelope() {
    let app = create_test_app().await;
    mount_completion(&app.primary, ResponseTemplate::new(500), 1).await;
    mount_completion(&app.secondary, ResponseTemplate::new(500), 1).await;

    let response = app.server.post("/v1/concepts").json(&cafe_body()).await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({"success": false, "error": "Failed to generate concept with available AI models"})
    );
}

#[tokio::test]
async fn test_request_token_required() {
    let app = create_test_app_with_options(TestAppOptions {
        require_token: true,
        requests_per_hour: None,
    })
    .await;
    mount_completion(&app.primary, completion_response(&concept_content()), 1).await;

    // Given: 未携带令牌
    let response = app.server.post("/v1/concepts").json(&cafe_body()).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    // When: 通过令牌接口获取令牌
    let token: Value = app
        .server
        .get("/v1/token")
        .add_query_param("session", "session-42")
        .await
        .json();
    assert_eq!(token["session_id"], "session-42");
    assert_eq!(token["token"], app.issuer.issue("session-42"));

    // Then: 携带令牌的请求成功
    let response = app
        .server
        .post("/v1/concepts")
        .add_header("X-Session-Id", "session-42")
        .add_header("X-Request-Token", token["token"].as_str().unwrap())
        .json(&cafe_body())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_rate_limit_exceeded() {
    let app = create_test_app_with_options(TestAppOptions {
        require_token: false,
        requests_per_hour: Some(2),
    })
    .await;

    for _ in 0..2 {
        let response = app
            .server
            .post("/v1/concepts")
            .json(&json!({"businessType": ""}))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    let response = app
        .server
        .post("/v1/concepts")
        .json(&json!({"businessType": ""}))
        .await;
    assert_eq!(response.status_code(), StatusCode::TOO_MANY_REQUESTS);
    let body: Value = response.json();
    assert_eq!(body["success"], false);

    // status endpoints are not limited
    assert_eq!(app.server.get("/health").await.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_status_endpoint() {
    let app = create_test_app().await;

    let body: Value = app.server.get("/v1/status").await.json();

    assert_eq!(body["success"], true);
    assert_eq!(body["api_keys_configured"], true);
    assert_eq!(body["demo_dir_writable"], true);
    assert_eq!(body["caching_enabled"], true);
    assert_eq!(body["cache_ttl"], 3600);
    assert_eq!(body["default_provider"], "openai");
    assert_eq!(body["cache_stats"]["hits"], 0);
    assert_eq!(body["cache_hit_rate"], 0.0);
}

/// 状态接口反映缓存命中情况
#[tokio::test]
async fn test_status_reports_cache_hit_rate() {
    let app = create_test_app().await;
    mount_completion(&app.primary, completion_response(&concept_content()), 1).await;

    for _ in 0..2 {
        let response = app.server.post("/v1/concepts").json(&cafe_body()).await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }

    let body: Value = app.server.get("/v1/status").await.json();
    assert_eq!(body["cache_stats"]["hits"], 1);
    assert_eq!(body["cache_stats"]["misses"], 1);
    assert_eq!(body["cache_stats"]["stores"], 1);
    assert_eq!(body["cache_hit_rate"], 0.5);
}
