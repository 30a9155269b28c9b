// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{
    cafe_form, chain, completion_response, concept_content, demo_content, mount_completion,
    raw_completion_response, setup_db,
};
use conceptrs::domain::models::concept::{AiConceptPayload, GeneratedConcept};
use conceptrs::domain::repositories::concept_record_repository::ConceptRecordRepository;
use conceptrs::domain::services::demo_service::DemoService;
use conceptrs::domain::services::insight_service::InsightGenerator;
use conceptrs::domain::services::wireframe_service::WireframeGenerator;
use conceptrs::infrastructure::repositories::concept_record_repo_impl::ConceptRecordRepositoryImpl;
use conceptrs::infrastructure::storage::LocalDemoStorage;
use conceptrs::utils::errors::ConceptError;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use wiremock::{MockServer, ResponseTemplate};

fn cafe_concept() -> GeneratedConcept {
    let form = cafe_form();
    AiConceptPayload::from_value(concept_content())
        .unwrap()
        .into_concept(
            WireframeGenerator::generate(&form),
            InsightGenerator::derive(&form),
            &InsightGenerator::industry_suggestions(&form.industry),
            "openai",
        )
}

/// 生成演示站点：写入三个文件并补充记录的演示URL
#[tokio::test]
async fn test_generate_demo_publishes_files_and_attaches_url() {
    // Given: 首选提供商返回演示站点内容，已有一条概念记录
    let primary = MockServer::start().await;
    let secondary = MockServer::start().await;
    mount_completion(&primary, completion_response(&demo_content()), 1).await;

    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(LocalDemoStorage::new(dir.path(), "http://localhost:3000/demos"));
    let records = Arc::new(ConceptRecordRepositoryImpl::new(setup_db().await));
    let record_id = records.append(&cafe_form(), &cafe_concept()).await.unwrap();

    let service = DemoService::new(
        chain(&primary, &secondary),
        storage,
        records.clone(),
        8_000,
        Duration::from_secs(5),
    );

    // When: 生成演示站点
    let publication = service
        .generate_demo(&cafe_concept(), &cafe_form(), Some(record_id))
        .await
        .unwrap();

    // Then: 文件已发布，URL 指向入口页
    assert!(publication.demo_id.starts_with("demo_"));
    assert_eq!(
        publication.demo_url,
        format!("http://localhost:3000/demos/{}/index.html", publication.demo_id)
    );
    let demo_dir = dir.path().join(&publication.demo_id);
    let html = std::fs::read_to_string(demo_dir.join("index.html")).unwrap();
    assert!(html.contains("Joe's Cafe"));
    assert_eq!(
        std::fs::read_to_string(demo_dir.join("script.js")).unwrap(),
        "console.log('ready');"
    );

    // Then: 演示请求使用更大的令牌上限，并携带配色
    let requests = primary.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["max_tokens"], 8_000);
    assert!(body["messages"][1]["content"].as_str().unwrap().contains("#8b4513"));

    // Then: 记录已补充演示URL
    let record = records.find_by_id(record_id).await.unwrap().unwrap();
    assert_eq!(record.demo_url.as_deref(), Some(publication.demo_url.as_str()));
}

/// 演示内容缺少 html 时回退，全部失败则不写入任何文件
#[tokio::test]
async fn test_generate_demo_without_html_fails() {
    let primary = MockServer::start().await;
    let secondary = MockServer::start().await;
    mount_completion(&primary, raw_completion_response(r#"{"css": "body{}"}"#), 1).await;
    mount_completion(&secondary, ResponseTemplate::new(500), 1).await;

    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(LocalDemoStorage::new(dir.path(), "http://localhost:3000/demos"));
    let records = Arc::new(ConceptRecordRepositoryImpl::new(setup_db().await));
    let service = DemoService::new(
        chain(&primary, &secondary),
        storage,
        records,
        8_000,
        Duration::from_secs(5),
    );

    let err = service
        .generate_demo(&cafe_concept(), &cafe_form(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, ConceptError::DemoGeneration(_)));
    assert_eq!(err.public_message(), "Failed to generate demo");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

/// 演示目录不可写时返回存储错误
#[tokio::test]
async fn test_generate_demo_storage_failure() {
    let primary = MockServer::start().await;
    let secondary = MockServer::start().await;
    mount_completion(&primary, completion_response(&demo_content()), 1).await;

    // A regular file where the demo directory should be
    let dir = tempfile::tempdir().unwrap();
    let blocked = dir.path().join("demos");
    std::fs::write(&blocked, b"not a directory").unwrap();

    let storage = Arc::new(LocalDemoStorage::new(&blocked, "http://localhost:3000/demos"));
    let records = Arc::new(ConceptRecordRepositoryImpl::new(setup_db().await));
    let service = DemoService::new(
        chain(&primary, &secondary),
        storage,
        records,
        8_000,
        Duration::from_secs(5),
    );

    let err = service
        .generate_demo(&cafe_concept(), &cafe_form(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, ConceptError::Storage(_)));
    assert_eq!(err.public_message(), "Failed to generate demo");
}

/// 记录不存在时补充URL失败只记录日志，演示仍然成功
#[tokio::test]
async fn test_generate_demo_with_unknown_record() {
    let primary = MockServer::start().await;
    let secondary = MockServer::start().await;
    mount_completion(&primary, completion_response(&demo_content()), 1).await;

    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(LocalDemoStorage::new(dir.path(), "http://localhost:3000/demos"));
    let records = Arc::new(ConceptRecordRepositoryImpl::new(setup_db().await));
    let service = DemoService::new(
        chain(&primary, &secondary),
        storage,
        records,
        8_000,
        Duration::from_secs(5),
    );

    let publication = service
        .generate_demo(&cafe_concept(), &cafe_form(), Some(4242))
        .await
        .unwrap();
    assert!(dir.path().join(&publication.demo_id).join("index.html").exists());
}
