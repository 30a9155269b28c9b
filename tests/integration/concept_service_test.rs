// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{
    cafe_form, chain, completion_response, concept_content, memory_cache, mount_completion,
    raw_completion_response, service_config, setup_db,
};
use conceptrs::domain::models::form_submission::FormSubmission;
use conceptrs::domain::models::wireframe::SectionType;
use conceptrs::domain::repositories::concept_record_repository::ConceptRecordRepository;
use conceptrs::domain::services::concept_service::{ConceptService, ConceptServiceConfig};
use conceptrs::domain::services::prompt_builder::build_concept_prompt;
use conceptrs::infrastructure::cache::cache_manager::CacheManager;
use conceptrs::infrastructure::repositories::concept_record_repo_impl::ConceptRecordRepositoryImpl;
use conceptrs::utils::errors::ConceptError;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use wiremock::{MockServer, ResponseTemplate};

async fn build_service(
    primary: &MockServer,
    secondary: &MockServer,
) -> (ConceptService, Arc<CacheManager>, Arc<ConceptRecordRepositoryImpl>) {
    let db = setup_db().await;
    let records = Arc::new(ConceptRecordRepositoryImpl::new(db));
    let cache = memory_cache();
    let service = ConceptService::new(
        chain(primary, secondary),
        Some(cache.clone()),
        records.clone(),
        service_config(),
    );
    (service, cache, records)
}

/// 首选提供商超时后回退到次选提供商，提示词不变
#[tokio::test]
async fn test_primary_timeout_falls_back_to_secondary() {
    // Given: 首选提供商响应慢于请求超时
    let primary = MockServer::start().await;
    let secondary = MockServer::start().await;
    mount_completion(
        &primary,
        completion_response(&concept_content()).set_delay(Duration::from_secs(3)),
        1,
    )
    .await;
    mount_completion(&secondary, completion_response(&concept_content()), 1).await;

    let records = Arc::new(ConceptRecordRepositoryImpl::new(setup_db().await));
    let service = ConceptService::new(
        chain(&primary, &secondary),
        Some(memory_cache()),
        records,
        ConceptServiceConfig {
            timeout: Duration::from_millis(300),
            ..service_config()
        },
    );

    // When: 生成概念
    let form = cafe_form();
    let outcome = service.generate_concept(&form).await.unwrap();

    // Then: 结果来自次选提供商，且其收到的提示词与首选相同
    assert_eq!(outcome.concept.provider, "openrouter");
    let user_prompt = |request: &wiremock::Request| -> String {
        let body: Value = serde_json::from_slice(&request.body).unwrap();
        body["messages"][1]["content"].as_str().unwrap().to_string()
    };
    let primary_requests = primary.received_requests().await.unwrap();
    let secondary_requests = secondary.received_requests().await.unwrap();
    assert_eq!(secondary_requests.len(), 1);
    assert_eq!(user_prompt(&secondary_requests[0]), build_concept_prompt(&form));
    assert_eq!(user_prompt(&primary_requests[0]), user_prompt(&secondary_requests[0]));
}

/// 首选提供商失败时回退到次选提供商，且两次请求的提示词相同
#[tokio::test]
async fn test_fallback_to_secondary_provider() {
    // Given: 首选提供商返回 500，次选提供商返回合法概念
    let primary = MockServer::start().await;
    let secondary = MockServer::start().await;
    mount_completion(&primary, ResponseTemplate::new(500), 1).await;
    mount_completion(&secondary, completion_response(&concept_content()), 1).await;
    let (service, _cache, records) = build_service(&primary, &secondary).await;

    // When: 生成概念
    let outcome = service.generate_concept(&cafe_form()).await.unwrap();

    // Then: 由次选提供商生成，合并了线框图与派生指标
    assert!(!outcome.cached);
    assert_eq!(outcome.concept.provider, "openrouter");
    assert_eq!(outcome.concept.concept.title, "Joe's Cafe");
    assert_eq!(outcome.concept.seo_score, 92);
    assert_eq!(outcome.concept.performance_score, 88);
    assert_eq!(outcome.concept.color_scheme.primary, "#8b4513");
    assert!(!outcome.concept.color_scheme.accent.is_empty());

    let sections = &outcome.concept.wireframe.homepage.sections;
    assert_eq!(sections.first().unwrap().section_type, SectionType::Navigation);
    assert_eq!(sections.last().unwrap().section_type, SectionType::Footer);
    assert!(sections.iter().any(|s| s.section_type == SectionType::LeadForm));
    assert_eq!(outcome.concept.cost_breakdown.total_estimated, 6_400);

    // Then: 两个提供商收到的用户提示词相同
    let prompt_of = |requests: Vec<wiremock::Request>| -> String {
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        body["messages"][1]["content"].as_str().unwrap().to_string()
    };
    let first = prompt_of(primary.received_requests().await.unwrap());
    let second = prompt_of(secondary.received_requests().await.unwrap());
    assert_eq!(first, second);
    assert!(first.contains("- Business: Joe's Cafe"));

    // Then: 记录已持久化
    let record_id = outcome.record_id.expect("record id");
    let record = records.find_by_id(record_id).await.unwrap().unwrap();
    assert_eq!(record.concept_data["concept"]["title"], "Joe's Cafe");
    assert_eq!(record.form_data["businessType"], "Joe's Cafe");
}

/// 两个提供商都失败时返回错误且不写缓存
#[tokio::test]
async fn test_all_providers_fail() {
    let primary = MockServer::start().await;
    let secondary = MockServer::start().await;
    mount_completion(&primary, ResponseTemplate::new(503), 1).await;
    mount_completion(&secondary, ResponseTemplate::new(401), 1).await;
    let (service, cache, records) = build_service(&primary, &secondary).await;

    let form = cafe_form();
    let err = service.generate_concept(&form).await.unwrap_err();

    assert!(matches!(err, ConceptError::AiProvider(_)));
    assert_eq!(
        err.public_message(),
        "Failed to generate concept with available AI models"
    );
    let key = CacheManager::generate_cache_key(&form);
    assert!(cache.get(&key).await.unwrap().is_none());
    assert_eq!(cache.get_stats().stores, 0);
    assert_eq!(records.stats(chrono::Utc::now()).await.unwrap().total, 0);
}

/// 相同表单第二次提交命中缓存，不调用提供商
#[tokio::test]
async fn test_identical_submission_is_served_from_cache() {
    let primary = MockServer::start().await;
    let secondary = MockServer::start().await;
    mount_completion(&primary, completion_response(&concept_content()), 1).await;
    mount_completion(&secondary, completion_response(&concept_content()), 0).await;
    let (service, cache, _records) = build_service(&primary, &secondary).await;

    let first = service.generate_concept(&cafe_form()).await.unwrap();
    assert!(!first.cached);

    // 功能顺序不同、附带时间戳，仍是同一份需求
    let mut reordered: FormSubmission = cafe_form();
    reordered.features = ["Blog System", "Online Booking"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let second = service.generate_concept(&reordered).await.unwrap();

    assert!(second.cached);
    assert!(second.record_id.is_none());
    assert_eq!(second.concept, first.concept);
    assert_eq!(cache.get_stats().hits, 1);
    assert_eq!(primary.received_requests().await.unwrap().len(), 1);
}

/// 两个提供商都返回无法解析的内容时为解析错误，且不写缓存
#[tokio::test]
async fn test_malformed_output_is_not_cached() {
    let primary = MockServer::start().await;
    let secondary = MockServer::start().await;
    mount_completion(&primary, raw_completion_response("Sure! Here is your concept."), 1).await;
    mount_completion(
        &secondary,
        raw_completion_response(r#"{"colorScheme": {}, "features": {}}"#),
        1,
    )
    .await;
    let (service, cache, _records) = build_service(&primary, &secondary).await;

    let form = cafe_form();
    let err = service.generate_concept(&form).await.unwrap_err();

    assert!(matches!(err, ConceptError::Parse(_)));
    assert!(cache
        .get(&CacheManager::generate_cache_key(&form))
        .await
        .unwrap()
        .is_none());
}

/// 缺少必填字段时不调用提供商
#[tokio::test]
async fn test_validation_rejects_blank_business() {
    let primary = MockServer::start().await;
    let secondary = MockServer::start().await;
    mount_completion(&primary, completion_response(&concept_content()), 0).await;
    let (service, _cache, _records) = build_service(&primary, &secondary).await;

    let mut form = cafe_form();
    form.business_type = "   ".to_string();

    let err = service.generate_concept(&form).await.unwrap_err();
    assert!(matches!(err, ConceptError::Validation(_)));
    assert_eq!(err.public_message(), "Business name and industry are required");
}
