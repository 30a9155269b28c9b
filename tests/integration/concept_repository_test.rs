// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{cafe_form, concept_content, setup_db};
use chrono::{Duration, TimeZone, Utc};
use conceptrs::domain::models::concept::AiConceptPayload;
use conceptrs::domain::repositories::concept_record_repository::ConceptRecordRepository;
use conceptrs::domain::services::insight_service::InsightGenerator;
use conceptrs::domain::services::wireframe_service::WireframeGenerator;
use conceptrs::infrastructure::database::entities::generated_concept;
use conceptrs::infrastructure::repositories::concept_record_repo_impl::ConceptRecordRepositoryImpl;
use conceptrs::utils::errors::RepositoryError;
use sea_orm::{ActiveModelTrait, Set};

fn concept() -> conceptrs::domain::models::concept::GeneratedConcept {
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

#[tokio::test]
async fn test_append_and_find() {
    let repo = ConceptRecordRepositoryImpl::new(setup_db().await);

    let first = repo.append(&cafe_form(), &concept()).await.unwrap();
    let second = repo.append(&cafe_form(), &concept()).await.unwrap();
    assert!(second > first);

    let record = repo.find_by_id(first).await.unwrap().unwrap();
    assert_eq!(record.id, first);
    assert_eq!(record.form_data["industry"], "Restaurant & Food");
    assert_eq!(record.concept_data["provider"], "openai");
    assert!(record.demo_url.is_none());

    assert!(repo.find_by_id(9999).await.unwrap().is_none());
}

#[tokio::test]
async fn test_attach_demo_url() {
    let repo = ConceptRecordRepositoryImpl::new(setup_db().await);
    let id = repo.append(&cafe_form(), &concept()).await.unwrap();

    repo.attach_demo_url(id, "http://localhost/demos/demo_1_abcdefgh/index.html")
        .await
        .unwrap();
    let record = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(
        record.demo_url.as_deref(),
        Some("http://localhost/demos/demo_1_abcdefgh/index.html")
    );

    let err = repo.attach_demo_url(id + 100, "x").await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound));
}

#[tokio::test]
async fn test_stats_by_day_and_month() {
    // Given: 一条当天记录、一条本月早些时候的记录、一条上个月的记录
    let db = setup_db().await;
    let repo = ConceptRecordRepositoryImpl::new(db.clone());
    let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();

    for created_at in [
        now - Duration::hours(2),
        now - Duration::days(10),
        now - Duration::days(40),
    ] {
        generated_concept::ActiveModel {
            form_data: Set(serde_json::to_value(cafe_form()).unwrap()),
            concept_data: Set(serde_json::to_value(concept()).unwrap()),
            demo_url: Set(None),
            created_at: Set(created_at.into()),
            ..Default::default()
        }
        .insert(db.as_ref())
        .await
        .unwrap();
    }

    // When: 统计
    let stats = repo.stats(now).await.unwrap();

    // Then: 总数 3，当天 1，当月 2
    assert_eq!(stats.total, 3);
    assert_eq!(stats.today, 1);
    assert_eq!(stats.this_month, 2);
}
