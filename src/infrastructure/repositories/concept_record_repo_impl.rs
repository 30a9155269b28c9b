// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chrono::{DateTime, Datelike, FixedOffset, TimeZone, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::*;
use std::sync::Arc;

use crate::domain::models::concept::GeneratedConcept;
use crate::domain::models::concept_record::{ConceptRecord, ConceptStats};
use crate::domain::models::form_submission::FormSubmission;
use crate::domain::repositories::concept_record_repository::ConceptRecordRepository;
use crate::infrastructure::database::entities::generated_concept;
use crate::utils::errors::RepositoryError;

/// 概念记录仓库实现
#[derive(Clone)]
pub struct ConceptRecordRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl ConceptRecordRepositoryImpl {
    /// 创建新的概念记录仓库实现
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn count_since(&self, start: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let start: DateTime<FixedOffset> = start.into();
        let count = generated_concept::Entity::find()
            .filter(generated_concept::Column::CreatedAt.gte(start))
            .count(self.db.as_ref())
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl ConceptRecordRepository for ConceptRecordRepositoryImpl {
    async fn append(
        &self,
        form: &FormSubmission,
        concept: &GeneratedConcept,
    ) -> Result<i64, RepositoryError> {
        let active_model = generated_concept::ActiveModel {
            form_data: Set(serde_json::to_value(form)?),
            concept_data: Set(serde_json::to_value(concept)?),
            demo_url: Set(None),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let result = generated_concept::Entity::insert(active_model)
            .exec(self.db.as_ref())
            .await?;

        Ok(result.last_insert_id)
    }

    async fn attach_demo_url(&self, id: i64, demo_url: &str) -> Result<(), RepositoryError> {
        let result = generated_concept::Entity::update_many()
            .col_expr(generated_concept::Column::DemoUrl, Expr::value(demo_url))
            .filter(generated_concept::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ConceptRecord>, RepositoryError> {
        let model = generated_concept::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn stats(&self, now: DateTime<Utc>) -> Result<ConceptStats, RepositoryError> {
        let total = generated_concept::Entity::find()
            .count(self.db.as_ref())
            .await?;

        let start_of_day = Utc.from_utc_datetime(&now.date_naive().and_time(chrono::NaiveTime::MIN));
        let start_of_month = now
            .date_naive()
            .with_day(1)
            .map(|d| Utc.from_utc_datetime(&d.and_time(chrono::NaiveTime::MIN)))
            .unwrap_or(start_of_day);

        Ok(ConceptStats {
            total,
            today: self.count_since(start_of_day).await?,
            this_month: self.count_since(start_of_month).await?,
        })
    }
}

impl From<generated_concept::Model> for ConceptRecord {
    fn from(model: generated_concept::Model) -> Self {
        Self {
            id: model.id,
            form_data: model.form_data,
            concept_data: model.concept_data,
            demo_url: model.demo_url,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
