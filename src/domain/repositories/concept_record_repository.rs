// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::models::concept::GeneratedConcept;
use crate::domain::models::concept_record::{ConceptRecord, ConceptStats};
use crate::domain::models::form_submission::FormSubmission;
use crate::utils::errors::RepositoryError;

/// 概念记录仓库特质
///
/// 只追加；唯一的更新操作是补充演示站点URL
#[async_trait]
pub trait ConceptRecordRepository: Send + Sync {
    /// 追加一条记录，返回记录ID
    async fn append(
        &self,
        form: &FormSubmission,
        concept: &GeneratedConcept,
    ) -> Result<i64, RepositoryError>;

    /// 为已有记录补充演示站点URL
    async fn attach_demo_url(&self, id: i64, demo_url: &str) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<ConceptRecord>, RepositoryError>;

    /// 统计记录数量（总数、当天、当月，按UTC计算）
    async fn stats(&self, now: DateTime<Utc>) -> Result<ConceptStats, RepositoryError>;
}
