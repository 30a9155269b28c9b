// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::Utc;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::config::settings::AiSettings;
use crate::domain::models::concept::GeneratedConcept;
use crate::domain::models::demo::{DemoArtifact, DemoPublication};
use crate::domain::models::form_submission::FormSubmission;
use crate::domain::repositories::concept_record_repository::ConceptRecordRepository;
use crate::domain::repositories::storage_repository::DemoStorageRepository;
use crate::domain::services::concept_service::map_chain_failure;
use crate::domain::services::llm_service::{CompletionRequest, ProviderChain};
use crate::domain::services::prompt_builder::build_demo_prompt;
use crate::utils::errors::ConceptError;

const DEMO_ID_SUFFIX_LEN: usize = 8;

/// 演示站点生成服务
pub struct DemoService {
    chain: Arc<ProviderChain>,
    storage: Arc<dyn DemoStorageRepository>,
    records: Arc<dyn ConceptRecordRepository>,
    max_tokens: u32,
    timeout: Duration,
}

impl DemoService {
    pub fn new(
        chain: Arc<ProviderChain>,
        storage: Arc<dyn DemoStorageRepository>,
        records: Arc<dyn ConceptRecordRepository>,
        max_tokens: u32,
        timeout: Duration,
    ) -> Self {
        Self {
            chain,
            storage,
            records,
            max_tokens,
            timeout,
        }
    }

    pub fn from_settings(
        chain: Arc<ProviderChain>,
        storage: Arc<dyn DemoStorageRepository>,
        records: Arc<dyn ConceptRecordRepository>,
        settings: &AiSettings,
    ) -> Self {
        Self::new(
            chain,
            storage,
            records,
            settings.demo_max_tokens,
            Duration::from_secs(settings.demo_timeout_secs),
        )
    }

    /// 生成并发布演示站点
    ///
    /// 提供了记录ID时，将演示URL补充到该记录上（失败只记录日志）
    pub async fn generate_demo(
        &self,
        concept: &GeneratedConcept,
        form: &FormSubmission,
        record_id: Option<i64>,
    ) -> Result<DemoPublication, ConceptError> {
        let request = CompletionRequest {
            prompt: build_demo_prompt(concept, form),
            max_tokens: self.max_tokens,
            timeout: self.timeout,
        };

        let success = self
            .chain
            .complete_with(&request, DemoArtifact::from_value)
            .await
            .map_err(|failure| {
                let err = map_chain_failure(&failure);
                error!("Demo generation failed: {}", err);
                ConceptError::DemoGeneration(err.to_string())
            })?;

        let demo_id = generate_demo_id();
        self.storage
            .publish(&demo_id, &success.value)
            .await
            .map_err(|e| {
                error!("Failed to publish demo {}: {}", demo_id, e);
                ConceptError::Storage(e.to_string())
            })?;

        let demo_url = self.storage.public_url(&demo_id);
        metrics::counter!("demos_generated_total").increment(1);
        info!("Published demo {} via {}", demo_id, success.provider);

        if let Some(id) = record_id {
            if let Err(e) = self.records.attach_demo_url(id, &demo_url).await {
                warn!("Failed to attach demo url to record {}: {}", id, e);
            }
        }

        Ok(DemoPublication { demo_id, demo_url })
    }
}

/// 生成演示ID：`demo_<unix秒>_<8位字母数字>`
pub fn generate_demo_id() -> String {
    let suffix: String = rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(DEMO_ID_SUFFIX_LEN)
        .map(char::from)
        .collect();
    format!("demo_{}_{}", Utc::now().timestamp(), suffix)
}
