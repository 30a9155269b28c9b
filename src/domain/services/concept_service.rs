// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::config::settings::{AiSettings, CacheSettings};
use crate::domain::models::concept::{AiConceptPayload, ConceptOutcome, GeneratedConcept};
use crate::domain::models::form_submission::FormSubmission;
use crate::domain::repositories::concept_record_repository::ConceptRecordRepository;
use crate::domain::services::insight_service::InsightGenerator;
use crate::domain::services::llm_service::{ChainFailure, CompletionRequest, ProviderChain};
use crate::domain::services::prompt_builder::build_concept_prompt;
use crate::domain::services::wireframe_service::WireframeGenerator;
use crate::infrastructure::cache::cache_manager::CacheManager;
use crate::utils::errors::{ConceptError, VALIDATION_FAILED};

/// 概念服务配置
#[derive(Debug, Clone)]
pub struct ConceptServiceConfig {
    pub caching_enabled: bool,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl ConceptServiceConfig {
    pub fn from_settings(ai: &AiSettings, cache: &CacheSettings) -> Self {
        Self {
            caching_enabled: cache.enabled,
            max_tokens: ai.concept_max_tokens,
            timeout: Duration::from_secs(ai.concept_timeout_secs),
        }
    }
}

impl Default for ConceptServiceConfig {
    fn default() -> Self {
        Self::from_settings(&AiSettings::default(), &CacheSettings::default())
    }
}

/// 概念生成服务
///
/// 校验 → 查缓存 → 构建提示词 → 提供商回退链 → 合并线框图与派生指标 → 写缓存 → 追加记录
pub struct ConceptService {
    chain: Arc<ProviderChain>,
    cache: Option<Arc<CacheManager>>,
    records: Arc<dyn ConceptRecordRepository>,
    config: ConceptServiceConfig,
}

impl ConceptService {
    pub fn new(
        chain: Arc<ProviderChain>,
        cache: Option<Arc<CacheManager>>,
        records: Arc<dyn ConceptRecordRepository>,
        config: ConceptServiceConfig,
    ) -> Self {
        Self {
            chain,
            cache,
            records,
            config,
        }
    }

    /// 缓存是否启用（需同时开启配置并提供缓存管理器）
    pub fn caching_enabled(&self) -> bool {
        self.config.caching_enabled && self.cache.is_some()
    }

    /// 生成网站概念
    ///
    /// # 参数
    ///
    /// * `form` - 客户提交的需求表单
    ///
    /// # 返回值
    ///
    /// * `Ok(ConceptOutcome)` - 生成或命中缓存的概念
    /// * `Err(ConceptError)` - 校验失败或所有提供商均失败
    pub async fn generate_concept(&self, form: &FormSubmission) -> Result<ConceptOutcome, ConceptError> {
        if form.validate().is_err() {
            return Err(ConceptError::Validation(VALIDATION_FAILED.to_string()));
        }

        let cache_key = self.active_cache().map(|_| CacheManager::generate_cache_key(form));

        if let (Some(cache), Some(key)) = (self.active_cache(), cache_key.as_deref()) {
            match cache.get(key).await {
                Ok(Some(concept)) => {
                    debug!("Concept cache hit: {}", key);
                    metrics::counter!("concept_cache_hits_total").increment(1);
                    return Ok(ConceptOutcome {
                        concept,
                        cached: true,
                        record_id: None,
                    });
                }
                Ok(None) => {
                    metrics::counter!("concept_cache_misses_total").increment(1);
                }
                Err(e) => {
                    warn!("Concept cache lookup failed, treating as miss: {}", e);
                    metrics::counter!("concept_cache_misses_total").increment(1);
                }
            }
        }

        let request = CompletionRequest {
            prompt: build_concept_prompt(form),
            max_tokens: self.config.max_tokens,
            timeout: self.config.timeout,
        };

        let success = self
            .chain
            .complete_with(&request, AiConceptPayload::from_value)
            .await
            .map_err(|failure| map_chain_failure(&failure))?;

        let suggestions = InsightGenerator::industry_suggestions(&form.industry);
        let concept = success.value.into_concept(
            WireframeGenerator::generate(form),
            InsightGenerator::derive(form),
            &suggestions,
            &success.provider,
        );

        if let (Some(cache), Some(key)) = (self.active_cache(), cache_key.as_deref()) {
            if let Err(e) = cache.set(key, &concept).await {
                warn!("Failed to cache concept {}: {}", key, e);
            }
        }

        let record_id = self.persist(form, &concept).await;

        metrics::counter!("concepts_generated_total", "provider" => success.provider.clone()).increment(1);
        info!(
            "Generated concept '{}' via {} ({})",
            concept.concept.title, success.provider, success.model
        );

        Ok(ConceptOutcome {
            concept,
            cached: false,
            record_id,
        })
    }

    /// 启用时的缓存
    pub fn active_cache(&self) -> Option<&Arc<CacheManager>> {
        if self.config.caching_enabled {
            self.cache.as_ref()
        } else {
            None
        }
    }

    /// 持久化失败只记录日志
    async fn persist(&self, form: &FormSubmission, concept: &GeneratedConcept) -> Option<i64> {
        match self.records.append(form, concept).await {
            Ok(id) => Some(id),
            Err(e) => {
                let err = ConceptError::Persistence(e.to_string());
                warn!("Failed to persist concept record: {}", err);
                None
            }
        }
    }
}

/// 提供商链失败映射为对外错误
pub(crate) fn map_chain_failure(failure: &ChainFailure) -> ConceptError {
    if failure.attempts.is_empty() {
        return ConceptError::AiProvider("no AI provider is configured".to_string());
    }

    let detail = failure
        .attempts
        .iter()
        .map(|(provider, e)| format!("{}: {}", provider, e))
        .collect::<Vec<_>>()
        .join("; ");

    if failure.is_parse_failure() {
        ConceptError::Parse(detail)
    } else {
        ConceptError::AiProvider(detail)
    }
}
