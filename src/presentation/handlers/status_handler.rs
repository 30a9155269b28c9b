// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::extract::{Extension, Json, Query};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    application::dto::status_response::{StatsResponseDto, StatusResponseDto, TokenResponseDto},
    config::settings::Settings,
    domain::repositories::{
        concept_record_repository::ConceptRecordRepository,
        storage_repository::DemoStorageRepository,
    },
    domain::services::concept_service::ConceptService,
    presentation::errors::AppError,
    presentation::middleware::auth_middleware::RequestTokenIssuer,
};

/// 健康检查端点
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// 服务状态：密钥配置、演示目录、缓存设置
pub async fn status(
    Extension(settings): Extension<Arc<Settings>>,
    Extension(concepts): Extension<Arc<ConceptService>>,
    Extension(storage): Extension<Arc<dyn DemoStorageRepository>>,
) -> Json<StatusResponseDto> {
    let cache = concepts.active_cache();

    Json(StatusResponseDto {
        success: true,
        api_keys_configured: settings.ai.has_any_api_key(),
        demo_dir_writable: storage.is_writable().await,
        caching_enabled: concepts.caching_enabled(),
        cache_ttl: settings.cache.effective_ttl().as_secs(),
        cache_stats: cache.map(|c| c.get_stats()),
        cache_hit_rate: cache.map(|c| c.get_hit_rate()),
        default_provider: settings.ai.default_provider.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// 概念统计：总数、当天、当月
pub async fn stats(
    Extension(records): Extension<Arc<dyn ConceptRecordRepository>>,
) -> Result<Json<StatsResponseDto>, AppError> {
    let data = records.stats(Utc::now()).await?;
    Ok(Json(StatsResponseDto {
        success: true,
        data,
    }))
}

#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    pub session: Option<String>,
}

/// 签发请求令牌，未提供会话ID时生成一个新的
pub async fn issue_token(
    Extension(issuer): Extension<Arc<RequestTokenIssuer>>,
    Query(query): Query<TokenQuery>,
) -> Json<TokenResponseDto> {
    let session_id = query
        .session
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    Json(TokenResponseDto {
        success: true,
        token: issuer.issue(&session_id),
        session_id,
    })
}
