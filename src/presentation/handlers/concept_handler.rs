// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::extract::{rejection::JsonRejection, Extension, Json};
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    application::dto::concept_response::ConceptResponseDto,
    domain::models::form_submission::FormSubmission,
    domain::services::concept_service::ConceptService,
    presentation::errors::{AppError, InvalidPayload},
};

/// 生成网站概念
///
/// 请求体为需求表单；成功时返回概念、是否命中缓存以及记录ID
pub async fn create_concept(
    Extension(service): Extension<Arc<ConceptService>>,
    payload: Result<Json<FormSubmission>, JsonRejection>,
) -> Result<Json<ConceptResponseDto>, AppError> {
    let Json(form) = payload.map_err(|e| {
        warn!("Rejected concept request body: {}", e);
        InvalidPayload
    })?;

    info!(
        "Concept requested for '{}' ({})",
        form.business_type.trim(),
        form.industry
    );

    let outcome = service.generate_concept(&form).await?;
    Ok(Json(outcome.into()))
}
