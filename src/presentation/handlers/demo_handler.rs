// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::extract::{rejection::JsonRejection, Extension, Json};
use std::sync::Arc;
use tracing::warn;

use crate::{
    application::dto::{demo_request::DemoRequestDto, demo_response::DemoResponseDto},
    domain::services::demo_service::DemoService,
    presentation::errors::{AppError, InvalidPayload},
};

/// 根据已生成的概念生成演示站点
pub async fn create_demo(
    Extension(service): Extension<Arc<DemoService>>,
    payload: Result<Json<DemoRequestDto>, JsonRejection>,
) -> Result<Json<DemoResponseDto>, AppError> {
    let Json(request) = payload.map_err(|e| {
        warn!("Rejected demo request body: {}", e);
        InvalidPayload
    })?;

    let publication = service
        .generate_demo(&request.concept, &request.form_data, request.record_id)
        .await?;

    Ok(Json(publication.into()))
}
