// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::utils::errors::{ConceptError, RepositoryError};

/// 请求体无法解析
#[derive(Error, Debug)]
#[error("Invalid form data")]
pub struct InvalidPayload;

/// 应用错误类型
///
/// 封装所有可能的应用层错误，统一输出 `{success: false, error}`
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        if let Some(err) = self.0.downcast_ref::<ConceptError>() {
            let status = match err {
                ConceptError::Validation(_) => StatusCode::BAD_REQUEST,
                ConceptError::AiProvider(_)
                | ConceptError::Parse(_)
                | ConceptError::DemoGeneration(_) => StatusCode::BAD_GATEWAY,
                ConceptError::Storage(_) | ConceptError::Persistence(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            return (status, err.public_message());
        }

        if self.0.downcast_ref::<InvalidPayload>().is_some() {
            return (StatusCode::BAD_REQUEST, InvalidPayload.to_string());
        }

        match self.0.downcast_ref::<RepositoryError>() {
            Some(RepositoryError::NotFound) => (StatusCode::NOT_FOUND, "Not found".to_string()),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            error!("Request failed: {:#}", self.0);
        }

        let body = Json(json!({ "success": false, "error": message }));
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
