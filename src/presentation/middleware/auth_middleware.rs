// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use std::sync::Arc;
use tracing::{debug, warn};

type HmacSha256 = Hmac<Sha256>;

/// 会话ID请求头
pub const SESSION_HEADER: &str = "x-session-id";
/// 请求令牌请求头
pub const TOKEN_HEADER: &str = "x-request-token";

/// 请求令牌签发器
///
/// 令牌为会话ID在配置密钥下的 HMAC-SHA256（十六进制）
pub struct RequestTokenIssuer {
    mac: HmacSha256,
}

impl RequestTokenIssuer {
    pub fn new(secret: &str) -> anyhow::Result<Self> {
        let mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|e| anyhow::anyhow!("invalid request secret: {}", e))?;
        Ok(Self { mac })
    }

    /// 为会话签发令牌
    pub fn issue(&self, session_id: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(session_id.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// 常量时间校验令牌
    pub fn verify(&self, session_id: &str, token: &str) -> bool {
        let Ok(expected) = hex::decode(token.trim()) else {
            return false;
        };

        let mut mac = self.mac.clone();
        mac.update(session_id.as_bytes());
        mac.verify_slice(&expected).is_ok()
    }
}

/// 请求令牌中间件
///
/// 生成类接口要求 `X-Session-Id` 与 `X-Request-Token` 两个请求头
pub async fn auth_middleware(
    State(issuer): State<Arc<RequestTokenIssuer>>,
    req: Request,
    next: Next,
) -> Response {
    debug!("AuthMiddleware processing path: {}", req.uri().path());

    // Owned copies so no borrow of the request is held across `next.run`
    let credentials = {
        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };
        (header(SESSION_HEADER), header(TOKEN_HEADER))
    };

    match credentials {
        (Some(session_id), Some(token)) if issuer.verify(&session_id, &token) => {
            next.run(req).await
        }
        (Some(session_id), Some(_)) => {
            warn!("Rejected invalid request token for session {}", session_id);
            unauthorized("Security check failed")
        }
        _ => unauthorized("Missing request token"),
    }
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "success": false, "error": message })),
    )
        .into_response()
}

#[cfg(test)]
#[path = "auth_middleware_test.rs"]
mod tests;
