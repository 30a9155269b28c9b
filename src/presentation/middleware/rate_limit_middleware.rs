// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use serde_json::json;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::settings::RateLimitingSettings;

/// 按客户端IP的速率限制器
pub struct ClientRateLimiter {
    limiter: DefaultKeyedRateLimiter<IpAddr>,
    requests_per_hour: u32,
}

impl ClientRateLimiter {
    /// 每个客户端每小时最多 `requests_per_hour` 次请求（最少1次）
    pub fn new(requests_per_hour: u32) -> Self {
        let per_hour = NonZeroU32::new(requests_per_hour).unwrap_or(NonZeroU32::MIN);
        Self::with_quota(Quota::per_hour(per_hour), per_hour.get())
    }

    fn with_quota(quota: Quota, requests_per_hour: u32) -> Self {
        Self {
            limiter: RateLimiter::keyed(quota),
            requests_per_hour,
        }
    }

    pub fn from_settings(settings: &RateLimitingSettings) -> Option<Arc<Self>> {
        settings
            .enabled
            .then(|| Arc::new(Self::new(settings.requests_per_hour)))
    }

    /// 消耗一次配额，超出时返回 false
    pub fn check(&self, client: IpAddr) -> bool {
        self.limiter.check_key(&client).is_ok()
    }

    pub fn requests_per_hour(&self) -> u32 {
        self.requests_per_hour
    }

    /// 当前跟踪的客户端数量
    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }

    /// 丢弃配额已完全恢复的客户端状态
    pub fn prune(&self) {
        let before = self.limiter.len();
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
        debug!(before, after = self.limiter.len(), "Pruned rate limiter state");
    }

    /// 后台定期清理
    pub fn start_pruning(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        info!("Rate limiter pruning every {:?}", every);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every.max(Duration::from_secs(1)));
            loop {
                interval.tick().await;
                self.prune();
            }
        })
    }
}

/// 解析客户端IP：连接地址 → `X-Forwarded-For` 第一个地址 → 127.0.0.1
pub fn client_ip(connect_info: Option<&ConnectInfo<SocketAddr>>, headers: &HeaderMap) -> IpAddr {
    if let Some(ConnectInfo(addr)) = connect_info {
        return addr.ip();
    }

    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .and_then(|first| first.trim().parse().ok())
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
}

/// 速率限制中间件
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<ClientRateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let ip = client_ip(
        request.extensions().get::<ConnectInfo<SocketAddr>>(),
        request.headers(),
    );

    if limiter.check(ip) {
        debug!(ip = %ip, path = %request.uri().path(), "Rate limit check passed");
        return next.run(request).await;
    }

    warn!(ip = %ip, limit = limiter.requests_per_hour(), "Rate limit exceeded");
    (
        StatusCode::TOO_MANY_REQUESTS,
        Json(json!({
            "success": false,
            "error": "Rate limit exceeded. Please try again later."
        })),
    )
        .into_response()
}
