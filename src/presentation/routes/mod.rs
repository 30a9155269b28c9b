// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    middleware,
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::config::settings::Settings;
use crate::domain::repositories::concept_record_repository::ConceptRecordRepository;
use crate::domain::repositories::storage_repository::DemoStorageRepository;
use crate::domain::services::concept_service::ConceptService;
use crate::domain::services::demo_service::DemoService;
use crate::presentation::handlers::{concept_handler, demo_handler, status_handler};
use crate::presentation::middleware::auth_middleware::{auth_middleware, RequestTokenIssuer};
use crate::presentation::middleware::rate_limit_middleware::{
    rate_limit_middleware, ClientRateLimiter,
};

/// 路由依赖的组件
#[derive(Clone)]
pub struct AppContext {
    pub settings: Arc<Settings>,
    pub concept_service: Arc<ConceptService>,
    pub demo_service: Arc<DemoService>,
    pub records: Arc<dyn ConceptRecordRepository>,
    pub storage: Arc<dyn DemoStorageRepository>,
    pub token_issuer: Arc<RequestTokenIssuer>,
    /// 为空时不做速率限制
    pub rate_limiter: Option<Arc<ClientRateLimiter>>,
}

/// 创建应用路由
///
/// 生成类接口依次经过令牌校验和速率限制；演示文件在 `/demos` 下静态提供
pub fn app(ctx: AppContext) -> Router {
    let public_routes = Router::new()
        .route("/health", get(status_handler::health_check))
        .route("/v1/version", get(status_handler::version))
        .route("/v1/status", get(status_handler::status))
        .route("/v1/stats", get(status_handler::stats))
        .route("/v1/token", get(status_handler::issue_token));

    let mut generation_routes = Router::new()
        .route("/v1/concepts", post(concept_handler::create_concept))
        .route("/v1/demos", post(demo_handler::create_demo));

    // Layers run outermost-last: token check before rate limiting
    if let Some(limiter) = ctx.rate_limiter.clone() {
        generation_routes = generation_routes.layer(middleware::from_fn_with_state(
            limiter,
            rate_limit_middleware,
        ));
    }
    if ctx.settings.security.require_request_token {
        generation_routes = generation_routes.layer(middleware::from_fn_with_state(
            ctx.token_issuer.clone(),
            auth_middleware,
        ));
    }

    Router::new()
        .merge(public_routes)
        .merge(generation_routes)
        .nest_service("/demos", ServeDir::new(&ctx.settings.demo.output_dir))
        .layer(Extension(ctx.concept_service))
        .layer(Extension(ctx.demo_service))
        .layer(Extension(ctx.records))
        .layer(Extension(ctx.storage))
        .layer(Extension(ctx.token_issuer))
        .layer(Extension(ctx.settings))
        .layer(TraceLayer::new_for_http())
}
