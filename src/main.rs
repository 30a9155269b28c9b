// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use conceptrs::config::settings::Settings;
use conceptrs::domain::repositories::concept_record_repository::ConceptRecordRepository;
use conceptrs::domain::repositories::storage_repository::DemoStorageRepository;
use conceptrs::domain::services::concept_service::{ConceptService, ConceptServiceConfig};
use conceptrs::domain::services::demo_service::DemoService;
use conceptrs::domain::services::llm_service::ProviderChain;
use conceptrs::infrastructure::cache::cache_manager::CacheManager;
use conceptrs::infrastructure::database::connection;
use conceptrs::infrastructure::repositories::concept_record_repo_impl::ConceptRecordRepositoryImpl;
use conceptrs::infrastructure::storage::LocalDemoStorage;
use conceptrs::presentation::middleware::auth_middleware::RequestTokenIssuer;
use conceptrs::presentation::middleware::rate_limit_middleware::ClientRateLimiter;
use conceptrs::presentation::routes::{self, AppContext};
use conceptrs::utils::telemetry;
use conceptrs::workers::demo_cleanup_worker::DemoCleanupWorker;
use migration::{Migrator, MigratorTrait};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{info, warn};

const RATE_LIMIT_PRUNE_INTERVAL: Duration = Duration::from_secs(600);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Logging
    telemetry::init_telemetry();
    info!("Starting conceptrs...");

    // 2. Configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    if settings.metrics.enabled {
        conceptrs::infrastructure::metrics::init_metrics(&settings.metrics.listen_addr);
    }

    // 3. Database
    let db = Arc::new(connection::create_pool(&settings.database).await?);
    info!("Database connection established");

    info!("Running database migrations...");
    Migrator::up(db.as_ref(), None).await?;
    info!("Database migrations applied");

    // 4. Cache, only connects to Redis for the redis backend
    let cache = if settings.cache.enabled {
        Some(Arc::new(
            CacheManager::from_settings(&settings.cache, &settings.redis).await?,
        ))
    } else {
        info!("Concept cache disabled");
        None
    };

    // 5. Components
    let chain = Arc::new(ProviderChain::from_settings(&settings.ai));
    if !chain.has_configured_provider() {
        warn!("No AI provider API key configured; generation requests will fail");
    }

    let records: Arc<dyn ConceptRecordRepository> =
        Arc::new(ConceptRecordRepositoryImpl::new(db.clone()));
    let storage: Arc<dyn DemoStorageRepository> =
        Arc::new(LocalDemoStorage::from_settings(&settings.demo));

    let concept_service = Arc::new(ConceptService::new(
        chain.clone(),
        cache,
        records.clone(),
        ConceptServiceConfig::from_settings(&settings.ai, &settings.cache),
    ));
    let demo_service = Arc::new(DemoService::from_settings(
        chain,
        storage.clone(),
        records.clone(),
        &settings.ai,
    ));

    DemoCleanupWorker::from_settings(storage.clone(), &settings.demo).start();

    let rate_limiter = ClientRateLimiter::from_settings(&settings.rate_limiting);
    if let Some(limiter) = &rate_limiter {
        limiter.clone().start_pruning(RATE_LIMIT_PRUNE_INTERVAL);
    }

    // 6. Router
    let ctx = AppContext {
        settings: settings.clone(),
        concept_service,
        demo_service,
        records,
        storage,
        token_issuer: Arc::new(RequestTokenIssuer::new(&settings.security.request_secret)?),
        rate_limiter,
    };
    let app = routes::app(ctx);

    // 7. Serve
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
