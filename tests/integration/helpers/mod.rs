// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum_test::TestServer;
use conceptrs::config::settings::{
    AiSettings, CacheSettings, DatabaseSettings, DemoSettings, MetricsSettings,
    RateLimitingSettings, RedisSettings, SecuritySettings, ServerSettings, Settings,
};
use conceptrs::domain::models::form_submission::FormSubmission;
use conceptrs::domain::repositories::concept_record_repository::ConceptRecordRepository;
use conceptrs::domain::repositories::storage_repository::DemoStorageRepository;
use conceptrs::domain::services::concept_service::{ConceptService, ConceptServiceConfig};
use conceptrs::domain::services::demo_service::DemoService;
use conceptrs::domain::services::llm_service::{ChatCompletionProvider, LlmProvider, ProviderChain};
use conceptrs::infrastructure::cache::cache_manager::{CacheConfigBuilder, CacheManager};
use conceptrs::infrastructure::repositories::concept_record_repo_impl::ConceptRecordRepositoryImpl;
use conceptrs::infrastructure::storage::LocalDemoStorage;
use conceptrs::presentation::middleware::auth_middleware::RequestTokenIssuer;
use conceptrs::presentation::middleware::rate_limit_middleware::ClientRateLimiter;
use conceptrs::presentation::routes::{self, AppContext};
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_SECRET: &str = "integration-secret";

/// 内存 SQLite 数据库，已执行迁移
pub async fn setup_db() -> Arc<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    Arc::new(db)
}

/// 测试用表单
pub fn cafe_form() -> FormSubmission {
    serde_json::from_value(json!({
        "businessType": "Joe's Cafe",
        "industry": "Restaurant & Food",
        "websiteType": "Business Website",
        "businessGoal": "Generate Leads",
        "features": ["Online Booking", "Blog System"],
        "timestamp": 1735689600
    }))
    .unwrap()
}

/// 一份合法的模型输出
pub fn concept_content() -> Value {
    json!({
        "concept": {
            "title": "Joe's Cafe",
            "tagline": "Fresh coffee, every morning",
            "description": "A warm neighbourhood cafe with online booking.",
            "sections": ["Hero", "Menu", "Reservations"]
        },
        "colorScheme": {"primary": "#8b4513", "secondary": "#d2691e"},
        "features": {
            "essential": ["Menu"],
            "recommended": ["Online Booking"],
            "advanced": ["Loyalty Program"]
        },
        "seoScore": "92"
    })
}

/// 一份合法的演示站点输出
pub fn demo_content() -> Value {
    json!({
        "html": "<!DOCTYPE html><html><body><h1>Joe's Cafe</h1></body></html>",
        "css": "h1 { color: #8b4513; }",
        "js": "console.log('ready');"
    })
}

/// 包装为 chat completion 响应，内容外层加代码围栏
pub fn completion_response(content: &Value) -> ResponseTemplate {
    let fenced = format!("```json\n{}\n```", content);
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{"message": {"role": "assistant", "content": fenced}}],
        "usage": {"prompt_tokens": 900, "completion_tokens": 600, "total_tokens": 1500}
    }))
}

/// 返回原样文本内容的 chat completion 响应
pub fn raw_completion_response(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{"message": {"role": "assistant", "content": content}}]
    }))
}

/// 挂载 /chat/completions 模拟，期望调用次数为 `calls`
pub async fn mount_completion(server: &MockServer, response: ResponseTemplate, calls: u64) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(response)
        .expect(calls)
        .mount(server)
        .await;
}

pub fn provider(name: &str, server: &MockServer) -> Arc<dyn LlmProvider> {
    Arc::new(ChatCompletionProvider::new_with_config(
        name,
        Some(format!("{}-key", name)),
        "gpt-4".to_string(),
        server.uri(),
    ))
}

/// 首选提供商在前的回退链
pub fn chain(primary: &MockServer, secondary: &MockServer) -> Arc<ProviderChain> {
    Arc::new(ProviderChain::new(vec![
        provider("openai", primary),
        provider("openrouter", secondary),
    ]))
}

pub fn memory_cache() -> Arc<CacheManager> {
    let config = CacheConfigBuilder::new().ttl(3600).max_entries(100).build();
    Arc::new(CacheManager::new(config, None).unwrap())
}

pub fn service_config() -> ConceptServiceConfig {
    ConceptServiceConfig {
        caching_enabled: true,
        max_tokens: 3_000,
        timeout: Duration::from_secs(5),
    }
}

pub fn test_settings(demo_dir: &str, require_token: bool) -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseSettings {
            url: "sqlite::memory:".to_string(),
            max_connections: None,
            min_connections: None,
            connect_timeout: None,
            idle_timeout: None,
        },
        redis: RedisSettings {
            url: "redis://127.0.0.1:6379".to_string(),
        },
        cache: CacheSettings::default(),
        ai: AiSettings {
            openai_api_key: Some("openai-key".to_string()),
            ..Default::default()
        },
        demo: DemoSettings {
            output_dir: demo_dir.to_string(),
            public_base_url: "http://localhost:3000/demos".to_string(),
            ..Default::default()
        },
        security: SecuritySettings {
            request_secret: TEST_SECRET.to_string(),
            require_request_token: require_token,
        },
        rate_limiting: RateLimitingSettings {
            enabled: false,
            requests_per_hour: 10,
        },
        metrics: MetricsSettings {
            enabled: false,
            listen_addr: "127.0.0.1:0".to_string(),
        },
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub db: Arc<DatabaseConnection>,
    pub primary: MockServer,
    pub secondary: MockServer,
    pub demo_dir: TempDir,
    pub issuer: Arc<RequestTokenIssuer>,
}

pub struct TestAppOptions {
    pub require_token: bool,
    pub requests_per_hour: Option<u32>,
}

impl Default for TestAppOptions {
    fn default() -> Self {
        Self {
            require_token: false,
            requests_per_hour: None,
        }
    }
}

pub async fn create_test_app() -> TestApp {
    create_test_app_with_options(TestAppOptions::default()).await
}

pub async fn create_test_app_with_options(options: TestAppOptions) -> TestApp {
    let db = setup_db().await;
    let primary = MockServer::start().await;
    let secondary = MockServer::start().await;
    let demo_dir = tempfile::tempdir().unwrap();

    let settings = Arc::new(test_settings(
        &demo_dir.path().to_string_lossy(),
        options.require_token,
    ));

    let chain = chain(&primary, &secondary);
    let records: Arc<dyn ConceptRecordRepository> =
        Arc::new(ConceptRecordRepositoryImpl::new(db.clone()));
    let storage: Arc<dyn DemoStorageRepository> =
        Arc::new(LocalDemoStorage::from_settings(&settings.demo));

    let concept_service = Arc::new(ConceptService::new(
        chain.clone(),
        Some(memory_cache()),
        records.clone(),
        service_config(),
    ));
    let demo_service = Arc::new(DemoService::new(
        chain,
        storage.clone(),
        records.clone(),
        8_000,
        Duration::from_secs(5),
    ));
    let issuer = Arc::new(RequestTokenIssuer::new(TEST_SECRET).unwrap());

    let ctx = AppContext {
        settings,
        concept_service,
        demo_service,
        records,
        storage,
        token_issuer: issuer.clone(),
        rate_limiter: options
            .requests_per_hour
            .map(|n| Arc::new(ClientRateLimiter::new(n))),
    };

    let server = TestServer::new(routes::app(ctx)).unwrap();

    TestApp {
        server,
        db,
        primary,
        secondary,
        demo_dir,
        issuer,
    }
}
