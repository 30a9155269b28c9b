// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 缓存TTL下限（秒）
pub const MIN_CACHE_TTL_SECS: u64 = 300;
/// 缓存TTL上限（秒）
pub const MAX_CACHE_TTL_SECS: u64 = 86_400;
/// 默认缓存TTL（秒）
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3_600;

/// 应用程序配置设置
///
/// 包含服务器、数据库、缓存、AI提供商、演示站点、安全与限流等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 数据库配置
    pub database: DatabaseSettings,
    /// Redis配置
    pub redis: RedisSettings,
    /// 概念缓存配置
    pub cache: CacheSettings,
    /// AI提供商配置
    pub ai: AiSettings,
    /// 演示站点配置
    pub demo: DemoSettings,
    /// 请求令牌配置
    pub security: SecuritySettings,
    /// 速率限制配置
    pub rate_limiting: RateLimitingSettings,
    /// 指标导出配置
    pub metrics: MetricsSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 数据库配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
}

/// Redis配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct RedisSettings {
    /// Redis连接URL（仅在 cache.backend = "redis" 时使用）
    pub url: String,
}

/// 概念缓存配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    /// 是否启用缓存
    pub enabled: bool,
    /// 缓存后端 (memory, redis)
    pub backend: String,
    /// 缓存TTL（秒），会被限制在 [300, 86400] 区间
    pub ttl_seconds: u64,
    /// 内存缓存最大条目数
    pub max_entries: usize,
}

impl CacheSettings {
    /// 返回限制在合法区间内的TTL
    pub fn effective_ttl(&self) -> Duration {
        Duration::from_secs(clamp_cache_ttl(self.ttl_seconds))
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            backend: "memory".to_string(),
            ttl_seconds: DEFAULT_CACHE_TTL_SECS,
            max_entries: 1_000,
        }
    }
}

/// 将TTL限制在 [MIN_CACHE_TTL_SECS, MAX_CACHE_TTL_SECS]
pub fn clamp_cache_ttl(seconds: u64) -> u64 {
    seconds.clamp(MIN_CACHE_TTL_SECS, MAX_CACHE_TTL_SECS)
}

/// AI提供商配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct AiSettings {
    /// OpenAI API密钥
    pub openai_api_key: Option<String>,
    /// OpenRouter API密钥
    pub openrouter_api_key: Option<String>,
    /// 首选提供商 (openai, openrouter)
    pub default_provider: String,
    /// OpenAI 模型
    pub openai_model: String,
    /// OpenAI API基础URL
    pub openai_base_url: String,
    /// OpenRouter 模型
    pub openrouter_model: String,
    /// OpenRouter API基础URL
    pub openrouter_base_url: String,
    /// 采样温度
    pub temperature: f32,
    /// 概念生成最大令牌数
    pub concept_max_tokens: u32,
    /// 演示生成最大令牌数
    pub demo_max_tokens: u32,
    /// 概念生成超时（秒）
    pub concept_timeout_secs: u64,
    /// 演示生成超时（秒）
    pub demo_timeout_secs: u64,
    /// 站点地址，作为 OpenRouter 的 HTTP-Referer
    pub site_url: String,
    /// 应用标题，作为 OpenRouter 的 X-Title
    pub app_title: String,
}

impl AiSettings {
    /// 是否至少配置了一个API密钥
    pub fn has_any_api_key(&self) -> bool {
        is_present(&self.openai_api_key) || is_present(&self.openrouter_api_key)
    }
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openrouter_api_key: None,
            default_provider: "openai".to_string(),
            openai_model: "gpt-4".to_string(),
            openai_base_url: "https://api.openai.com/v1".to_string(),
            openrouter_model: "anthropic/claude-3.5-sonnet".to_string(),
            openrouter_base_url: "https://openrouter.ai/api/v1".to_string(),
            temperature: 0.3,
            concept_max_tokens: 3_000,
            demo_max_tokens: 8_000,
            concept_timeout_secs: 60,
            demo_timeout_secs: 180,
            site_url: "http://localhost:3000".to_string(),
            app_title: "AI Web Builder".to_string(),
        }
    }
}

pub(crate) fn is_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

/// 演示站点配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DemoSettings {
    /// 演示文件输出目录
    pub output_dir: String,
    /// 演示站点公开访问的基础URL
    pub public_base_url: String,
    /// 演示保留天数
    pub retention_days: u64,
    /// 清理任务执行间隔（秒）
    pub cleanup_interval_secs: u64,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            output_dir: "./storage/demos".to_string(),
            public_base_url: "http://localhost:3000/demos".to_string(),
            retention_days: 7,
            cleanup_interval_secs: 24 * 60 * 60,
        }
    }
}

/// 请求令牌配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct SecuritySettings {
    /// 令牌签名密钥
    pub request_secret: String,
    /// 是否要求生成类接口携带令牌
    pub require_request_token: bool,
}

/// 速率限制配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitingSettings {
    /// 是否启用速率限制
    pub enabled: bool,
    /// 每个客户端每小时的生成请求数
    pub requests_per_hour: u32,
}

/// 指标导出配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用 Prometheus 导出
    pub enabled: bool,
    /// 导出监听地址
    pub listen_addr: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、`config/default`、`config/{APP_ENVIRONMENT}` 以及
    /// `CONCEPTRS__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let ai = AiSettings::default();
        let demo = DemoSettings::default();

        let builder = Config::builder()
            // Server
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            // Database
            .set_default("database.url", "sqlite://conceptrs.db?mode=rwc")?
            .set_default("database.max_connections", 20)?
            .set_default("database.min_connections", 1)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            // Redis
            .set_default("redis.url", "redis://127.0.0.1:6379")?
            // Cache
            .set_default("cache.enabled", true)?
            .set_default("cache.backend", "memory")?
            .set_default("cache.ttl_seconds", DEFAULT_CACHE_TTL_SECS)?
            .set_default("cache.max_entries", 1_000)?
            // AI providers
            .set_default("ai.default_provider", ai.default_provider)?
            .set_default("ai.openai_model", ai.openai_model)?
            .set_default("ai.openai_base_url", ai.openai_base_url)?
            .set_default("ai.openrouter_model", ai.openrouter_model)?
            .set_default("ai.openrouter_base_url", ai.openrouter_base_url)?
            .set_default("ai.temperature", f64::from(ai.temperature))?
            .set_default("ai.concept_max_tokens", ai.concept_max_tokens)?
            .set_default("ai.demo_max_tokens", ai.demo_max_tokens)?
            .set_default("ai.concept_timeout_secs", ai.concept_timeout_secs)?
            .set_default("ai.demo_timeout_secs", ai.demo_timeout_secs)?
            .set_default("ai.site_url", ai.site_url)?
            .set_default("ai.app_title", ai.app_title)?
            // Demo output
            .set_default("demo.output_dir", demo.output_dir)?
            .set_default("demo.public_base_url", demo.public_base_url)?
            .set_default("demo.retention_days", demo.retention_days)?
            .set_default("demo.cleanup_interval_secs", demo.cleanup_interval_secs)?
            // Request tokens
            .set_default("security.request_secret", "change-me")?
            .set_default("security.require_request_token", true)?
            // Rate limiting
            .set_default("rate_limiting.enabled", true)?
            .set_default("rate_limiting.requests_per_hour", 10)?
            // Metrics
            .set_default("metrics.enabled", false)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("CONCEPTRS").separator("__"));

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
