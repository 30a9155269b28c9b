// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::Result;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::settings::{clamp_cache_ttl, CacheSettings, RedisSettings};
use crate::domain::models::concept::GeneratedConcept;
use crate::domain::models::form_submission::FormSubmission;
use crate::infrastructure::cache::cache_strategy::{
    CacheStats, CacheStrategy, CacheStrategyConfig, CacheStrategyFactory, CacheType,
};
use crate::infrastructure::cache::redis_client::RedisClient;

/// 概念缓存键前缀
pub const CONCEPT_KEY_PREFIX: &str = "concept:";

/// 缓存管理器
///
/// 以表单内容哈希为键缓存生成的概念，屏蔽具体的缓存后端
pub struct CacheManager {
    strategy: Box<dyn CacheStrategy>,
    config: CacheStrategyConfig,
}

impl CacheManager {
    /// 创建新的缓存管理器
    pub fn new(config: CacheStrategyConfig, redis_client: Option<Arc<RedisClient>>) -> Result<Self> {
        let strategy = CacheStrategyFactory::create_strategy(config.clone(), redis_client)?;
        Ok(Self { strategy, config })
    }

    /// 根据配置创建，仅在 Redis 后端时连接 Redis
    pub async fn from_settings(cache: &CacheSettings, redis: &RedisSettings) -> Result<Self> {
        let config = CacheConfigBuilder::new()
            .cache_type(CacheType::from_backend(&cache.backend))
            .ttl(cache.ttl_seconds)
            .max_entries(cache.max_entries)
            .build();

        let redis_client = match config.cache_type {
            CacheType::Redis => Some(Arc::new(RedisClient::new(&redis.url).await?)),
            CacheType::Memory => None,
        };

        info!(
            "Concept cache backend: {:?}, ttl {}s",
            config.cache_type, config.ttl_seconds
        );
        Self::new(config, redis_client)
    }

    /// 生效的TTL
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.config.ttl_seconds)
    }

    /// 获取缓存值
    pub async fn get(&self, key: &str) -> Result<Option<GeneratedConcept>> {
        self.strategy.get(key).await
    }

    /// 设置缓存值，使用配置的TTL
    pub async fn set(&self, key: &str, value: &GeneratedConcept) -> Result<()> {
        self.strategy.set(key, value, Some(self.ttl())).await
    }

    /// 获取缓存统计信息
    pub fn get_stats(&self) -> CacheStats {
        self.strategy.get_stats()
    }

    /// 获取缓存命中率
    pub fn get_hit_rate(&self) -> f64 {
        let stats = self.get_stats();
        let total_requests = stats.hits + stats.misses;

        if total_requests == 0 {
            0.0
        } else {
            stats.hits as f64 / total_requests as f64
        }
    }

    /// 生成缓存键
    ///
    /// `concept:` + 规范化表单JSON的 SHA-256 十六进制摘要
    pub fn generate_cache_key(form: &FormSubmission) -> String {
        let digest = Sha256::digest(form.canonical_json().as_bytes());
        format!("{}{}", CONCEPT_KEY_PREFIX, hex::encode(digest))
    }
}

/// 缓存配置构建器
pub struct CacheConfigBuilder {
    config: CacheStrategyConfig,
}

impl CacheConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: CacheStrategyConfig::default(),
        }
    }

    pub fn cache_type(mut self, cache_type: CacheType) -> Self {
        self.config.cache_type = cache_type;
        self
    }

    /// TTL 会被限制在 [300, 86400] 秒
    pub fn ttl(mut self, seconds: u64) -> Self {
        self.config.ttl_seconds = clamp_cache_ttl(seconds);
        self
    }

    pub fn max_entries(mut self, max_entries: usize) -> Self {
        self.config.max_entries = max_entries.max(1);
        self
    }

    pub fn build(self) -> CacheStrategyConfig {
        self.config
    }
}

impl Default for CacheConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
