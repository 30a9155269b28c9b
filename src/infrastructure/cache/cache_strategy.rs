// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::domain::models::concept::GeneratedConcept;
use crate::infrastructure::cache::redis_client::RedisClient;

/// Redis 键前缀
const REDIS_KEY_PREFIX: &str = "conceptrs:";

/// 缓存策略配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStrategyConfig {
    /// 缓存类型
    pub cache_type: CacheType,
    /// TTL（秒）
    pub ttl_seconds: u64,
    /// 最大缓存条目数
    pub max_entries: usize,
}

impl Default for CacheStrategyConfig {
    fn default() -> Self {
        Self {
            cache_type: CacheType::Memory,
            ttl_seconds: 3600,
            max_entries: 1000,
        }
    }
}

/// 缓存类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CacheType {
    /// 内存缓存
    Memory,
    /// Redis缓存
    Redis,
}

impl CacheType {
    /// 解析配置中的后端名称，未知值按内存缓存处理
    pub fn from_backend(backend: &str) -> Self {
        if backend.eq_ignore_ascii_case("redis") {
            Self::Redis
        } else {
            Self::Memory
        }
    }
}

/// 缓存统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub stores: u64,
}

/// 缓存条目
#[derive(Clone)]
struct CacheEntry<T> {
    data: T,
    created_at: Instant,
    ttl: Duration,
}

impl<T> CacheEntry<T> {
    fn new(data: T, ttl: Duration) -> Self {
        Self {
            data,
            created_at: Instant::now(),
            ttl,
        }
    }

    fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.ttl
    }
}

/// 缓存策略接口
///
/// 每个键最多只有一个有效条目，写入时整体覆盖
#[async_trait]
pub trait CacheStrategy: Send + Sync {
    /// 获取缓存值
    async fn get(&self, key: &str) -> Result<Option<GeneratedConcept>>;

    /// 设置缓存值
    async fn set(&self, key: &str, value: &GeneratedConcept, ttl: Option<Duration>) -> Result<()>;

    /// 获取缓存统计信息
    fn get_stats(&self) -> CacheStats;
}

/// 内存缓存策略
pub struct MemoryCacheStrategy {
    cache: DashMap<String, CacheEntry<GeneratedConcept>>,
    config: CacheStrategyConfig,
    stats: Mutex<CacheStats>,
}

impl MemoryCacheStrategy {
    pub fn new(config: CacheStrategyConfig) -> Self {
        Self {
            cache: DashMap::new(),
            config,
            stats: Mutex::new(CacheStats::default()),
        }
    }

    /// 超出容量时先淘汰过期条目，再淘汰最旧的条目
    fn evict_if_needed(&self) {
        if self.cache.len() <= self.config.max_entries {
            return;
        }

        let before = self.cache.len();
        self.cache.retain(|_, entry| !entry.is_expired());

        let overflow = self.cache.len().saturating_sub(self.config.max_entries);
        if overflow > 0 {
            let mut entries: Vec<(String, Instant)> = self
                .cache
                .iter()
                .map(|entry| (entry.key().clone(), entry.value().created_at))
                .collect();
            entries.sort_by_key(|(_, created_at)| *created_at);

            for (key, _) in entries.into_iter().take(overflow) {
                self.cache.remove(&key);
            }
        }

        let evicted = before - self.cache.len();
        self.stats.lock().evictions += evicted as u64;
        debug!("Evicted {} entries from memory cache", evicted);
    }
}

#[async_trait]
impl CacheStrategy for MemoryCacheStrategy {
    async fn get(&self, key: &str) -> Result<Option<GeneratedConcept>> {
        // The read guard must be released before removing from the same shard
        let lookup = self
            .cache
            .get(key)
            .map(|entry| (!entry.is_expired()).then(|| entry.data.clone()));

        let hit = match lookup {
            Some(Some(concept)) => Some(concept),
            Some(None) => {
                self.cache.remove_if(key, |_, entry| entry.is_expired());
                None
            }
            None => None,
        };

        let mut stats = self.stats.lock();
        if hit.is_some() {
            stats.hits += 1;
        } else {
            stats.misses += 1;
        }

        Ok(hit)
    }

    async fn set(&self, key: &str, value: &GeneratedConcept, ttl: Option<Duration>) -> Result<()> {
        let ttl = ttl.unwrap_or(Duration::from_secs(self.config.ttl_seconds));
        self.cache
            .insert(key.to_string(), CacheEntry::new(value.clone(), ttl));
        self.evict_if_needed();

        self.stats.lock().stores += 1;
        debug!("Stored concept in memory cache for key: {}", key);
        Ok(())
    }

    fn get_stats(&self) -> CacheStats {
        self.stats.lock().clone()
    }
}

/// Redis缓存策略
pub struct RedisCacheStrategy {
    redis_client: Arc<RedisClient>,
    config: CacheStrategyConfig,
    stats: Mutex<CacheStats>,
}

impl RedisCacheStrategy {
    pub fn new(redis_client: Arc<RedisClient>, config: CacheStrategyConfig) -> Self {
        Self {
            redis_client,
            config,
            stats: Mutex::new(CacheStats::default()),
        }
    }

    fn prefixed_key(&self, key: &str) -> String {
        format!("{}{}", REDIS_KEY_PREFIX, key)
    }
}

#[async_trait]
impl CacheStrategy for RedisCacheStrategy {
    async fn get(&self, key: &str) -> Result<Option<GeneratedConcept>> {
        let cache_key = self.prefixed_key(key);

        match self.redis_client.get(&cache_key).await? {
            Some(json_str) => {
                let concept: GeneratedConcept = serde_json::from_str(&json_str)?;
                self.stats.lock().hits += 1;
                debug!("Cache hit for key: {}", key);
                Ok(Some(concept))
            }
            None => {
                self.stats.lock().misses += 1;
                debug!("Cache miss for key: {}", key);
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &str, value: &GeneratedConcept, ttl: Option<Duration>) -> Result<()> {
        let cache_key = self.prefixed_key(key);
        let ttl = ttl.unwrap_or(Duration::from_secs(self.config.ttl_seconds));
        let json_str = serde_json::to_string(value)?;

        self.redis_client
            .set(&cache_key, &json_str, ttl.as_secs().max(1))
            .await?;

        self.stats.lock().stores += 1;
        debug!("Stored concept in Redis cache for key: {}", key);
        Ok(())
    }

    fn get_stats(&self) -> CacheStats {
        self.stats.lock().clone()
    }
}

/// 缓存策略工厂
pub struct CacheStrategyFactory;

impl CacheStrategyFactory {
    /// 根据配置创建缓存策略
    ///
    /// Redis 策略需要提供客户端，否则返回错误
    pub fn create_strategy(
        config: CacheStrategyConfig,
        redis_client: Option<Arc<RedisClient>>,
    ) -> Result<Box<dyn CacheStrategy>> {
        match config.cache_type {
            CacheType::Memory => {
                info!("Creating memory cache strategy");
                Ok(Box::new(MemoryCacheStrategy::new(config)))
            }
            CacheType::Redis => {
                let client = redis_client
                    .ok_or_else(|| anyhow::anyhow!("Redis client is required for the redis cache backend"))?;
                info!("Creating Redis cache strategy");
                Ok(Box::new(RedisCacheStrategy::new(client, config)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::concept::AiConceptPayload;
    use crate::domain::models::insights::{DerivedInsights, IndustrySuggestions};
    use crate::domain::models::wireframe::WireframeLayout;
    use serde_json::json;

    fn concept(title: &str) -> GeneratedConcept {
        AiConceptPayload::from_value(json!({
            "concept": {"title": title, "description": "A cozy cafe"},
            "colorScheme": {"primary": "#111111"},
            "features": {"essential": ["Menu"]}
        }))
        .unwrap()
        .into_concept(
            WireframeLayout::default(),
            DerivedInsights::default(),
            &IndustrySuggestions::default(),
            "openai",
        )
    }

    fn memory(max_entries: usize) -> MemoryCacheStrategy {
        MemoryCacheStrategy::new(CacheStrategyConfig {
            max_entries,
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_memory_set_overwrites_and_counts() {
        let cache = memory(10);

        assert!(cache.get("concept:a").await.unwrap().is_none());
        cache.set("concept:a", &concept("First"), None).await.unwrap();
        cache.set("concept:a", &concept("Second"), None).await.unwrap();

        let cached = cache.get("concept:a").await.unwrap().unwrap();
        assert_eq!(cached.concept.title, "Second");

        let stats = cache.get_stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.stores, 2);
    }

    #[tokio::test]
    async fn test_memory_entries_expire() {
        let cache = memory(10);
        cache
            .set("concept:a", &concept("Cafe"), Some(Duration::from_millis(10)))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(30)).await;

        assert!(cache.get("concept:a").await.unwrap().is_none());
        assert!(cache.cache.is_empty());
    }

    #[tokio::test]
    async fn test_memory_evicts_oldest_over_capacity() {
        let cache = memory(2);
        cache.set("concept:a", &concept("A"), None).await.unwrap();
        tokio::time::sleep(Duration::from_millis(2)).await;
        cache.set("concept:b", &concept("B"), None).await.unwrap();
        tokio::time::sleep(Duration::from_millis(2)).await;
        cache.set("concept:c", &concept("C"), None).await.unwrap();

        assert!(cache.get("concept:a").await.unwrap().is_none());
        assert!(cache.get("concept:c").await.unwrap().is_some());
        assert_eq!(cache.get_stats().evictions, 1);
    }

    #[test]
    fn test_backend_names() {
        assert_eq!(CacheType::from_backend("Redis"), CacheType::Redis);
        assert_eq!(CacheType::from_backend("memory"), CacheType::Memory);
        assert_eq!(CacheType::from_backend("bogus"), CacheType::Memory);
        assert!(CacheStrategyFactory::create_strategy(
            CacheStrategyConfig {
                cache_type: CacheType::Redis,
                ..Default::default()
            },
            None
        )
        .is_err());
    }
}
