// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

use crate::domain::models::concept_record::ConceptStats;
use crate::infrastructure::cache::cache_strategy::CacheStats;

/// 服务状态响应数据传输对象
#[derive(Debug, Deserialize, Serialize)]
pub struct StatusResponseDto {
    pub success: bool,
    /// 是否至少配置了一个AI提供商密钥
    pub api_keys_configured: bool,
    /// 演示目录是否可写
    pub demo_dir_writable: bool,
    pub caching_enabled: bool,
    /// 缓存TTL（秒）
    pub cache_ttl: u64,
    /// 本进程内的缓存命中统计，缓存关闭时为空
    pub cache_stats: Option<CacheStats>,
    pub cache_hit_rate: Option<f64>,
    pub default_provider: String,
    pub version: String,
}

/// 概念统计响应
#[derive(Debug, Deserialize, Serialize)]
pub struct StatsResponseDto {
    pub success: bool,
    pub data: ConceptStats,
}

/// 请求令牌响应
#[derive(Debug, Deserialize, Serialize)]
pub struct TokenResponseDto {
    pub success: bool,
    pub session_id: String,
    pub token: String,
}
