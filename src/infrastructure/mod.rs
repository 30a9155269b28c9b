// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 包含的子模块：
/// - 缓存（cache）：概念缓存策略与 Redis 客户端
/// - 数据库（database）：数据库连接和实体映射
/// - 指标（metrics）：Prometheus 导出
/// - 仓库实现（repositories）：领域仓库接口的具体实现
/// - 存储（storage）：演示站点文件存储
pub mod cache;
pub mod database;
pub mod metrics;
pub mod repositories;
pub mod storage;
