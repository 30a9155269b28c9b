// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，遵循依赖倒置原则。
/// 具体实现由基础设施层提供：
/// - 概念记录仓库（concept_record_repository）：只追加的概念日志
/// - 存储仓库（storage_repository）：演示站点文件的发布与清理
pub mod concept_record_repository;
pub mod storage_repository;
