// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：表单、概念、线框图、演示站点
/// - 仓库接口（repositories）：记录持久化与演示存储的抽象
/// - 服务（services）：规则引擎、提供商链与生成流程
///
/// 领域层不依赖于任何外部实现。
pub mod models;
pub mod repositories;
pub mod services;
