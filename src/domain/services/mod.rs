// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 概念服务（concept_service）：编排概念生成流程
/// - 演示服务（demo_service）：生成并发布演示站点
/// - 派生指标（insight_service）：技术规格、成本、SEO、性能估算
/// - LLM服务（llm_service）：提供商接口与回退链
/// - 提示词（prompt_builder）：概念与演示提示词
/// - 线框图（wireframe_service）：基于规则的页面布局
pub mod concept_service;
pub mod demo_service;
pub mod insight_service;
pub mod llm_service;
pub mod prompt_builder;
pub mod wireframe_service;
