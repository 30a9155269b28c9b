// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 需求表单（form_submission）：客户提交的业务需求
/// - 网站概念（concept）：模型生成并经过校验、合并后的概念
/// - 线框图（wireframe）：规则引擎生成的页面结构
/// - 派生指标（insights）：技术规格、成本、SEO和性能估算
/// - 概念记录（concept_record）：持久化的概念日志
/// - 演示站点（demo）：模型生成的HTML/CSS/JS
pub mod concept;
pub mod concept_record;
pub mod demo;
pub mod form_submission;
pub mod insights;
pub mod wireframe;
