// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

use crate::domain::models::concept::{ConceptOutcome, GeneratedConcept};

/// 概念生成响应数据传输对象
#[derive(Debug, Deserialize, Serialize)]
pub struct ConceptResponseDto {
    /// 请求处理是否成功
    pub success: bool,
    /// 生成的概念
    pub data: GeneratedConcept,
    /// 是否来自缓存
    pub cached: bool,
    /// 持久化记录ID，生成演示站点时回传
    pub record_id: Option<i64>,
}

impl From<ConceptOutcome> for ConceptResponseDto {
    fn from(outcome: ConceptOutcome) -> Self {
        Self {
            success: true,
            data: outcome.concept,
            cached: outcome.cached,
            record_id: outcome.record_id,
        }
    }
}
