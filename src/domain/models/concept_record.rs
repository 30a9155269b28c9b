// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 持久化的概念记录
///
/// 只追加，唯一允许的修改是补充演示站点URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptRecord {
    pub id: i64,
    pub form_data: Value,
    pub concept_data: Value,
    pub demo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// 概念统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptStats {
    pub total: u64,
    pub today: u64,
    pub this_month: u64,
}
