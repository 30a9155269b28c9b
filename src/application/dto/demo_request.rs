// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

use crate::domain::models::concept::GeneratedConcept;
use crate::domain::models::form_submission::FormSubmission;

/// 演示站点生成请求数据传输对象
#[derive(Debug, Deserialize, Serialize)]
pub struct DemoRequestDto {
    /// 之前生成的概念
    pub concept: GeneratedConcept,
    /// 原始表单，缺失时使用默认值
    #[serde(default, alias = "formData")]
    pub form_data: FormSubmission,
    /// 概念记录ID
    #[serde(default, alias = "recordId")]
    pub record_id: Option<i64>,
}
