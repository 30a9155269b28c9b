// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

use crate::domain::models::demo::DemoPublication;

/// 演示站点生成响应数据传输对象
#[derive(Debug, Deserialize, Serialize)]
pub struct DemoResponseDto {
    pub success: bool,
    /// 演示站点入口URL
    pub demo_url: String,
    pub demo_id: String,
}

impl From<DemoPublication> for DemoResponseDto {
    fn from(publication: DemoPublication) -> Self {
        Self {
            success: true,
            demo_url: publication.demo_url,
            demo_id: publication.demo_id,
        }
    }
}
