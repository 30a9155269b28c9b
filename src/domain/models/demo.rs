// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 演示站点文件名
pub const INDEX_FILE: &str = "index.html";
pub const STYLES_FILE: &str = "styles.css";
pub const SCRIPT_FILE: &str = "script.js";

/// 模型生成的演示站点内容
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoArtifact {
    pub html: String,
    #[serde(default)]
    pub css: String,
    #[serde(default)]
    pub js: String,
}

impl DemoArtifact {
    /// 校验模型返回的 `{html, css, js}`，html 必须存在且非空
    pub fn from_value(value: Value) -> Result<Self, String> {
        let object = value
            .as_object()
            .ok_or_else(|| "response is not a JSON object".to_string())?;

        let text = |key: &str| -> Option<String> {
            object.get(key).and_then(Value::as_str).map(str::to_string)
        };

        let html = text("html")
            .filter(|html| !html.trim().is_empty())
            .ok_or_else(|| "html is missing or empty".to_string())?;

        Ok(Self {
            html,
            css: text("css").unwrap_or_default(),
            js: text("js").unwrap_or_default(),
        })
    }

    /// 三个文件的 (文件名, 内容)
    pub fn files(&self) -> [(&'static str, &str); 3] {
        [
            (INDEX_FILE, self.html.as_str()),
            (STYLES_FILE, self.css.as_str()),
            (SCRIPT_FILE, self.js.as_str()),
        ]
    }
}

/// 已发布的演示站点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoPublication {
    pub demo_id: String,
    pub demo_url: String,
}
