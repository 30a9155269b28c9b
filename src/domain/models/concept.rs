// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::insights::{
    CostBreakdown, DerivedInsights, IndustrySuggestions, PerformanceMetrics, SeoAnalysis,
    TechnicalSpecs,
};
use super::wireframe::WireframeLayout;

/// 概念概要
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConceptSummary {
    pub title: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub tagline: String,
    pub description: String,
    #[serde(rename = "estimatedCost", default, deserialize_with = "lenient::text")]
    pub estimated_cost: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub timeline: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub pages: String,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub sections: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub value_propositions: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub target_actions: Vec<String>,
}

/// 配色方案
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScheme {
    #[serde(default, deserialize_with = "lenient::text")]
    pub primary: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub secondary: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub accent: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub background: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl ColorScheme {
    /// 用行业配色补齐缺失的颜色
    pub fn fill_missing(&mut self, palette: &[String]) {
        let pick = |index: usize, fallback: &str| {
            palette
                .get(index)
                .cloned()
                .unwrap_or_else(|| fallback.to_string())
        };

        if self.primary.trim().is_empty() {
            self.primary = pick(0, "#2563eb");
        }
        if self.secondary.trim().is_empty() {
            self.secondary = pick(1, "#1e40af");
        }
        if self.accent.trim().is_empty() {
            self.accent = pick(2, "#3b82f6");
        }
        if self.background.trim().is_empty() {
            self.background = "#ffffff".to_string();
        }
        if self.text.trim().is_empty() {
            self.text = "#1f2937".to_string();
        }
    }
}

/// 字体方案
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Typography {
    pub headings: String,
    pub body: String,
    pub sizes: BTreeMap<String, String>,
}

impl Default for Typography {
    fn default() -> Self {
        let sizes = [("h1", "48px"), ("h2", "36px"), ("body", "16px")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            headings: "Inter".to_string(),
            body: "Inter".to_string(),
            sizes,
        }
    }
}

/// 功能分级
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureTiers {
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub essential: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub recommended: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub advanced: Vec<String>,
}

/// 首页区块规划
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomepageSectionPlan {
    pub name: String,
    pub purpose: String,
    pub content_type: String,
}

/// 附加页面规划
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagePlan {
    pub name: String,
    pub purpose: String,
    pub priority: String,
}

/// 内容策略
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentStrategy {
    pub homepage_sections: Vec<HomepageSectionPlan>,
    pub additional_pages: Vec<PagePlan>,
}

fn default_seo_score() -> u8 {
    90
}

fn default_performance_score() -> u8 {
    88
}

fn default_accessibility_score() -> u8 {
    95
}

fn default_mobile_score() -> u8 {
    95
}

/// 模型返回的概念载荷
///
/// 必需键：`concept`（含 `title`、`description`）、`colorScheme`、`features`；
/// 其余字段缺失时使用默认值。
#[derive(Debug, Clone, Deserialize)]
pub struct AiConceptPayload {
    pub concept: ConceptSummary,
    #[serde(rename = "colorScheme")]
    pub color_scheme: ColorScheme,
    #[serde(default)]
    pub typography: Typography,
    pub features: FeatureTiers,
    #[serde(default)]
    pub content_strategy: ContentStrategy,
    #[serde(rename = "seoScore", default = "default_seo_score", deserialize_with = "lenient::score")]
    pub seo_score: u8,
    #[serde(
        rename = "performanceScore",
        default = "default_performance_score",
        deserialize_with = "lenient::score"
    )]
    pub performance_score: u8,
    #[serde(
        rename = "accessibilityScore",
        default = "default_accessibility_score",
        deserialize_with = "lenient::score"
    )]
    pub accessibility_score: u8,
    #[serde(rename = "mobileScore", default = "default_mobile_score", deserialize_with = "lenient::score")]
    pub mobile_score: u8,
}

impl AiConceptPayload {
    /// 将模型返回的JSON校验为类型化载荷
    pub fn from_value(value: Value) -> Result<Self, String> {
        if !value.is_object() {
            return Err("response is not a JSON object".to_string());
        }

        let payload: Self = serde_json::from_value(value).map_err(|e| e.to_string())?;

        if payload.concept.title.trim().is_empty() {
            return Err("concept.title is empty".to_string());
        }
        if payload.concept.description.trim().is_empty() {
            return Err("concept.description is empty".to_string());
        }

        Ok(payload)
    }

    /// 与线框图和派生指标合并为完整概念
    ///
    /// 模型遗漏的配色、推荐功能和项目周期由行业建议与派生估算补齐
    pub fn into_concept(
        self,
        wireframe: WireframeLayout,
        insights: DerivedInsights,
        suggestions: &IndustrySuggestions,
        provider: &str,
    ) -> GeneratedConcept {
        let mut color_scheme = self.color_scheme;
        color_scheme.fill_missing(&suggestions.colors);

        let mut concept = self.concept;
        if concept.timeline.trim().is_empty() {
            concept.timeline = insights.timeline;
        }

        let mut features = self.features;
        if features.recommended.is_empty() {
            features.recommended = suggestions.features.clone();
        }

        GeneratedConcept {
            concept,
            color_scheme,
            typography: self.typography,
            features,
            content_strategy: self.content_strategy,
            seo_score: self.seo_score,
            performance_score: self.performance_score,
            accessibility_score: self.accessibility_score,
            mobile_score: self.mobile_score,
            wireframe,
            technical_specs: insights.technical_specs,
            seo_analysis: insights.seo_analysis,
            performance_metrics: insights.performance_metrics,
            cost_breakdown: insights.cost_breakdown,
            provider: provider.to_string(),
            generated_at: Utc::now(),
        }
    }
}

/// 生成的网站概念
///
/// 由编排器创建后不再修改，缓存、持久化和演示生成共用这一类型。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedConcept {
    pub concept: ConceptSummary,
    #[serde(rename = "colorScheme")]
    pub color_scheme: ColorScheme,
    #[serde(default)]
    pub typography: Typography,
    #[serde(default)]
    pub features: FeatureTiers,
    #[serde(default)]
    pub content_strategy: ContentStrategy,
    #[serde(rename = "seoScore", default = "default_seo_score", deserialize_with = "lenient::score")]
    pub seo_score: u8,
    #[serde(
        rename = "performanceScore",
        default = "default_performance_score",
        deserialize_with = "lenient::score"
    )]
    pub performance_score: u8,
    #[serde(
        rename = "accessibilityScore",
        default = "default_accessibility_score",
        deserialize_with = "lenient::score"
    )]
    pub accessibility_score: u8,
    #[serde(rename = "mobileScore", default = "default_mobile_score", deserialize_with = "lenient::score")]
    pub mobile_score: u8,
    #[serde(default)]
    pub wireframe: WireframeLayout,
    #[serde(default)]
    pub technical_specs: TechnicalSpecs,
    #[serde(default)]
    pub seo_analysis: SeoAnalysis,
    #[serde(default)]
    pub performance_metrics: PerformanceMetrics,
    #[serde(default)]
    pub cost_breakdown: CostBreakdown,
    /// 生成该概念的提供商
    #[serde(default)]
    pub provider: String,
    #[serde(default = "Utc::now")]
    pub generated_at: DateTime<Utc>,
}

/// 概念生成结果
#[derive(Debug, Clone)]
pub struct ConceptOutcome {
    pub concept: GeneratedConcept,
    /// 是否来自缓存
    pub cached: bool,
    /// 持久化记录ID（持久化失败或命中缓存时为空）
    pub record_id: Option<i64>,
}

/// 宽松的反序列化辅助函数，模型输出的类型并不总是稳定
mod lenient {
    use serde::{de, Deserialize, Deserializer};
    use serde_json::Value;

    pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => String::new(),
            Value::String(s) => s,
            Value::Array(items) => items
                .into_iter()
                .map(value_to_text)
                .collect::<Vec<_>>()
                .join(", "),
            other => value_to_text(other),
        })
    }

    pub fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => Vec::new(),
            Value::Array(items) => items.into_iter().map(value_to_text).collect(),
            other => vec![value_to_text(other)],
        })
    }

    pub fn score<'de, D>(deserializer: D) -> Result<u8, D::Error>
    where
        D: Deserializer<'de>,
    {
        let number = match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().trim_end_matches('%').parse::<f64>().ok(),
            _ => None,
        };

        number
            .filter(|n| n.is_finite())
            .map(|n| n.round().clamp(0.0, 100.0) as u8)
            .ok_or_else(|| de::Error::custom("score must be a number between 0 and 100"))
    }

    fn value_to_text(value: Value) -> String {
        match value {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}
