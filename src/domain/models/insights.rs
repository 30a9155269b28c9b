// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 主机配置需求
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostingProfile {
    pub min_storage: String,
    pub bandwidth: String,
    pub ssl_required: bool,
    pub php_version: String,
    pub mysql_version: String,
}

/// 维护等级
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaintenanceLevel {
    High,
    Medium,
    #[default]
    Low,
}

impl fmt::Display for MaintenanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        };
        f.write_str(label)
    }
}

/// 技术规格
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicalSpecs {
    pub hosting: HostingProfile,
    pub recommended_cms: String,
    pub development_time: String,
    pub maintenance_level: MaintenanceLevel,
}

/// 报价区间
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostRange {
    pub low: u64,
    pub high: u64,
    pub display: String,
}

/// 付款节点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMilestone {
    pub key: String,
    pub percent: u8,
    pub description: String,
}

/// 成本明细
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// 各项成本（design, development, content, testing, deployment, features）
    pub breakdown: BTreeMap<String, u64>,
    pub total_estimated: u64,
    pub range: CostRange,
    pub payment_schedule: Vec<PaymentMilestone>,
}

/// 内容建议
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecommendations {
    pub blog_topics: Vec<String>,
    pub page_optimization: BTreeMap<String, String>,
}

/// SEO分析
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoAnalysis {
    pub keyword_opportunities: Vec<String>,
    pub local_seo_potential: String,
    pub content_recommendations: ContentRecommendations,
    pub technical_seo: BTreeMap<String, String>,
}

/// 性能估算
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub estimated_load_time: String,
    pub mobile_performance: u32,
    pub optimization_priorities: Vec<String>,
    pub monitoring_recommendations: Vec<String>,
}

/// 行业建议，补全模型遗漏的配色与推荐功能
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustrySuggestions {
    pub colors: Vec<String>,
    pub features: Vec<String>,
}

/// 项目复杂度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectComplexity {
    Simple,
    Medium,
    Complex,
}

impl From<MaintenanceLevel> for ProjectComplexity {
    fn from(level: MaintenanceLevel) -> Self {
        match level {
            MaintenanceLevel::Low => Self::Simple,
            MaintenanceLevel::Medium => Self::Medium,
            MaintenanceLevel::High => Self::Complex,
        }
    }
}

/// 所有派生指标
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedInsights {
    pub technical_specs: TechnicalSpecs,
    pub seo_analysis: SeoAnalysis,
    pub performance_metrics: PerformanceMetrics,
    pub cost_breakdown: CostBreakdown,
    /// 模型未给出周期时使用的估算，例如 "3 months"
    pub timeline: String,
}
