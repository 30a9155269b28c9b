// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// 区块元素映射（元素名 -> 元素配置）
pub type ElementMap = BTreeMap<String, Value>;

/// 区块语义类型
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    Navigation,
    Hero,
    FeatureGrid,
    ServicesGrid,
    ProductGrid,
    PortfolioGrid,
    Testimonials,
    LeadForm,
    ProductCta,
    BookingWidget,
    GeneralCta,
    Footer,
    #[default]
    #[serde(other)]
    Generic,
}

/// 区块优先级
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionPriority {
    Critical,
    High,
    #[default]
    Medium,
}

/// 线框图中的一个页面区块
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireframeSection {
    pub name: String,
    #[serde(rename = "type")]
    pub section_type: SectionType,
    /// 高度（像素，正整数）
    pub height: u32,
    pub priority: SectionPriority,
    #[serde(default)]
    pub elements: ElementMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    /// 背景色提示
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_behavior: Option<String>,
}

impl WireframeSection {
    pub fn new(name: &str, section_type: SectionType, height: u32, priority: SectionPriority) -> Self {
        Self {
            name: name.to_string(),
            section_type,
            height,
            priority,
            ..Default::default()
        }
    }

    pub fn with_elements(mut self, elements: ElementMap) -> Self {
        self.elements = elements;
        self
    }

    pub fn with_layout(mut self, layout: &str) -> Self {
        self.layout = Some(layout.to_string());
        self
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    pub fn with_mobile_behavior(mut self, behavior: &str) -> Self {
        self.mobile_behavior = Some(behavior.to_string());
        self
    }
}

/// 响应式断点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoints {
    pub mobile: u32,
    pub tablet: u32,
    pub desktop: u32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            mobile: 768,
            tablet: 1024,
            desktop: 1200,
        }
    }
}

/// 单个页面的布局
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    pub sections: Vec<WireframeSection>,
    pub total_height: u32,
    pub layout_type: String,
    pub max_width: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsive_breakpoints: Option<Breakpoints>,
}

impl PageLayout {
    /// 由区块列表构造布局，自动计算总高度
    pub fn from_sections(sections: Vec<WireframeSection>, layout_type: &str, max_width: u32) -> Self {
        let total_height = sections.iter().map(|s| s.height).sum();
        Self {
            sections,
            total_height,
            layout_type: layout_type.to_string(),
            max_width,
            responsive_breakpoints: None,
        }
    }
}

/// 移动端与平板端布局
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponsiveLayouts {
    pub mobile: PageLayout,
    pub tablet: PageLayout,
}

/// 附加页面中的区块概要
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSectionOutline {
    pub name: String,
    pub height: u32,
}

/// 附加页面
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditionalPage {
    /// 页面标识，例如 `about`
    pub key: String,
    pub name: String,
    pub sections: Vec<PageSectionOutline>,
    pub priority: SectionPriority,
}

/// 完整线框图
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireframeLayout {
    pub homepage: PageLayout,
    #[serde(default)]
    pub additional_pages: Vec<AdditionalPage>,
    #[serde(default)]
    pub responsive: ResponsiveLayouts,
    #[serde(default)]
    pub layout_rationale: BTreeMap<String, String>,
    #[serde(default)]
    pub interaction_patterns: BTreeMap<String, BTreeMap<String, String>>,
    #[serde(default)]
    pub component_library: BTreeMap<String, Value>,
}
