// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use validator::{Validate, ValidationError};

/// 定义以展示标签往返序列化的枚举
///
/// 已知标签映射为具体变体，其余标签保存在 `Other` 中，
/// 因此任意标签在传输和缓存键中都会被原样保留。
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident, default = $default:ident {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            /// 未映射的标签
            Other(String),
        }

        impl $name {
            /// 所有已知标签
            pub const LABELS: &'static [&'static str] = &[$($label),+];

            /// 返回展示标签
            pub fn label(&self) -> &str {
                match self {
                    $(Self::$variant => $label,)+
                    Self::Other(label) => label.as_str(),
                }
            }

            /// 根据标签解析
            pub fn from_label(label: &str) -> Self {
                match label.trim() {
                    $($label => Self::$variant,)+
                    other => Self::Other(other.to_string()),
                }
            }

            /// 默认变体
            pub fn fallback() -> Self {
                Self::$default
            }
        }

        impl From<String> for $name {
            fn from(label: String) -> Self {
                Self::from_label(&label)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.label().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

labelled_enum! {
    /// 行业
    Industry, default = ProfessionalServices {
        TechnologySoftware => "Technology & Software",
        HealthcareMedical => "Healthcare & Medical",
        EcommerceRetail => "E-commerce & Retail",
        EducationTraining => "Education & Training",
        FinanceBanking => "Finance & Banking",
        RealEstate => "Real Estate",
        RestaurantFood => "Restaurant & Food",
        LegalServices => "Legal Services",
        CreativeAgency => "Creative Agency",
        NonProfit => "Non-Profit",
        FitnessWellness => "Fitness & Wellness",
        TravelTourism => "Travel & Tourism",
        Automotive => "Automotive",
        FashionBeauty => "Fashion & Beauty",
        Construction => "Construction",
        Consulting => "Consulting",
        Manufacturing => "Manufacturing",
        Entertainment => "Entertainment",
        Photography => "Photography",
        MarketingAdvertising => "Marketing & Advertising",
        ProfessionalServices => "Professional Services",
        ArchitectureDesign => "Architecture & Design",
    }
}

labelled_enum! {
    /// 网站类型
    WebsiteType, default = BusinessWebsite {
        BusinessWebsite => "Business Website",
        EcommerceStore => "E-commerce Store",
        PortfolioSite => "Portfolio Site",
        BlogMagazine => "Blog/Magazine",
        SaasPlatform => "SaaS Platform",
        LandingPage => "Landing Page",
        BookingAppointment => "Booking/Appointment",
        MembershipCommunity => "Membership/Community",
        ProfessionalServices => "Professional Services",
    }
}

labelled_enum! {
    /// 设计风格
    DesignStyle, default = ModernClean {
        ModernClean => "Modern & Clean",
        ProfessionalCorporate => "Professional & Corporate",
        CreativeArtistic => "Creative & Artistic",
        Minimalist => "Minimalist",
        BoldVibrant => "Bold & Vibrant",
        ElegantLuxury => "Elegant & Luxury",
        TechFuturistic => "Tech & Futuristic",
        RetroVintage => "Retro & Vintage",
        FunPlayful => "Fun & Playful",
        DarkEdgy => "Dark & Edgy",
    }
}

// 缺省行业为空标签，由表单校验拒绝
impl Default for Industry {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl Default for WebsiteType {
    fn default() -> Self {
        Self::fallback()
    }
}

impl Default for DesignStyle {
    fn default() -> Self {
        Self::fallback()
    }
}

/// 客户提交的业务需求表单
///
/// 提交后不可变。字段顺序固定，功能标签为有序集合，
/// 所以同一份需求总是得到相同的规范化JSON。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmission {
    /// 企业名称/类型
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub business_type: String,
    /// 行业
    #[serde(default)]
    #[validate(custom(function = "validate_industry"))]
    pub industry: Industry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_goal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_website: Option<String>,
    /// 竞争对手，接受字符串（按行/逗号拆分）或数组
    #[serde(
        default,
        deserialize_with = "string_or_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub competitors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_type: Option<WebsiteType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design_style: Option<DesignStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_branding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_preference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design_inspiration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_requirements: Option<String>,
    /// 功能标签（去重、无序）
    #[serde(default)]
    pub features: BTreeSet<String>,
}

impl FormSubmission {
    /// 解析后的网站类型，缺省为 Business Website
    pub fn resolved_website_type(&self) -> WebsiteType {
        self.website_type.clone().unwrap_or_default()
    }

    /// 解析后的设计风格，缺省为 Modern & Clean
    pub fn resolved_design_style(&self) -> DesignStyle {
        self.design_style.clone().unwrap_or_default()
    }

    /// 业务目标（空白视为缺失）
    pub fn goal(&self) -> Option<&str> {
        non_blank(&self.business_goal)
    }

    /// 是否选择了指定功能
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.contains(feature)
    }

    /// 规范化JSON，用于计算缓存键
    pub fn canonical_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// 返回非空白的可选字段
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn validate_industry(value: &Industry) -> Result<(), ValidationError> {
    validate_not_blank(value.label())
}

fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrList {
        Text(String),
        List(Vec<String>),
        Missing(()),
    }

    let items = match StringOrList::deserialize(deserializer)? {
        StringOrList::Text(text) => text
            .split(['\n', ','])
            .map(|s| s.trim().to_string())
            .collect(),
        StringOrList::List(list) => list.into_iter().map(|s| s.trim().to_string()).collect(),
        StringOrList::Missing(()) => Vec::new(),
    };

    Ok(items.into_iter().filter(|s: &String| !s.is_empty()).collect())
}
