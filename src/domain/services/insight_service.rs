// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::domain::models::form_submission::{FormSubmission, Industry, WebsiteType};
use crate::domain::models::insights::{
    ContentRecommendations, CostBreakdown, CostRange, DerivedInsights, HostingProfile,
    IndustrySuggestions, MaintenanceLevel, PaymentMilestone, PerformanceMetrics, ProjectComplexity,
    SeoAnalysis, TechnicalSpecs,
};

/// 基础成本（按固定顺序）
const BASE_COSTS: [(&str, u64); 5] = [
    ("design", 1500),
    ("development", 2500),
    ("content", 800),
    ("testing", 500),
    ("deployment", 300),
];

/// 会提高维护等级的复杂功能
const COMPLEX_FEATURES: [&str; 4] = [
    "E-commerce Store",
    "CRM Integration",
    "Custom Database",
    "API Integration",
];

/// 功能附加成本
static FEATURE_COSTS: Lazy<HashMap<&'static str, u64>> = Lazy::new(|| {
    HashMap::from([
        ("E-commerce Store", 2000),
        ("Online Booking", 800),
        ("Payment Gateway", 500),
        ("CRM Integration", 1200),
        ("AI Chatbot", 1500),
        ("Custom Database", 2500),
        ("API Integration", 1000),
        ("Multi-language", 1500),
    ])
});

/// 每千令牌价格（美元）
static MODEL_PRICES: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    HashMap::from([
        ("gpt-4", 0.03),
        ("gpt-3.5-turbo", 0.002),
        ("claude-3.5-sonnet", 0.003),
    ])
});

const DEFAULT_PRICE_PER_1K: f64 = 0.03;

/// 派生指标生成器
///
/// 技术规格、成本、SEO、性能估算均为纯函数
pub struct InsightGenerator;

impl InsightGenerator {
    /// 生成全部派生指标
    pub fn derive(form: &FormSubmission) -> DerivedInsights {
        let technical_specs = Self::technical_specs(&form.features);
        let timeline = Self::format_timeline(
            form.features.len(),
            technical_specs.maintenance_level.into(),
        );

        DerivedInsights {
            technical_specs,
            seo_analysis: Self::seo_analysis(&form.industry, form.goal()),
            performance_metrics: Self::performance_metrics(&form.features),
            cost_breakdown: Self::cost_breakdown(&form.resolved_website_type(), &form.features),
            timeline,
        }
    }

    /// 技术规格
    pub fn technical_specs(features: &BTreeSet<String>) -> TechnicalSpecs {
        let mut hosting = HostingProfile {
            min_storage: "5GB".to_string(),
            bandwidth: "100GB/month".to_string(),
            ssl_required: true,
            php_version: "8.0+".to_string(),
            mysql_version: "5.7+".to_string(),
        };

        if features.contains("E-commerce Store") {
            hosting.min_storage = "20GB".to_string();
            hosting.bandwidth = "500GB/month".to_string();
        }
        if features.contains("Advanced Analytics") || features.contains("Custom Database") {
            hosting.min_storage = "50GB".to_string();
        }

        let weeks = (4.0 + 0.5 * features.len() as f64).ceil() as u64;
        let complex_count = COMPLEX_FEATURES
            .iter()
            .filter(|f| features.contains(**f))
            .count();
        let maintenance_level = match complex_count {
            n if n > 2 => MaintenanceLevel::High,
            n if n > 0 => MaintenanceLevel::Medium,
            _ => MaintenanceLevel::Low,
        };

        TechnicalSpecs {
            hosting,
            recommended_cms: "WordPress".to_string(),
            development_time: format!("{} weeks", weeks),
            maintenance_level,
        }
    }

    /// 成本明细
    ///
    /// 总价恒等于各项之和，报价区间为总价的 0.8 / 1.2 倍
    pub fn cost_breakdown(website_type: &WebsiteType, features: &BTreeSet<String>) -> CostBreakdown {
        let multiplier = type_multiplier(website_type);

        let mut breakdown: BTreeMap<String, u64> = BASE_COSTS
            .iter()
            .map(|(key, cost)| (key.to_string(), (*cost as f64 * multiplier).round() as u64))
            .collect();

        let feature_cost: u64 = features
            .iter()
            .filter_map(|f| FEATURE_COSTS.get(f.as_str()))
            .sum();
        breakdown.insert("features".to_string(), feature_cost);

        let total: u64 = breakdown.values().sum();
        let low = (total as f64 * 0.8).round() as u64;
        let high = (total as f64 * 1.2).round() as u64;

        CostBreakdown {
            breakdown,
            total_estimated: total,
            range: CostRange {
                low,
                high,
                display: format!("${} - ${}", format_thousands(low), format_thousands(high)),
            },
            payment_schedule: vec![
                milestone("deposit", 30, "30% upfront"),
                milestone("milestone_1", 30, "30% at design approval"),
                milestone("milestone_2", 30, "30% at development completion"),
                milestone("final", 10, "10% at launch"),
            ],
        }
    }

    /// SEO分析
    pub fn seo_analysis(industry: &Industry, business_goal: Option<&str>) -> SeoAnalysis {
        let local_seo_potential = match business_goal {
            Some("Generate Leads") | Some("Accept Bookings/Appointments") => "High",
            _ => "Medium",
        };

        SeoAnalysis {
            keyword_opportunities: to_strings(keyword_suggestions(industry)),
            local_seo_potential: local_seo_potential.to_string(),
            content_recommendations: ContentRecommendations {
                blog_topics: to_strings(blog_topics(industry)),
                page_optimization: to_map(&[
                    ("title_tags", "Optimize for primary keywords"),
                    ("meta_descriptions", "Include call-to-action and value proposition"),
                    ("headings", "Use semantic H1-H6 structure"),
                    ("images", "Add descriptive alt text"),
                ]),
            },
            technical_seo: to_map(&[
                ("page_speed", "Optimize images and enable caching"),
                ("mobile_friendly", "Implement responsive design"),
                ("schema_markup", "Add business and product schemas"),
                ("sitemap", "Generate and submit XML sitemap"),
            ]),
        }
    }

    /// 性能估算
    pub fn performance_metrics(features: &BTreeSet<String>) -> PerformanceMetrics {
        let complexity = 2 * features.len() as u32;

        PerformanceMetrics {
            estimated_load_time: if complexity > 20 { "2-3 seconds" } else { "1-2 seconds" }.to_string(),
            mobile_performance: 85 + (10 - (complexity / 2).min(10)),
            optimization_priorities: to_strings(&[
                "Image compression and optimization",
                "CSS and JavaScript minification",
                "Browser caching implementation",
                "CDN setup for static assets",
            ]),
            monitoring_recommendations: to_strings(&[
                "Google PageSpeed Insights",
                "GTmetrix performance monitoring",
                "Core Web Vitals tracking",
                "Uptime monitoring",
            ]),
        }
    }

    /// 行业建议（配色、推荐功能）
    pub fn industry_suggestions(industry: &Industry) -> IndustrySuggestions {
        let (colors, features): (&[&str], &[&str]) = match industry {
            Industry::TechnologySoftware => (
                &["#3b82f6", "#8b5cf6", "#06b6d4"],
                &["API Integration", "Advanced Analytics", "Custom Database"],
            ),
            Industry::HealthcareMedical => (
                &["#10b981", "#3b82f6", "#f59e0b"],
                &["Online Booking", "Patient Portal", "HIPAA Compliance"],
            ),
            Industry::EcommerceRetail => (
                &["#f59e0b", "#ef4444", "#8b5cf6"],
                &["E-commerce Store", "Payment Gateway", "Inventory Management"],
            ),
            Industry::RestaurantFood => (
                &["#f59e0b", "#ef4444", "#84cc16"],
                &["Online Booking", "Menu Display", "Order System"],
            ),
            _ => (
                &["#3b82f6", "#8b5cf6", "#f59e0b"],
                &["Contact Forms", "Mobile Responsive", "SEO Optimization"],
            ),
        };

        IndustrySuggestions {
            colors: to_strings(colors),
            features: to_strings(features),
        }
    }

    /// 格式化项目周期
    ///
    /// 不超过4周时以周表示，否则以月表示
    pub fn format_timeline(feature_count: usize, complexity: ProjectComplexity) -> String {
        let base = match complexity {
            ProjectComplexity::Simple => 2.0,
            ProjectComplexity::Medium => 4.0,
            ProjectComplexity::Complex => 8.0,
        };
        let weeks = ((base + 0.5 * feature_count as f64).ceil() as u64).max(2);

        if weeks <= 4 {
            format!("{} weeks", weeks)
        } else {
            let months = weeks.div_ceil(4);
            format!("{} month{}", months, if months > 1 { "s" } else { "" })
        }
    }

    /// 估算一次调用的API费用（美元）
    pub fn estimate_api_cost(tokens: u32, model: &str) -> f64 {
        // Provider-qualified names such as "anthropic/claude-3.5-sonnet"
        let name = model.rsplit('/').next().unwrap_or(model);
        let price = MODEL_PRICES
            .get(name)
            .copied()
            .unwrap_or(DEFAULT_PRICE_PER_1K);
        f64::from(tokens) / 1000.0 * price
    }
}

fn type_multiplier(website_type: &WebsiteType) -> f64 {
    match website_type {
        WebsiteType::EcommerceStore => 2.0,
        WebsiteType::SaasPlatform => 3.0,
        WebsiteType::MembershipCommunity => 2.5,
        WebsiteType::BusinessWebsite => 1.0,
        WebsiteType::PortfolioSite => 0.7,
        WebsiteType::LandingPage => 0.4,
        _ => 1.0,
    }
}

fn keyword_suggestions(industry: &Industry) -> &'static [&'static str] {
    match industry {
        Industry::TechnologySoftware => &["software development", "tech solutions", "digital transformation"],
        Industry::HealthcareMedical => &["medical services", "healthcare provider", "patient care"],
        Industry::EcommerceRetail => &["online store", "retail products", "shopping"],
        Industry::EducationTraining => &["online courses", "training programs", "education services"],
        Industry::FinanceBanking => &["financial services", "banking solutions", "investment advice"],
        _ => &["business services", "professional solutions", "expert consulting"],
    }
}

fn blog_topics(industry: &Industry) -> &'static [&'static str] {
    match industry {
        Industry::TechnologySoftware => &["Industry trends", "Software tutorials", "Tech news"],
        Industry::HealthcareMedical => &["Health tips", "Medical advances", "Wellness guides"],
        Industry::EcommerceRetail => &["Product spotlights", "Shopping guides", "Industry trends"],
        _ => &["Industry insights", "Best practices", "Case studies"],
    }
}

fn milestone(key: &str, percent: u8, description: &str) -> PaymentMilestone {
    PaymentMilestone {
        key: key.to_string(),
        percent,
        description: description.to_string(),
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn to_map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// 以逗号分隔千位
fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
