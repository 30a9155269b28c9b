// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde_json::{json, Value};
use std::collections::{BTreeMap, BTreeSet};

use crate::domain::models::form_submission::{FormSubmission, Industry, WebsiteType};
use crate::domain::models::wireframe::{
    AdditionalPage, Breakpoints, ElementMap, PageLayout, PageSectionOutline, ResponsiveLayouts,
    SectionPriority, SectionType, WireframeLayout, WireframeSection,
};

/// 首页布局类型
const HOMEPAGE_LAYOUT: &str = "single_column";
/// 首页最大宽度
const HOMEPAGE_MAX_WIDTH: u32 = 1200;
const MOBILE_MAX_WIDTH: u32 = 375;
const TABLET_MAX_WIDTH: u32 = 768;

/// 线框图规则引擎
///
/// 纯函数：相同输入总是产生相同布局，不做任何I/O
pub struct WireframeGenerator;

impl WireframeGenerator {
    /// 根据表单生成完整线框图
    pub fn generate(form: &FormSubmission) -> WireframeLayout {
        Self::generate_wireframe(
            &form.resolved_website_type(),
            &form.industry,
            &form.features,
            form.goal(),
        )
    }

    /// 生成线框图
    ///
    /// # 参数
    ///
    /// * `website_type` - 网站类型
    /// * `industry` - 行业
    /// * `features` - 功能标签集合
    /// * `business_goal` - 业务目标
    pub fn generate_wireframe(
        website_type: &WebsiteType,
        industry: &Industry,
        features: &BTreeSet<String>,
        business_goal: Option<&str>,
    ) -> WireframeLayout {
        let homepage = Self::homepage(website_type, features, business_goal);
        let responsive = Self::responsive_variants(&homepage);

        WireframeLayout {
            additional_pages: Self::additional_pages(website_type, features),
            responsive,
            layout_rationale: Self::layout_rationale(industry),
            interaction_patterns: Self::interaction_patterns(features),
            component_library: Self::component_library(features),
            homepage,
        }
    }

    fn homepage(
        website_type: &WebsiteType,
        features: &BTreeSet<String>,
        business_goal: Option<&str>,
    ) -> PageLayout {
        let mut sections = Vec::with_capacity(7);

        sections.push(
            WireframeSection::new("Header", SectionType::Navigation, 80, SectionPriority::Critical)
                .with_elements(elements([
                    ("logo", json!({"position": "left", "width": "20%"})),
                    ("navigation", json!({"position": "center", "width": "60%"})),
                    ("cta_button", json!({"position": "right", "width": "20%"})),
                ]))
                .with_color("#1e293b")
                .with_mobile_behavior("hamburger_menu"),
        );

        sections.push(Self::hero_section(website_type));

        if matches!(
            website_type,
            WebsiteType::BusinessWebsite | WebsiteType::SaasPlatform | WebsiteType::ProfessionalServices
        ) {
            sections.push(
                WireframeSection::new("Value Propositions", SectionType::FeatureGrid, 400, SectionPriority::High)
                    .with_elements(elements([
                        ("title", json!({"text": "Why Choose Us"})),
                        ("grid", json!({"columns": 3, "items": 3})),
                    ]))
                    .with_color("#f8fafc"),
            );
        }

        sections.push(Self::services_section(website_type));

        // Portfolio sites only show social proof when testimonials were requested
        if *website_type != WebsiteType::PortfolioSite || features.contains("Testimonials") {
            sections.push(
                WireframeSection::new("Social Proof", SectionType::Testimonials, 350, SectionPriority::Medium)
                    .with_elements(elements([
                        ("testimonials", json!({"count": 3, "layout": "carousel"})),
                        ("logos", json!({"count": 6, "layout": "grid"})),
                    ]))
                    .with_color("#f1f5f9"),
            );
        }

        sections.push(Self::cta_section(business_goal));

        sections.push(
            WireframeSection::new("Footer", SectionType::Footer, 300, SectionPriority::Medium)
                .with_elements(elements([
                    ("company_info", json!({"width": "25%"})),
                    ("quick_links", json!({"width": "25%"})),
                    ("contact_info", json!({"width": "25%"})),
                    ("social_media", json!({"width": "25%"})),
                ]))
                .with_color("#0f172a"),
        );

        let mut layout = PageLayout::from_sections(sections, HOMEPAGE_LAYOUT, HOMEPAGE_MAX_WIDTH);
        layout.responsive_breakpoints = Some(Breakpoints::default());
        layout
    }

    fn hero_section(website_type: &WebsiteType) -> WireframeSection {
        let (layout, hero_elements) = match website_type {
            WebsiteType::EcommerceStore => (
                "product_showcase",
                elements([
                    ("headline", json!({"position": "left", "width": "50%"})),
                    ("product_image", json!({"position": "right", "width": "50%"})),
                    ("search_bar", json!({"position": "center", "width": "80%"})),
                    ("category_nav", json!({"position": "bottom", "width": "100%"})),
                ]),
            ),
            WebsiteType::SaasPlatform => (
                "demo_focused",
                elements([
                    ("headline", json!({"position": "center", "width": "80%"})),
                    ("subheadline", json!({"position": "center", "width": "60%"})),
                    ("demo_video", json!({"position": "center", "width": "70%"})),
                    ("trial_button", json!({"position": "center", "width": "30%"})),
                ]),
            ),
            WebsiteType::PortfolioSite => (
                "visual_showcase",
                elements([
                    ("name_title", json!({"position": "left", "width": "40%"})),
                    ("featured_work", json!({"position": "right", "width": "60%"})),
                    ("skills_tags", json!({"position": "bottom", "width": "100%"})),
                ]),
            ),
            _ => (
                "standard_business",
                elements([
                    ("headline", json!({"position": "left", "width": "50%"})),
                    ("hero_image", json!({"position": "right", "width": "50%"})),
                    ("cta_buttons", json!({"position": "left", "width": "50%"})),
                ]),
            ),
        };

        WireframeSection::new("Hero Section", SectionType::Hero, 600, SectionPriority::Critical)
            .with_elements(hero_elements)
            .with_layout(layout)
            .with_color("#3b82f6")
    }

    fn services_section(website_type: &WebsiteType) -> WireframeSection {
        let section = match website_type {
            WebsiteType::EcommerceStore => {
                WireframeSection::new("Featured Products", SectionType::ProductGrid, 500, SectionPriority::High)
                    .with_elements(elements([
                        ("product_cards", json!({"columns": 4, "rows": 2})),
                        ("filter_sidebar", json!({"width": "20%"})),
                        ("sort_options", json!({"position": "top"})),
                    ]))
            }
            WebsiteType::PortfolioSite => {
                WireframeSection::new("Portfolio Gallery", SectionType::PortfolioGrid, 600, SectionPriority::High)
                    .with_elements(elements([
                        ("project_cards", json!({"columns": 3, "masonry": true})),
                        ("category_filter", json!({"position": "top"})),
                        ("view_all_button", json!({"position": "bottom"})),
                    ]))
            }
            _ => WireframeSection::new("Our Services", SectionType::ServicesGrid, 450, SectionPriority::High)
                .with_elements(elements([
                    ("service_cards", json!({"columns": 3, "rows": 1})),
                    ("service_icons", json!({"style": "outlined"})),
                    ("learn_more_links", json!({"style": "text_link"})),
                ])),
        };

        section.with_color("#ffffff")
    }

    fn cta_section(business_goal: Option<&str>) -> WireframeSection {
        let section = match business_goal {
            Some("Generate Leads") => {
                WireframeSection::new("Lead Capture", SectionType::LeadForm, 400, SectionPriority::High)
                    .with_elements(elements([
                        ("headline", json!({"text": "Get Your Free Consultation"})),
                        ("form", json!({"fields": ["name", "email", "phone", "message"]})),
                        ("benefits_list", json!({"items": 3})),
                    ]))
            }
            Some("Sell Products Online") => {
                WireframeSection::new("Shop Now", SectionType::ProductCta, 300, SectionPriority::High)
                    .with_elements(elements([
                        ("headline", json!({"text": "Start Shopping Today"})),
                        ("featured_categories", json!({"count": 4})),
                        ("promo_banner", json!({"text": "Free shipping on orders over $50"})),
                    ]))
            }
            Some("Accept Bookings/Appointments") => {
                WireframeSection::new("Book Appointment", SectionType::BookingWidget, 350, SectionPriority::High)
                    .with_elements(elements([
                        ("calendar_widget", json!({"style": "inline"})),
                        ("service_selector", json!({"type": "dropdown"})),
                        ("contact_info", json!(["phone", "address"])),
                    ]))
            }
            _ => WireframeSection::new("Get Started", SectionType::GeneralCta, 250, SectionPriority::High)
                .with_elements(elements([
                    ("headline", json!({"text": "Ready to Get Started?"})),
                    ("cta_button", json!({"text": "Contact Us Today"})),
                    ("contact_options", json!(["phone", "email", "form"])),
                ])),
        };

        section.with_color("#6366f1")
    }

    fn additional_pages(website_type: &WebsiteType, features: &BTreeSet<String>) -> Vec<AdditionalPage> {
        let is_store = *website_type == WebsiteType::EcommerceStore;
        let mut pages = vec![page(
            "about",
            "About Us",
            SectionPriority::High,
            &[
                ("Company Story", 400),
                ("Team Members", 500),
                ("Mission & Values", 300),
                ("Contact CTA", 200),
            ],
        )];

        if !is_store {
            pages.push(page(
                "services",
                "Services",
                SectionPriority::High,
                &[
                    ("Services Overview", 300),
                    ("Service Details", 600),
                    ("Process Timeline", 400),
                    ("Pricing Table", 500),
                ],
            ));
        }

        if is_store || features.contains("E-commerce Store") {
            pages.push(page(
                "product_detail",
                "Product Detail",
                SectionPriority::Critical,
                &[
                    ("Product Gallery", 500),
                    ("Product Info", 400),
                    ("Reviews & Ratings", 350),
                    ("Related Products", 300),
                ],
            ));
        }

        pages.push(page(
            "contact",
            "Contact",
            SectionPriority::Medium,
            &[("Contact Form", 400), ("Location Map", 300), ("Contact Information", 200)],
        ));

        if features.contains("Blog System") {
            pages.push(page(
                "blog",
                "Blog",
                SectionPriority::Medium,
                &[("Featured Posts", 300), ("Post Grid", 600), ("Categories Sidebar", 400)],
            ));
        }

        pages
    }

    /// 生成移动端与平板端布局
    ///
    /// 纯函数且幂等：只读取桌面布局，不修改输入
    pub fn responsive_variants(homepage: &PageLayout) -> ResponsiveLayouts {
        let mobile_sections = homepage
            .sections
            .iter()
            .map(|section| {
                let mut mobile = section.clone();
                mobile.height = scale(section.height, mobile_height_factor(section.section_type));
                mobile.layout = Some("stacked".to_string());
                mobile
            })
            .collect();

        let tablet_sections = homepage
            .sections
            .iter()
            .map(|section| {
                let mut tablet = section.clone();
                tablet.height = scale(section.height, 0.8);
                tablet
            })
            .collect();

        ResponsiveLayouts {
            mobile: PageLayout::from_sections(mobile_sections, HOMEPAGE_LAYOUT, MOBILE_MAX_WIDTH),
            tablet: PageLayout::from_sections(tablet_sections, "hybrid", TABLET_MAX_WIDTH),
        }
    }

    fn layout_rationale(industry: &Industry) -> BTreeMap<String, String> {
        let mut rationale: BTreeMap<String, String> = [
            ("header_design", "Clean navigation with prominent CTA button for easy user action"),
            ("hero_section", "Large hero area to immediately communicate value proposition"),
            ("content_hierarchy", "Logical flow from problem to solution to social proof to action"),
            ("white_space", "Generous spacing to improve readability and focus attention"),
            ("mobile_first", "Responsive design ensuring optimal experience on all devices"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        match industry {
            Industry::EcommerceRetail => {
                rationale.insert(
                    "product_focus".to_string(),
                    "Product imagery and easy navigation to shopping features".to_string(),
                );
            }
            Industry::HealthcareMedical => {
                rationale.insert(
                    "trust_elements".to_string(),
                    "Prominent trust signals and professional appearance".to_string(),
                );
            }
            _ => {}
        }

        rationale
    }

    fn interaction_patterns(features: &BTreeSet<String>) -> BTreeMap<String, BTreeMap<String, String>> {
        let mut patterns = BTreeMap::new();
        patterns.insert(
            "navigation".to_string(),
            string_map(&[
                ("desktop", "Horizontal menu with hover states"),
                ("mobile", "Hamburger menu with slide-out navigation"),
            ]),
        );
        patterns.insert(
            "buttons".to_string(),
            string_map(&[
                ("primary", "Solid background with hover animation"),
                ("secondary", "Outlined style with fill animation"),
            ]),
        );
        patterns.insert(
            "forms".to_string(),
            string_map(&[
                ("validation", "Real-time validation with clear error messages"),
                ("submission", "Loading states and success confirmations"),
            ]),
        );

        if features.contains("E-commerce Store") {
            patterns.insert(
                "shopping".to_string(),
                string_map(&[
                    ("product_cards", "Hover overlay with quick action buttons"),
                    ("cart", "Slide-out cart with quantity controls"),
                    ("checkout", "Multi-step process with progress indicator"),
                ]),
            );
        }

        if features.contains("Live Chat") {
            patterns.insert(
                "chat".to_string(),
                string_map(&[
                    ("trigger", "Floating button in bottom right corner"),
                    ("window", "Slide-up chat interface with minimize option"),
                ]),
            );
        }

        patterns
    }

    fn component_library(features: &BTreeSet<String>) -> BTreeMap<String, Value> {
        let mut components = BTreeMap::new();
        components.insert(
            "buttons".to_string(),
            json!({
                "primary_button": {"style": "solid", "sizes": ["sm", "md", "lg"]},
                "secondary_button": {"style": "outline", "sizes": ["sm", "md", "lg"]},
                "text_link": {"style": "underline", "states": ["default", "hover"]}
            }),
        );
        components.insert(
            "forms".to_string(),
            json!({
                "input_field": {"types": ["text", "email", "tel", "textarea"]},
                "select_dropdown": {"styles": ["default", "searchable"]},
                "checkbox": {"styles": ["default", "switch"]},
                "radio_button": {"styles": ["default", "card"]}
            }),
        );
        components.insert(
            "cards".to_string(),
            json!({
                "content_card": {"variants": ["text", "image", "mixed"]},
                "product_card": {"elements": ["image", "title", "price", "rating"]},
                "testimonial_card": {"elements": ["quote", "author", "avatar", "rating"]}
            }),
        );
        components.insert(
            "navigation".to_string(),
            json!({
                "main_menu": {"orientations": ["horizontal", "vertical"]},
                "breadcrumbs": {"separator": "chevron"},
                "pagination": {"styles": ["numbered", "prev_next"]}
            }),
        );

        if features.contains("Online Booking") {
            components.insert(
                "booking".to_string(),
                json!({
                    "calendar_widget": {"views": ["month", "week", "day"]},
                    "time_picker": {"intervals": ["15min", "30min", "60min"]},
                    "booking_form": {"steps": ["service", "time", "details", "confirmation"]}
                }),
            );
        }

        components
    }
}

fn mobile_height_factor(section_type: SectionType) -> f64 {
    match section_type {
        SectionType::Hero => 0.7,
        SectionType::FeatureGrid => 1.5,
        SectionType::Testimonials => 0.8,
        _ => 1.0,
    }
}

fn scale(height: u32, factor: f64) -> u32 {
    (f64::from(height) * factor).round() as u32
}

fn elements<const N: usize>(entries: [(&str, Value); N]) -> ElementMap {
    entries
        .into_iter()
        .map(|(name, config)| (name.to_string(), config))
        .collect()
}

fn string_map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn page(key: &str, name: &str, priority: SectionPriority, sections: &[(&str, u32)]) -> AdditionalPage {
    AdditionalPage {
        key: key.to_string(),
        name: name.to_string(),
        sections: sections
            .iter()
            .map(|(name, height)| PageSectionOutline {
                name: name.to_string(),
                height: *height,
            })
            .collect(),
        priority,
    }
}

#[cfg(test)]
#[path = "wireframe_service_test.rs"]
mod tests;
