// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::concept::GeneratedConcept;
use crate::domain::models::form_submission::{non_blank, FormSubmission};

/// 所有请求共用的系统指令
pub const SYSTEM_INSTRUCTION: &str =
    "You are a professional web development consultant. Always respond with valid JSON only.";

const CONCEPT_PREAMBLE: &str =
    "You are an expert web development consultant creating a comprehensive website concept.";

const CONCEPT_SCHEMA: &str = r#"RESPOND WITH ONLY VALID JSON IN THIS EXACT STRUCTURE:
{
  "concept": {
    "title": "[Use actual business name from input]",
    "tagline": "[Industry-specific, compelling tagline max 60 characters]",
    "description": "[Detailed 2-3 sentence description matching goals and industry]",
    "estimatedCost": "[Realistic cost range based on budget and features]",
    "timeline": "[Appropriate timeline in weeks/months]",
    "pages": "[Recommended number of pages]",
    "sections": ["[5-8 specific sections relevant to the business type]"],
    "value_propositions": ["[3-5 key value propositions for this business]"],
    "target_actions": ["[3-4 specific calls-to-action users should take]"]
  },
  "colorScheme": {
    "primary": "[Hex color matching industry/style]",
    "secondary": "[Complementary hex color]",
    "accent": "[Accent hex color]",
    "background": "[Background hex color]",
    "text": "[Text hex color]",
    "success": "[Success state color]",
    "warning": "[Warning state color]"
  },
  "typography": {
    "headings": "[Professional font family for headings]",
    "body": "[Readable font family for body text]",
    "sizes": {"h1": "[Size in px]", "h2": "[Size in px]", "body": "[Size in px]"}
  },
  "features": {
    "essential": ["[3-5 essential features for this business type]"],
    "recommended": ["[3-5 recommended features based on goals]"],
    "advanced": ["[2-4 advanced features for growth]"]
  },
  "content_strategy": {
    "homepage_sections": [
      {"name": "[Section name]", "purpose": "[What this section achieves]", "content_type": "[Text/Image/Video/Form etc.]"}
    ],
    "additional_pages": [
      {"name": "[Page name]", "purpose": "[Why this page is needed]", "priority": "[High/Medium/Low]"}
    ]
  },
  "seoScore": "[85-98 based on complexity]",
  "performanceScore": "[80-95 based on features]",
  "accessibilityScore": "[90-99 based on standards]",
  "mobileScore": "[90-99 mobile optimization score]"
}"#;

const DEMO_INSTRUCTIONS: &str = r#"REQUIREMENTS:
1. Create realistic, industry-specific content
2. Use the provided color scheme
3. Include functional features based on website type
4. Make it responsive and professional
5. Add realistic business information

RESPOND WITH ONLY THIS JSON:
{
  "html": "[Complete HTML document with inline CSS and JS]",
  "css": "[Additional CSS styles]",
  "js": "[JavaScript functionality]"
}

IMPORTANT:
- For E-commerce: Include product grids, shopping cart, product pages
- For Restaurant: Include menu, reservations, location
- For Portfolio: Include project gallery, about section
- For SaaS: Include pricing, features, demo sections
- Use REAL placeholder content, not lorem ipsum
- Make forms functional with proper validation
- Include hover effects and animations"#;

/// 构建概念生成提示词
///
/// 前言 + 客户需求（缺失字段使用默认值）+ 期望的JSON结构
pub fn build_concept_prompt(form: &FormSubmission) -> String {
    let mut lines = vec![
        "CLIENT REQUIREMENTS:".to_string(),
        format!("- Business: {}", form.business_type.trim()),
        format!("- Industry: {}", form.industry),
        format!("- Company Size: {}", or_default(&form.company_size, "Not specified")),
        format!("- Target Audience: {}", or_default(&form.target_audience, "General")),
        format!("- Primary Goal: {}", form.goal().unwrap_or("Brand awareness")),
        format!("- Budget: {}", or_default(&form.budget, "Not specified")),
        format!("- Website Type: {}", form.resolved_website_type()),
        format!("- Design Style: {}", form.resolved_design_style()),
        format!("- Timeline: {}", or_default(&form.timeline, "Flexible")),
    ];

    if !form.features.is_empty() {
        lines.push(format!("- Required Features: {}", join(form.features.iter())));
    }

    let optional = [
        ("Business Description", &form.business_description),
        ("Page Count", &form.page_count),
        ("Content Status", &form.content_status),
        ("Current Website", &form.current_website),
        ("Existing Website", &form.existing_website),
        ("Existing Branding", &form.existing_branding),
        ("Color Preference", &form.color_preference),
        ("Design Inspiration", &form.design_inspiration),
        ("Additional Requirements", &form.additional_requirements),
    ];
    for (label, value) in optional {
        if let Some(value) = non_blank(value) {
            lines.push(format!("- {}: {}", label, value));
        }
    }

    if !form.competitors.is_empty() {
        lines.push(format!("- Competitors: {}", join(form.competitors.iter())));
    }

    format!("{}\n\n{}\n\n{}", CONCEPT_PREAMBLE, lines.join("\n"), CONCEPT_SCHEMA)
}

/// 构建演示站点生成提示词
pub fn build_demo_prompt(concept: &GeneratedConcept, form: &FormSubmission) -> String {
    let business = match form.business_type.trim() {
        "" => "Business",
        name => name,
    };
    let industry = match form.industry.label().trim() {
        "" => "Professional Services",
        label => label,
    };
    let colors = serde_json::to_string(&concept.color_scheme).unwrap_or_else(|_| "{}".to_string());

    format!(
        "You are an expert web developer. Create a complete, functional HTML demo website.\n\n\
         BUSINESS DETAILS:\n\
         - Business: {}\n\
         - Industry: {}\n\
         - Website Type: {}\n\
         - Design Style: {}\n\
         - Features: {}\n\
         - Colors: {}\n\
         - Concept: {} - {}\n\n\
         {}",
        business,
        industry,
        form.resolved_website_type(),
        form.resolved_design_style(),
        join(form.features.iter()),
        colors,
        concept.concept.title,
        concept.concept.tagline,
        DEMO_INSTRUCTIONS
    )
}

fn or_default<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
    non_blank(value).unwrap_or(default)
}

fn join<'a>(items: impl Iterator<Item = &'a String>) -> String {
    items.map(String::as_str).collect::<Vec<_>>().join(", ")
}
