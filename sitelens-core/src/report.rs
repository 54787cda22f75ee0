// Report generation from a completed site model

use crate::analysis::extract_url_path;
use serde::{Deserialize, Serialize};
use sitelens_analyzer::{PageTemplate, SiteModel, TemplateType};
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
    Markdown,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "markdown" | "md" => Some(ReportFormat::Markdown),
            _ => None,
        }
    }
}

/// Stable display order for the template section.
const TEMPLATE_ORDER: &[TemplateType] = &[
    TemplateType::Home,
    TemplateType::Category,
    TemplateType::ProductListing,
    TemplateType::ProductDetail,
    TemplateType::Search,
    TemplateType::Cart,
    TemplateType::Checkout,
    TemplateType::Account,
    TemplateType::Content,
    TemplateType::Unknown,
];

fn ordered_templates(model: &SiteModel) -> impl Iterator<Item = &PageTemplate> {
    TEMPLATE_ORDER
        .iter()
        .filter_map(|template_type| model.templates.get(template_type))
}

pub fn generate_text_report(model: &SiteModel) -> String {
    let mut report = String::new();
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    report.push_str("# Summary:\n");
    report.push_str(&format!("  Domain: {}\n", model.domain));
    report.push_str(&format!(
        "  Analyzed: {}\n",
        model.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    report.push_str(&format!("  Templates found: {}\n", model.templates.len()));
    report.push_str(&format!("  Categories found: {}\n", model.entities.len()));
    report.push_str(&format!("  Pages visited: {}\n", model.site_map.len()));
    report.push_str(&format!(
        "  robots.txt: {}\n",
        if model.robots_txt.is_some() {
            "captured"
        } else {
            "not available"
        }
    ));

    report.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    report.push_str("## Page templates\n\n");
    if model.templates.is_empty() {
        report.push_str("  (none detected)\n");
    }
    for template in ordered_templates(model) {
        report.push_str(&format!(
            "  [{}] {}\n",
            template.template_type.as_str(),
            template.url_pattern
        ));
        if let Some(example) = template.example_urls.first() {
            report.push_str(&format!("      example: {}\n", example));
        }
        for characteristic in &template.characteristics {
            report.push_str(&format!("      - {}\n", characteristic));
        }
        if !template.detected_elements.is_empty() {
            report.push_str(&format!(
                "      elements: {}\n",
                template.detected_elements.join(", ")
            ));
        }
        report.push('\n');
    }

    report.push_str("## Categories\n\n");
    if model.entities.is_empty() {
        report.push_str("  (none detected)\n");
    }
    for entity in &model.entities {
        report.push_str(&format!(
            "  {} {}\n",
            entity.name,
            extract_url_path(&entity.url)
        ));
    }

    report.push_str("\n## Site map\n\n");
    for (i, url) in model.site_map.iter().enumerate() {
        let prefix = if i == model.site_map.len() - 1 {
            "└── "
        } else {
            "├── "
        };
        report.push_str(&format!("  {}{}\n", prefix, extract_url_path(url)));
    }

    report.push('\n');
    report
}

pub fn generate_json_report(model: &SiteModel) -> Result<String, serde_json::Error> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "Sitelens",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json"
            },
            "model": model
        }
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn generate_markdown_report(model: &SiteModel) -> String {
    let mut report = String::new();
    report.push_str(&format!("# Site model: {}\n\n", model.domain));
    report.push_str(&format!(
        "Analyzed {}: {} template(s), {} categories, {} page(s) visited.\n\n",
        model.analyzed_at.format("%Y-%m-%d %H:%M UTC"),
        model.templates.len(),
        model.entities.len(),
        model.site_map.len()
    ));

    report.push_str("## Templates\n\n");
    for template in ordered_templates(model) {
        report.push_str(&format!(
            "- **{}** `{}`",
            template.template_type.as_str(),
            template.url_pattern
        ));
        if !template.characteristics.is_empty() {
            report.push_str(&format!(" ({})", template.characteristics.join("; ")));
        }
        report.push('\n');
    }

    report.push_str("\n## Categories\n\n");
    for entity in &model.entities {
        report.push_str(&format!("- [{}]({})\n", entity.name, entity.url));
    }

    report.push_str("\n## Site map\n\n");
    for url in &model.site_map {
        report.push_str(&format!("- `{}`\n", extract_url_path(url)));
    }

    report
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
