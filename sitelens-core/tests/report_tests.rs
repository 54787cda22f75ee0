// Tests for report generation

use sitelens_analyzer::model::{EntityType, SiteEntity};
use sitelens_analyzer::{PageTemplate, SiteModel, TemplateType};
use sitelens_core::report::{
    ReportFormat, generate_json_report, generate_markdown_report, generate_text_report,
    save_report,
};

fn sample_model() -> SiteModel {
    let mut model = SiteModel::new("shop.example.com".to_string());

    model.record_template(PageTemplate::new(
        TemplateType::Home,
        "/".to_string(),
        "https://shop.example.com/".to_string(),
        vec!["Site root URL".to_string()],
        vec!["Navigation".to_string(), "Footer".to_string()],
    ));
    model.record_template(PageTemplate::new(
        TemplateType::ProductDetail,
        "/product/:id".to_string(),
        "https://shop.example.com/product/42".to_string(),
        vec![
            "Add-to-cart control".to_string(),
            "Price display (1 price element(s))".to_string(),
        ],
        vec![],
    ));

    model.add_entity(SiteEntity {
        entity_type: EntityType::Category,
        name: "Electronics".to_string(),
        url: "https://shop.example.com/electronics".to_string(),
        parent_category: None,
    });

    model.site_map = vec![
        "https://shop.example.com/".to_string(),
        "https://shop.example.com/electronics".to_string(),
        "https://shop.example.com/product/42".to_string(),
    ];
    model.robots_txt = Some("User-agent: *".to_string());
    model
}

// ============================================================================
// Format Parsing Tests
// ============================================================================

#[test]
fn test_report_format_from_str() {
    assert!(matches!(ReportFormat::from_str("text"), Some(ReportFormat::Text)));
    assert!(matches!(ReportFormat::from_str("JSON"), Some(ReportFormat::Json)));
    assert!(matches!(ReportFormat::from_str("md"), Some(ReportFormat::Markdown)));
    assert!(ReportFormat::from_str("csv").is_none());
}

// ============================================================================
// Text Report Tests
// ============================================================================

#[test]
fn test_text_report_contains_summary() {
    let report = generate_text_report(&sample_model());

    assert!(report.contains("Domain: shop.example.com"));
    assert!(report.contains("Templates found: 2"));
    assert!(report.contains("Categories found: 1"));
    assert!(report.contains("Pages visited: 3"));
    assert!(report.contains("robots.txt: captured"));
}

#[test]
fn test_text_report_lists_templates_in_stable_order() {
    let report = generate_text_report(&sample_model());

    let home = report.find("[home] /").expect("home template missing");
    let product = report
        .find("[product detail] /product/:id")
        .expect("product template missing");
    assert!(home < product);
    assert!(report.contains("Add-to-cart control"));
    assert!(report.contains("elements: Navigation, Footer"));
}

#[test]
fn test_text_report_lists_entities_and_site_map() {
    let report = generate_text_report(&sample_model());

    assert!(report.contains("Electronics /electronics"));
    assert!(report.contains("├── /"));
    assert!(report.contains("└── /product/42"));
}

#[test]
fn test_text_report_empty_model() {
    let report = generate_text_report(&SiteModel::new("example.com".to_string()));

    assert!(report.contains("Templates found: 0"));
    assert!(report.contains("(none detected)"));
    assert!(report.contains("robots.txt: not available"));
}

// ============================================================================
// JSON Report Tests
// ============================================================================

#[test]
fn test_json_report_structure() {
    let json = generate_json_report(&sample_model()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["report"]["metadata"]["generator"], "Sitelens");
    assert_eq!(value["report"]["model"]["domain"], "shop.example.com");
    assert_eq!(
        value["report"]["model"]["templates"]["productDetail"]["urlPattern"],
        "/product/:id"
    );
    assert_eq!(value["report"]["model"]["entities"][0]["type"], "category");
    assert_eq!(value["report"]["model"]["siteMap"].as_array().unwrap().len(), 3);
}

// ============================================================================
// Markdown Report Tests
// ============================================================================

#[test]
fn test_markdown_report() {
    let report = generate_markdown_report(&sample_model());

    assert!(report.contains("# Site model: shop.example.com"));
    assert!(report.contains("- **product detail** `/product/:id`"));
    assert!(report.contains("- [Electronics](https://shop.example.com/electronics)"));
}

// ============================================================================
// File Output Tests
// ============================================================================

#[test]
fn test_save_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.txt");

    save_report("report body", &path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "report body");
}
