use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Closed set of page layouts the classifier can assign. ProductListing,
/// Checkout, Account and Content are reserved outcomes; the current rule
/// chain never emits them but downstream consumers must handle them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TemplateType {
    ProductDetail,
    ProductListing,
    Category,
    Home,
    Search,
    Cart,
    Checkout,
    Account,
    Content,
    Unknown,
}

impl TemplateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateType::ProductDetail => "product detail",
            TemplateType::ProductListing => "product listing",
            TemplateType::Category => "category",
            TemplateType::Home => "home",
            TemplateType::Search => "search",
            TemplateType::Cart => "cart",
            TemplateType::Checkout => "checkout",
            TemplateType::Account => "account",
            TemplateType::Content => "content",
            TemplateType::Unknown => "unknown",
        }
    }
}

/// One recurring page layout, recorded the first time a page of its type is
/// classified during a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageTemplate {
    pub template_type: TemplateType,
    pub url_pattern: String,
    pub example_urls: Vec<String>,
    pub characteristics: Vec<String>,
    pub detected_elements: Vec<String>,
}

impl PageTemplate {
    pub fn new(
        template_type: TemplateType,
        url_pattern: String,
        example_url: String,
        characteristics: Vec<String>,
        detected_elements: Vec<String>,
    ) -> Self {
        Self {
            template_type,
            url_pattern,
            example_urls: vec![example_url],
            characteristics,
            detected_elements,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityType {
    Category,
    Subcategory,
    Brand,
    Collection,
}

/// A concrete navigable item (one category link), as opposed to a layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteEntity {
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_category: Option<String>,
}

/// Aggregate result of one analysis run. Field names are part of the
/// serialized contract consumed by the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteModel {
    pub domain: String,
    pub analyzed_at: DateTime<Utc>,
    pub templates: HashMap<TemplateType, PageTemplate>,
    pub entities: Vec<SiteEntity>,
    pub site_map: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub robots_txt: Option<String>,
}

impl SiteModel {
    pub fn new(domain: String) -> Self {
        Self {
            domain,
            analyzed_at: Utc::now(),
            templates: HashMap::new(),
            entities: Vec::new(),
            site_map: Vec::new(),
            robots_txt: None,
        }
    }

    pub fn has_template(&self, template_type: TemplateType) -> bool {
        self.templates.contains_key(&template_type)
    }

    /// Records a template unless one of the same type already exists.
    /// First classification of a given type wins.
    pub fn record_template(&mut self, template: PageTemplate) {
        self.templates
            .entry(template.template_type)
            .or_insert(template);
    }

    /// Adds an entity unless one with the same URL was already recorded.
    pub fn add_entity(&mut self, entity: SiteEntity) {
        if !self.entities.iter().any(|e| e.url == entity.url) {
            self.entities.push(entity);
        }
    }
}
