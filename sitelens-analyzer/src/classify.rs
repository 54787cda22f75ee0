//! Per-page template classification.
//!
//! The classifier is a fixed priority chain of rules evaluated in sequence;
//! the first rule that matches decides the template type. Every rule is a
//! plain function so individual rules stay independently testable.

use crate::model::TemplateType;
use crate::pattern::is_product_link;
use scraper::{Html, Selector};
use url::Url;

/// Outcome of classifying one fetched page.
#[derive(Debug, Clone)]
pub struct PageClassification {
    pub template_type: TemplateType,
    pub characteristics: Vec<String>,
    pub detected_elements: Vec<String>,
}

/// Everything a rule is allowed to look at.
pub struct PageSignals<'a> {
    pub url: &'a str,
    pub root_url: &'a str,
    pub doc: &'a Html,
}

type Rule = fn(&PageSignals) -> Option<(TemplateType, Vec<String>)>;

/// Priority-ordered rule chain. Order matters: a product page full of price
/// elements must not fall through to the category rule and vice versa.
const RULES: &[Rule] = &[
    product_detail_rule,
    category_rule,
    home_rule,
    cart_rule,
    search_rule,
];

/// Classifies a page. Pure function of the URL, the parsed document and the
/// site root; always terminates in a defined outcome (Unknown at worst).
pub fn classify_page(url: &str, doc: &Html, root_url: &str) -> PageClassification {
    let signals = PageSignals { url, root_url, doc };
    let detected_elements = detect_structural_elements(doc);

    for rule in RULES {
        if let Some((template_type, characteristics)) = rule(&signals) {
            return PageClassification {
                template_type,
                characteristics,
                detected_elements,
            };
        }
    }

    PageClassification {
        template_type: TemplateType::Unknown,
        characteristics: Vec::new(),
        detected_elements,
    }
}

/// ProductDetail: at least 2 of 5 structural indicators.
fn product_detail_rule(signals: &PageSignals) -> Option<(TemplateType, Vec<String>)> {
    let doc = signals.doc;
    let mut characteristics = Vec::new();

    if has_add_to_cart_control(doc) {
        characteristics.push("Add-to-cart control".to_string());
    }
    if has_product_title(doc) {
        characteristics.push("Product title heading".to_string());
    }
    if has_product_gallery(doc) {
        characteristics.push("Product image gallery".to_string());
    }

    // A wall of prices suggests a listing, not a detail page.
    let price_count = count_matches(doc, "[class*='price'], [itemprop='price']");
    if (1..=9).contains(&price_count) {
        characteristics.push(format!("Price display ({} price element(s))", price_count));
    }

    if has_matches(doc, &["[class*='sku']", "[itemprop='sku']", "[class*='product-id']", "[class*='product-code']"]) {
        characteristics.push("SKU or product identifier".to_string());
    }

    if characteristics.len() >= 2 {
        Some((TemplateType::ProductDetail, characteristics))
    } else {
        None
    }
}

/// Category: enough product-destination links, or a few of them next to
/// filter or pagination controls.
fn category_rule(signals: &PageSignals) -> Option<(TemplateType, Vec<String>)> {
    let doc = signals.doc;
    let selector = Selector::parse("a[href]").expect("invalid anchor selector");
    let product_links = doc
        .select(&selector)
        .filter_map(|e| e.value().attr("href"))
        .filter(|href| is_product_link(href))
        .count();

    let has_filters = has_matches(doc, &["[class*='filter']", "[class*='facet']"]);
    let has_pagination =
        has_matches(doc, &["[class*='pagination']", ".pager", "[class*='paging']"]);

    if product_links > 5 || (product_links > 2 && (has_filters || has_pagination)) {
        let mut characteristics = vec![format!("{} product links", product_links)];
        if has_filters {
            characteristics.push("Filter controls".to_string());
        }
        if has_pagination {
            characteristics.push("Pagination controls".to_string());
        }
        return Some((TemplateType::Category, characteristics));
    }

    None
}

/// Home: the page sits at the site root, modulo one trailing slash.
fn home_rule(signals: &PageSignals) -> Option<(TemplateType, Vec<String>)> {
    let normalize = |s: &str| s.strip_suffix('/').unwrap_or(s).to_string();
    if normalize(signals.url) == normalize(signals.root_url) {
        Some((TemplateType::Home, vec!["Site root URL".to_string()]))
    } else {
        None
    }
}

fn cart_rule(signals: &PageSignals) -> Option<(TemplateType, Vec<String>)> {
    let url = signals.url.to_lowercase();
    if url.contains("cart") || url.contains("basket") {
        return Some((TemplateType::Cart, vec!["Cart URL".to_string()]));
    }

    let cart_elements = count_matches(signals.doc, "[class*='cart'], [class*='basket']");
    if cart_elements > 3 {
        return Some((
            TemplateType::Cart,
            vec![format!("{} cart elements", cart_elements)],
        ));
    }

    None
}

fn search_rule(signals: &PageSignals) -> Option<(TemplateType, Vec<String>)> {
    if signals.url.to_lowercase().contains("search") {
        return Some((TemplateType::Search, vec!["Search URL".to_string()]));
    }

    if let Ok(parsed) = Url::parse(signals.url)
        && parsed.query_pairs().any(|(k, _)| k == "q" || k == "query")
    {
        return Some((
            TemplateType::Search,
            vec!["Search query parameter".to_string()],
        ));
    }

    if has_matches(
        signals.doc,
        &["[class*='search-result']", ".search-results", "#search-results"],
    ) {
        return Some((
            TemplateType::Search,
            vec!["Search results region".to_string()],
        ));
    }

    None
}

/// Structural regions recorded independently of the classification outcome.
fn detect_structural_elements(doc: &Html) -> Vec<String> {
    let mut elements = Vec::new();

    if has_matches(doc, &["nav", "[role='navigation']", ".navbar", ".nav"]) {
        elements.push("Navigation".to_string());
    }
    if has_matches(doc, &["footer", "[class*='footer']"]) {
        elements.push("Footer".to_string());
    }
    if count_matches(doc, "[class*='product'], [class*='item']") > 5 {
        elements.push("Product Grid".to_string());
    }

    elements
}

fn has_add_to_cart_control(doc: &Html) -> bool {
    let selector = Selector::parse("button, a, input[type='submit']")
        .expect("invalid control selector");

    doc.select(&selector).any(|element| {
        let text = if element.value().name() == "input" {
            element.value().attr("value").unwrap_or_default().to_string()
        } else {
            element.text().collect::<String>()
        };
        let text = text.to_lowercase();
        text.contains("add") && text.contains("cart")
    })
}

fn has_product_title(doc: &Html) -> bool {
    if has_matches(
        doc,
        &["h1[itemprop='name']", ".product-title", ".product-name", ".product_title", "#product-title"],
    ) {
        return true;
    }

    // Fallback: any h1 that advertises itself as product-related.
    let selector = Selector::parse("h1").expect("invalid h1 selector");
    doc.select(&selector).any(|e| {
        e.value()
            .attr("class")
            .is_some_and(|c| c.to_lowercase().contains("product"))
    })
}

fn has_product_gallery(doc: &Html) -> bool {
    has_matches(
        doc,
        &[
            "[class*='product-image']",
            ".product-gallery",
            ".gallery",
            ".product-photo",
            "img[itemprop='image']",
        ],
    )
}

fn count_matches(doc: &Html, selector: &str) -> usize {
    let selector = Selector::parse(selector).expect("invalid selector");
    doc.select(&selector).count()
}

fn has_matches(doc: &Html, selectors: &[&str]) -> bool {
    selectors.iter().any(|s| count_matches(doc, s) > 0)
}
