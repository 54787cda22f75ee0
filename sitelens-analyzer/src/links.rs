//! Extraction of candidate category and product links from a parsed page.

use crate::pattern::{is_category_link, is_product_link};
use scraper::{Html, Selector};
use std::collections::HashSet;

/// Cap on category candidates taken from one page's navigation.
pub const MAX_CATEGORY_CANDIDATES: usize = 20;

/// Cap on product links sampled from one category page.
pub const MAX_PRODUCT_LINKS: usize = 10;

/// Navigation regions scanned for category links, in priority order.
const NAV_SELECTORS: &[&str] = &[
    "nav a[href]",
    "header a[href]",
    "[role='navigation'] a[href]",
    ".nav a[href]",
    ".navbar a[href]",
    ".menu a[href]",
    ".navigation a[href]",
    ".main-nav a[href]",
    ".header-nav a[href]",
    ".site-nav a[href]",
    ".categories a[href]",
    ".category-menu a[href]",
];

/// An anchor pulled out of a navigation region.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateLink {
    pub href: String,
    pub text: String,
}

/// Scans the page's navigation regions for links plausibly pointing at
/// category listings. Hrefs are deduplicated across regions and results
/// keep first-seen order, capped at [`MAX_CATEGORY_CANDIDATES`].
pub fn extract_category_links(doc: &Html) -> Vec<CandidateLink> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut candidates = Vec::new();

    for selector in NAV_SELECTORS {
        let selector = Selector::parse(selector).expect("invalid nav selector");

        for element in doc.select(&selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            let text = element.text().collect::<String>().trim().to_string();
            if href.is_empty() || text.is_empty() {
                continue;
            }
            if !seen.insert(href.to_string()) {
                continue;
            }
            if !is_category_link(href, &text) {
                continue;
            }

            candidates.push(CandidateLink {
                href: href.to_string(),
                text,
            });
            if candidates.len() >= MAX_CATEGORY_CANDIDATES {
                return candidates;
            }
        }
    }

    candidates
}

/// Collects up to `limit` distinct hrefs matching product-destination
/// patterns, anywhere on the page.
pub fn extract_product_links(doc: &Html, limit: usize) -> Vec<String> {
    let selector = Selector::parse("a[href]").expect("invalid anchor selector");
    let mut seen: HashSet<String> = HashSet::new();
    let mut links = Vec::new();

    for element in doc.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if !is_product_link(href) || !seen.insert(href.to_string()) {
            continue;
        }
        links.push(href.to_string());
        if links.len() >= limit {
            break;
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_only_category_candidates() {
        let html = r#"<html><body><nav>
            <a href="/electronics">Electronics</a>
            <a href="/login">Sign In</a>
            <a href="/about">About Us</a>
        </nav></body></html>"#;
        let doc = Html::parse_document(html);

        let candidates = extract_category_links(&doc);

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].href, "/electronics");
        assert_eq!(candidates[0].text, "Electronics");
    }

    #[test]
    fn test_dedup_across_nav_regions() {
        let html = r#"<html><body>
            <nav><a href="/electronics">Electronics</a></nav>
            <header><a href="/electronics">Electronics</a></header>
        </body></html>"#;
        let doc = Html::parse_document(html);

        let candidates = extract_category_links(&doc);
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn test_candidate_cap() {
        let mut html = String::from("<html><body><nav>");
        for i in 0..30 {
            html.push_str(&format!(r#"<a href="/category/c{}">Cat {}</a>"#, i, i));
        }
        html.push_str("</nav></body></html>");
        let doc = Html::parse_document(&html);

        let candidates = extract_category_links(&doc);
        assert_eq!(candidates.len(), MAX_CATEGORY_CANDIDATES);
        assert_eq!(candidates[0].href, "/category/c0");
    }

    #[test]
    fn test_skips_anchors_without_text() {
        let html = r#"<html><body><nav>
            <a href="/electronics"></a>
            <a href="/clothing">Clothing</a>
        </nav></body></html>"#;
        let doc = Html::parse_document(html);

        let candidates = extract_category_links(&doc);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].href, "/clothing");
    }

    #[test]
    fn test_extract_product_links_limit_and_dedup() {
        let mut html = String::from("<html><body>");
        for i in 0..15 {
            html.push_str(&format!(r#"<a href="/product/{}">Product {}</a>"#, i, i));
        }
        html.push_str(r#"<a href="/product/0">Duplicate</a>"#);
        html.push_str(r#"<a href="/category/misc">Not a product</a>"#);
        html.push_str("</body></html>");
        let doc = Html::parse_document(&html);

        let links = extract_product_links(&doc, MAX_PRODUCT_LINKS);
        assert_eq!(links.len(), MAX_PRODUCT_LINKS);
        assert_eq!(links[0], "/product/0");
        assert!(links.iter().all(|l| l.starts_with("/product/")));
    }
}
