//! The crawl orchestrator: bounded traversal of a site, driving the
//! classifier and link extractors and assembling the resulting model.

use crate::classify::{PageClassification, classify_page};
use crate::error::{AnalyzeError, Result};
use crate::links::{CandidateLink, MAX_PRODUCT_LINKS, extract_category_links, extract_product_links};
use crate::model::{EntityType, PageTemplate, SiteEntity, SiteModel, TemplateType};
use crate::pattern::{generalize_url_pattern, is_crawlable};
use reqwest::Client;
use scraper::Html;
use std::collections::HashSet;
use tracing::{debug, info, warn};
use url::Url;

pub const DEFAULT_MAX_PAGES: usize = 50;

/// Everything pulled out of one fetched page. Parsing happens in one
/// synchronous pass so the non-Send document never crosses an await point.
struct PageInspection {
    classification: PageClassification,
    category_links: Vec<CandidateLink>,
    product_links: Vec<String>,
}

fn inspect_page(url: &str, body: &str, root_url: &str) -> PageInspection {
    let doc = Html::parse_document(body);
    PageInspection {
        classification: classify_page(url, &doc, root_url),
        category_links: extract_category_links(&doc),
        product_links: extract_product_links(&doc, MAX_PRODUCT_LINKS),
    }
}

/// Bounded site analyzer. One `analyze` call owns all of its traversal
/// state, so independent analyzers may run concurrently; within a run,
/// execution is strictly sequential with one fetch in flight at a time.
pub struct SiteAnalyzer {
    client: Client,
    max_pages: usize,
}

impl SiteAnalyzer {
    pub fn new() -> Self {
        Self::with_timeout(10)
    }

    pub fn with_timeout(timeout_secs: u64) -> Self {
        let client = Client::builder()
            .user_agent("Sitelens/0.1 (https://github.com/trapdoorsec/sitelens)")
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .connect_timeout(std::time::Duration::from_secs(timeout_secs / 2))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Analyzes a site starting from its root URL.
    ///
    /// The only error condition is an unparseable root URL; an unreachable
    /// root yields an empty-but-valid model. Total page fetches never exceed
    /// the configured budget (plus one robots.txt fetch), and no URL is
    /// fetched twice within a run.
    pub async fn analyze(&self, root_url: &str) -> Result<SiteModel> {
        info!(
            "Starting analysis of {} (budget: {} pages)",
            root_url, self.max_pages
        );

        let parsed_root = Url::parse(root_url)
            .map_err(|e| AnalyzeError::InvalidUrl(format!("{}: {}", root_url, e)))?;
        let root_host = parsed_root
            .host_str()
            .ok_or_else(|| AnalyzeError::InvalidUrl(format!("no host in {}", root_url)))?
            .to_string();

        let mut model = SiteModel::new(root_host.clone());

        // A zero budget means no fetching at all, not even the root.
        if self.max_pages == 0 {
            warn!("Page budget is zero, returning empty model");
            return Ok(model);
        }

        // Informational only, never enforced.
        model.robots_txt = self.fetch_robots_txt(&parsed_root).await;

        let mut visited: HashSet<String> = HashSet::new();
        let mut pages_fetched = 0usize;

        let root_url = parsed_root.to_string();
        visited.insert(root_url.clone());
        pages_fetched += 1;

        let Some(root_body) = self.fetch_page(&root_url).await else {
            warn!("Root page unreachable, returning empty model");
            return Ok(model);
        };
        model.site_map.push(root_url.clone());

        let root = inspect_page(&root_url, &root_body, &root_url);
        record_template(&mut model, &root_url, root.classification);
        debug!(
            "Found {} category candidates on the root page",
            root.category_links.len()
        );

        for candidate in root.category_links {
            if pages_fetched >= self.max_pages {
                debug!("Page budget exhausted");
                break;
            }

            let Some(url) = resolve_link(&parsed_root, &candidate.href, &root_host) else {
                continue;
            };
            if !visited.insert(url.clone()) {
                continue;
            }

            pages_fetched += 1;
            let Some(body) = self.fetch_page(&url).await else {
                continue;
            };
            model.site_map.push(url.clone());

            let page = inspect_page(&url, &body, &root_url);
            let template_type = page.classification.template_type;
            record_template(&mut model, &url, page.classification);

            if matches!(
                template_type,
                TemplateType::Category | TemplateType::ProductListing
            ) {
                model.add_entity(SiteEntity {
                    entity_type: EntityType::Category,
                    name: candidate.text.clone(),
                    url: url.clone(),
                    parent_category: None,
                });

                if !model.has_template(TemplateType::ProductDetail) {
                    pages_fetched = self
                        .sample_product(
                            page.product_links.first().map(String::as_str),
                            &parsed_root,
                            &root_host,
                            &root_url,
                            &mut visited,
                            &mut model,
                            pages_fetched,
                        )
                        .await;
                }
            }
        }

        info!(
            "Analysis of {} complete: {} templates, {} entities, {} pages visited",
            model.domain,
            model.templates.len(),
            model.entities.len(),
            model.site_map.len()
        );
        Ok(model)
    }

    /// Fetches the first product link off a category page, hoping to land on
    /// the product-detail template. One sample per category, no retry; a
    /// miss or a non-matching classification is discarded silently.
    #[allow(clippy::too_many_arguments)]
    async fn sample_product(
        &self,
        href: Option<&str>,
        root: &Url,
        root_host: &str,
        root_url: &str,
        visited: &mut HashSet<String>,
        model: &mut SiteModel,
        mut pages_fetched: usize,
    ) -> usize {
        let Some(href) = href else {
            return pages_fetched;
        };

        if pages_fetched >= self.max_pages {
            return pages_fetched;
        }
        let Some(url) = resolve_link(root, href, root_host) else {
            return pages_fetched;
        };
        if !visited.insert(url.clone()) {
            return pages_fetched;
        }

        pages_fetched += 1;
        let Some(body) = self.fetch_page(&url).await else {
            return pages_fetched;
        };
        model.site_map.push(url.clone());

        let page = inspect_page(&url, &body, root_url);
        if page.classification.template_type == TemplateType::ProductDetail {
            record_template(model, &url, page.classification);
        } else {
            debug!(
                "Product sample {} classified as {}, discarding",
                url,
                page.classification.template_type.as_str()
            );
        }

        pages_fetched
    }

    /// Plain GET; any failure or non-2xx status degrades to "no page".
    async fn fetch_page(&self, url: &str) -> Option<String> {
        debug!("Fetching {}", url);

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Fetch failed for {}: {}", url, e);
                return None;
            }
        };

        if !response.status().is_success() {
            warn!("Fetch of {} returned status {}", url, response.status());
            return None;
        }

        match response.text().await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!("Failed to read body of {}: {}", url, e);
                None
            }
        }
    }

    async fn fetch_robots_txt(&self, root: &Url) -> Option<String> {
        let robots_url = root.join("/robots.txt").ok()?;
        debug!("Fetching {}", robots_url);

        let response = self.client.get(robots_url.as_str()).send().await.ok()?;
        if !response.status().is_success() {
            return None;
        }
        response.text().await.ok()
    }
}

impl Default for SiteAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves a candidate href against the root and applies the
/// crawl-eligibility filter. Unresolvable links are dropped silently.
fn resolve_link(root: &Url, href: &str, root_host: &str) -> Option<String> {
    let mut resolved = root.join(href).ok()?;
    resolved.set_fragment(None);

    if !is_crawlable(&resolved, root_host) {
        return None;
    }
    Some(resolved.to_string())
}

fn record_template(model: &mut SiteModel, url: &str, classification: PageClassification) {
    // Unknown pages contribute to the site map but not to the template set.
    if classification.template_type == TemplateType::Unknown {
        return;
    }

    let template = PageTemplate::new(
        classification.template_type,
        generalize_url_pattern(url),
        url.to_string(),
        classification.characteristics,
        classification.detected_elements,
    );
    model.record_template(template);
}
