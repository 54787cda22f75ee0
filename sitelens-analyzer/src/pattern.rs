//! URL and link heuristics: pattern generalization, crawl eligibility,
//! and the category/product link filters.

use url::Url;

/// File extensions that never lead to classifiable pages.
const ASSET_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".svg", ".webp", ".ico", ".css", ".js",
    ".woff", ".woff2", ".ttf", ".eot", ".mp4", ".webm", ".mp3", ".pdf", ".zip",
    ".gz", ".xml", ".txt",
];

/// Leading path segments that point at infrastructure rather than content.
const SKIP_PREFIXES: &[&str] = &["api", "cdn", "static", "assets", "media"];

/// Substrings that mark a link as utility navigation rather than a category.
const EXCLUDED_LINK_PATTERNS: &[&str] = &[
    "login", "logout", "signin", "sign-in", "sign in", "register", "signup",
    "sign-up", "account", "cart", "basket", "checkout", "wishlist", "about",
    "contact", "help", "faq", "privacy", "terms", "policy", "blog", "news",
    "search", "track", "store-locator", "gift-card", "careers", "press",
];

/// Path conventions commonly used for category listings.
const CATEGORY_PATH_PATTERNS: &[&str] = &[
    "/category/", "/categories/", "/collection/", "/collections/", "/c/",
    "/shop/", "/department/", "/dept/",
];

/// Link-text words that suggest a storefront category.
const CATEGORY_KEYWORDS: &[&str] = &[
    "shop", "men", "women", "kids", "sale", "new", "electronics", "clothing",
    "home",
];

/// Path conventions commonly used for product detail pages.
const PRODUCT_PATH_PATTERNS: &[&str] = &[
    "/product/", "/products/", "/item/", "/items/", "/p/", "/dp/", "/itm/",
    "product_id=", "productid=", "sku=",
];

/// Reduces a URL to its generalized path pattern: the query string is
/// dropped, all-digit segments become `:id`, and long hex/dash segments
/// become `:uuid`. Idempotent.
pub fn generalize_url_pattern(url: &str) -> String {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        // Relative inputs are treated as bare paths.
        Err(_) => url
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    };

    let pattern = path
        .split('/')
        .map(generalize_segment)
        .collect::<Vec<_>>()
        .join("/");

    if pattern.is_empty() {
        "/".to_string()
    } else {
        pattern
    }
}

fn generalize_segment(segment: &str) -> &str {
    if !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit()) {
        return ":id";
    }
    if segment.len() >= 20
        && segment.chars().all(|c| c.is_ascii_hexdigit() || c == '-')
    {
        return ":uuid";
    }
    segment
}

/// Crawl-eligibility filter: stays on the root host and away from static
/// assets and infrastructure path prefixes.
pub fn is_crawlable(url: &Url, root_host: &str) -> bool {
    match url.host_str() {
        Some(host) if host == root_host => {}
        _ => return false,
    }

    let path = url.path().to_lowercase();
    if ASSET_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        return false;
    }

    if let Some(first) = path.split('/').find(|s| !s.is_empty())
        && SKIP_PREFIXES.contains(&first)
    {
        return false;
    }

    true
}

/// Decides whether an anchor plausibly points at a category listing.
///
/// Utility destinations (auth, cart, informational pages) are rejected
/// outright; what remains is accepted on a category path convention, a
/// simple single-segment path shape, or category-ish link text.
pub fn is_category_link(href: &str, text: &str) -> bool {
    let href = href.to_lowercase();
    let text = text.to_lowercase();

    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
    {
        return false;
    }

    if EXCLUDED_LINK_PATTERNS
        .iter()
        .any(|p| href.contains(p) || text.contains(p))
    {
        return false;
    }

    if ASSET_EXTENSIONS.iter().any(|ext| href.ends_with(ext)) {
        return false;
    }

    if CATEGORY_PATH_PATTERNS.iter().any(|p| href.contains(p)) {
        return true;
    }

    if is_single_segment_path(&href) {
        return true;
    }

    CATEGORY_KEYWORDS.iter().any(|kw| text.contains(kw))
}

/// Matches hrefs shaped like `/electronics` or `/mens-shoes/`.
fn is_single_segment_path(href: &str) -> bool {
    let path = match href.split_once("://") {
        Some((_, rest)) => match rest.split_once('/') {
            Some((_, path)) => format!("/{}", path),
            None => return false,
        },
        None => href.to_string(),
    };
    let path = path.split(['?', '#']).next().unwrap_or_default();

    let segment = path.trim_start_matches('/').trim_end_matches('/');
    !segment.is_empty()
        && !segment.contains('/')
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Decides whether an anchor plausibly points at a product detail page.
pub fn is_product_link(href: &str) -> bool {
    let href = href.to_lowercase();
    PRODUCT_PATH_PATTERNS.iter().any(|p| href.contains(p))
}
