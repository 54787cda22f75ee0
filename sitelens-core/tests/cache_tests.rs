// Tests for the caller-owned model cache

use sitelens_analyzer::SiteModel;
use sitelens_core::ModelCache;

fn model_for(domain: &str) -> SiteModel {
    SiteModel::new(domain.to_string())
}

#[test]
fn test_new_cache_is_empty() {
    let cache = ModelCache::new();
    assert!(cache.is_empty());
    assert_eq!(cache.len(), 0);
}

#[test]
fn test_insert_and_get() {
    let mut cache = ModelCache::new();
    cache.insert("https://example.com".to_string(), model_for("example.com"));

    let hit = cache.get("https://example.com");
    assert!(hit.is_some());
    assert_eq!(hit.unwrap().domain, "example.com");
}

#[test]
fn test_miss_on_unknown_url() {
    let cache = ModelCache::new();
    assert!(cache.get("https://example.com").is_none());
}

#[test]
fn test_keyed_by_exact_url_string() {
    let mut cache = ModelCache::new();
    cache.insert("https://example.com".to_string(), model_for("example.com"));

    // A trailing slash is a different key; the cache does no normalization.
    assert!(cache.get("https://example.com/").is_none());
}

#[test]
fn test_last_analysis_wins() {
    let mut cache = ModelCache::new();
    let mut first = model_for("example.com");
    first.site_map.push("https://example.com/".to_string());
    let second = model_for("example.com");

    cache.insert("https://example.com".to_string(), first);
    cache.insert("https://example.com".to_string(), second);

    assert_eq!(cache.len(), 1);
    assert!(cache.get("https://example.com").unwrap().site_map.is_empty());
}

#[test]
fn test_clear() {
    let mut cache = ModelCache::new();
    cache.insert("https://a.example".to_string(), model_for("a.example"));
    cache.insert("https://b.example".to_string(), model_for("b.example"));
    assert_eq!(cache.len(), 2);

    cache.clear();
    assert!(cache.is_empty());
}
