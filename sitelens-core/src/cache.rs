//! Process-lifetime store of analysis results keyed by the raw input URL.
//!
//! The cache is explicitly owned by whoever drives the analysis (the CLI
//! handler, an embedding service) and is never ambient global state. It is
//! populated on successful analysis, read on later lookups, and holds the
//! most recent model per URL string with no TTL or invalidation; it lives
//! exactly as long as its owner.

use sitelens_analyzer::SiteModel;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Default)]
pub struct ModelCache {
    entries: HashMap<String, SiteModel>,
}

impl ModelCache {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, url: &str) -> Option<&SiteModel> {
        self.entries.get(url)
    }

    /// Stores a model under the raw URL string. Last analysis wins.
    pub fn insert(&mut self, url: String, model: SiteModel) {
        debug!("Caching analysis result for {}", url);
        self.entries.insert(url, model);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
