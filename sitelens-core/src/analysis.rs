use crate::cache::ModelCache;
use indicatif::{ProgressBar, ProgressStyle};
use sitelens_analyzer::{SiteAnalyzer, SiteModel};
use std::sync::Arc;
use url::Url;

/// Options for configuring an analysis run
pub struct AnalyzeOptions {
    pub urls: Vec<String>,
    pub max_pages: usize,
    pub timeout_secs: u64,
    pub show_progress: bool,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            max_pages: sitelens_analyzer::analyzer::DEFAULT_MAX_PAGES,
            timeout_secs: 10,
            show_progress: false,
        }
    }
}

/// Callback for reporting analysis progress
pub type AnalysisProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Extract the path component from a URL
pub fn extract_url_path(url: &str) -> String {
    Url::parse(url)
        .ok()
        .map(|u| {
            let path = u.path().to_string();
            if path.is_empty() || path == "/" {
                "/".to_string()
            } else {
                path
            }
        })
        .unwrap_or_else(|| url.to_string())
}

/// Analyze each URL in turn, consulting the caller-owned cache first.
/// A URL that was already analyzed in this process is served from the
/// cache without any fetching; fresh results are cached on the way out.
pub async fn execute_analysis(
    options: AnalyzeOptions,
    cache: &mut ModelCache,
    progress_callback: Option<AnalysisProgressCallback>,
) -> Result<Vec<SiteModel>, String> {
    let AnalyzeOptions {
        urls,
        max_pages,
        timeout_secs,
        show_progress,
    } = options;

    let progress_bar = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.set_message("Starting analysis...");
        Some(pb)
    } else {
        None
    };

    let analyzer = SiteAnalyzer::with_timeout(timeout_secs).with_max_pages(max_pages);

    let mut models = Vec::new();
    for (idx, url) in urls.iter().enumerate() {
        if let Some(ref callback) = progress_callback
            && urls.len() > 1
        {
            callback(format!(
                "Analyzing site {}/{}: {}",
                idx + 1,
                urls.len(),
                url
            ));
        }

        if let Some(cached) = cache.get(url) {
            if let Some(ref pb) = progress_bar {
                pb.set_message(format!("Cached: {}", url));
                pb.tick();
            }
            models.push(cached.clone());
            continue;
        }

        if let Some(ref pb) = progress_bar {
            pb.set_message(format!("Analyzing {}...", url));
            pb.tick();
        }

        match analyzer.analyze(url).await {
            Ok(model) => {
                cache.insert(url.clone(), model.clone());
                models.push(model);
            }
            Err(e) => {
                if let Some(ref callback) = progress_callback {
                    callback(format!("[!]  Failed to analyze {}: {}", url, e));
                }
            }
        }
    }

    if let Some(ref pb) = progress_bar {
        pb.finish_with_message(format!("Analysis complete! {} site(s) modeled", models.len()));
    }

    Ok(models)
}
