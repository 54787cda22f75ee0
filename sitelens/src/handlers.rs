use clap::ArgMatches;
use colored::Colorize;
use sitelens_core::analysis::{AnalyzeOptions, execute_analysis};
use sitelens_core::cache::ModelCache;
use sitelens_core::report::{
    ReportFormat, generate_json_report, generate_markdown_report, generate_text_report,
    save_report,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use url::Url;

// Helper functions for the analyze handler

/// Load URLs from either a file or a single URL argument
pub fn load_urls_from_source(
    url: Option<&Url>,
    hosts_file: Option<&PathBuf>,
) -> Result<Vec<String>, String> {
    if let Some(hosts_file_path) = hosts_file {
        load_urls_from_file(hosts_file_path)
    } else if let Some(url) = url {
        Ok(vec![url.as_str().to_string()])
    } else {
        Err("Either --url or --hosts-file must be provided".to_string())
    }
}

/// Load and parse URLs from a file
pub fn load_urls_from_file(path: &PathBuf) -> Result<Vec<String>, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read hosts file {}: {}", path.display(), e))?;

    let urls: Vec<String> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| parse_url_line(line.trim()))
        .collect();

    if urls.is_empty() {
        return Err(format!("No valid URLs found in {}", path.display()));
    }

    Ok(urls)
}

/// Parse a single line as a URL, trying to add https:// if needed
pub fn parse_url_line(line: &str) -> Option<String> {
    if Url::parse(line).is_ok() {
        return Some(line.to_string());
    }

    let with_scheme = format!("https://{}", line);
    if Url::parse(&with_scheme).is_ok() {
        return Some(with_scheme);
    }

    eprintln!("[!] Skipping invalid URL '{}'", line);
    None
}

pub async fn handle_analyze(sub_matches: &ArgMatches, quiet: bool) {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let url = sub_matches.get_one::<Url>("url");
    let hosts_file = sub_matches.get_one::<PathBuf>("hosts-file");
    let max_pages = *sub_matches.get_one::<usize>("max-pages").unwrap_or(&50);
    let timeout_secs = *sub_matches.get_one::<u64>("timeout").unwrap_or(&10);
    let output = sub_matches.get_one::<PathBuf>("output");
    let format = sub_matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text");

    let urls = match load_urls_from_source(url, hosts_file) {
        Ok(urls) => urls,
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };

    let format = match ReportFormat::from_str(format) {
        Some(format) => format,
        None => {
            eprintln!("{} Unknown report format '{}'", "✗".red().bold(), format);
            std::process::exit(1);
        }
    };

    if !quiet {
        println!("Analyzing {} site(s)", urls.len());
        println!("Page budget: {} per site", max_pages);
        println!("Timeout: {}s\n", timeout_secs);
    }

    let options = AnalyzeOptions {
        urls,
        max_pages,
        timeout_secs,
        show_progress: !quiet,
    };

    // One cache for the whole batch: a URL repeated in the hosts file is
    // analyzed once.
    let mut cache = ModelCache::new();

    let progress_callback = Arc::new(|msg: String| {
        println!("{}", msg);
    });

    let models = match execute_analysis(options, &mut cache, Some(progress_callback)).await {
        Ok(models) => models,
        Err(e) => {
            eprintln!("{} Analysis failed: {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };

    if models.is_empty() {
        eprintln!("{} No site could be analyzed", "✗".red().bold());
        std::process::exit(1);
    }

    if !quiet {
        println!("\n{} Analysis complete!\n", "✓".green().bold());
    }

    let report = models
        .iter()
        .map(|model| match format {
            ReportFormat::Text => generate_text_report(model),
            ReportFormat::Markdown => generate_markdown_report(model),
            ReportFormat::Json => generate_json_report(model)
                .unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() }).to_string()),
        })
        .collect::<Vec<_>>()
        .join("\n");

    match output {
        Some(path) => {
            let expanded = shellexpand::tilde(&path.display().to_string()).to_string();
            let path = Path::new(&expanded);
            if let Err(e) = save_report(&report, path) {
                eprintln!(
                    "{} Failed to write report to {}: {}",
                    "✗".red().bold(),
                    path.display(),
                    e
                );
                std::process::exit(1);
            }
            if !quiet {
                println!("{} Report saved to {}", "✓".green().bold(), path.display());
            }
        }
        None => print!("{}", report),
    }
}
