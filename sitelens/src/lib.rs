// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    load_urls_from_file,
    load_urls_from_source,
    parse_url_line,
};

// Re-export analysis functionality from sitelens-core
pub use sitelens_core::analysis::{AnalyzeOptions, execute_analysis, extract_url_path};
pub use sitelens_core::cache::ModelCache;
pub use sitelens_core::report::ReportFormat;
