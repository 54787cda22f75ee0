pub mod analyzer;
pub mod classify;
pub mod error;
pub mod links;
pub mod model;
pub mod pattern;

pub use analyzer::SiteAnalyzer;
pub use error::AnalyzeError;
pub use model::{PageTemplate, SiteEntity, SiteModel, TemplateType};
