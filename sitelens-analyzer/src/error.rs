use thiserror::Error;

/// Errors surfaced by an analysis run. Fetch failures are handled inline
/// and degrade to "no page", so an unusable root URL is the only way a run
/// fails outright.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

pub type Result<T> = std::result::Result<T, AnalyzeError>;
