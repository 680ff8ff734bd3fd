use thiserror::Error;

/// Failures the core can surface to callers.
///
/// Data-quality problems (missing join targets, malformed dates, empty
/// collections) never appear here. They are absorbed into sentinel values
/// or `Option`s inside the report structures; only contract-level failures
/// reach this enum.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
