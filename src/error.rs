//! Error types for metric loading and comparison.

use thiserror::Error;

/// Contract violations in ablation result documents.
#[derive(Debug, Error)]
pub enum ComparatorError {
    /// The ablation mapping has no configurations to compare
    #[error("ablation results contain no configurations; at least one is required to pick a best configuration or compute statistics")]
    EmptyResults,
    /// The top-level document is not a JSON object
    #[error("expected a JSON object mapping configuration names to metrics, found {0}")]
    NotAnObject(&'static str),
    /// A configuration record is missing a required field or has a wrong type
    #[error("invalid metrics for configuration '{name}'")]
    InvalidRecord {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result alias for comparator operations
pub type Result<T> = std::result::Result<T, ComparatorError>;
