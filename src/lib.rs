//! # LTP: ablation comparison toolkit
//!
//! Research support for the liver transplantability prediction study. The
//! core compares a set of ablation configurations against the main pipeline
//! and reports the results as console tables and a CSV summary.
//!
//! ## Features
//!
//! - Best-configuration search with stable first-wins tie-breaking
//! - Main pipeline comparison with a ±0.001 tie band
//! - Accuracy, AUC-ROC and F1 summary statistics
//! - CSV summary export and JSON run reports
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use ltp::compare::{find_best_configuration, summarize};
//! use ltp::metrics::loader::load_ablation_results;
//! use ltp::ResultsComparator;
//!
//! // Full report against the default directories
//! let comparator = ResultsComparator::new("ablation_results", "results");
//! let outcome = comparator.run().unwrap();
//!
//! // Or use the pieces directly
//! let results = load_ablation_results("ablation_results/ablation_results.json").unwrap();
//! let best = find_best_configuration(&results).unwrap();
//! let summary = summarize(&results).unwrap();
//! println!("{} {:.4} {:.4}", best.name, best.accuracy, summary.mean_accuracy);
//! ```

pub mod cli;
pub mod compare;
pub mod error;
pub mod metrics;
pub mod report;
pub mod training;
pub mod utils;

/// Re-export commonly used types
pub use compare::comparator::{ResultsComparator, RunOutcome};
pub use compare::{BestConfiguration, ComparisonResult, SummaryStatistics, Winner};
pub use error::ComparatorError;
pub use metrics::{AblationResults, MainPipelineRecord, MetricRecord};
pub use report::{ResultsTable, RunReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!(
        "{} v{} - ablation comparison for liver transplantability prediction",
        NAME, VERSION
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_info() {
        let info_str = info();
        assert!(info_str.contains("ltp-toolkit"));
        assert!(info_str.contains(VERSION));
    }
}
