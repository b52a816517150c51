//! Best-configuration search, main-pipeline comparison and summary statistics.
//!
//! Everything here is a pure function of already-loaded metrics. File access
//! lives in [`comparator::ResultsComparator`].

pub mod comparator;

use serde::{Deserialize, Serialize};

use crate::error::{ComparatorError, Result};
use crate::metrics::{AblationResults, MainPipelineRecord};

/// Accuracy differences within this band count as a tie
pub const TIE_TOLERANCE: f64 = 0.001;

/// Highest-accuracy ablation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestConfiguration {
    pub name: String,
    pub accuracy: f64,
}

/// Which side of the comparison performed better
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    MainPipeline,
    Ablation,
    Tie,
}

impl Winner {
    /// Classify `main - best` using the symmetric tie band
    pub fn from_difference(difference: f64) -> Self {
        if difference > TIE_TOLERANCE {
            Winner::MainPipeline
        } else if difference < -TIE_TOLERANCE {
            Winner::Ablation
        } else {
            Winner::Tie
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Winner::MainPipeline => "main_pipeline",
            Winner::Ablation => "ablation",
            Winner::Tie => "tie",
        }
    }
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main pipeline versus best ablation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub main_pipeline_accuracy: f64,
    pub best_ablation_accuracy: f64,
    /// `main - best`
    pub absolute_difference: f64,
    /// Difference relative to the best ablation accuracy, in percent
    pub relative_difference_percent: f64,
    pub winner: Winner,
    pub main_results: MainPipelineRecord,
}

/// Statistics across all ablation configurations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub mean_accuracy: f64,
    /// Population standard deviation
    pub std_accuracy: f64,
    pub max_accuracy: f64,
    pub min_accuracy: f64,
    /// Mean over configurations that report a numeric AUC-ROC, 0.0 if none do
    pub mean_auc: f64,
    pub mean_f1: f64,
}

/// Select the configuration with the strictly greatest accuracy.
///
/// Ties keep the configuration seen first in document order, so exactly one
/// name is ever marked best.
pub fn find_best_configuration(results: &AblationResults) -> Result<BestConfiguration> {
    let mut entries = results.iter();
    let (first_name, first) = entries.next().ok_or(ComparatorError::EmptyResults)?;

    let (name, accuracy) = entries.fold(
        (first_name, first.accuracy),
        |(best_name, best_acc), (name, record)| {
            if record.accuracy > best_acc {
                (name, record.accuracy)
            } else {
                (best_name, best_acc)
            }
        },
    );

    Ok(BestConfiguration {
        name: name.to_string(),
        accuracy,
    })
}

/// Compare the main pipeline against the best ablation configuration
pub fn compare_to_main(best: &BestConfiguration, main: &MainPipelineRecord) -> ComparisonResult {
    let difference = main.accuracy - best.accuracy;
    let relative = if best.accuracy == 0.0 {
        0.0
    } else {
        difference / best.accuracy * 100.0
    };

    ComparisonResult {
        main_pipeline_accuracy: main.accuracy,
        best_ablation_accuracy: best.accuracy,
        absolute_difference: difference,
        relative_difference_percent: relative,
        winner: Winner::from_difference(difference),
        main_results: main.clone(),
    }
}

/// Compute accuracy, AUC-ROC and F1 statistics across configurations
pub fn summarize(results: &AblationResults) -> Result<SummaryStatistics> {
    if results.is_empty() {
        return Err(ComparatorError::EmptyResults);
    }

    let accuracies: Vec<f64> = results.records().map(|r| r.accuracy).collect();
    let auc_scores: Vec<f64> = results.records().filter_map(|r| r.auc_roc).collect();
    let f1_scores: Vec<f64> = results.records().map(|r| r.f1).collect();

    let mean_accuracy = mean(&accuracies);
    let variance = accuracies
        .iter()
        .map(|x| (x - mean_accuracy).powi(2))
        .sum::<f64>()
        / accuracies.len() as f64;

    Ok(SummaryStatistics {
        mean_accuracy,
        std_accuracy: variance.sqrt(),
        max_accuracy: accuracies.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        min_accuracy: accuracies.iter().copied().fold(f64::INFINITY, f64::min),
        mean_auc: if auc_scores.is_empty() { 0.0 } else { mean(&auc_scores) },
        mean_f1: mean(&f1_scores),
    })
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
