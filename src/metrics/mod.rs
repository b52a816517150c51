pub mod loader;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{ComparatorError, Result};

/// Evaluation metrics for a single ablation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    /// Classification accuracy
    pub accuracy: f64,
    /// F1 score
    pub f1: f64,
    /// True positives
    pub tp: u64,
    /// True negatives
    pub tn: u64,
    /// False positives
    pub fp: u64,
    /// False negatives
    #[serde(rename = "fn")]
    pub fn_: u64,

    // Optional metrics, `None` when absent or non-numeric
    /// Area under the ROC curve
    #[serde(default, deserialize_with = "numeric_or_none", skip_serializing_if = "Option::is_none")]
    pub auc_roc: Option<f64>,
    /// Sensitivity (recall)
    #[serde(default, deserialize_with = "numeric_or_none", skip_serializing_if = "Option::is_none")]
    pub sensitivity: Option<f64>,
    /// Specificity
    #[serde(default, deserialize_with = "numeric_or_none", skip_serializing_if = "Option::is_none")]
    pub specificity: Option<f64>,
    /// Precision
    #[serde(default, deserialize_with = "numeric_or_none", skip_serializing_if = "Option::is_none")]
    pub precision: Option<f64>,
}

impl MetricRecord {
    /// Create a record with zero confusion counts and no optional metrics
    pub fn new(accuracy: f64, f1: f64) -> Self {
        Self {
            accuracy,
            f1,
            tp: 0,
            tn: 0,
            fp: 0,
            fn_: 0,
            auc_roc: None,
            sensitivity: None,
            specificity: None,
            precision: None,
        }
    }

    /// Set confusion-matrix counts
    pub fn with_counts(mut self, tp: u64, tn: u64, fp: u64, fn_: u64) -> Self {
        self.tp = tp;
        self.tn = tn;
        self.fp = fp;
        self.fn_ = fn_;
        self
    }

    /// Set AUC-ROC
    pub fn with_auc_roc(mut self, auc_roc: f64) -> Self {
        self.auc_roc = Some(auc_roc);
        self
    }

    /// Total number of evaluated cases
    pub fn total_cases(&self) -> u64 {
        self.tp + self.tn + self.fp + self.fn_
    }
}

/// Metrics produced by the main pipeline
///
/// Only `accuracy` takes part in the comparison. It defaults to 0.0 when the
/// document omits it. Unknown fields are kept in `extra` and carried into the
/// run report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MainPipelineRecord {
    #[serde(default)]
    pub accuracy: f64,
    #[serde(default, deserialize_with = "numeric_or_none", skip_serializing_if = "Option::is_none")]
    pub auc_roc: Option<f64>,
    #[serde(default, deserialize_with = "numeric_or_none", skip_serializing_if = "Option::is_none")]
    pub sensitivity: Option<f64>,
    #[serde(default, deserialize_with = "numeric_or_none", skip_serializing_if = "Option::is_none")]
    pub specificity: Option<f64>,
    #[serde(default, deserialize_with = "numeric_or_none", skip_serializing_if = "Option::is_none")]
    pub precision: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MainPipelineRecord {
    pub fn new(accuracy: f64) -> Self {
        Self {
            accuracy,
            ..Default::default()
        }
    }
}

/// Ordered mapping of configuration name to metrics
///
/// Entries keep document order. Names are unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AblationResults {
    entries: Vec<(String, MetricRecord)>,
}

impl AblationResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(name, record)` pairs; a repeated name replaces the earlier
    /// record in place, matching JSON object semantics.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, MetricRecord)>,
        S: Into<String>,
    {
        let mut results = Self::new();
        for (name, record) in entries {
            results.insert(name, record);
        }
        results
    }

    /// Parse from a JSON value that must be an object of records
    pub fn from_value(value: Value) -> Result<Self> {
        let map = match value {
            Value::Object(map) => map,
            other => return Err(ComparatorError::NotAnObject(json_type_name(&other))),
        };

        let mut results = Self::new();
        for (name, raw) in map {
            let record = serde_json::from_value(raw).map_err(|source| {
                ComparatorError::InvalidRecord {
                    name: name.clone(),
                    source,
                }
            })?;
            results.insert(name, record);
        }
        Ok(results)
    }

    pub fn insert<S: Into<String>>(&mut self, name: S, record: MetricRecord) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = record,
            None => self.entries.push((name, record)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&MetricRecord> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, record)| record)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricRecord)> {
        self.entries.iter().map(|(n, r)| (n.as_str(), r))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn records(&self) -> impl Iterator<Item = &MetricRecord> {
        self.entries.iter().map(|(_, r)| r)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Accept any JSON value, keeping only numbers
fn numeric_or_none<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}
