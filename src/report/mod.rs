//! Console tables, CSV export and the JSON run report.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::compare::{BestConfiguration, ComparisonResult, SummaryStatistics, Winner};
use crate::metrics::AblationResults;

/// Display value for a metric that is absent or non-numeric
pub const NOT_AVAILABLE: &str = "N/A";

/// Width of the section rules in the console report
pub const RULE_WIDTH: usize = 130;

/// Column names of the summary table, in CSV order
pub const COLUMNS: [&str; 11] = [
    "Model",
    "Accuracy",
    "AUC-ROC",
    "Sensitivity",
    "Specificity",
    "Precision",
    "F1-Score",
    "TP",
    "TN",
    "FP",
    "FN",
];

/// Format a metric with four decimals, or the N/A sentinel
pub fn format_metric(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.4}", v),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// One formatted row of the summary table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(rename = "Model")]
    pub model: String,
    #[serde(rename = "Accuracy")]
    pub accuracy: String,
    #[serde(rename = "AUC-ROC")]
    pub auc_roc: String,
    #[serde(rename = "Sensitivity")]
    pub sensitivity: String,
    #[serde(rename = "Specificity")]
    pub specificity: String,
    #[serde(rename = "Precision")]
    pub precision: String,
    #[serde(rename = "F1-Score")]
    pub f1: String,
    #[serde(rename = "TP")]
    pub tp: u64,
    #[serde(rename = "TN")]
    pub tn: u64,
    #[serde(rename = "FP")]
    pub fp: u64,
    #[serde(rename = "FN")]
    pub fn_: u64,
}

/// Summary table with one row per configuration, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsTable {
    pub rows: Vec<TableRow>,
}

impl ResultsTable {
    /// Render every configuration into display strings
    pub fn render(results: &AblationResults) -> Self {
        let rows = results
            .iter()
            .map(|(name, m)| TableRow {
                model: name.to_string(),
                accuracy: format_metric(Some(m.accuracy)),
                auc_roc: format_metric(m.auc_roc),
                sensitivity: format_metric(m.sensitivity),
                specificity: format_metric(m.specificity),
                precision: format_metric(m.precision),
                f1: format_metric(Some(m.f1)),
                tp: m.tp,
                tn: m.tn,
                fp: m.fp,
                fn_: m.fn_,
            })
            .collect();

        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, model: &str) -> Option<&TableRow> {
        self.rows.iter().find(|r| r.model == model)
    }

    /// Write as CSV; the header is written even when there are no rows
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        csv_writer
            .write_record(COLUMNS)
            .context("Failed to write CSV header")?;
        for row in &self.rows {
            csv_writer
                .serialize(row)
                .with_context(|| format!("Failed to write CSV row for {}", row.model))?;
        }
        csv_writer.flush().context("Failed to flush CSV output")?;
        Ok(())
    }

    /// Export to CSV string
    pub fn to_csv(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        String::from_utf8(buffer).context("CSV output is not valid UTF-8")
    }

    /// Write to a CSV file, replacing any existing file
    pub fn save_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create CSV file at {:?}", path))?;
        self.write_csv(io::BufWriter::new(file))
    }

    /// Read a table previously written by [`ResultsTable::save_csv`]
    pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("Failed to open CSV file at {:?}", path))?;

        let rows = reader
            .deserialize()
            .collect::<std::result::Result<Vec<TableRow>, _>>()
            .with_context(|| format!("Failed to parse CSV rows in {:?}", path))?;
        Ok(Self { rows })
    }
}

/// Everything a completed comparison run produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub best: BestConfiguration,
    pub comparison: Option<ComparisonResult>,
    pub summary: SummaryStatistics,
    pub csv_path: PathBuf,
    pub table: ResultsTable,
}

fn section_header<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "\n{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

/// Print Table 1, marking the best configuration
pub fn print_results<W: Write>(
    out: &mut W,
    results: &AblationResults,
    best: &BestConfiguration,
) -> io::Result<()> {
    section_header(out, "TABLE 1: ABLATION STUDY RESULTS - LIVER TRANSPLANTABILITY PREDICTION")?;
    writeln!(
        out,
        "\n{:<30} {:<12} {:<12} {:<12} {:<12} {:<12} {:<12}",
        "Model", "Accuracy", "AUC-ROC", "Sensitivity", "Specificity", "Precision", "F1"
    )?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

    for (name, m) in results.iter() {
        let marker = if name == best.name { " (BEST)" } else { "" };
        writeln!(
            out,
            "{:<30} {:<12.4} {:<12} {:<12} {:<12} {:<12} {:<12}{}",
            name,
            m.accuracy,
            format_metric(m.auc_roc),
            format_metric(m.sensitivity),
            format_metric(m.specificity),
            format_metric(m.precision),
            format_metric(Some(m.f1)),
            marker
        )?;
    }

    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    writeln!(
        out,
        "\nBest Configuration: {} with {:.4} accuracy",
        best.name, best.accuracy
    )
}

/// Print Table 2
pub fn print_comparison<W: Write>(out: &mut W, comparison: &ComparisonResult) -> io::Result<()> {
    section_header(out, "TABLE 2: MAIN PIPELINE VS BEST ABLATION CONFIGURATION")?;

    let diff = comparison.absolute_difference;
    writeln!(out, "\nMain Pipeline Accuracy:          {:.4}", comparison.main_pipeline_accuracy)?;
    writeln!(out, "Best Ablation Accuracy:          {:.4}", comparison.best_ablation_accuracy)?;
    writeln!(out, "Absolute Difference:             {:+.4}", diff)?;
    writeln!(
        out,
        "Relative Difference:             {:+.2}%",
        comparison.relative_difference_percent
    )?;

    match comparison.winner {
        Winner::MainPipeline => writeln!(
            out,
            "\nResult: Main pipeline achieves {:.2}% higher accuracy",
            diff.abs() * 100.0
        ),
        Winner::Ablation => writeln!(
            out,
            "\nResult: Ablation baseline achieves {:.2}% higher accuracy",
            diff.abs() * 100.0
        ),
        Winner::Tie => writeln!(
            out,
            "\nResult: Both configurations achieve statistically equivalent performance"
        ),
    }
}

/// Print the cross-configuration statistics
pub fn print_summary_statistics<W: Write>(out: &mut W, summary: &SummaryStatistics) -> io::Result<()> {
    section_header(out, "SUMMARY STATISTICS ACROSS ALL CONFIGURATIONS")?;
    writeln!(
        out,
        "\nAccuracy - Mean: {:.4}, Std: {:.4}",
        summary.mean_accuracy, summary.std_accuracy
    )?;
    writeln!(
        out,
        "Accuracy - Max: {:.4}, Min: {:.4}",
        summary.max_accuracy, summary.min_accuracy
    )?;
    writeln!(out, "AUC-ROC - Mean: {:.4}", summary.mean_auc)?;
    writeln!(out, "F1-Score - Mean: {:.4}", summary.mean_f1)
}

pub fn print_closing_rule<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "\n{}", "=".repeat(RULE_WIDTH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::{compare_to_main, find_best_configuration, summarize};
    use crate::metrics::{MainPipelineRecord, MetricRecord};
    use tempfile::TempDir;

    fn sample_results() -> AblationResults {
        let mut full = MetricRecord::new(0.8421, 0.8).with_counts(40, 41, 9, 10).with_auc_roc(0.9);
        full.sensitivity = Some(0.8);
        full.specificity = Some(0.82);
        full.precision = Some(0.81);

        AblationResults::from_entries([
            ("no_ssl", MetricRecord::new(0.75, 0.7).with_counts(30, 45, 5, 20)),
            ("full_model", full),
        ])
    }

    fn render_to_string<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buffer = Vec::new();
        f(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_format_metric() {
        assert_eq!(format_metric(Some(0.5)), "0.5000");
        assert_eq!(format_metric(Some(0.123456)), "0.1235");
        assert_eq!(format_metric(None), "N/A");
    }

    #[test]
    fn test_render_table() {
        let table = ResultsTable::render(&sample_results());

        assert_eq!(table.len(), 2);
        let row = table.get("no_ssl").unwrap();
        assert_eq!(row.accuracy, "0.7500");
        assert_eq!(row.auc_roc, "N/A");
        assert_eq!(row.sensitivity, "N/A");
        assert_eq!(row.f1, "0.7000");
        assert_eq!((row.tp, row.tn, row.fp, row.fn_), (30, 45, 5, 20));

        let row = table.get("full_model").unwrap();
        assert_eq!(row.auc_roc, "0.9000");
        assert_eq!(row.specificity, "0.8200");
    }

    #[test]
    fn test_csv_header_and_rows() {
        let csv = ResultsTable::render(&sample_results()).to_csv().unwrap();
        let mut lines = csv.lines();

        assert_eq!(
            lines.next(),
            Some("Model,Accuracy,AUC-ROC,Sensitivity,Specificity,Precision,F1-Score,TP,TN,FP,FN")
        );
        assert_eq!(lines.next(), Some("no_ssl,0.7500,N/A,N/A,N/A,N/A,0.7000,30,45,5,20"));
        assert_eq!(
            lines.next(),
            Some("full_model,0.8421,0.9000,0.8000,0.8200,0.8100,0.8000,40,41,9,10")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_empty_table_still_has_header() {
        let csv = ResultsTable::default().to_csv().unwrap();
        assert_eq!(csv.trim_end(), COLUMNS.join(","));
    }

    #[test]
    fn test_csv_file_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ablation_summary.csv");
        let table = ResultsTable::render(&sample_results());

        table.save_csv(&path).unwrap();
        let loaded = ResultsTable::read_csv(&path).unwrap();

        assert_eq!(loaded, table);
        let names: Vec<&str> = loaded.rows.iter().map(|r| r.model.as_str()).collect();
        assert_eq!(names, vec!["no_ssl", "full_model"]);
    }

    #[test]
    fn test_save_csv_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ablation_summary.csv");
        std::fs::write(&path, "stale contents that are much longer than the header line\n".repeat(10)).unwrap();

        ResultsTable::default().save_csv(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("stale"));
    }

    #[test]
    fn test_print_results_marks_best_once() {
        let results = sample_results();
        let best = find_best_configuration(&results).unwrap();

        let output = render_to_string(|out| print_results(out, &results, &best));

        assert!(output.contains("TABLE 1: ABLATION STUDY RESULTS"));
        assert_eq!(output.matches("(BEST)").count(), 1);
        assert!(output.contains("Best Configuration: full_model with 0.8421 accuracy"));
        let best_line = output.lines().find(|l| l.starts_with("full_model")).unwrap();
        assert!(best_line.ends_with("(BEST)"));
    }

    #[test]
    fn test_print_comparison() {
        let best = BestConfiguration {
            name: "full_model".to_string(),
            accuracy: 0.80,
        };

        let output = render_to_string(|out| {
            print_comparison(out, &compare_to_main(&best, &MainPipelineRecord::new(0.85)))
        });
        assert!(output.contains("Absolute Difference:             +0.0500"));
        assert!(output.contains("Relative Difference:             +6.25%"));
        assert!(output.contains("Main pipeline achieves 5.00% higher accuracy"));

        let output = render_to_string(|out| {
            print_comparison(out, &compare_to_main(&best, &MainPipelineRecord::new(0.8005)))
        });
        assert!(output.contains("statistically equivalent"));
    }

    #[test]
    fn test_print_summary_statistics() {
        let summary = summarize(&sample_results()).unwrap();

        let output = render_to_string(|out| print_summary_statistics(out, &summary));

        assert!(output.contains("SUMMARY STATISTICS ACROSS ALL CONFIGURATIONS"));
        assert!(output.contains("AUC-ROC - Mean: 0.9000"));
        assert!(output.contains("F1-Score - Mean: 0.7500"));
    }
}
