use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::compare::{compare_to_main, find_best_configuration, summarize, BestConfiguration, ComparisonResult};
use crate::metrics::loader::{load_ablation_results, load_main_results};
use crate::metrics::AblationResults;
use crate::report::{self, ResultsTable, RunReport};

/// File holding the ablation mapping inside the ablation directory
pub const ABLATION_RESULTS_FILE: &str = "ablation_results.json";
/// File holding the main pipeline metrics inside the main directory
pub const MAIN_RESULTS_FILE: &str = "metrics.json";
/// CSV summary written next to the ablation results
pub const SUMMARY_CSV_FILE: &str = "ablation_summary.csv";

/// How a comparison run ended
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Completed(RunReport),
    /// The ablation file was not found; nothing was computed
    MissingAblationResults(PathBuf),
}

impl RunOutcome {
    pub fn report(&self) -> Option<&RunReport> {
        match self {
            RunOutcome::Completed(report) => Some(report),
            RunOutcome::MissingAblationResults(_) => None,
        }
    }
}

/// Compares ablation configurations against the main pipeline
#[derive(Debug, Clone)]
pub struct ResultsComparator {
    ablation_dir: PathBuf,
    main_dir: PathBuf,
}

impl ResultsComparator {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(ablation_dir: P, main_dir: Q) -> Self {
        Self {
            ablation_dir: ablation_dir.as_ref().to_path_buf(),
            main_dir: main_dir.as_ref().to_path_buf(),
        }
    }

    pub fn ablation_path(&self) -> PathBuf {
        self.ablation_dir.join(ABLATION_RESULTS_FILE)
    }

    pub fn main_path(&self) -> PathBuf {
        self.main_dir.join(MAIN_RESULTS_FILE)
    }

    pub fn csv_path(&self) -> PathBuf {
        self.ablation_dir.join(SUMMARY_CSV_FILE)
    }

    pub fn load_ablation_results(&self) -> Result<AblationResults> {
        load_ablation_results(self.ablation_path())
    }

    /// Compare against the main pipeline, or `None` when its metrics file is absent
    pub fn compare_with_main_pipeline(
        &self,
        best: &BestConfiguration,
    ) -> Result<Option<ComparisonResult>> {
        let main_path = self.main_path();
        if !main_path.exists() {
            info!("Main pipeline results not found at {:?}, skipping comparison", main_path);
            return Ok(None);
        }

        let main = load_main_results(&main_path)?;
        Ok(Some(compare_to_main(best, &main)))
    }

    /// Render the table and write it to the summary CSV
    pub fn export_csv(&self, results: &AblationResults) -> Result<ResultsTable> {
        let table = ResultsTable::render(results);
        let csv_path = self.csv_path();
        table.save_csv(&csv_path)?;
        debug!("Wrote {} rows to {:?}", table.len(), csv_path);
        Ok(table)
    }

    /// Run the full comparison, printing the report to stdout
    pub fn run(&self) -> Result<RunOutcome> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_to(&mut out)
    }

    /// Run the full comparison, printing the report to `out`
    pub fn run_to<W: Write>(&self, out: &mut W) -> Result<RunOutcome> {
        let ablation_path = self.ablation_path();
        if !ablation_path.exists() {
            writeln!(out, "Error: Ablation results not found at {}", ablation_path.display())?;
            return Ok(RunOutcome::MissingAblationResults(ablation_path));
        }

        let results = self.load_ablation_results()?;
        let best = find_best_configuration(&results)
            .with_context(|| format!("Cannot compare results in {:?}", ablation_path))?;
        info!("Best configuration: {} ({:.4})", best.name, best.accuracy);

        report::print_results(out, &results, &best)?;

        let comparison = self.compare_with_main_pipeline(&best)?;
        if let Some(ref comparison) = comparison {
            report::print_comparison(out, comparison)?;
        }

        let summary = summarize(&results)?;
        report::print_summary_statistics(out, &summary)?;

        let table = self.export_csv(&results)?;
        let csv_path = self.csv_path();
        writeln!(out, "\nResults exported to {}", csv_path.display())?;
        report::print_closing_rule(out)?;

        Ok(RunOutcome::Completed(RunReport {
            best,
            comparison,
            summary,
            csv_path,
            table,
        }))
    }
}

impl Default for ResultsComparator {
    fn default() -> Self {
        Self::new("ablation_results", "results")
    }
}
