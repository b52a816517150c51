use clap::Parser;
use std::path::PathBuf;

/// Ablation study comparison for liver transplantability prediction
#[derive(Parser, Debug)]
#[command(name = "compare-results")]
#[command(about = "Ablation study comparison for liver transplantability prediction")]
#[command(after_help = "Example usage: compare-results --ablation_dir ablation_results --main_dir results")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Directory containing ablation study results (ablation_results.json)
    #[arg(long = "ablation_dir", alias = "ablation-dir", default_value = "ablation_results")]
    pub ablation_dir: PathBuf,

    /// Directory containing main pipeline results (metrics.json)
    #[arg(long = "main_dir", alias = "main-dir", default_value = "results")]
    pub main_dir: PathBuf,

    /// Write the full run report as JSON to this file
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Append the summary statistics as a JSON line to this file
    #[arg(long)]
    pub history: Option<PathBuf>,
}

/// Parse CLI arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}

/// Setup logging based on verbosity
pub fn setup_logging(verbose: bool) {
    let filter = if verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["compare-results"]);

        assert_eq!(cli.ablation_dir, PathBuf::from("ablation_results"));
        assert_eq!(cli.main_dir, PathBuf::from("results"));
        assert!(cli.report.is_none());
        assert!(cli.history.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_underscore_flags() {
        let cli = Cli::parse_from([
            "compare-results",
            "--ablation_dir", "runs/ablation",
            "--main_dir", "runs/main",
            "--report", "report.json",
        ]);

        assert_eq!(cli.ablation_dir, PathBuf::from("runs/ablation"));
        assert_eq!(cli.main_dir, PathBuf::from("runs/main"));
        assert_eq!(cli.report, Some(PathBuf::from("report.json")));
    }

    #[test]
    fn test_cli_kebab_aliases() {
        let cli = Cli::parse_from(["compare-results", "--ablation-dir", "a", "--main-dir", "m", "-v"]);

        assert_eq!(cli.ablation_dir, PathBuf::from("a"));
        assert_eq!(cli.main_dir, PathBuf::from("m"));
        assert!(cli.verbose);
    }
}
