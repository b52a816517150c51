use anyhow::{Context, Result};
use ltp::cli::{parse_args, setup_logging, Cli};
use ltp::{ResultsComparator, RunOutcome};
use tracing::{debug, error, info};

fn main() {
    let cli = parse_args();

    setup_logging(cli.verbose);

    debug!("{}", ltp::info());

    if let Err(e) = run(cli) {
        error!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    debug!("Ablation directory: {:?}", cli.ablation_dir);
    debug!("Main directory: {:?}", cli.main_dir);

    let comparator = ResultsComparator::new(&cli.ablation_dir, &cli.main_dir);
    let report = match comparator.run()? {
        RunOutcome::Completed(report) => report,
        RunOutcome::MissingAblationResults(_) => return Ok(()),
    };

    if let Some(path) = cli.report {
        ltp::utils::save_metrics(&report, &path)
            .with_context(|| format!("Failed to save run report to {:?}", path))?;
        info!("Run report saved to: {:?}", path);
    }

    if let Some(path) = cli.history {
        ltp::utils::log_metrics(&report.summary, &path)
            .with_context(|| format!("Failed to append run history to {:?}", path))?;
        info!("Summary appended to: {:?}", path);
    }

    Ok(())
}
