use crate::metrics::{AblationResults, MainPipelineRecord};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

/// Read and parse a JSON document from disk
pub fn read_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    parse_json(BufReader::new(file)).with_context(|| format!("Failed to parse JSON in {:?}", path))
}

fn parse_json<T: DeserializeOwned, R: Read>(reader: R) -> Result<T> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load the ablation-results mapping
pub fn load_ablation_results<P: AsRef<Path>>(path: P) -> Result<AblationResults> {
    let path = path.as_ref();
    info!("Loading ablation results from {:?}", path);

    let value: Value = read_json(path)?;
    let results = AblationResults::from_value(value)
        .with_context(|| format!("Invalid ablation results in {:?}", path))?;

    debug!("Configurations: {:?}", results.names().collect::<Vec<_>>());
    info!("Loaded {} configurations", results.len());
    Ok(results)
}

/// Load the main pipeline metrics
pub fn load_main_results<P: AsRef<Path>>(path: P) -> Result<MainPipelineRecord> {
    let path = path.as_ref();
    info!("Loading main pipeline results from {:?}", path);

    let record: MainPipelineRecord = read_json(path)?;
    debug!("Main pipeline accuracy: {:.4}", record.accuracy);
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn test_load_ablation_results_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ablation_results.json");
        std::fs::write(
            &path,
            r#"{"baseline": {"accuracy": 0.8, "f1": 0.75, "tp": 10, "tn": 20, "fp": 3, "fn": 4, "auc_roc": 0.88}}"#,
        )
        .unwrap();

        let results = load_ablation_results(&path).unwrap();

        assert_eq!(results.len(), 1);
        let record = results.get("baseline").unwrap();
        assert_eq!(record.tn, 20);
        assert_eq!(record.auc_roc, Some(0.88));
    }

    #[test]
    fn test_malformed_json_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("metrics.json");
        std::fs::write(&path, "{ \"accuracy\": 0.8, ").unwrap();

        let err = load_main_results(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse JSON"));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_ablation_results("does/not/exist.json").unwrap_err();
        assert!(err.to_string().contains("exist.json"));
    }

    #[test]
    fn test_parse_main_from_reader() {
        let cursor = Cursor::new(r#"{"accuracy": 0.83, "auc_roc": 0.9}"#);
        let record: MainPipelineRecord = parse_json(cursor).unwrap();
        assert_eq!(record.accuracy, 0.83);
        assert_eq!(record.auc_roc, Some(0.9));
    }
}
