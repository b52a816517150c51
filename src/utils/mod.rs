use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use anyhow::{Context, Result};
use serde::Serialize;

/// Ensure directory exists
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if !path.exists() {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {:?}", path))?;
    }
    Ok(())
}

/// Check if file exists
pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().is_file()
}

fn ensure_parent<P: AsRef<Path>>(path: P) -> Result<()> {
    match path.as_ref().parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(parent),
        _ => Ok(()),
    }
}

/// Write metrics as pretty-printed JSON, creating parent directories
pub fn save_metrics<T: Serialize, P: AsRef<Path>>(metrics: &T, path: P) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;

    let json = serde_json::to_string_pretty(metrics).context("Failed to serialize metrics")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write metrics to {:?}", path))?;
    Ok(())
}

/// Append metrics as a single JSON line
pub fn log_metrics<T: Serialize, P: AsRef<Path>>(metrics: &T, path: P) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;

    let line = serde_json::to_string(metrics).context("Failed to serialize metrics")?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open metrics log {:?}", path))?;
    writeln!(file, "{}", line).with_context(|| format!("Failed to append to {:?}", path))?;
    Ok(())
}
