//! Dump a book's table view to a file.

use crate::error::StockError;
use crate::types::Snapshot;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Supported output formats, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Result<Self, StockError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(StockError::UnsupportedExport(path.display().to_string())),
        }
    }
}

/// Write `snapshot` to `path`. Returns the number of data rows written.
pub fn export_snapshot(snapshot: &Snapshot, path: &Path) -> Result<usize> {
    if snapshot.is_empty() {
        return Err(StockError::NothingToExport.into());
    }
    let format = ExportFormat::from_path(path)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    match format {
        ExportFormat::Csv => write_csv(snapshot, path)?,
        ExportFormat::Json => write_json(snapshot, path)?,
    }

    info!("Exported {} rows to {}", snapshot.len(), path.display());
    Ok(snapshot.len())
}

fn write_csv(snapshot: &Snapshot, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    writer.write_record(&snapshot.headers)?;
    for row in &snapshot.rows {
        writer.write_record(row)?;
    }
    writer.flush().context("Failed to flush CSV export")?;
    Ok(())
}

fn write_json(snapshot: &Snapshot, path: &Path) -> Result<()> {
    let records: Vec<serde_json::Map<String, serde_json::Value>> = snapshot
        .rows
        .iter()
        .map(|row| {
            snapshot
                .headers
                .iter()
                .zip(row)
                .map(|(h, v)| (h.to_string(), json_cell(v)))
                .collect()
        })
        .collect();
    let contents = serde_json::to_string_pretty(&records).context("Failed to serialize export")?;
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Integers stay numbers in JSON; everything else is a string.
fn json_cell(value: &str) -> serde_json::Value {
    match value.parse::<i64>() {
        Ok(n) => serde_json::Value::from(n),
        Err(_) => serde_json::Value::from(value),
    }
}
