use std::path::Path;

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportWriteError {
    #[error("failed to serialize report as yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to serialize report as json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write report: {0}")]
    Write(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Yaml,
    Json,
}

impl ReportFormat {
    /// `.json` selects JSON; every other extension falls back to YAML.
    pub fn from_path(path: &str) -> Self {
        match Path::new(path).extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ReportFormat::Json,
            _ => ReportFormat::Yaml,
        }
    }
}

pub fn render_report<T: Serialize>(
    report: &T,
    format: ReportFormat,
) -> Result<String, ReportWriteError> {
    match format {
        ReportFormat::Yaml => Ok(serde_yaml::to_string(report)?),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

pub async fn write_report<T: Serialize>(
    output_path: &str,
    report: &T,
) -> Result<(), ReportWriteError> {
    let contents = render_report(report, ReportFormat::from_path(output_path))?;
    tokio::fs::write(output_path, contents).await?;
    Ok(())
}

/// File name of `path` for labelling reports, or the path itself.
pub fn data_source_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
        .to_string()
}
