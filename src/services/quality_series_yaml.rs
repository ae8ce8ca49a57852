use std::io;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::quality::{QualityScore, QualityScoreSeries};

#[derive(Error, Debug)]
pub enum QualitySeriesYamlError {
    #[error("failed to read quality series file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse quality series yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("missing batch id")]
    MissingBatchId,
    #[error("invalid timestamp for batch {batch_id}: {value} (expected YYYY-MM-DD or YYYY-MM-DD HH:MM:SS)")]
    InvalidTimestamp { batch_id: String, value: String },
    #[error("score for batch {batch_id} is not a finite number")]
    InvalidScore { batch_id: String },
}

#[derive(Debug, Deserialize)]
struct QualityScoreRecord {
    batch_id: String,
    timestamp: String,
    score: f64,
}

pub fn load_quality_series_from_yaml_file<P: AsRef<Path>>(
    path: P,
) -> Result<QualityScoreSeries, QualitySeriesYamlError> {
    let path = path.as_ref();
    let contents =
        std::fs::read_to_string(path).map_err(|source| QualitySeriesYamlError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    deserialize_quality_series_from_yaml_str(&contents)
}

/// Parses a list of `{batch_id, timestamp, score}` records and returns them
/// ordered by timestamp. Batches sharing a timestamp keep their file order.
pub fn deserialize_quality_series_from_yaml_str(
    input: &str,
) -> Result<QualityScoreSeries, QualitySeriesYamlError> {
    let records: Vec<QualityScoreRecord> = serde_yaml::from_str(input)?;
    let mut entries = records
        .into_iter()
        .map(score_from_record)
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|entry| entry.timestamp);
    Ok(QualityScoreSeries::new(entries))
}

fn score_from_record(record: QualityScoreRecord) -> Result<QualityScore, QualitySeriesYamlError> {
    if record.batch_id.trim().is_empty() {
        return Err(QualitySeriesYamlError::MissingBatchId);
    }
    if !record.score.is_finite() {
        return Err(QualitySeriesYamlError::InvalidScore {
            batch_id: record.batch_id,
        });
    }
    let timestamp = match parse_timestamp(&record.timestamp) {
        Some(timestamp) => timestamp,
        None => {
            return Err(QualitySeriesYamlError::InvalidTimestamp {
                batch_id: record.batch_id,
                value: record.timestamp,
            });
        }
    };
    Ok(QualityScore {
        batch_id: record.batch_id,
        timestamp,
        score: record.score,
    })
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
