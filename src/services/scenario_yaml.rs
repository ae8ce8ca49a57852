use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::trial::{Scenario, SimulationParameters, TrialLabel};

pub const DEFAULT_RUNS: usize = 10_000;
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

#[derive(Error, Debug)]
pub enum ScenarioYamlError {
    #[error("failed to read scenario file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse scenario yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScenarioRecord {
    trial_id: Option<String>,
    drug_name: Option<String>,
    enrolled_patients: u32,
    success_probability: f64,
    dropout_probability: f64,
    runs: Option<usize>,
    confidence_level: Option<f64>,
    duration_months: u32,
}

/// Reads a trial scenario from a YAML file.
///
/// Only the shape is checked here; value ranges are enforced by the
/// simulator so that every caller gets the same validation.
pub fn load_scenario_from_yaml_file<P: AsRef<Path>>(
    path: P,
) -> Result<Scenario, ScenarioYamlError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| ScenarioYamlError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    deserialize_scenario_from_yaml_str(&contents)
}

pub fn deserialize_scenario_from_yaml_str(input: &str) -> Result<Scenario, ScenarioYamlError> {
    let record: ScenarioRecord = serde_yaml::from_str(input)?;
    Ok(Scenario {
        label: TrialLabel {
            trial_id: record.trial_id,
            drug_name: record.drug_name,
        },
        parameters: SimulationParameters {
            enrolled_patients: record.enrolled_patients,
            success_probability: record.success_probability,
            dropout_probability: record.dropout_probability,
            runs: record.runs.unwrap_or(DEFAULT_RUNS),
            confidence_level: record.confidence_level.unwrap_or(DEFAULT_CONFIDENCE_LEVEL),
            duration_months: record.duration_months,
        },
    })
}
