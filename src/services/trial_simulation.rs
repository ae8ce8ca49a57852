use rand::Rng;
use rand_distr::{Binomial, Distribution};
use thiserror::Error;

use crate::domain::trial::{SimulationParameters, SimulationRun};
use crate::services::percentiles;
use crate::services::simulation_types::SimulationSummary;

/// Success rate (percent) under which a run counts towards the low-outcome risk.
pub const LOW_SUCCESS_THRESHOLD: f64 = 70.0;
/// Success rate (percent) above which a run counts towards the high-outcome chance.
pub const HIGH_SUCCESS_THRESHOLD: f64 = 80.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl SimulationError {
    fn invalid(name: &'static str, value: impl ToString, reason: &'static str) -> Self {
        SimulationError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}

/// Runs the Monte Carlo simulation with a thread-local random source.
pub fn simulate(params: &SimulationParameters) -> Result<SimulationSummary, SimulationError> {
    let mut rng = rand::thread_rng();
    simulate_with_rng(params, &mut rng)
}

/// Runs `params.runs` independent trials drawn from `rng` and summarizes them.
///
/// # Errors
/// Returns [`SimulationError::InvalidParameter`] before any sampling when a
/// count is zero or a probability/confidence level is out of range.
pub fn simulate_with_rng<R: Rng + ?Sized>(
    params: &SimulationParameters,
    rng: &mut R,
) -> Result<SimulationSummary, SimulationError> {
    let runs = simulate_runs_with_rng(params, rng)?;
    Ok(summarize(&runs, params.confidence_level))
}

/// Produces the individual runs without aggregating them.
pub fn simulate_runs_with_rng<R: Rng + ?Sized>(
    params: &SimulationParameters,
    rng: &mut R,
) -> Result<Vec<SimulationRun>, SimulationError> {
    validate_simulation_parameters(params)?;

    let completed = params.completed_patients();
    let binomial = if completed > 0 {
        let distribution = Binomial::new(completed, params.success_probability).map_err(|_| {
            SimulationError::invalid(
                "success_probability",
                params.success_probability,
                "not a valid binomial probability",
            )
        })?;
        Some(distribution)
    } else {
        None
    };

    let mut runs = Vec::with_capacity(params.runs);
    for _ in 0..params.runs {
        runs.push(simulate_single_run(completed, binomial.as_ref(), rng));
    }
    Ok(runs)
}

fn validate_simulation_parameters(params: &SimulationParameters) -> Result<(), SimulationError> {
    if params.enrolled_patients == 0 {
        return Err(SimulationError::invalid(
            "enrolled_patients",
            params.enrolled_patients,
            "must be greater than zero",
        ));
    }
    if !(0.0..=1.0).contains(&params.success_probability) {
        return Err(SimulationError::invalid(
            "success_probability",
            params.success_probability,
            "must be within [0, 1]",
        ));
    }
    if !(0.0..=1.0).contains(&params.dropout_probability) {
        return Err(SimulationError::invalid(
            "dropout_probability",
            params.dropout_probability,
            "must be within [0, 1]",
        ));
    }
    if params.runs == 0 {
        return Err(SimulationError::invalid(
            "runs",
            params.runs,
            "must be greater than zero",
        ));
    }
    if !(params.confidence_level > 0.0 && params.confidence_level < 1.0) {
        return Err(SimulationError::invalid(
            "confidence_level",
            params.confidence_level,
            "must be strictly between 0 and 1",
        ));
    }
    Ok(())
}

fn simulate_single_run<R: Rng + ?Sized>(
    completed: u64,
    binomial: Option<&Binomial>,
    rng: &mut R,
) -> SimulationRun {
    let successes = match binomial {
        Some(distribution) => distribution.sample(rng),
        None => 0,
    };
    let success_rate = if completed > 0 {
        successes as f64 / completed as f64 * 100.0
    } else {
        0.0
    };

    SimulationRun {
        completed,
        successes,
        success_rate,
    }
}

fn summarize(runs: &[SimulationRun], confidence_level: f64) -> SimulationSummary {
    let count = runs.len().max(1) as f64;
    let success_rates: Vec<f64> = runs.iter().map(|run| run.success_rate).collect();

    let mean_completed = runs.iter().map(|run| run.completed as f64).sum::<f64>() / count;
    let mean_success_rate = success_rates.iter().sum::<f64>() / count;

    let mut sorted = success_rates.clone();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let tail = (1.0 - confidence_level) / 2.0 * 100.0;
    let lower_bound = percentiles::value_sorted(&sorted, tail).unwrap_or(0.0);
    let upper_bound = percentiles::value_sorted(&sorted, 100.0 - tail).unwrap_or(0.0);

    let below = success_rates
        .iter()
        .filter(|rate| **rate < LOW_SUCCESS_THRESHOLD)
        .count();
    let above = success_rates
        .iter()
        .filter(|rate| **rate > HIGH_SUCCESS_THRESHOLD)
        .count();

    SimulationSummary {
        runs: runs.len(),
        mean_completed,
        mean_success_rate,
        confidence_level,
        lower_bound,
        upper_bound,
        probability_below_70: below as f64 / count,
        probability_above_80: above as f64 / count,
        success_rates,
    }
}
