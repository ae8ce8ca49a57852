use serde::Serialize;

/// Aggregate of a full batch of Monte Carlo runs.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SimulationSummary {
    pub runs: usize,
    pub mean_completed: f64,
    pub mean_success_rate: f64,
    pub confidence_level: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub probability_below_70: f64,
    pub probability_above_80: f64,
    /// Per-run success rates in run order.
    pub success_rates: Vec<f64>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelinePoint {
    pub month: u32,
    pub enrollment: u64,
    pub projected_completions: u64,
}

/// What the `simulate` command writes: labels, inputs and the summary
/// without the raw rates.
#[derive(Serialize, Debug, Clone)]
pub struct SimulationReport {
    pub data_source: String,
    pub trial_id: Option<String>,
    pub drug_name: Option<String>,
    pub seed: Option<u64>,
    pub enrolled_patients: u32,
    pub success_probability: f64,
    pub dropout_probability: f64,
    pub runs: usize,
    pub confidence_level: f64,
    pub mean_completed: f64,
    pub mean_success_rate: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub probability_below_70: f64,
    pub probability_above_80: f64,
}

#[derive(Serialize, Debug, Clone)]
pub struct TimelineReport {
    pub data_source: String,
    pub trial_id: Option<String>,
    pub duration_months: u32,
    pub months: Vec<TimelinePoint>,
}
