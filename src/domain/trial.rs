/// Inputs for one trial simulation request.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParameters {
    pub enrolled_patients: u32,
    /// Probability that a completed patient responds, in `[0, 1]`.
    pub success_probability: f64,
    /// Probability that an enrolled patient drops out, in `[0, 1]`.
    pub dropout_probability: f64,
    pub runs: usize,
    /// Confidence level for the empirical interval, in `(0, 1)`.
    pub confidence_level: f64,
    pub duration_months: u32,
}

impl SimulationParameters {
    /// Patients expected to finish the trial, `floor(enrolled * (1 - dropout))`.
    pub fn completed_patients(&self) -> u64 {
        (self.enrolled_patients as f64 * (1.0 - self.dropout_probability))
            .floor()
            .max(0.0) as u64
    }
}

/// Outcome of a single Monte Carlo trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationRun {
    pub completed: u64,
    pub successes: u64,
    /// Success rate on a 0-100 scale.
    pub success_rate: f64,
}

/// Optional labels a scenario carries through to its report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrialLabel {
    pub trial_id: Option<String>,
    pub drug_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub label: TrialLabel,
    pub parameters: SimulationParameters,
}
