use serde::Serialize;
use thiserror::Error;

use crate::domain::quality::{QualityScore, QualityScoreSeries};

/// Width of the control band in standard deviations.
pub const SIGMA_MULTIPLIER: f64 = 3.0;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControlLimitError {
    #[error("control limits need at least 2 observations, got {len}")]
    DegenerateSeries { len: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControlLimits {
    pub center: f64,
    pub std_dev: f64,
    pub upper: f64,
    /// May be negative; never clamped to the metric's natural range.
    pub lower: f64,
    /// Entries outside `[lower, upper]`, in the order they appear in the series.
    pub out_of_control: Vec<QualityScore>,
}

impl ControlLimits {
    pub fn contains(&self, score: f64) -> bool {
        score >= self.lower && score <= self.upper
    }
}

/// Serializable view of [`ControlLimits`] for reports.
#[derive(Serialize, Debug, Clone)]
pub struct ControlLimitsReport {
    pub data_source: String,
    pub observations: usize,
    pub center: f64,
    pub std_dev: f64,
    pub upper_control_limit: f64,
    pub lower_control_limit: f64,
    pub out_of_control: Vec<OutOfControlRecord>,
}

#[derive(Serialize, Debug, Clone)]
pub struct OutOfControlRecord {
    pub batch_id: String,
    pub timestamp: String,
    pub score: f64,
}

impl ControlLimitsReport {
    pub fn new(data_source: String, observations: usize, limits: &ControlLimits) -> Self {
        Self {
            data_source,
            observations,
            center: limits.center,
            std_dev: limits.std_dev,
            upper_control_limit: limits.upper,
            lower_control_limit: limits.lower,
            out_of_control: limits
                .out_of_control
                .iter()
                .map(|entry| OutOfControlRecord {
                    batch_id: entry.batch_id.clone(),
                    timestamp: entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
                    score: entry.score,
                })
                .collect(),
        }
    }
}

/// Computes the Shewhart center line and ±3σ limits for `series`.
///
/// The series is expected in chronological order; it is not re-sorted, so
/// flagged entries come back in whatever order the caller supplied.
///
/// # Errors
/// Returns [`ControlLimitError::DegenerateSeries`] for fewer than two entries,
/// where the sample standard deviation is undefined.
pub fn compute_limits(series: &QualityScoreSeries) -> Result<ControlLimits, ControlLimitError> {
    let len = series.len();
    if len < 2 {
        return Err(ControlLimitError::DegenerateSeries { len });
    }

    let center = series.scores().sum::<f64>() / len as f64;
    let sum_of_squares: f64 = series.scores().map(|score| (score - center).powi(2)).sum();
    let std_dev = (sum_of_squares / (len - 1) as f64).sqrt();

    let upper = center + SIGMA_MULTIPLIER * std_dev;
    let lower = center - SIGMA_MULTIPLIER * std_dev;

    let out_of_control = series
        .entries
        .iter()
        .filter(|entry| entry.score > upper || entry.score < lower)
        .cloned()
        .collect();

    Ok(ControlLimits {
        center,
        std_dev,
        upper,
        lower,
        out_of_control,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::build_series;

    #[test]
    fn compute_limits_for_evenly_spaced_scores() {
        let series = build_series(&[10.0, 20.0, 30.0]);
        let limits = compute_limits(&series).unwrap();

        assert_eq!(limits.center, 20.0);
        assert_eq!(limits.std_dev, 10.0);
        assert_eq!(limits.upper, 50.0);
        assert_eq!(limits.lower, -10.0);
        assert!(limits.out_of_control.is_empty());
    }

    #[test]
    fn compute_limits_keeps_negative_lower_limit() {
        let series = build_series(&[1.0, 99.0, 2.0, 98.0]);
        let limits = compute_limits(&series).unwrap();

        assert!(limits.lower < 0.0);
        assert!(limits.upper > 100.0);
    }

    #[test]
    fn compute_limits_flags_spike_in_long_stable_series() {
        let mut scores = vec![10.0; 19];
        scores.push(1000.0);
        let series = build_series(&scores);
        let limits = compute_limits(&series).unwrap();

        assert_eq!(limits.out_of_control.len(), 1);
        assert_eq!(limits.out_of_control[0].batch_id, "B020");
        assert_eq!(limits.out_of_control[0].score, 1000.0);
        assert!(!limits.contains(1000.0));
        assert!(limits.contains(10.0));
    }

    #[test]
    fn compute_limits_flags_drop_below_lower_limit() {
        let mut scores = vec![95.0, 96.0, 94.0, 95.0, 96.0, 94.0, 95.0, 96.0, 94.0, 95.0, 96.0];
        scores.push(20.0);
        let series = build_series(&scores);
        let limits = compute_limits(&series).unwrap();

        assert_eq!(limits.out_of_control.len(), 1);
        assert_eq!(limits.out_of_control[0].score, 20.0);
        assert!(limits.out_of_control[0].score < limits.lower);
    }

    #[test]
    fn compute_limits_cannot_flag_single_spike_in_five_points() {
        // One outlier among n points sits at most (n-1)/sqrt(n) sample
        // deviations from the mean, 1.79 for n=5.
        let series = build_series(&[10.0, 10.0, 10.0, 10.0, 1000.0]);
        let limits = compute_limits(&series).unwrap();

        assert_eq!(limits.center, 208.0);
        assert!(limits.upper > 1000.0);
        assert!(limits.out_of_control.is_empty());
    }

    #[test]
    fn compute_limits_reports_flags_in_supplied_order() {
        let mut scores = vec![50.0; 24];
        scores.insert(3, 500.0);
        scores.push(-400.0);
        let series = build_series(&scores);
        let limits = compute_limits(&series).unwrap();

        let flagged: Vec<f64> = limits.out_of_control.iter().map(|e| e.score).collect();
        assert_eq!(flagged, vec![500.0, -400.0]);
    }

    #[test]
    fn compute_limits_constant_series_has_zero_spread() {
        let series = build_series(&[7.0, 7.0, 7.0]);
        let limits = compute_limits(&series).unwrap();

        assert_eq!(limits.std_dev, 0.0);
        assert_eq!(limits.upper, 7.0);
        assert_eq!(limits.lower, 7.0);
        assert!(limits.out_of_control.is_empty());
    }

    #[test]
    fn compute_limits_rejects_single_observation() {
        let series = build_series(&[42.0]);
        let error = compute_limits(&series).expect_err("expected degenerate series");
        assert_eq!(error, ControlLimitError::DegenerateSeries { len: 1 });
    }

    #[test]
    fn compute_limits_rejects_empty_series() {
        let error = compute_limits(&QualityScoreSeries::default()).unwrap_err();
        assert_eq!(error, ControlLimitError::DegenerateSeries { len: 0 });
    }

    #[test]
    fn control_limits_report_formats_flagged_batches() {
        let mut scores = vec![10.0; 19];
        scores.push(1000.0);
        let series = build_series(&scores);
        let limits = compute_limits(&series).unwrap();

        let report = ControlLimitsReport::new("batches.yaml".to_string(), series.len(), &limits);
        assert_eq!(report.observations, 20);
        assert_eq!(report.out_of_control.len(), 1);
        assert_eq!(report.out_of_control[0].batch_id, "B020");
        assert_eq!(report.out_of_control[0].timestamp, "2026-01-20 08:00:00");
    }
}
