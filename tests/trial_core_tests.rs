use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;

use trialstats::domain::quality::{QualityScore, QualityScoreSeries};
use trialstats::domain::trial::SimulationParameters;
use trialstats::services::control_limits::{ControlLimitError, compute_limits};
use trialstats::services::timeline::project_timeline;
use trialstats::services::trial_simulation::{SimulationError, simulate_with_rng};

fn parameters(enrolled: u32, success: f64, dropout: f64, runs: usize) -> SimulationParameters {
    SimulationParameters {
        enrolled_patients: enrolled,
        success_probability: success,
        dropout_probability: dropout,
        runs,
        confidence_level: 0.95,
        duration_months: 18,
    }
}

fn series(scores: &[f64]) -> QualityScoreSeries {
    let day = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
    QualityScoreSeries::new(
        scores
            .iter()
            .enumerate()
            .map(|(index, score)| QualityScore {
                batch_id: format!("LOT-{index}"),
                timestamp: day.and_hms_opt(6, index as u32 % 60, 0).unwrap(),
                score: *score,
            })
            .collect(),
    )
}

#[test]
fn summary_has_one_rate_per_run_within_percentage_scale() {
    let params = parameters(800, 0.653, 0.12, 750);
    let summary = simulate_with_rng(&params, &mut StdRng::seed_from_u64(1)).unwrap();

    assert_eq!(summary.success_rates.len(), 750);
    assert!(summary.success_rates.iter().all(|rate| (0.0..=100.0).contains(rate)));
    assert!(summary.mean_completed <= 800.0);
    assert!(summary.probability_below_70 + summary.probability_above_80 <= 1.0);
}

#[test]
fn certain_success_without_dropout_collapses_interval_at_100() {
    let params = parameters(1000, 1.0, 0.0, 300);
    let summary = simulate_with_rng(&params, &mut StdRng::seed_from_u64(8)).unwrap();

    assert!(summary.success_rates.iter().all(|rate| *rate == 100.0));
    assert_eq!((summary.lower_bound, summary.upper_bound), (100.0, 100.0));
}

#[test]
fn full_dropout_zeroes_every_run() {
    let params = parameters(450, 0.95, 1.0, 64);
    let summary = simulate_with_rng(&params, &mut StdRng::seed_from_u64(4)).unwrap();

    assert_eq!(summary.mean_completed, 0.0);
    assert!(summary.success_rates.iter().all(|rate| *rate == 0.0));
}

#[test]
fn invalid_parameters_fail_before_sampling() {
    let params = parameters(0, 0.5, 0.1, 10);
    let error = simulate_with_rng(&params, &mut StdRng::seed_from_u64(0)).unwrap_err();
    assert!(matches!(
        error,
        SimulationError::InvalidParameter {
            name: "enrolled_patients",
            ..
        }
    ));
}

#[test]
fn timeline_is_repeatable() {
    let params = parameters(1200, 0.785, 0.15, 1);
    assert_eq!(project_timeline(&params).unwrap(), project_timeline(&params).unwrap());
}

#[test]
fn control_limits_for_three_points() {
    let limits = compute_limits(&series(&[10.0, 20.0, 30.0])).unwrap();

    assert_eq!(limits.center, 20.0);
    assert_eq!(limits.std_dev, 10.0);
    assert_eq!(limits.upper, 50.0);
    assert_eq!(limits.lower, -10.0);
    assert!(limits.out_of_control.is_empty());
}

#[test]
fn control_limits_need_two_points() {
    assert_eq!(
        compute_limits(&series(&[88.0])).unwrap_err(),
        ControlLimitError::DegenerateSeries { len: 1 }
    );
}
