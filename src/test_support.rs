use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::domain::quality::{QualityScore, QualityScoreSeries};
use crate::domain::trial::SimulationParameters;

pub fn on_datetime(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

pub fn build_parameters(
    enrolled_patients: u32,
    success_probability: f64,
    dropout_probability: f64,
    runs: usize,
) -> SimulationParameters {
    SimulationParameters {
        enrolled_patients,
        success_probability,
        dropout_probability,
        runs,
        confidence_level: 0.95,
        duration_months: 12,
    }
}

// One batch per day starting 2026-01-01 08:00, ids B001, B002, ...
pub fn build_series(scores: &[f64]) -> QualityScoreSeries {
    let start = on_datetime(2026, 1, 1, 8);
    QualityScoreSeries::new(
        scores
            .iter()
            .enumerate()
            .map(|(index, score)| QualityScore {
                batch_id: format!("B{:03}", index + 1),
                timestamp: start + Duration::days(index as i64),
                score: *score,
            })
            .collect(),
    )
}
