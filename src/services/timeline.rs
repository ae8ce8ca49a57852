use crate::domain::trial::SimulationParameters;
use crate::services::simulation_types::TimelinePoint;
use crate::services::trial_simulation::SimulationError;

/// Projects enrollment and completions linearly over the trial duration.
///
/// Month `m` runs from 1 to `duration_months` inclusive, so the last point
/// always reports the full enrollment. Only the enrollment, dropout and
/// duration fields are read; the sampling parameters are ignored.
pub fn project_timeline(
    params: &SimulationParameters,
) -> Result<Vec<TimelinePoint>, SimulationError> {
    if params.enrolled_patients == 0 {
        return Err(SimulationError::InvalidParameter {
            name: "enrolled_patients",
            value: params.enrolled_patients.to_string(),
            reason: "must be greater than zero",
        });
    }
    if params.duration_months == 0 {
        return Err(SimulationError::InvalidParameter {
            name: "duration_months",
            value: params.duration_months.to_string(),
            reason: "must be greater than zero",
        });
    }
    if !(0.0..=1.0).contains(&params.dropout_probability) {
        return Err(SimulationError::InvalidParameter {
            name: "dropout_probability",
            value: params.dropout_probability.to_string(),
            reason: "must be within [0, 1]",
        });
    }

    let enrolled = u64::from(params.enrolled_patients);
    let duration = u64::from(params.duration_months);
    let retained = params.enrolled_patients as f64 * (1.0 - params.dropout_probability);

    let points = (1..=params.duration_months)
        .map(|month| {
            let month_index = u64::from(month);
            TimelinePoint {
                month,
                enrollment: enrolled * month_index / duration,
                projected_completions: (retained * month_index as f64 / duration as f64)
                    .floor()
                    .max(0.0) as u64,
            }
        })
        .collect();
    Ok(points)
}
