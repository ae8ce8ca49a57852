use crate::services::control_limits::ControlLimitsReport;
use crate::services::simulation_types::SimulationReport;

pub fn format_simulation_report(report: &SimulationReport) -> String {
    let mut lines = Vec::new();
    lines.push("Simulation Report".to_string());
    lines.push(format!("Data source: {}", report.data_source));
    lines.push(format!("Trial: {}", label_or_na(report.trial_id.as_deref())));
    lines.push(format!("Drug: {}", label_or_na(report.drug_name.as_deref())));
    lines.push(format!("Runs: {}", report.runs));
    lines.push(format!("Enrolled patients: {}", report.enrolled_patients));
    lines.push(format!("Mean completed: {:.1}", report.mean_completed));
    lines.push(String::new());
    lines.push("Success rate:".to_string());
    lines.push("Statistic | Value".to_string());
    lines.push("----------|------".to_string());
    lines.push(format!("Mean | {:.2}%", report.mean_success_rate));
    lines.push(format!(
        "{:.0}% CI | {:.2}% - {:.2}%",
        report.confidence_level * 100.0,
        report.lower_bound,
        report.upper_bound
    ));
    lines.push(format!(
        "P(rate < 70%) | {:.1}%",
        report.probability_below_70 * 100.0
    ));
    lines.push(format!(
        "P(rate > 80%) | {:.1}%",
        report.probability_above_80 * 100.0
    ));

    lines.join("\n")
}

pub fn format_control_limits_report(report: &ControlLimitsReport) -> String {
    let mut lines = Vec::new();
    lines.push("Control Chart Report".to_string());
    lines.push(format!("Data source: {}", report.data_source));
    lines.push(format!("Observations: {}", report.observations));
    lines.push(format!("Center: {:.2}", report.center));
    lines.push(format!("Std dev: {:.2}", report.std_dev));
    lines.push(format!("UCL: {:.2}", report.upper_control_limit));
    lines.push(format!("LCL: {:.2}", report.lower_control_limit));
    lines.push(String::new());
    if report.out_of_control.is_empty() {
        lines.push("All batches within control limits".to_string());
    } else {
        lines.push(format!("Out of control ({}):", report.out_of_control.len()));
        lines.push("Batch | Timestamp | Score".to_string());
        lines.push("------|-----------|------".to_string());
        for record in &report.out_of_control {
            lines.push(format!(
                "{} | {} | {:.2}",
                record.batch_id, record.timestamp, record.score
            ));
        }
    }

    lines.join("\n")
}

fn label_or_na(value: Option<&str>) -> &str {
    value.unwrap_or("n/a")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::control_limits::OutOfControlRecord;

    fn build_report() -> SimulationReport {
        SimulationReport {
            data_source: "scenario.yaml".to_string(),
            trial_id: Some("CT001".to_string()),
            drug_name: Some("Respiratory-X".to_string()),
            seed: Some(7),
            enrolled_patients: 1200,
            success_probability: 0.785,
            dropout_probability: 0.15,
            runs: 1000,
            confidence_level: 0.95,
            mean_completed: 1020.0,
            mean_success_rate: 78.51,
            lower_bound: 76.0,
            upper_bound: 81.02,
            probability_below_70: 0.0,
            probability_above_80: 0.125,
        }
    }

    fn build_limits_report(flagged: Vec<OutOfControlRecord>) -> ControlLimitsReport {
        ControlLimitsReport {
            data_source: "batches.yaml".to_string(),
            observations: 20,
            center: 59.5,
            std_dev: 221.37,
            upper_control_limit: 723.61,
            lower_control_limit: -604.61,
            out_of_control: flagged,
        }
    }

    #[test]
    fn format_simulation_report_includes_header_and_table() {
        let output = format_simulation_report(&build_report());

        assert!(output.contains("Simulation Report"));
        assert!(output.contains("Data source: scenario.yaml"));
        assert!(output.contains("Trial: CT001"));
        assert!(output.contains("Drug: Respiratory-X"));
        assert!(output.contains("Runs: 1000"));
        assert!(output.contains("Mean completed: 1020.0"));
        assert!(output.contains("Mean | 78.51%"));
        assert!(output.contains("95% CI | 76.00% - 81.02%"));
        assert!(output.contains("P(rate < 70%) | 0.0%"));
        assert!(output.contains("P(rate > 80%) | 12.5%"));
    }

    #[test]
    fn format_simulation_report_uses_na_for_missing_labels() {
        let mut report = build_report();
        report.trial_id = None;
        report.drug_name = None;

        let output = format_simulation_report(&report);
        assert!(output.contains("Trial: n/a"));
        assert!(output.contains("Drug: n/a"));
    }

    #[test]
    fn format_control_limits_report_lists_flagged_batches() {
        let report = build_limits_report(vec![OutOfControlRecord {
            batch_id: "B020".to_string(),
            timestamp: "2026-01-20 08:00:00".to_string(),
            score: 1000.0,
        }]);
        let output = format_control_limits_report(&report);

        assert!(output.contains("Control Chart Report"));
        assert!(output.contains("UCL: 723.61"));
        assert!(output.contains("LCL: -604.61"));
        assert!(output.contains("Out of control (1):"));
        assert!(output.contains("B020 | 2026-01-20 08:00:00 | 1000.00"));
    }

    #[test]
    fn format_control_limits_report_notes_stable_process() {
        let output = format_control_limits_report(&build_limits_report(Vec::new()));
        assert!(output.contains("All batches within control limits"));
    }
}
