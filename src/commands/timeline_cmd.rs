use std::process::ExitCode;

use tracing::{info, warn};

use crate::commands::base_commands::Commands;
use crate::services::csv_export::write_timeline_csv;
use crate::services::report_output::{data_source_name, write_report};
use crate::services::scenario_yaml::load_scenario_from_yaml_file;
use crate::services::simulation_types::TimelineReport;
use crate::services::timeline::project_timeline;
use crate::services::timeline_plot::write_timeline_png;

pub async fn timeline_command(cmd: Commands) -> ExitCode {
    if let Commands::Timeline { input, output, csv } = cmd {
        let scenario = match load_scenario_from_yaml_file(&input) {
            Ok(scenario) => scenario,
            Err(e) => {
                eprintln!("Failed to load scenario: {e:?}");
                return ExitCode::FAILURE;
            }
        };

        let timeline = match project_timeline(&scenario.parameters) {
            Ok(timeline) => timeline,
            Err(e) => {
                eprintln!("Failed to project timeline: {e:?}");
                return ExitCode::FAILURE;
            }
        };
        info!(input = %input, months = timeline.len(), "projected enrollment timeline");

        let chart_path = format!("{output}.png");
        if let Err(e) = write_timeline_png(&chart_path, &timeline).await {
            warn!(path = %chart_path, error = %e, "timeline chart not written");
            eprintln!("Failed to write timeline chart: {e:?}");
        }

        if let Some(csv_path) = &csv {
            match write_timeline_csv(csv_path, &timeline) {
                Ok(()) => println!("Timeline rows written to {csv_path}"),
                Err(e) => {
                    eprintln!("Failed to write timeline csv: {e:?}");
                    return ExitCode::FAILURE;
                }
            }
        }

        let report = TimelineReport {
            data_source: data_source_name(&input),
            trial_id: scenario.label.trial_id.clone(),
            duration_months: scenario.parameters.duration_months,
            months: timeline,
        };
        if let Err(e) = write_report(&output, &report).await {
            eprintln!("Failed to write timeline output: {e:?}");
            return ExitCode::FAILURE;
        }

        println!("Timeline for {} months written to {output}", report.duration_months);
        println!("Timeline chart written to {chart_path}");
    }
    ExitCode::SUCCESS
}
