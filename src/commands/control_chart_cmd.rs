use std::process::ExitCode;

use tracing::{info, warn};

use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_control_limits_report;
use crate::services::control_chart_plot::write_control_chart_png;
use crate::services::control_limits::{ControlLimitError, ControlLimitsReport, compute_limits};
use crate::services::csv_export::write_control_points_csv;
use crate::services::quality_series_yaml::load_quality_series_from_yaml_file;
use crate::services::report_output::{data_source_name, write_report};

pub async fn control_chart_command(cmd: Commands) -> ExitCode {
    if let Commands::ControlChart { input, output, csv } = cmd {
        let series = match load_quality_series_from_yaml_file(&input) {
            Ok(series) => series,
            Err(e) => {
                eprintln!("Failed to load quality series: {e:?}");
                return ExitCode::FAILURE;
            }
        };

        let limits = match compute_limits(&series) {
            Ok(limits) => limits,
            Err(ControlLimitError::DegenerateSeries { len }) => {
                eprintln!("Insufficient data: {len} observation(s), at least 2 are needed");
                return ExitCode::FAILURE;
            }
        };
        info!(
            input = %input,
            observations = series.len(),
            out_of_control = limits.out_of_control.len(),
            "computed control limits"
        );

        let chart_path = format!("{output}.png");
        if let Err(e) = write_control_chart_png(&chart_path, &series, &limits).await {
            warn!(path = %chart_path, error = %e, "control chart not written");
            eprintln!("Failed to write control chart: {e:?}");
        }

        if let Some(csv_path) = &csv {
            match write_control_points_csv(csv_path, &series, &limits) {
                Ok(()) => println!("Control chart points written to {csv_path}"),
                Err(e) => {
                    eprintln!("Failed to write control chart csv: {e:?}");
                    return ExitCode::FAILURE;
                }
            }
        }

        let report = ControlLimitsReport::new(data_source_name(&input), series.len(), &limits);
        if let Err(e) = write_report(&output, &report).await {
            eprintln!("Failed to write control limits output: {e:?}");
            return ExitCode::FAILURE;
        }

        println!("{}", format_control_limits_report(&report));
        println!("Control limits written to {output}");
        println!("Control chart written to {chart_path}");
    }
    ExitCode::SUCCESS
}
