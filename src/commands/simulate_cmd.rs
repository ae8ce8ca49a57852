use std::process::ExitCode;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_simulation_report;
use crate::domain::trial::Scenario;
use crate::services::csv_export::write_success_rates_csv;
use crate::services::histogram::write_histogram_png;
use crate::services::report_output::{data_source_name, write_report};
use crate::services::scenario_yaml::load_scenario_from_yaml_file;
use crate::services::simulation_types::{SimulationReport, SimulationSummary};
use crate::services::trial_simulation::{simulate, simulate_with_rng};

pub async fn simulate_command(cmd: Commands) -> ExitCode {
    if let Commands::Simulate {
        input,
        output,
        runs,
        confidence_level,
        seed,
        csv,
    } = cmd
    {
        let mut scenario = match load_scenario_from_yaml_file(&input) {
            Ok(scenario) => scenario,
            Err(e) => {
                eprintln!("Failed to load scenario: {e:?}");
                return ExitCode::FAILURE;
            }
        };
        if let Some(runs) = runs {
            scenario.parameters.runs = runs;
        }
        if let Some(confidence_level) = confidence_level {
            scenario.parameters.confidence_level = confidence_level;
        }

        let params = &scenario.parameters;
        info!(
            input = %input,
            enrolled = params.enrolled_patients,
            runs = params.runs,
            seed = ?seed,
            "running trial simulation"
        );
        let result = match seed {
            Some(seed) => simulate_with_rng(params, &mut StdRng::seed_from_u64(seed)),
            None => simulate(params),
        };
        let summary = match result {
            Ok(summary) => summary,
            Err(e) => {
                eprintln!("Failed to simulate trial: {e:?}");
                return ExitCode::FAILURE;
            }
        };
        debug!(
            mean_success_rate = summary.mean_success_rate,
            lower_bound = summary.lower_bound,
            upper_bound = summary.upper_bound,
            "simulation finished"
        );

        let histogram_path = format!("{output}.png");
        if let Err(e) = write_histogram_png(&histogram_path, &summary).await {
            warn!(path = %histogram_path, error = %e, "histogram not written");
            eprintln!("Failed to write simulation histogram: {e:?}");
        }

        if let Some(csv_path) = &csv {
            match write_success_rates_csv(csv_path, &summary.success_rates) {
                Ok(()) => println!("Success rates written to {csv_path}"),
                Err(e) => {
                    eprintln!("Failed to write success rates csv: {e:?}");
                    return ExitCode::FAILURE;
                }
            }
        }

        let report = build_simulation_report(&input, &scenario, seed, &summary);
        if let Err(e) = write_report(&output, &report).await {
            eprintln!("Failed to write simulation output: {e:?}");
            return ExitCode::FAILURE;
        }

        println!("{}", format_simulation_report(&report));
        println!("Simulation result written to {output}");
        println!("Simulation histogram written to {histogram_path}");
    }
    ExitCode::SUCCESS
}

fn build_simulation_report(
    input: &str,
    scenario: &Scenario,
    seed: Option<u64>,
    summary: &SimulationSummary,
) -> SimulationReport {
    let params = &scenario.parameters;
    SimulationReport {
        data_source: data_source_name(input),
        trial_id: scenario.label.trial_id.clone(),
        drug_name: scenario.label.drug_name.clone(),
        seed,
        enrolled_patients: params.enrolled_patients,
        success_probability: params.success_probability,
        dropout_probability: params.dropout_probability,
        runs: summary.runs,
        confidence_level: summary.confidence_level,
        mean_completed: summary.mean_completed,
        mean_success_rate: summary.mean_success_rate,
        lower_bound: summary.lower_bound,
        upper_bound: summary.upper_bound,
        probability_below_70: summary.probability_below_70,
        probability_above_80: summary.probability_above_80,
    }
}
