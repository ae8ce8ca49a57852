use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use trialstats::commands::base_commands::{CliArgs, Commands};
use trialstats::commands::control_chart_cmd::control_chart_command;
use trialstats::commands::simulate_cmd::simulate_command;
use trialstats::commands::timeline_cmd::timeline_command;
use trialstats::logging::init_tracing;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let args = CliArgs::parse();
    match args.command {
        cmd @ Commands::Simulate { .. } => simulate_command(cmd).await,
        cmd @ Commands::Timeline { .. } => timeline_command(cmd).await,
        cmd @ Commands::ControlChart { .. } => control_chart_command(cmd).await,
        Commands::Completions { shell } => {
            let mut command = CliArgs::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
            ExitCode::SUCCESS
        }
    }
}
