use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a Monte Carlo simulation of trial success rates
    Simulate {
        /// Trial scenario YAML file
        #[arg(short, long)]
        input: String,
        /// Output report file (.yaml or .json)
        #[arg(short, long)]
        output: String,
        /// Number of simulation runs, overrides the scenario
        #[arg(short = 'n', long)]
        runs: Option<usize>,
        /// Confidence level in (0, 1), overrides the scenario
        #[arg(short, long)]
        confidence_level: Option<f64>,
        /// Seed for a reproducible run
        #[arg(short, long)]
        seed: Option<u64>,
        /// Optional CSV file for the per-run success rates
        #[arg(long)]
        csv: Option<String>,
    },
    /// Project monthly enrollment and completions for a trial scenario
    Timeline {
        /// Trial scenario YAML file
        #[arg(short, long)]
        input: String,
        /// Output timeline file (.yaml or .json)
        #[arg(short, long)]
        output: String,
        /// Optional CSV file for the monthly rows
        #[arg(long)]
        csv: Option<String>,
    },
    /// Compute control limits for a series of batch quality scores
    ControlChart {
        /// Quality score series YAML file
        #[arg(short, long)]
        input: String,
        /// Output limits file (.yaml or .json)
        #[arg(short, long)]
        output: String,
        /// Optional CSV file for the charted points
        #[arg(long)]
        csv: Option<String>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
