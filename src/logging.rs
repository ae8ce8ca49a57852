use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `TRIALSTATS_LOG=debug`.
pub const LOG_ENV_VAR: &str = "TRIALSTATS_LOG";

/// Installs the stderr subscriber. Defaults to `warn` so stdout stays
/// reserved for command output.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
