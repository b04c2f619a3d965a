pub mod cli;
pub mod clients;
pub mod config;
pub mod models;
pub mod output;
pub mod parser;
pub mod pipeline;

pub use config::Config;
pub use pipeline::{BuildError, BuildSummary, run_build};

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber. `RUST_LOG` wins over the configured
/// level; `try_init` so repeated calls (tests) are harmless.
pub fn init_tracing(log_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .try_init();
}

/// Library entry point: sets up logging then runs one build.
pub async fn run(config: Config) -> Result<BuildSummary, BuildError> {
    init_tracing(&config.general.log_level);
    run_build(&config).await
}
