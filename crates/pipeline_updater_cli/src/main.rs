use std::io;
use std::io::Write;

use clap::Parser;
use colored::Colorize;
use pipeline_updater_cli::updater;
use pipeline_updater_core::Error as RolloutError;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter, e.g. `debug` or `github_client=trace`
const LOG_ENV_VAR: &str = "PIPELINE_UPDATER_LOG";

/// Pipeline updater: add or refresh a CI workflow file in every private repository
#[derive(Parser)]
#[command(name = "pipeline-updater")]
#[command(about = "Add or refresh a CI workflow file in every private repository", long_about = None)]
struct Cli {
    /// GitHub API host to send requests to (defaults to api.github.com)
    #[arg(long, value_name = "HOST")]
    api_host: Option<String>,
}

fn ask_user_for_value(request: &str) -> Result<String, RolloutError> {
    print!("{}", request.bold());

    io::stdout()
        .flush()
        .map_err(|e| RolloutError::Prompt(format!("Failed to flush the std out buffer: {}", e)))?;

    let mut temp = String::new();
    io::stdin()
        .read_line(&mut temp)
        .map_err(|e| RolloutError::Prompt(e.to_string()))?;
    Ok(temp.trim().to_string())
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    println!(
        "{} v{}",
        "Pipeline updater".bold(),
        option_env!("PIPELINE_UPDATER_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
    );

    match updater::run(cli.api_host.as_deref(), &ask_user_for_value).await {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            error!("Error: {e}");
            std::process::exit(1);
        }
    }
}
