//! `groupsweep` -- find and remove empty Google Workspace groups.
//!
//! Lists every group of the customer, records those with neither members
//! nor owners in a report sheet, emails a summary and, on request, deletes
//! the recorded groups. See [`groupsweep_cli::config::AppConfig::from_env`]
//! for the environment variables it reads.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use groupsweep_cli::cli::{execute, Cli};
use groupsweep_cli::config::AppConfig;

/// Log filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "groupsweep=info,groupsweep_cli=info,groupsweep_directory=info,\
                                  groupsweep_sheets=info,groupsweep_notify=info,groupsweep_state=info";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(
        customer = %config.customer_id,
        sheet = %config.sheet_name,
        timezone = config.timezone.name(),
        "Loaded configuration"
    );

    match execute(cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            ExitCode::FAILURE
        }
    }
}
