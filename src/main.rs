//! Carpool Console - admin CLI for the carpool platform
//!
//! Pure HTTP client of the platform REST API; all state lives server-side.

use carpool_console::console::{self, Cli};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Initialize logging system
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match console::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            console::report_failure(&e);
            ExitCode::FAILURE
        }
    }
}
