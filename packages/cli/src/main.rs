use std::process::ExitCode;

use clap::Parser;

use bonus_cli::config::Config;
use bonus_cli::{execute, logging, Command};

/// Allocate a bonus pool across a team from performance ratings.
#[derive(Debug, Parser)]
#[command(name = "bonus-cli", version, about)]
struct Cli {
    /// Curve steepness for ratings >= 100 (env: BONUS_UPSIDE_EXPONENT)
    #[arg(long, global = true)]
    upside: Option<f64>,
    /// Curve steepness for ratings < 100 (env: BONUS_DOWNSIDE_EXPONENT)
    #[arg(long, global = true)]
    downside: Option<f64>,
    /// Signed pool adjustment (env: BONUS_BUDGET_OVERRIDE)
    #[arg(long = "override", global = true, allow_negative_numbers = true)]
    budget_override: Option<f64>,
    #[command(subcommand)]
    command: Command,
}

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    let config = Config::from_env().with_overrides(cli.upside, cli.downside, cli.budget_override);
    let _log_guard = logging::init_tracing(&config);

    match execute(&cli.command, &config) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            ExitCode::FAILURE
        }
    }
}
