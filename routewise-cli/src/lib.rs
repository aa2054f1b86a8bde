//! Command-line interface for the `routewise` route optimizer.
//!
//! `routewise solve <request.json>` prints a full route report and
//! `routewise preview <request.json>` prints a quick recommendation. Both
//! write an `OptimizeResponse` JSON envelope to stdout and exit non-zero when
//! no route could be produced.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod solve;

pub use error::CliError;

use solve::{DefaultOptimizerBuilder, OutputKind, SolveArgs, run_solve_with};

const ARG_REQUEST: &str = "request";
const ARG_AVERAGE_SPEED: &str = "average-speed";
const ARG_TIME_LIMIT: &str = "time-limit";
const ARG_METRIC: &str = "metric";
const ARG_DEPOT: &str = "depot";
const ARG_MAX_ROUTE_MINUTES: &str = "max-route-minutes";
const ARG_PRETTY: &str = "pretty";
const ENV_REQUEST: &str = "ROUTEWISE_CMDS_SOLVE_REQUEST_PATH";

/// Run the CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultOptimizerBuilder;
    match cli.command {
        Command::Solve(args) => run_solve_with(args, OutputKind::Route, &builder, &mut stdout),
        Command::Preview(args) => {
            run_solve_with(args, OutputKind::Preview, &builder, &mut stdout)
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "routewise",
    about = "Plan single-vehicle collection routes",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Optimize a route and print the full report.
    Solve(SolveArgs),
    /// Recommend a route on a short search budget.
    Preview(SolveArgs),
}

#[cfg(test)]
mod tests;
