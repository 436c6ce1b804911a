//! Command-line interface for the Sleigh tour engine.
//!
//! `sleigh solve` reads a JSON `SolveRequest`, runs the nearest-neighbour and
//! 2-opt solver and prints a JSON report. `sleigh generate` writes a seeded
//! random request for experimentation. Subcommand options are layered from
//! defaults, configuration files, `SLEIGH_*` environment variables and flags.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use log::LevelFilter;
use serde::Serialize;
use std::io::Write;

mod error;
mod fs;
mod generate;
mod logging;
mod solve;

pub use error::CliError;

use generate::{GenerateArgs, run_generate};
use solve::{SolveArgs, run_solve};

const ARG_LOG_LEVEL: &str = "log-level";
const ENV_LOG_LEVEL: &str = "SLEIGH_LOG_LEVEL";
const ARG_SOLVE_REQUEST: &str = "request-path";
const ARG_SOLVE_DISTANCE_SCALE: &str = "distance-scale";
const ARG_SOLVE_UNIT: &str = "unit";
const ARG_SOLVE_EPSILON: &str = "epsilon";
const ARG_SOLVE_MAX_PASSES: &str = "max-passes";
const ENV_SOLVE_REQUEST: &str = "SLEIGH_CMDS_SOLVE_REQUEST_PATH";
const ARG_GENERATE_COUNT: &str = "count";
const ARG_GENERATE_SEED: &str = "seed";
const ARG_GENERATE_MIN_X: &str = "min-x";
const ARG_GENERATE_MAX_X: &str = "max-x";
const ARG_GENERATE_MIN_Y: &str = "min-y";
const ARG_GENERATE_MAX_Y: &str = "max-y";
const ARG_GENERATE_OUTPUT: &str = "output";

/// Run the Sleigh CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError::ArgumentParsing`] for invalid arguments (including
/// `--help` and `--version`, which clap reports as errors) and the subcommand's
/// own error otherwise.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    logging::init_logging(cli.log_level)?;
    match cli.command {
        Command::Solve(args) => run_solve(args),
        Command::Generate(args) => run_generate(args),
    }
}

/// Write `value` as pretty JSON followed by a newline.
fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[derive(Debug, Parser)]
#[command(
    name = "sleigh",
    about = "Plan a short closed delivery tour through a set of points",
    version
)]
struct Cli {
    /// Verbosity of diagnostics written to stderr.
    #[arg(
        long = ARG_LOG_LEVEL,
        env = ENV_LOG_LEVEL,
        value_name = "level",
        default_value = "warn",
        global = true
    )]
    log_level: LevelFilter,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Solve a tour request read from JSON.
    Solve(SolveArgs),
    /// Write a random tour request as JSON.
    Generate(GenerateArgs),
}

#[cfg(test)]
mod tests;
