//! Solve command implementation for the Sleigh CLI.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use sleigh_core::{Diagnostics, SolveRequest, SolveResponse, Solver, Tour};
use sleigh_solver_2opt::{DEFAULT_EPSILON, RefineConfig, TwoOptSolver, TwoOptSolverConfig};
use std::io::{BufReader, Write};

use crate::fs::{file_is_file, open_utf8_file};
use crate::{
    ARG_SOLVE_DISTANCE_SCALE, ARG_SOLVE_EPSILON, ARG_SOLVE_MAX_PASSES, ARG_SOLVE_REQUEST,
    ARG_SOLVE_UNIT, CliError, ENV_SOLVE_REQUEST, write_json,
};

/// Distance multiplier applied when none is configured.
pub(crate) const DEFAULT_DISTANCE_SCALE: f64 = 1.0;
/// Unit label reported when none is configured.
pub(crate) const DEFAULT_UNIT: &str = "units";

/// CLI arguments for the `solve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "solve",
    long_about = "Solve a tour request. The request is a JSON object with a \
                 `start` point and a list of `points`, each carrying an `id` \
                 and `x`/`y` coordinates. The tour opens and closes at the \
                 start and visits every point once.",
    about = "Plan a tour for a JSON request"
)]
#[ortho_config(prefix = "SLEIGH")]
pub(crate) struct SolveArgs {
    /// Path to a JSON file containing a SolveRequest.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Multiplier turning coordinate distance into the reported unit.
    #[arg(long = ARG_SOLVE_DISTANCE_SCALE, value_name = "factor")]
    #[serde(default)]
    pub(crate) distance_scale: Option<f64>,
    /// Label for the scaled distance (e.g. "km").
    #[arg(long = ARG_SOLVE_UNIT, value_name = "name")]
    #[serde(default)]
    pub(crate) unit: Option<String>,
    /// Minimum improvement a 2-opt swap must achieve.
    #[arg(long = ARG_SOLVE_EPSILON, value_name = "distance")]
    #[serde(default)]
    pub(crate) epsilon: Option<f64>,
    /// Stop refinement after this many passes.
    #[arg(long = ARG_SOLVE_MAX_PASSES, value_name = "count")]
    #[serde(default)]
    pub(crate) max_passes: Option<usize>,
}

impl SolveArgs {
    pub(crate) fn into_config(self) -> Result<SolveConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SolveConfig::try_from(merged)
    }
}

/// Resolved `solve` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SolveConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Multiplier applied to the reported distance.
    pub(crate) distance_scale: f64,
    /// Label for the scaled distance.
    pub(crate) unit: String,
    /// Settings for the refinement stage.
    pub(crate) refine: RefineConfig,
}

impl SolveConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.request_path, ARG_SOLVE_REQUEST)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<SolveArgs> for SolveConfig {
    type Error = CliError;

    fn try_from(args: SolveArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_SOLVE_REQUEST,
            env: ENV_SOLVE_REQUEST,
        })?;

        let distance_scale = args.distance_scale.unwrap_or(DEFAULT_DISTANCE_SCALE);
        if !(distance_scale.is_finite() && distance_scale > 0.0) {
            return Err(CliError::InvalidNumber {
                field: ARG_SOLVE_DISTANCE_SCALE,
                value: distance_scale,
                expected: "a positive finite number",
            });
        }

        let epsilon = args.epsilon.unwrap_or(DEFAULT_EPSILON);
        if !(epsilon.is_finite() && epsilon >= 0.0) {
            return Err(CliError::InvalidNumber {
                field: ARG_SOLVE_EPSILON,
                value: epsilon,
                expected: "a non-negative finite number",
            });
        }

        Ok(Self {
            request_path,
            distance_scale,
            unit: args.unit.unwrap_or_else(|| DEFAULT_UNIT.to_owned()),
            refine: RefineConfig {
                epsilon,
                max_passes: args.max_passes,
            },
        })
    }
}

/// JSON document printed by `sleigh solve`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct SolveReport {
    /// The closed tour in visiting order.
    pub(crate) tour: Tour,
    /// Tour length in coordinate units.
    pub(crate) total_distance: f64,
    /// `total_distance` multiplied by the configured scale.
    pub(crate) scaled_distance: f64,
    /// Label for `scaled_distance`.
    pub(crate) unit: String,
    /// Search statistics from the solver.
    pub(crate) diagnostics: Diagnostics,
}

impl SolveReport {
    #[expect(clippy::float_arithmetic, reason = "distances are scaled for display")]
    fn new(response: SolveResponse, config: &SolveConfig) -> Self {
        let scaled_distance = response.total_distance * config.distance_scale;
        Self {
            tour: response.tour,
            total_distance: response.total_distance,
            scaled_distance,
            unit: config.unit.clone(),
            diagnostics: response.diagnostics,
        }
    }
}

/// Builds a solver instance for the current solve invocation.
pub(super) trait SolveSolverBuilder {
    fn build(&self, config: &SolveConfig) -> Result<Box<dyn Solver>, CliError>;
}

pub(super) struct DefaultSolveSolverBuilder;

impl SolveSolverBuilder for DefaultSolveSolverBuilder {
    fn build(&self, config: &SolveConfig) -> Result<Box<dyn Solver>, CliError> {
        Ok(Box::new(TwoOptSolver::with_config(TwoOptSolverConfig {
            refine: config.refine.clone(),
        })))
    }
}

pub(super) fn run_solve(args: SolveArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultSolveSolverBuilder;
    run_solve_with(args, &builder, &mut stdout)
}

pub(super) fn run_solve_with(
    args: SolveArgs,
    builder: &dyn SolveSolverBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let report = execute_solve(args, builder)?;
    write_json(writer, &report)
}

fn execute_solve(
    args: SolveArgs,
    builder: &dyn SolveSolverBuilder,
) -> Result<SolveReport, CliError> {
    let config = resolve_solve_config(args)?;
    let request = load_solve_request(&config.request_path)?;
    request
        .validate_detailed()
        .map_err(|source| CliError::InvalidSolveRequest {
            path: config.request_path.clone(),
            source,
        })?;
    log::info!(
        "loaded {} points from {}",
        request.points.len(),
        config.request_path
    );
    let solver = builder.build(&config)?;
    let response = solver
        .solve(&request)
        .map_err(|source| CliError::Solve { source })?;
    if !response.diagnostics.converged {
        log::warn!(
            "refinement stopped after {} passes without converging",
            response.diagnostics.passes
        );
    }
    Ok(SolveReport::new(response, &config))
}

fn resolve_solve_config(args: SolveArgs) -> Result<SolveConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Loads a JSON-encoded [`SolveRequest`] from disk.
pub(super) fn load_solve_request(path: &Utf8Path) -> Result<SolveRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenSolveRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseSolveRequest {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SolveConfig, CliError> {
    let merged = SolveArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SolveConfig::try_from(merged)
}
