//! Generate command: seeded random tour requests.

use camino::Utf8PathBuf;
use clap::Parser;
use geo::{Coord, Rect};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use sleigh_core::{Point, SolveRequest};
use std::io::Write;

use crate::fs::create_utf8_file;
use crate::{
    ARG_GENERATE_COUNT, ARG_GENERATE_MAX_X, ARG_GENERATE_MAX_Y, ARG_GENERATE_MIN_X,
    ARG_GENERATE_MIN_Y, ARG_GENERATE_OUTPUT, ARG_GENERATE_SEED, CliError, write_json,
};

/// Points generated when no count is configured.
pub(crate) const DEFAULT_COUNT: usize = 8;
/// Seed used when none is configured.
pub(crate) const DEFAULT_SEED: u64 = 1;
/// Lower bound of both axes when none is configured.
pub(crate) const DEFAULT_MIN: f64 = 0.0;
/// Upper bound of both axes when none is configured.
pub(crate) const DEFAULT_MAX: f64 = 100.0;
/// Identifier given to the generated start point.
pub(crate) const START_ID: u64 = 0;

/// CLI arguments for the `generate` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "generate",
    long_about = "Generate a random tour request. The start point sits at the \
                 centre of the area with id 0 and the points to visit are \
                 drawn uniformly from the area with ids 1..=count. The same \
                 seed always produces the same request.",
    about = "Write a random tour request as JSON"
)]
#[ortho_config(prefix = "SLEIGH")]
pub(crate) struct GenerateArgs {
    /// Number of points to visit.
    #[arg(long = ARG_GENERATE_COUNT, value_name = "n")]
    #[serde(default)]
    pub(crate) count: Option<usize>,
    /// Seed for the random number generator.
    #[arg(long = ARG_GENERATE_SEED, value_name = "seed")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    /// Smallest x coordinate.
    #[arg(long = ARG_GENERATE_MIN_X, value_name = "x", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) min_x: Option<f64>,
    /// Largest x coordinate.
    #[arg(long = ARG_GENERATE_MAX_X, value_name = "x", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) max_x: Option<f64>,
    /// Smallest y coordinate.
    #[arg(long = ARG_GENERATE_MIN_Y, value_name = "y", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) min_y: Option<f64>,
    /// Largest y coordinate.
    #[arg(long = ARG_GENERATE_MAX_Y, value_name = "y", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) max_y: Option<f64>,
    /// Write the request to this file instead of stdout.
    #[arg(long = ARG_GENERATE_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl GenerateArgs {
    pub(crate) fn into_config(self) -> Result<GenerateConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        GenerateConfig::try_from(merged)
    }
}

/// Resolved `generate` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GenerateConfig {
    /// Number of points to visit.
    pub(crate) count: usize,
    /// Generator seed.
    pub(crate) seed: u64,
    /// Area the points are drawn from.
    pub(crate) area: Rect<f64>,
    /// Destination file, or `None` for stdout.
    pub(crate) output: Option<Utf8PathBuf>,
}

impl TryFrom<GenerateArgs> for GenerateConfig {
    type Error = CliError;

    fn try_from(args: GenerateArgs) -> Result<Self, Self::Error> {
        let (min_x, max_x) = axis_bounds(
            "x",
            (ARG_GENERATE_MIN_X, args.min_x),
            (ARG_GENERATE_MAX_X, args.max_x),
        )?;
        let (min_y, max_y) = axis_bounds(
            "y",
            (ARG_GENERATE_MIN_Y, args.min_y),
            (ARG_GENERATE_MAX_Y, args.max_y),
        )?;
        Ok(Self {
            count: args.count.unwrap_or(DEFAULT_COUNT),
            seed: args.seed.unwrap_or(DEFAULT_SEED),
            area: Rect::new(Coord { x: min_x, y: min_y }, Coord { x: max_x, y: max_y }),
            output: args.output,
        })
    }
}

/// Resolve one axis of the area.
///
/// Both the width and the midpoint must stay finite: the sampler draws from
/// `min..max` and the start point sits at the centre.
#[expect(
    clippy::float_arithmetic,
    reason = "width and midpoint are checked for overflow"
)]
fn axis_bounds(
    axis: &'static str,
    (min_field, configured_min): (&'static str, Option<f64>),
    (max_field, configured_max): (&'static str, Option<f64>),
) -> Result<(f64, f64), CliError> {
    let min = finite(min_field, configured_min.unwrap_or(DEFAULT_MIN))?;
    let max = finite(max_field, configured_max.unwrap_or(DEFAULT_MAX))?;
    if min >= max {
        return Err(CliError::EmptyArea { axis, min, max });
    }
    if !((max - min).is_finite() && (max + min).is_finite()) {
        return Err(CliError::AreaTooWide { axis, min, max });
    }
    Ok((min, max))
}

fn finite(field: &'static str, value: f64) -> Result<f64, CliError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CliError::InvalidNumber {
            field,
            value,
            expected: "a finite coordinate",
        })
    }
}

/// Draw a request from `config`.
///
/// The start point is the centre of the area with id [`START_ID`]; the points
/// to visit carry ids `1..=count` in generation order.
pub(crate) fn generate_request(config: &GenerateConfig) -> SolveRequest {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let min = config.area.min();
    let max = config.area.max();
    let points = (1_u64..)
        .take(config.count)
        .map(|id| {
            let x = rng.gen_range(min.x..max.x);
            let y = rng.gen_range(min.y..max.y);
            Point::new(id, x, y)
        })
        .collect();
    SolveRequest {
        start: Point::at(START_ID, config.area.center()),
        points,
    }
}

pub(super) fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_generate_with(args, &mut stdout)
}

pub(super) fn run_generate_with(args: GenerateArgs, stdout: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let request = generate_request(&config);
    match &config.output {
        Some(path) => {
            let mut file = create_utf8_file(path).map_err(|source| CliError::CreateOutput {
                path: path.clone(),
                source,
            })?;
            write_json(&mut file, &request)?;
            log::info!("wrote {} points to {path}", request.points.len());
            Ok(())
        }
        None => write_json(stdout, &request),
    }
}
