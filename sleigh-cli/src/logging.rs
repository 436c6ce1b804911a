//! Stderr logging backend for the `log` facade used by the library crates.

use std::io::Write;

use env_logger::{Builder, Target, WriteStyle};
use log::LevelFilter;

use crate::CliError;

/// Install a plain stderr logger at `level`.
///
/// Stdout is reserved for JSON payloads, so nothing is logged there.
pub(crate) fn init_logging(level: LevelFilter) -> Result<(), CliError> {
    let mut builder = Builder::new();
    builder
        .filter_level(level)
        .write_style(WriteStyle::Never)
        .target(Target::Stderr)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        });
    builder.try_init().map_err(CliError::InitLogging)
}
