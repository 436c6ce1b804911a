//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use sleigh_cli::CliError;

fn main() {
    if let Err(err) = sleigh_cli::run() {
        if let CliError::ArgumentParsing(clap_err) = &err {
            clap_err.exit();
        }
        eprintln!("sleigh: {err}");
        std::process::exit(1);
    }
}
