use std::process::ExitCode;

use clcompile::{ArgumentError, ConsoleReporter, OpenCl, cli};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // RUST_LOG=clcompile=debug zeigt jeden Provider‑Call
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    /* ---------- 1. Argumente ------------------------------------- */
    let options = match cli::parse(std::env::args_os()) {
        Ok(options) => options,
        // help/version exit 0, everything else non-zero
        Err(ArgumentError::Clap(err)) => err.exit(),
        Err(ArgumentError::NoInputFiles) => {
            if let Err(err) = cli::print_usage() {
                debug!(%err, "usage not printed");
            }
            return ExitCode::FAILURE;
        }
    };

    /* ---------- 2. Build‑Session --------------------------------- */
    let mut reporter = ConsoleReporter;
    match clcompile::run(&OpenCl, &options, &mut reporter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
