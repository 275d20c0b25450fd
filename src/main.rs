//! trackprobe - fetch catalog metadata and audio-descriptor attributes for
//! one music track, by id or by name/artist search, and print the flattened
//! attribute record.

pub mod aggregator;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod resolver;
#[cfg(test)]
pub mod test_utils;

use std::process::ExitCode;

use clap::Parser;
use tokio::runtime::Runtime;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> ExitCode {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive("trackprobe=info".parse().unwrap()))
        .init();

    let rt = match Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error (runtime): {e}");
            return ExitCode::FAILURE;
        }
    };

    match rt.block_on(cli::run(&args)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Name the failure kind; exit non-zero without panicking
            eprintln!("error ({}): {e}", e.kind());
            ExitCode::FAILURE
        }
    }
}
