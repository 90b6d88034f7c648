//! Command line entry point of the correctness and speedup check.

use std::process::ExitCode;

use clap::Parser;
use quicksort_research_rs::harness::{Harness, HarnessArgs};

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();

    let args = HarnessArgs::parse();
    tracing::debug!(?args, "parsed arguments");

    match Harness::new(args).and_then(|mut harness| harness.run()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "quicksort benchmark failed");
            ExitCode::FAILURE
        }
    }
}
