//! Stacklint - Security scanning CLI for infrastructure design graphs
//!
//! Reads design-graph snapshots exported by the editing surface and
//! reports containment legality and security posture.

use anyhow::Result;
use clap::Parser;
use stacklint::cli;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    // Parse CLI args and run
    let cli = cli::Cli::parse();
    cli::run(cli)
}
