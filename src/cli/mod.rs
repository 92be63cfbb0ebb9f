//! CLI command definitions and handlers

mod placement;
mod rules;
mod scan;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parse and validate a score threshold (0-100)
fn parse_score(s: &str) -> Result<u32, String> {
    let n: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid score", s))?;
    if n > 100 {
        Err("score threshold cannot exceed 100".to_string())
    } else {
        Ok(n)
    }
}

/// Stacklint - Security scanning for infrastructure design graphs
#[derive(Parser, Debug)]
#[command(name = "stacklint")]
#[command(
    version,
    about = "Scan cloud infrastructure design graphs for misconfigurations and score the result",
    long_about = "Stacklint reads a design-graph snapshot exported by the editor, runs its \
security rule set against it, and produces a scored, graded posture report.\n\n\
Containment queries used by the editor during drag/drop are available via the \
placement subcommand.",
    after_help = "\
Examples:
  stacklint scan design.json                  Scan a snapshot, terminal report
  stacklint scan design.json --format json    JSON output for scripting
  stacklint scan design.json --fail-below 75  CI gate on the score
  stacklint rules                             List the registered rules
  stacklint placement instance                Where can an instance live?
  stacklint placement instance vpc            Is instance-in-vpc legal?"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a graph snapshot and report the security posture
    Scan {
        /// Path to the graph snapshot JSON
        graph: PathBuf,
        /// Output format: text, json, markdown
        #[arg(short, long)]
        format: Option<String>,
        /// Path to stacklint.toml (defaults to the snapshot's directory)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Exit non-zero when the score falls below this threshold
        #[arg(long, value_parser = parse_score)]
        fail_below: Option<u32>,
        /// Also print per-rule outcomes and diagnostics
        #[arg(long)]
        detailed: bool,
    },
    /// List registered security rules
    Rules {
        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Query containment: valid parents for a type, or placement legality
    Placement {
        /// Child resource type, e.g. "instance"
        child_type: String,
        /// Optional parent resource type to test, e.g. "vpc"
        parent_type: Option<String>,
    },
}

/// Dispatch a parsed CLI invocation.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Scan {
            graph,
            format,
            config,
            fail_below,
            detailed,
        } => scan::run(&graph, format.as_deref(), config.as_deref(), fail_below, detailed),
        Commands::Rules { format } => rules::run(&format),
        Commands::Placement {
            child_type,
            parent_type,
        } => placement::run(&child_type, parent_type.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_score_bounds() {
        assert_eq!(parse_score("0"), Ok(0));
        assert_eq!(parse_score("100"), Ok(100));
        assert!(parse_score("101").is_err());
        assert!(parse_score("abc").is_err());
    }

    #[test]
    fn test_cli_parses_scan() {
        let cli = Cli::try_parse_from([
            "stacklint",
            "scan",
            "design.json",
            "--format",
            "json",
            "--fail-below",
            "60",
        ])
        .expect("parse");
        match cli.command {
            Commands::Scan {
                graph,
                format,
                fail_below,
                ..
            } => {
                assert_eq!(graph, PathBuf::from("design.json"));
                assert_eq!(format.as_deref(), Some("json"));
                assert_eq!(fail_below, Some(60));
            }
            _ => panic!("expected scan command"),
        }
    }
}
