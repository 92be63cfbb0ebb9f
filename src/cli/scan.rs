//! `stacklint scan` handler

use crate::config::ProjectConfig;
use crate::graph::Graph;
use crate::reporters::{self, OutputFormat};
use crate::rules::default_rules;
use crate::scan::{RuleOutcome, ScanDiagnostics, ScannerBuilder};
use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tracing::info;

pub fn run(
    graph_path: &Path,
    format: Option<&str>,
    config_path: Option<&Path>,
    fail_below: Option<u32>,
    detailed: bool,
) -> Result<()> {
    let graph = Graph::from_path(graph_path)
        .with_context(|| format!("failed to load graph snapshot {}", graph_path.display()))?;

    let config = match config_path {
        Some(path) => ProjectConfig::load(path),
        None => graph_path
            .parent()
            .map(ProjectConfig::discover)
            .unwrap_or_default(),
    };

    let format: OutputFormat = format
        .or(config.output.format.as_deref())
        .unwrap_or("text")
        .parse()?;

    let rules: Vec<_> = default_rules()
        .into_iter()
        .filter(|rule| config.rule_enabled(rule.metadata().id))
        .collect();
    info!("Scanning {} with {} rules", graph_path.display(), rules.len());

    let mut builder = ScannerBuilder::new().rules(rules);
    for (rule_id, severity) in config.severity_overrides() {
        builder = builder.severity_override(rule_id, severity);
    }
    if let Some(max) = config.scan.max_findings {
        builder = builder.max_findings(max);
    }

    // Progress bar only for interactive text output; machine formats
    // must stay clean on stdout/stderr
    let bar = if format == OutputFormat::Text {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::with_template("  {bar:30} {pos}/{len} {msg}")
                .expect("valid progress template"),
        );
        let callback_bar = bar.clone();
        builder = builder.on_progress(Box::new(move |rule_id, done, total| {
            callback_bar.set_length(total as u64);
            callback_bar.set_position(done as u64);
            callback_bar.set_message(rule_id.to_string());
        }));
        Some(bar)
    } else {
        None
    };

    let scanner = builder.build();
    let (result, outcomes, diagnostics) = scanner.run_detailed(&graph)?;
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    print!("{}", reporters::render(&result, format)?);
    if detailed && format == OutputFormat::Text {
        print_diagnostics(&outcomes, &diagnostics);
    }

    let threshold = fail_below.or(config.scan.fail_below);
    if let Some(threshold) = threshold {
        if result.score < threshold {
            eprintln!(
                "{}",
                style(format!(
                    "score {} is below the required threshold {}",
                    result.score, threshold
                ))
                .red()
            );
            std::process::exit(1);
        }
    }

    info!(
        "Report: score {} grade {} findings {}",
        result.score, result.grade, result.by_severity.total
    );
    Ok(())
}

fn print_diagnostics(outcomes: &[RuleOutcome], diagnostics: &ScanDiagnostics) {
    println!(
        "  {} {}/{} rules succeeded in {}ms",
        style("rules:").dim(),
        diagnostics.rules_succeeded,
        diagnostics.rules_run,
        diagnostics.total_duration_ms
    );
    for outcome in outcomes {
        match &outcome.error {
            None => println!(
                "    {} {} ({} findings, {}ms)",
                style("✓").green(),
                outcome.rule_id,
                outcome.findings.len(),
                outcome.duration_ms
            ),
            Some(error) => println!(
                "    {} {} ({})",
                style("✗").red(),
                outcome.rule_id,
                error
            ),
        }
    }
}
