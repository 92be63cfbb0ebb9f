//! Terminal reporter
//!
//! Colorized report for interactive use: score banner, severity and
//! category tallies, findings grouped by severity with recommendations.

use crate::models::{ScanResult, Severity};
use console::style;

/// Render report for the terminal
pub fn render(result: &ScanResult) -> String {
    let mut out = String::new();

    let grade_styled = match result.grade.as_str() {
        "A" => style(&result.grade).green().bold(),
        "B" => style(&result.grade).green(),
        "C" => style(&result.grade).yellow(),
        "D" => style(&result.grade).red(),
        _ => style(&result.grade).red().bold(),
    };
    out.push_str(&format!(
        "\n  Security score: {} ({})  —  {} resources, {} findings\n",
        style(result.score).bold(),
        grade_styled,
        result.total_resources,
        result.by_severity.total
    ));
    out.push_str(&format!(
        "  Scanned at {}\n\n",
        result.scanned_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    let s = &result.by_severity;
    out.push_str(&format!(
        "  {}: {}   {}: {}   {}: {}   {}: {}   {}: {}\n\n",
        style("critical").red().bold(),
        s.critical,
        style("high").red(),
        s.high,
        style("medium").yellow(),
        s.medium,
        style("low").blue(),
        s.low,
        style("info").dim(),
        s.info
    ));

    if result.findings.is_empty() {
        out.push_str(&format!(
            "  {} No issues found.\n",
            style("✓").green().bold()
        ));
        return out;
    }

    for finding in &result.findings {
        let marker = match finding.severity {
            Severity::Critical => style("CRITICAL").red().bold(),
            Severity::High => style("HIGH    ").red(),
            Severity::Medium => style("MEDIUM  ").yellow(),
            Severity::Low => style("LOW     ").blue(),
            Severity::Info => style("INFO    ").dim(),
        };
        out.push_str(&format!(
            "  {} [{}] {}\n",
            marker,
            finding.rule_id,
            style(&finding.title).bold()
        ));
        out.push_str(&format!("           {}\n", finding.description));
        out.push_str(&format!(
            "           {} {}\n",
            style("fix:").dim(),
            finding.recommendation
        ));
        if !finding.affected_node_ids.is_empty() {
            out.push_str(&format!(
                "           {} {}\n",
                style("affects:").dim(),
                finding.affected_node_ids.join(", ")
            ));
        }
        if !finding.compliance.is_empty() {
            out.push_str(&format!(
                "           {} {}\n",
                style("compliance:").dim(),
                finding.compliance.join(", ")
            ));
        }
        out.push('\n');
    }

    out
}
