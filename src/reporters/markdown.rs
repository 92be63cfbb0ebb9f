//! Markdown reporter
//!
//! GitHub-flavored Markdown, suitable for pasting into PR descriptions
//! or design review documents.

use crate::models::ScanResult;

/// Render report as Markdown
pub fn render(result: &ScanResult) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "# Security Posture: {} ({})\n\n",
        result.score, result.grade
    ));
    out.push_str(&format!(
        "{} resources scanned at {}.\n\n",
        result.total_resources,
        result.scanned_at.format("%Y-%m-%d %H:%M UTC")
    ));

    out.push_str("## Summary\n\n");
    out.push_str("| Severity | Count | | Category | Count |\n");
    out.push_str("|---|---|---|---|---|\n");
    let s = &result.by_severity;
    let c = &result.by_category;
    let rows = [
        ("critical", s.critical, "network", c.network),
        ("high", s.high, "encryption", c.encryption),
        ("medium", s.medium, "access", c.access),
        ("low", s.low, "logging", c.logging),
        ("info", s.info, "resilience", c.resilience),
    ];
    for (severity, sev_count, category, cat_count) in rows {
        out.push_str(&format!(
            "| {} | {} | | {} | {} |\n",
            severity, sev_count, category, cat_count
        ));
    }
    out.push('\n');

    if result.findings.is_empty() {
        out.push_str("No issues found.\n");
        return out;
    }

    out.push_str("## Findings\n\n");
    for finding in &result.findings {
        out.push_str(&format!(
            "### {} `{}` — {}\n\n",
            finding.severity.to_string().to_uppercase(),
            finding.rule_id,
            finding.title
        ));
        out.push_str(&format!("{}\n\n", finding.description));
        out.push_str(&format!("**Fix:** {}\n\n", finding.recommendation));
        if !finding.affected_node_ids.is_empty() {
            out.push_str(&format!(
                "**Affects:** {}\n\n",
                finding.affected_node_ids.join(", ")
            ));
        }
        if !finding.compliance.is_empty() {
            out.push_str(&format!(
                "**Compliance:** {}\n\n",
                finding.compliance.join(", ")
            ));
        }
    }

    out
}
