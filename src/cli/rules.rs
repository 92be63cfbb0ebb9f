//! `stacklint rules` handler

use crate::rules::default_rules;
use anyhow::{bail, Result};
use console::style;

pub fn run(format: &str) -> Result<()> {
    let rules = default_rules();
    match format {
        "text" => {
            println!("{} registered rules:\n", rules.len());
            for rule in &rules {
                let m = rule.metadata();
                println!(
                    "  {} [{}/{}] {}",
                    style(m.id).bold(),
                    m.severity,
                    m.category,
                    m.title
                );
                if !m.compliance.is_empty() {
                    println!(
                        "      {} {}",
                        style("compliance:").dim(),
                        m.compliance.join(", ")
                    );
                }
            }
        }
        "json" => {
            let listing: Vec<serde_json::Value> = rules
                .iter()
                .map(|rule| {
                    let m = rule.metadata();
                    serde_json::json!({
                        "id": m.id,
                        "severity": m.severity,
                        "category": m.category,
                        "title": m.title,
                        "description": m.description,
                        "recommendation": m.recommendation,
                        "compliance": m.compliance,
                        "autofix": m.autofix,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
        other => bail!("Unknown format '{}'. Valid formats: text, json", other),
    }
    Ok(())
}
