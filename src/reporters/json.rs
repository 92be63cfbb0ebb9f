//! JSON reporter
//!
//! Outputs the full ScanResult as pretty-printed JSON.
//! Useful for machine consumption, piping to jq, or further processing.

use crate::models::ScanResult;
use anyhow::Result;

/// Render report as JSON
pub fn render(result: &ScanResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Render report as compact JSON (single line)
#[allow(dead_code)] // Public API helper
pub fn render_compact(result: &ScanResult) -> Result<String> {
    Ok(serde_json::to_string(result)?)
}
