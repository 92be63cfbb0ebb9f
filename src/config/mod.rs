//! Project-level configuration support
//!
//! Loads per-project configuration from a `stacklint.toml` file next to
//! the graph snapshot (or an explicit path).
//!
//! # Configuration Format
//!
//! ```toml
//! # stacklint.toml
//!
//! [rules.bucket-versioning]
//! enabled = false
//!
//! [rules.sg-open-ingress]
//! severity = "high"  # Override default severity
//!
//! [output]
//! format = "text"
//!
//! [scan]
//! fail_below = 60
//! max_findings = 500
//! ```
//!
//! A missing file yields defaults; an unparsable file logs a warning
//! and yields defaults, never an error.

use crate::models::Severity;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

pub const CONFIG_FILE_NAME: &str = "stacklint.toml";

/// Per-rule configuration overrides
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    pub enabled: bool,
    pub severity: Option<Severity>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: None,
        }
    }
}

/// Output defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default report format: "text", "json", or "markdown"
    pub format: Option<String>,
}

/// Scan behavior
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Exit non-zero when the score falls below this threshold
    pub fail_below: Option<u32>,
    /// Cap on findings kept per scan
    pub max_findings: Option<usize>,
}

/// Complete project configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub rules: HashMap<String, RuleConfig>,
    pub output: OutputConfig,
    pub scan: ScanConfig,
}

impl ProjectConfig {
    /// Load configuration from an explicit file path. Missing or broken
    /// files degrade to defaults.
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                debug!("No config at {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match toml::from_str(&content) {
            Ok(config) => {
                debug!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!(
                    "Ignoring unparsable config {}: {}",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Look for `stacklint.toml` in the given directory.
    pub fn discover(dir: &Path) -> Self {
        Self::load(&dir.join(CONFIG_FILE_NAME))
    }

    /// Whether a rule is enabled. Rules absent from the config default
    /// to enabled.
    pub fn rule_enabled(&self, rule_id: &str) -> bool {
        self.rules.get(rule_id).map(|r| r.enabled).unwrap_or(true)
    }

    /// Severity override for a rule, if configured.
    pub fn severity_override(&self, rule_id: &str) -> Option<Severity> {
        self.rules.get(rule_id).and_then(|r| r.severity)
    }

    /// All configured (rule id, severity) override pairs.
    pub fn severity_overrides(&self) -> impl Iterator<Item = (String, Severity)> + '_ {
        self.rules
            .iter()
            .filter_map(|(id, rule)| rule.severity.map(|s| (id.clone(), s)))
    }
}
