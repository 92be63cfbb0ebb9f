//! Core data models for Stacklint
//!
//! These models are used throughout the codebase for representing
//! findings, severity/category tallies, and scan reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Generate a deterministic finding ID based on content hash.
///
/// This ensures findings have stable IDs across runs, enabling:
/// - Re-scan idempotency (identical graph => identical findings)
/// - Tracking findings over time (fixed vs new vs recurring)
/// - Suppression by ID in config files
///
/// The ID is a 16-character hex string derived from hashing:
/// - rule ID (which rule found it)
/// - affected node ID (where it was found)
/// - title (what the issue is)
pub fn deterministic_finding_id(rule_id: &str, node_id: &str, title: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(rule_id.as_bytes());
    hasher.update(b"\n");
    hasher.update(node_id.as_bytes());
    hasher.update(b"\n");
    hasher.update(title.as_bytes());
    let digest = hasher.finalize();
    let mut id = String::with_capacity(16);
    for byte in digest.iter().take(8) {
        id.push_str(&format!("{:02x}", byte));
    }
    id
}

/// Severity levels for findings
///
/// Ordered so `Critical` compares greatest; report sorting relies on this.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Penalty this severity contributes toward the overall score.
    pub fn weight(&self) -> u32 {
        match self {
            Severity::Critical => 25,
            Severity::High => 15,
            Severity::Medium => 8,
            Severity::Low => 3,
            Severity::Info => 0,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            _ => Err(format!(
                "unknown severity '{}' (expected info, low, medium, high, critical)",
                s
            )),
        }
    }
}

/// Categories of security findings
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Network,
    Encryption,
    Access,
    Logging,
    Resilience,
}

impl Category {
    /// All known categories, in report order.
    pub const ALL: [Category; 5] = [
        Category::Network,
        Category::Encryption,
        Category::Access,
        Category::Logging,
        Category::Resilience,
    ];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Network => write!(f, "network"),
            Category::Encryption => write!(f, "encryption"),
            Category::Access => write!(f, "access"),
            Category::Logging => write!(f, "logging"),
            Category::Resilience => write!(f, "resilience"),
        }
    }
}

/// One detected misconfiguration instance
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Finding {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub rule_id: String,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub recommendation: String,
    /// IDs of the graph nodes this finding is about; the presentation layer
    /// uses these to highlight the corresponding visual elements.
    #[serde(default)]
    pub affected_node_ids: Vec<String>,
    #[serde(default)]
    pub affected_labels: Vec<String>,
    #[serde(default)]
    pub compliance: Vec<String>,
    #[serde(default)]
    pub autofix: bool,
}

/// Findings tally by severity
///
/// Explicit fields so every severity is always present in serialized
/// output, defaulting to 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeveritySummary {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub info: usize,
    pub total: usize,
}

impl SeveritySummary {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut summary = Self::default();
        for f in findings {
            match f.severity {
                Severity::Critical => summary.critical += 1,
                Severity::High => summary.high += 1,
                Severity::Medium => summary.medium += 1,
                Severity::Low => summary.low += 1,
                Severity::Info => summary.info += 1,
            }
            summary.total += 1;
        }
        summary
    }
}

/// Findings tally by category, all known categories always present
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub network: usize,
    pub encryption: usize,
    pub access: usize,
    pub logging: usize,
    pub resilience: usize,
}

impl CategorySummary {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut summary = Self::default();
        for f in findings {
            match f.category {
                Category::Network => summary.network += 1,
                Category::Encryption => summary.encryption += 1,
                Category::Access => summary.access += 1,
                Category::Logging => summary.logging += 1,
                Category::Resilience => summary.resilience += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.network + self.encryption + self.access + self.logging + self.resilience
    }
}

/// Overall security posture report for one graph snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub score: u32,
    pub grade: String,
    pub findings: Vec<Finding>,
    pub by_severity: SeveritySummary,
    pub by_category: CategorySummary,
    pub total_resources: usize,
    pub scanned_at: DateTime<Utc>,
}

impl ScanResult {
    /// Calculate grade from score. Thresholds are evaluated in descending
    /// order, so exactly one grade applies.
    pub fn grade_from_score(score: u32) -> String {
        match score {
            s if s >= 90 => "A".to_string(),
            s if s >= 75 => "B".to_string(),
            s if s >= 60 => "C".to_string(),
            s if s >= 40 => "D".to_string(),
            _ => "F".to_string(),
        }
    }
}
