//! Scan orchestration
//!
//! The Scanner runs every registered rule against a freshly built
//! security context, aggregates findings, computes the score and grade,
//! and returns the sorted report:
//!
//! 1. Validate the snapshot and build the context
//! 2. Run rules sequentially in registry order, isolating failures
//! 3. Sum severity penalties, clamp the score, derive the grade
//! 4. Tally severity/category summaries
//! 5. Stable-sort findings by severity rank and return the result
//!
//! The engine is synchronous and single-threaded: rule evaluation does
//! no I/O and never suspends. No state is held between invocations, so
//! concurrent scans over independent snapshots need no coordination.

use crate::context::SecurityContext;
use crate::graph::Graph;
use crate::models::{CategorySummary, Finding, ScanResult, Severity, SeveritySummary};
use crate::rules::SecurityRule;
use chrono::Utc;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Maximum findings to keep to prevent memory exhaustion on
/// pathological graphs
const MAX_FINDINGS_LIMIT: usize = 10_000;

/// Progress callback: (rule id, completed, total)
pub type ProgressCallback = Box<dyn Fn(&str, usize, usize) + Send + Sync>;

/// Errors from scanning a structurally invalid snapshot.
///
/// A scan either returns a complete result or one of these; it never
/// returns a partial report.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("duplicate node id '{0}' in graph snapshot")]
    DuplicateNodeId(String),
}

/// Result from running a single rule
#[derive(Debug, Clone)]
pub struct RuleOutcome {
    /// ID of the rule that produced this outcome
    pub rule_id: String,
    /// Findings produced by the rule
    pub findings: Vec<Finding>,
    /// Execution time in milliseconds
    pub duration_ms: u64,
    /// Whether the rule completed successfully
    pub success: bool,
    /// Error message if the rule failed
    pub error: Option<String>,
}

impl RuleOutcome {
    pub fn success(rule_id: String, findings: Vec<Finding>, duration_ms: u64) -> Self {
        Self {
            rule_id,
            findings,
            duration_ms,
            success: true,
            error: None,
        }
    }

    pub fn failure(rule_id: String, error: String, duration_ms: u64) -> Self {
        Self {
            rule_id,
            findings: Vec::new(),
            duration_ms,
            success: false,
            error: Some(error),
        }
    }
}

/// Summary statistics from running all rules
#[derive(Debug, Clone, Default)]
pub struct ScanDiagnostics {
    pub rules_run: usize,
    pub rules_succeeded: usize,
    pub rules_failed: usize,
    pub total_findings: usize,
    pub total_duration_ms: u64,
}

impl ScanDiagnostics {
    pub fn add_outcome(&mut self, outcome: &RuleOutcome) {
        self.rules_run += 1;
        self.total_duration_ms += outcome.duration_ms;
        if outcome.success {
            self.rules_succeeded += 1;
            self.total_findings += outcome.findings.len();
        } else {
            self.rules_failed += 1;
        }
    }
}

/// Orchestrates rule evaluation over one graph snapshot
pub struct Scanner {
    /// Rules in registry order
    rules: Vec<Arc<dyn SecurityRule>>,
    /// Per-rule severity overrides from project config
    severity_overrides: FxHashMap<String, Severity>,
    /// Maximum findings to return
    max_findings: usize,
    /// Progress callback for reporting execution status
    progress_callback: Option<ProgressCallback>,
}

impl Scanner {
    /// Create a scanner over an explicit rule list.
    pub fn new(rules: Vec<Arc<dyn SecurityRule>>) -> Self {
        Self {
            rules,
            severity_overrides: FxHashMap::default(),
            max_findings: MAX_FINDINGS_LIMIT,
            progress_callback: None,
        }
    }

    pub fn with_max_findings(mut self, max: usize) -> Self {
        self.max_findings = max;
        self
    }

    pub fn with_severity_overrides(
        mut self,
        overrides: impl IntoIterator<Item = (String, Severity)>,
    ) -> Self {
        self.severity_overrides.extend(overrides);
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.metadata().id).collect()
    }

    /// Run all rules and return the scored report.
    pub fn run(&self, graph: &Graph) -> Result<ScanResult, ScanError> {
        let (result, _, _) = self.run_detailed(graph)?;
        Ok(result)
    }

    /// Run all rules and additionally return per-rule outcomes and the
    /// diagnostics tally, for detailed reporting and debugging.
    pub fn run_detailed(
        &self,
        graph: &Graph,
    ) -> Result<(ScanResult, Vec<RuleOutcome>, ScanDiagnostics), ScanError> {
        let start = Instant::now();
        Self::validate_snapshot(graph)?;

        info!(
            "Starting scan: {} rules over {} resources",
            self.rules.len(),
            graph.node_count()
        );

        let ctx = SecurityContext::build(graph);

        let mut outcomes = Vec::with_capacity(self.rules.len());
        let mut diagnostics = ScanDiagnostics::default();
        let mut findings: Vec<Finding> = Vec::new();
        let total = self.rules.len();

        for (done, rule) in self.rules.iter().enumerate() {
            let outcome = self.run_single_rule(rule, &ctx);
            if let Some(ref callback) = self.progress_callback {
                callback(rule.metadata().id, done + 1, total);
            }

            diagnostics.add_outcome(&outcome);
            if outcome.success {
                findings.extend(outcome.findings.iter().cloned());
            } else if let Some(err) = &outcome.error {
                warn!("Rule {} failed: {}", outcome.rule_id, err);
            }
            outcomes.push(outcome);
        }

        // Stable sort: equal severities keep (registry order, then the
        // rule's own node iteration order)
        findings.sort_by(|a, b| b.severity.cmp(&a.severity));

        // Cap after sorting so truncation drops the least severe findings
        if findings.len() > self.max_findings {
            warn!(
                "Truncating findings from {} to {} (max limit)",
                findings.len(),
                self.max_findings
            );
            findings.truncate(self.max_findings);
        }

        let penalty: u32 = findings.iter().map(|f| f.severity.weight()).sum();
        let score = 100u32.saturating_sub(penalty);
        let grade = ScanResult::grade_from_score(score);

        let by_severity = SeveritySummary::from_findings(&findings);
        let by_category = CategorySummary::from_findings(&findings);

        diagnostics.total_duration_ms = start.elapsed().as_millis() as u64;
        info!(
            "Scan complete: {} findings from {}/{} rules, score {} ({}) in {}ms",
            findings.len(),
            diagnostics.rules_succeeded,
            diagnostics.rules_run,
            score,
            grade,
            diagnostics.total_duration_ms
        );

        let result = ScanResult {
            score,
            grade,
            findings,
            by_severity,
            by_category,
            total_resources: graph.node_count(),
            scanned_at: Utc::now(),
        };
        Ok((result, outcomes, diagnostics))
    }

    /// Reject snapshots the engine cannot scan coherently. Dangling
    /// edges and unknown types degrade downstream; duplicate ids do not.
    fn validate_snapshot(graph: &Graph) -> Result<(), ScanError> {
        let mut seen = FxHashSet::default();
        for node in &graph.nodes {
            if !seen.insert(node.id.as_str()) {
                return Err(ScanError::DuplicateNodeId(node.id.clone()));
            }
        }
        Ok(())
    }

    /// Run a single rule with fault isolation and timing. A defective
    /// rule (error or panic) contributes zero findings and a diagnostic
    /// rather than aborting the scan.
    fn run_single_rule(&self, rule: &Arc<dyn SecurityRule>, ctx: &SecurityContext) -> RuleOutcome {
        let rule_id = rule.metadata().id.to_string();
        let start = Instant::now();

        debug!("Running rule: {}", rule_id);

        let check_result =
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| rule.check(ctx)));

        match check_result {
            Ok(Ok(mut findings)) => {
                let duration = start.elapsed().as_millis() as u64;
                if let Some(severity) = self.severity_overrides.get(&rule_id) {
                    for finding in &mut findings {
                        finding.severity = *severity;
                    }
                }
                debug!(
                    "Rule {} found {} findings in {}ms",
                    rule_id,
                    findings.len(),
                    duration
                );
                RuleOutcome::success(rule_id, findings, duration)
            }
            Ok(Err(e)) => {
                let duration = start.elapsed().as_millis() as u64;
                debug!("Rule {} failed: {}", rule_id, e);
                RuleOutcome::failure(rule_id, e.to_string(), duration)
            }
            Err(panic_info) => {
                let duration = start.elapsed().as_millis() as u64;
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                error!("Rule {} panicked: {}", rule_id, panic_msg);
                RuleOutcome::failure(rule_id, format!("Panic: {}", panic_msg), duration)
            }
        }
    }
}

/// Builder for Scanner with fluent API
pub struct ScannerBuilder {
    rules: Vec<Arc<dyn SecurityRule>>,
    severity_overrides: FxHashMap<String, Severity>,
    max_findings: usize,
    progress_callback: Option<ProgressCallback>,
}

impl ScannerBuilder {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            severity_overrides: FxHashMap::default(),
            max_findings: MAX_FINDINGS_LIMIT,
            progress_callback: None,
        }
    }

    pub fn rule(mut self, rule: Arc<dyn SecurityRule>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(mut self, rules: impl IntoIterator<Item = Arc<dyn SecurityRule>>) -> Self {
        self.rules.extend(rules);
        self
    }

    pub fn severity_override(mut self, rule_id: impl Into<String>, severity: Severity) -> Self {
        self.severity_overrides.insert(rule_id.into(), severity);
        self
    }

    pub fn max_findings(mut self, max: usize) -> Self {
        self.max_findings = max;
        self
    }

    pub fn on_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn build(self) -> Scanner {
        let mut scanner = Scanner::new(self.rules).with_max_findings(self.max_findings);
        scanner.severity_overrides = self.severity_overrides;
        if let Some(callback) = self.progress_callback {
            scanner = scanner.with_progress_callback(callback);
        }
        scanner
    }
}

impl Default for ScannerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::rules::RuleMetadata;
    use anyhow::anyhow;

    // Mock rule emitting a fixed number of findings
    struct MockRule {
        metadata: RuleMetadata,
        findings_count: usize,
    }

    impl MockRule {
        fn new(id: &'static str, severity: Severity, findings_count: usize) -> Self {
            Self {
                metadata: RuleMetadata {
                    id,
                    severity,
                    category: Category::Network,
                    title: "Mock finding",
                    description: "Mock rule for testing",
                    recommendation: "None",
                    compliance: &[],
                    autofix: false,
                },
                findings_count,
            }
        }
    }

    impl SecurityRule for MockRule {
        fn metadata(&self) -> &RuleMetadata {
            &self.metadata
        }

        fn check(&self, _ctx: &SecurityContext) -> anyhow::Result<Vec<Finding>> {
            Ok((0..self.findings_count)
                .map(|i| Finding {
                    id: format!("{}-{}", self.metadata.id, i),
                    rule_id: self.metadata.id.to_string(),
                    severity: self.metadata.severity,
                    category: self.metadata.category,
                    title: format!("Finding {}", i),
                    ..Default::default()
                })
                .collect())
        }
    }

    struct FailingRule(RuleMetadata);

    impl FailingRule {
        fn new() -> Self {
            Self(RuleMetadata {
                id: "failing-rule",
                severity: Severity::High,
                category: Category::Network,
                title: "Never emitted",
                description: "Always fails",
                recommendation: "None",
                compliance: &[],
                autofix: false,
            })
        }
    }

    impl SecurityRule for FailingRule {
        fn metadata(&self) -> &RuleMetadata {
            &self.0
        }

        fn check(&self, _ctx: &SecurityContext) -> anyhow::Result<Vec<Finding>> {
            Err(anyhow!("query error"))
        }
    }

    struct PanickingRule(RuleMetadata);

    impl PanickingRule {
        fn new() -> Self {
            Self(RuleMetadata {
                id: "panicking-rule",
                severity: Severity::High,
                category: Category::Network,
                title: "Never emitted",
                description: "Always panics",
                recommendation: "None",
                compliance: &[],
                autofix: false,
            })
        }
    }

    impl SecurityRule for PanickingRule {
        fn metadata(&self) -> &RuleMetadata {
            &self.0
        }

        fn check(&self, _ctx: &SecurityContext) -> anyhow::Result<Vec<Finding>> {
            panic!("rule blew up");
        }
    }

    #[test]
    fn test_empty_graph_scores_perfect() {
        let scanner = Scanner::new(vec![Arc::new(MockRule::new("m1", Severity::High, 0))]);
        let result = scanner.run(&Graph::default()).expect("scan");
        assert_eq!(result.score, 100);
        assert_eq!(result.grade, "A");
        assert!(result.findings.is_empty());
        assert_eq!(result.total_resources, 0);
    }

    #[test]
    fn test_penalty_scoring_scenario() {
        // 1 critical + 2 medium => penalty 41 => score 59 => grade D
        let scanner = Scanner::new(vec![
            Arc::new(MockRule::new("crit", Severity::Critical, 1)),
            Arc::new(MockRule::new("med", Severity::Medium, 2)),
        ]);
        let result = scanner.run(&Graph::default()).expect("scan");
        assert_eq!(result.score, 59);
        assert_eq!(result.grade, "D");
        assert_eq!(result.by_severity.critical, 1);
        assert_eq!(result.by_severity.medium, 2);
        assert_eq!(result.by_severity.total, 3);
    }

    #[test]
    fn test_score_clamped_at_zero() {
        let scanner = Scanner::new(vec![Arc::new(MockRule::new("crit", Severity::Critical, 9))]);
        let result = scanner.run(&Graph::default()).expect("scan");
        assert_eq!(result.score, 0);
        assert_eq!(result.grade, "F");
    }

    #[test]
    fn test_findings_sorted_by_severity_rank() {
        let scanner = Scanner::new(vec![
            Arc::new(MockRule::new("low", Severity::Low, 2)),
            Arc::new(MockRule::new("crit", Severity::Critical, 1)),
            Arc::new(MockRule::new("med", Severity::Medium, 1)),
        ]);
        let result = scanner.run(&Graph::default()).expect("scan");
        let severities: Vec<Severity> = result.findings.iter().map(|f| f.severity).collect();
        assert_eq!(
            severities,
            vec![
                Severity::Critical,
                Severity::Medium,
                Severity::Low,
                Severity::Low
            ]
        );
        // Stable: equal-severity findings keep within-rule emission order
        let low_ids: Vec<&str> = result
            .findings
            .iter()
            .filter(|f| f.severity == Severity::Low)
            .map(|f| f.id.as_str())
            .collect();
        assert_eq!(low_ids, vec!["low-0", "low-1"]);
    }

    #[test]
    fn test_failing_rule_is_isolated() {
        let scanner = Scanner::new(vec![
            Arc::new(FailingRule::new()),
            Arc::new(MockRule::new("m1", Severity::Low, 1)),
        ]);
        let (result, outcomes, diagnostics) =
            scanner.run_detailed(&Graph::default()).expect("scan");
        assert_eq!(result.findings.len(), 1);
        assert_eq!(diagnostics.rules_failed, 1);
        assert_eq!(diagnostics.rules_succeeded, 1);
        let failed = outcomes.iter().find(|o| !o.success).expect("failure");
        assert_eq!(failed.rule_id, "failing-rule");
        assert!(failed.error.as_deref().unwrap_or("").contains("query error"));
    }

    #[test]
    fn test_panicking_rule_is_isolated() {
        let scanner = Scanner::new(vec![
            Arc::new(PanickingRule::new()),
            Arc::new(MockRule::new("m1", Severity::Low, 1)),
        ]);
        let (result, outcomes, _) = scanner.run_detailed(&Graph::default()).expect("scan");
        assert_eq!(result.findings.len(), 1);
        let failed = outcomes.iter().find(|o| !o.success).expect("failure");
        assert!(failed.error.as_deref().unwrap_or("").contains("Panic"));
    }

    #[test]
    fn test_severity_override_changes_penalty() {
        let scanner = ScannerBuilder::new()
            .rule(Arc::new(MockRule::new("m1", Severity::Critical, 1)))
            .severity_override("m1", Severity::Low)
            .build();
        let result = scanner.run(&Graph::default()).expect("scan");
        assert_eq!(result.findings[0].severity, Severity::Low);
        assert_eq!(result.score, 97);
    }

    #[test]
    fn test_findings_cap() {
        let scanner = Scanner::new(vec![Arc::new(MockRule::new("m1", Severity::Info, 50))])
            .with_max_findings(10);
        let result = scanner.run(&Graph::default()).expect("scan");
        assert_eq!(result.findings.len(), 10);
    }

    #[test]
    fn test_duplicate_node_id_rejected() {
        use crate::graph::Node;
        let graph = Graph {
            nodes: vec![
                Node {
                    id: "n1".to_string(),
                    resource_type: "vpc".to_string(),
                    label: String::new(),
                    attributes: Default::default(),
                },
                Node {
                    id: "n1".to_string(),
                    resource_type: "bucket".to_string(),
                    label: String::new(),
                    attributes: Default::default(),
                },
            ],
            edges: vec![],
        };
        let scanner = Scanner::new(vec![]);
        assert!(matches!(
            scanner.run(&graph),
            Err(ScanError::DuplicateNodeId(ref id)) if id == "n1"
        ));
    }

    #[test]
    fn test_builder() {
        let scanner = ScannerBuilder::new()
            .rule(Arc::new(MockRule::new("m1", Severity::Low, 1)))
            .max_findings(100)
            .build();
        assert_eq!(scanner.rule_count(), 1);
        assert_eq!(scanner.max_findings, 100);
        assert_eq!(scanner.rule_ids(), vec!["m1"]);
    }
}
