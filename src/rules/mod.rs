//! Security rules
//!
//! This module provides the rule framework and the built-in rule set for
//! scanning infrastructure design graphs.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                       Scanner                           │
//! │  - Takes an explicit rule list (no global registry)     │
//! │  - Runs rules sequentially in registry order            │
//! │  - Isolates failures, aggregates findings, scores       │
//! └─────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                   SecurityRule Trait                    │
//! │  - metadata(): immutable identity record                │
//! │  - check(ctx): pure evaluation over one SecurityContext │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Rules are independent and stateless: each inspects the context and
//! returns zero or more findings, never mutating the context or talking
//! to other rules. Adding a rule is purely additive — implement the
//! trait and append it to [`default_rules`].

mod bucket_access;
mod bucket_encryption;
mod bucket_logging;
mod bucket_versioning;
mod database_encryption;
mod database_exposure;
mod database_resilience;
mod flow_logs;
mod instance_protection;
mod open_ingress;
mod plaintext_listener;
mod unused_security_group;
mod user_data_secrets;

pub use bucket_access::PublicBucketRule;
pub use bucket_encryption::BucketEncryptionRule;
pub use bucket_logging::BucketLoggingRule;
pub use bucket_versioning::BucketVersioningRule;
pub use database_encryption::DatabaseEncryptionRule;
pub use database_exposure::DatabaseExposureRule;
pub use database_resilience::DatabaseBackupRule;
pub use flow_logs::FlowLogsRule;
pub use instance_protection::UnprotectedInstanceRule;
pub use open_ingress::OpenIngressRule;
pub use plaintext_listener::PlaintextListenerRule;
pub use unused_security_group::UnusedSecurityGroupRule;
pub use user_data_secrets::UserDataSecretsRule;

use crate::context::SecurityContext;
use crate::graph::Node;
use crate::models::{deterministic_finding_id, Category, Finding, Severity};
use anyhow::Result;
use std::sync::Arc;

/// Immutable identity of one security rule
#[derive(Debug, Clone)]
pub struct RuleMetadata {
    /// Unique identifier, e.g. "bucket-encryption"
    pub id: &'static str,
    pub severity: Severity,
    pub category: Category,
    pub title: &'static str,
    pub description: &'static str,
    pub recommendation: &'static str,
    /// Compliance controls this rule maps to
    pub compliance: &'static [&'static str],
    /// Whether the editing surface can apply an automatic fix
    pub autofix: bool,
}

impl RuleMetadata {
    /// Build a finding against one node, copying this rule's identity.
    /// Rules specialize title/description/severity afterwards where the
    /// context warrants it.
    pub fn finding_for(&self, node: &Node) -> Finding {
        Finding {
            id: deterministic_finding_id(self.id, &node.id, self.title),
            rule_id: self.id.to_string(),
            severity: self.severity,
            category: self.category,
            title: self.title.to_string(),
            description: self.description.to_string(),
            recommendation: self.recommendation.to_string(),
            affected_node_ids: vec![node.id.clone()],
            affected_labels: vec![node.display_name().to_string()],
            compliance: self.compliance.iter().map(|c| c.to_string()).collect(),
            autofix: self.autofix,
        }
    }
}

/// Trait for all security rules
///
/// # Example Implementation
///
/// ```ignore
/// static METADATA: RuleMetadata = RuleMetadata {
///     id: "my-rule",
///     severity: Severity::Medium,
///     category: Category::Network,
///     title: "My misconfiguration",
///     description: "What went wrong.",
///     recommendation: "How to fix it.",
///     compliance: &["CIS 0.0"],
///     autofix: false,
/// };
///
/// pub struct MyRule;
///
/// impl SecurityRule for MyRule {
///     fn metadata(&self) -> &RuleMetadata {
///         &METADATA
///     }
///
///     fn check(&self, ctx: &SecurityContext) -> Result<Vec<Finding>> {
///         // Query the context and return findings
///         Ok(vec![])
///     }
/// }
/// ```
pub trait SecurityRule: Send + Sync {
    /// The rule's immutable identity record
    fn metadata(&self) -> &RuleMetadata;

    /// Run the check and return findings
    ///
    /// Must be pure: no I/O, no mutation, deterministic for a given
    /// context. Finding order should follow the rule's own node
    /// iteration order (the orchestrator's sort is stable).
    fn check(&self, ctx: &SecurityContext) -> Result<Vec<Finding>>;
}

/// The built-in rule set, in registry order.
///
/// An explicit constructed list rather than a module-level singleton, so
/// tests and callers can run arbitrary subsets without shared state.
/// Registry order is the pre-sort tie-break order of the final report.
pub fn default_rules() -> Vec<Arc<dyn SecurityRule>> {
    vec![
        Arc::new(OpenIngressRule),
        Arc::new(UnprotectedInstanceRule),
        Arc::new(PublicBucketRule),
        Arc::new(UserDataSecretsRule),
        Arc::new(BucketEncryptionRule),
        Arc::new(DatabaseEncryptionRule),
        Arc::new(DatabaseExposureRule),
        Arc::new(PlaintextListenerRule),
        Arc::new(FlowLogsRule),
        Arc::new(DatabaseBackupRule),
        Arc::new(BucketLoggingRule),
        Arc::new(UnusedSecurityGroupRule),
        Arc::new(BucketVersioningRule),
    ]
}
