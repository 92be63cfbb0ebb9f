//! Bucket Encryption Rule

use crate::context::SecurityContext;
use crate::graph::{kind, Node};
use crate::models::{Category, Finding, Severity};
use crate::rules::{RuleMetadata, SecurityRule};
use anyhow::Result;

static METADATA: RuleMetadata = RuleMetadata {
    id: "bucket-encryption",
    severity: Severity::High,
    category: Category::Encryption,
    title: "Storage bucket without encryption at rest",
    description: "The bucket stores objects unencrypted. A leaked disk or \
                  misconfigured replica exposes plaintext data.",
    recommendation: "Enable server-side encryption (AES-256 or a managed key) \
                     on the bucket.",
    compliance: &["CIS 2.1.1", "PCI DSS 3.4", "HIPAA 164.312"],
    autofix: true,
};

pub struct BucketEncryptionRule;

/// Absent, empty and the literal "none" all count as unencrypted.
fn is_unencrypted(node: &Node) -> bool {
    match node.attributes.encryption.as_deref() {
        None => true,
        Some(value) => value.is_empty() || value.eq_ignore_ascii_case("none"),
    }
}

impl SecurityRule for BucketEncryptionRule {
    fn metadata(&self) -> &RuleMetadata {
        &METADATA
    }

    fn check(&self, ctx: &SecurityContext) -> Result<Vec<Finding>> {
        let mut findings = vec![];
        for bucket in ctx.nodes_of_type(kind::BUCKET) {
            if is_unencrypted(bucket) {
                let mut finding = METADATA.finding_for(bucket);
                finding.description = format!(
                    "Bucket '{}' stores objects unencrypted. A leaked disk or \
                     misconfigured replica exposes plaintext data.",
                    bucket.display_name()
                );
                findings.push(finding);
            }
        }
        Ok(findings)
    }
}
