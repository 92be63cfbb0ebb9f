//! Bucket Access Logging Rule

use crate::context::SecurityContext;
use crate::graph::kind;
use crate::models::{Category, Finding, Severity};
use crate::rules::{RuleMetadata, SecurityRule};
use anyhow::Result;

static METADATA: RuleMetadata = RuleMetadata {
    id: "bucket-access-logging",
    severity: Severity::Low,
    category: Category::Logging,
    title: "Storage bucket without access logging",
    description: "The bucket does not record access logs, leaving no audit \
                  trail of who read or wrote its objects.",
    recommendation: "Enable server access logging to a separate log bucket.",
    compliance: &["CIS 3.6", "SOC2 CC7.2"],
    autofix: true,
};

pub struct BucketLoggingRule;

impl SecurityRule for BucketLoggingRule {
    fn metadata(&self) -> &RuleMetadata {
        &METADATA
    }

    fn check(&self, ctx: &SecurityContext) -> Result<Vec<Finding>> {
        let mut findings = vec![];
        for bucket in ctx.nodes_of_type(kind::BUCKET) {
            if bucket.attributes.access_logging != Some(true) {
                let mut finding = METADATA.finding_for(bucket);
                finding.description = format!(
                    "Bucket '{}' does not record access logs, leaving no audit \
                     trail of who read or wrote its objects.",
                    bucket.display_name()
                );
                findings.push(finding);
            }
        }
        Ok(findings)
    }
}
