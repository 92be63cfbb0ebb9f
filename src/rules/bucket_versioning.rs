//! Bucket Versioning Rule

use crate::context::SecurityContext;
use crate::graph::kind;
use crate::models::{Category, Finding, Severity};
use crate::rules::{RuleMetadata, SecurityRule};
use anyhow::Result;

static METADATA: RuleMetadata = RuleMetadata {
    id: "bucket-versioning",
    severity: Severity::Info,
    category: Category::Resilience,
    title: "Storage bucket without object versioning",
    description: "The bucket does not version objects. Overwrites and deletes \
                  are unrecoverable without it.",
    recommendation: "Enable versioning if the bucket holds data worth \
                     recovering; skip it for scratch or cache buckets.",
    compliance: &[],
    autofix: true,
};

pub struct BucketVersioningRule;

impl SecurityRule for BucketVersioningRule {
    fn metadata(&self) -> &RuleMetadata {
        &METADATA
    }

    fn check(&self, ctx: &SecurityContext) -> Result<Vec<Finding>> {
        let mut findings = vec![];
        for bucket in ctx.nodes_of_type(kind::BUCKET) {
            if bucket.attributes.versioning != Some(true) {
                let mut finding = METADATA.finding_for(bucket);
                finding.description = format!(
                    "Bucket '{}' does not version objects. Overwrites and \
                     deletes are unrecoverable without it.",
                    bucket.display_name()
                );
                findings.push(finding);
            }
        }
        Ok(findings)
    }
}
