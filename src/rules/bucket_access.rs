//! Public Bucket Rule

use crate::context::SecurityContext;
use crate::graph::kind;
use crate::models::{Category, Finding, Severity};
use crate::rules::{RuleMetadata, SecurityRule};
use anyhow::Result;

static METADATA: RuleMetadata = RuleMetadata {
    id: "bucket-public-access",
    severity: Severity::Critical,
    category: Category::Access,
    title: "Storage bucket is publicly accessible",
    description: "The bucket allows public access. Anyone on the internet can \
                  list or read its objects.",
    recommendation: "Block public access on the bucket and grant access through \
                     scoped credentials or signed URLs instead.",
    compliance: &["CIS 2.1.5", "PCI DSS 1.3", "SOC2 CC6.1", "HIPAA 164.312"],
    autofix: true,
};

pub struct PublicBucketRule;

impl SecurityRule for PublicBucketRule {
    fn metadata(&self) -> &RuleMetadata {
        &METADATA
    }

    fn check(&self, ctx: &SecurityContext) -> Result<Vec<Finding>> {
        let mut findings = vec![];
        for bucket in ctx.nodes_of_type(kind::BUCKET) {
            if bucket.attributes.public_access == Some(true) {
                let mut finding = METADATA.finding_for(bucket);
                finding.description = format!(
                    "Bucket '{}' allows public access. Anyone on the internet \
                     can list or read its objects.",
                    bucket.display_name()
                );
                findings.push(finding);
            }
        }
        Ok(findings)
    }
}
