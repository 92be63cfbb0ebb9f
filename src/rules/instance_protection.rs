//! Unprotected Instance Rule

use crate::context::SecurityContext;
use crate::graph::kind;
use crate::models::{Category, Finding, Severity};
use crate::rules::{RuleMetadata, SecurityRule};
use anyhow::Result;

static METADATA: RuleMetadata = RuleMetadata {
    id: "instance-no-security-group",
    severity: Severity::Critical,
    category: Category::Network,
    title: "Instance without a security group",
    description: "A compute instance has no security group attached, so no \
                  network-level access control applies to it.",
    recommendation: "Attach a security group to the instance and allow only \
                     the traffic it actually needs.",
    compliance: &["CIS 4.1", "NIST 800-53 SC-7"],
    autofix: false,
};

pub struct UnprotectedInstanceRule;

impl SecurityRule for UnprotectedInstanceRule {
    fn metadata(&self) -> &RuleMetadata {
        &METADATA
    }

    fn check(&self, ctx: &SecurityContext) -> Result<Vec<Finding>> {
        let mut findings = vec![];
        for instance in ctx.nodes_of_type(kind::INSTANCE) {
            if !ctx.is_connected_to(&instance.id, kind::SECURITY_GROUP) {
                let mut finding = METADATA.finding_for(instance);
                finding.description = format!(
                    "Instance '{}' has no security group attached, so no \
                     network-level access control applies to it.",
                    instance.display_name()
                );
                findings.push(finding);
            }
        }
        Ok(findings)
    }
}
