//! Unused Security Group Rule

use crate::context::SecurityContext;
use crate::graph::kind;
use crate::models::{Category, Finding, Severity};
use crate::rules::{RuleMetadata, SecurityRule};
use anyhow::Result;

static METADATA: RuleMetadata = RuleMetadata {
    id: "sg-unused",
    severity: Severity::Low,
    category: Category::Network,
    title: "Security group attached to nothing",
    description: "The security group protects no resource. Stale groups \
                  accumulate permissive rules that later get attached by \
                  mistake.",
    recommendation: "Delete the group, or attach it to the resources it was \
                     created for.",
    compliance: &["CIS 4.3"],
    autofix: false,
};

pub struct UnusedSecurityGroupRule;

impl SecurityRule for UnusedSecurityGroupRule {
    fn metadata(&self) -> &RuleMetadata {
        &METADATA
    }

    fn check(&self, ctx: &SecurityContext) -> Result<Vec<Finding>> {
        let mut findings = vec![];
        for group in ctx.nodes_of_type(kind::SECURITY_GROUP) {
            if ctx.connection_count(&group.id) == 0 {
                let mut finding = METADATA.finding_for(group);
                finding.description = format!(
                    "Security group '{}' protects no resource. Stale groups \
                     accumulate permissive rules that later get attached by \
                     mistake.",
                    group.display_name()
                );
                findings.push(finding);
            }
        }
        Ok(findings)
    }
}
