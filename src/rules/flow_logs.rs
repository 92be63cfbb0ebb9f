//! VPC Flow Logs Rule

use crate::context::SecurityContext;
use crate::graph::kind;
use crate::models::{Category, Finding, Severity};
use crate::rules::{RuleMetadata, SecurityRule};
use anyhow::Result;

static METADATA: RuleMetadata = RuleMetadata {
    id: "vpc-flow-logs",
    severity: Severity::Medium,
    category: Category::Logging,
    title: "VPC without flow logs",
    description: "The VPC has no flow logs enabled. Network-level incidents \
                  inside it cannot be reconstructed after the fact.",
    recommendation: "Enable VPC flow logs and retain them in a log store with \
                     restricted access.",
    compliance: &["CIS 3.9", "SOC2 CC7.2", "NIST 800-53 AU-2"],
    autofix: true,
};

pub struct FlowLogsRule;

impl SecurityRule for FlowLogsRule {
    fn metadata(&self) -> &RuleMetadata {
        &METADATA
    }

    fn check(&self, ctx: &SecurityContext) -> Result<Vec<Finding>> {
        let mut findings = vec![];
        for vpc in ctx.nodes_of_type(kind::VPC) {
            if vpc.attributes.flow_logs != Some(true) {
                let mut finding = METADATA.finding_for(vpc);
                finding.description = format!(
                    "VPC '{}' has no flow logs enabled. Network-level incidents \
                     inside it cannot be reconstructed after the fact.",
                    vpc.display_name()
                );
                findings.push(finding);
            }
        }
        Ok(findings)
    }
}
