//! Plaintext Listener Rule

use crate::context::SecurityContext;
use crate::graph::kind;
use crate::models::{Category, Finding, Severity};
use crate::rules::{RuleMetadata, SecurityRule};
use anyhow::Result;

static METADATA: RuleMetadata = RuleMetadata {
    id: "lb-plaintext-listener",
    severity: Severity::Medium,
    category: Category::Encryption,
    title: "Load balancer accepts plaintext traffic",
    description: "The load balancer listens on an unencrypted protocol, so \
                  client traffic crosses the network in the clear.",
    recommendation: "Terminate TLS at the load balancer (HTTPS listener) and \
                     redirect plaintext requests.",
    compliance: &["CIS 4.4", "PCI DSS 4.1"],
    autofix: true,
};

/// Protocols that carry traffic in the clear.
const PLAINTEXT_PROTOCOLS: &[&str] = &["http", "tcp"];

pub struct PlaintextListenerRule;

impl SecurityRule for PlaintextListenerRule {
    fn metadata(&self) -> &RuleMetadata {
        &METADATA
    }

    fn check(&self, ctx: &SecurityContext) -> Result<Vec<Finding>> {
        let mut findings = vec![];
        for balancer in ctx.nodes_of_type(kind::LOAD_BALANCER) {
            let Some(protocol) = balancer.attributes.listener_protocol.as_deref() else {
                // No listener configured yet; nothing to judge
                continue;
            };
            if PLAINTEXT_PROTOCOLS
                .iter()
                .any(|p| protocol.eq_ignore_ascii_case(p))
            {
                let mut finding = METADATA.finding_for(balancer);
                finding.description = format!(
                    "Load balancer '{}' listens on {}, so client traffic \
                     crosses the network in the clear.",
                    balancer.display_name(),
                    protocol.to_lowercase()
                );
                findings.push(finding);
            }
        }
        Ok(findings)
    }
}
