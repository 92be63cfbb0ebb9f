//! Open Ingress Rule
//!
//! Flags security groups that allow inbound traffic from the whole
//! internet. Severity is specialized per port exposure:
//! - management or database ports open to the world stay critical
//! - other world-open ranges downgrade to high

use crate::context::SecurityContext;
use crate::graph::{kind, IngressRule, Node};
use crate::models::{Category, Finding, Severity};
use crate::rules::{RuleMetadata, SecurityRule};
use anyhow::Result;
use ipnet::IpNet;

static METADATA: RuleMetadata = RuleMetadata {
    id: "sg-open-ingress",
    severity: Severity::Critical,
    category: Category::Network,
    title: "Security group open to the internet",
    description: "An ingress rule allows inbound traffic from any address (/0). \
                  World-open ranges expose attached resources to scanning and \
                  brute-force attempts.",
    recommendation: "Restrict the ingress CIDR to known networks, or front the \
                     resource with a load balancer and keep the group internal.",
    compliance: &["CIS 4.1", "CIS 4.2", "PCI DSS 1.2.1", "NIST 800-53 SC-7"],
    autofix: true,
};

/// Ports whose world-open exposure is treated as remote-management or
/// data-store exposure.
const SENSITIVE_PORTS: &[u16] = &[22, 3389, 1433, 3306, 5432, 6379, 27017];

pub struct OpenIngressRule;

impl OpenIngressRule {
    /// Whether a CIDR covers every address. Unparsable CIDRs are treated
    /// as not world-open; the attribute model, not this rule, owns input
    /// hygiene.
    fn is_world_open(cidr: &str) -> bool {
        cidr.parse::<IpNet>()
            .map(|net| net.prefix_len() == 0)
            .unwrap_or(false)
    }

    fn exposes_sensitive_port(rule: &IngressRule) -> bool {
        SENSITIVE_PORTS.iter().any(|port| rule.covers_port(*port))
    }

    fn describe(rule: &IngressRule) -> String {
        if rule.from_port == rule.to_port {
            format!("{} port {} from {}", rule.protocol, rule.from_port, rule.cidr)
        } else {
            format!(
                "{} ports {}-{} from {}",
                rule.protocol, rule.from_port, rule.to_port, rule.cidr
            )
        }
    }

    fn check_group(&self, group: &Node) -> Option<Finding> {
        let open_rules: Vec<&IngressRule> = group
            .attributes
            .ingress
            .iter()
            .filter(|rule| Self::is_world_open(&rule.cidr))
            .collect();

        if open_rules.is_empty() {
            return None;
        }

        let sensitive = open_rules
            .iter()
            .any(|rule| Self::exposes_sensitive_port(rule));

        let mut finding = METADATA.finding_for(group);
        if !sensitive {
            finding.severity = Severity::High;
        }
        let detail: Vec<String> = open_rules.iter().map(|r| Self::describe(r)).collect();
        finding.description = format!(
            "{} World-open rules on '{}': {}.",
            METADATA.description,
            group.display_name(),
            detail.join("; ")
        );
        Some(finding)
    }
}

impl SecurityRule for OpenIngressRule {
    fn metadata(&self) -> &RuleMetadata {
        &METADATA
    }

    fn check(&self, ctx: &SecurityContext) -> Result<Vec<Finding>> {
        Ok(ctx
            .nodes_of_type(kind::SECURITY_GROUP)
            .iter()
            .filter_map(|group| self.check_group(group))
            .collect())
    }
}
