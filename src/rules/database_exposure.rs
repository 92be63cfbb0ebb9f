//! Database Exposure Rule
//!
//! A database should only be reachable through application tiers. Two
//! signals mark direct exposure: an internet gateway as a direct
//! neighbor, or the public access flag on the database itself.

use crate::context::SecurityContext;
use crate::graph::kind;
use crate::models::{Category, Finding, Severity};
use crate::rules::{RuleMetadata, SecurityRule};
use anyhow::Result;

static METADATA: RuleMetadata = RuleMetadata {
    id: "database-public-exposure",
    severity: Severity::High,
    category: Category::Network,
    title: "Database reachable from the internet",
    description: "The database is directly reachable from outside the network \
                  boundary instead of being confined to application tiers.",
    recommendation: "Remove the public path: disable public access, detach the \
                     internet gateway route, and reach the database through an \
                     application tier or bastion.",
    compliance: &["CIS 2.3.2", "PCI DSS 1.3.6", "NIST 800-53 SC-7"],
    autofix: true,
};

pub struct DatabaseExposureRule;

impl SecurityRule for DatabaseExposureRule {
    fn metadata(&self) -> &RuleMetadata {
        &METADATA
    }

    fn check(&self, ctx: &SecurityContext) -> Result<Vec<Finding>> {
        let mut findings = vec![];
        for database in ctx.nodes_of_type(kind::DATABASE) {
            let via_gateway = ctx.is_connected_to(&database.id, kind::INTERNET_GATEWAY);
            let flagged_public = database.attributes.public_access == Some(true);
            if !via_gateway && !flagged_public {
                continue;
            }

            let path = match (via_gateway, flagged_public) {
                (true, true) => "an internet gateway edge and the public access flag",
                (true, false) => "an internet gateway edge",
                (false, true) => "the public access flag",
                (false, false) => unreachable!(),
            };
            let mut finding = METADATA.finding_for(database);
            finding.description = format!(
                "Database '{}' is exposed through {}. Databases should only be \
                 reachable from application tiers.",
                database.display_name(),
                path
            );
            findings.push(finding);
        }
        Ok(findings)
    }
}
