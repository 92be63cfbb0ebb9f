//! Database Encryption Rule

use crate::context::SecurityContext;
use crate::graph::kind;
use crate::models::{Category, Finding, Severity};
use crate::rules::{RuleMetadata, SecurityRule};
use anyhow::Result;

static METADATA: RuleMetadata = RuleMetadata {
    id: "database-encryption",
    severity: Severity::High,
    category: Category::Encryption,
    title: "Database without encryption at rest",
    description: "The database instance stores data unencrypted. Snapshots \
                  and backups inherit the same exposure.",
    recommendation: "Enable storage encryption on the database. For most \
                     engines this requires recreating the instance from an \
                     encrypted snapshot.",
    compliance: &["CIS 2.3.1", "PCI DSS 3.4", "HIPAA 164.312"],
    autofix: false,
};

pub struct DatabaseEncryptionRule;

impl SecurityRule for DatabaseEncryptionRule {
    fn metadata(&self) -> &RuleMetadata {
        &METADATA
    }

    fn check(&self, ctx: &SecurityContext) -> Result<Vec<Finding>> {
        let mut findings = vec![];
        for database in ctx.nodes_of_type(kind::DATABASE) {
            let unencrypted = match database.attributes.encryption.as_deref() {
                None => true,
                Some(value) => value.is_empty() || value.eq_ignore_ascii_case("none"),
            };
            if unencrypted {
                let mut finding = METADATA.finding_for(database);
                finding.description = format!(
                    "Database '{}' stores data unencrypted. Snapshots and \
                     backups inherit the same exposure.",
                    database.display_name()
                );
                findings.push(finding);
            }
        }
        Ok(findings)
    }
}
