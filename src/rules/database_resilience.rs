//! Database Backup Rule
//!
//! Zero or absent backup retention means a dropped table is gone for
//! good. Treated as a resilience issue, not a security one, but it
//! belongs in the same posture report.

use crate::context::SecurityContext;
use crate::graph::kind;
use crate::models::{Category, Finding, Severity};
use crate::rules::{RuleMetadata, SecurityRule};
use anyhow::Result;

static METADATA: RuleMetadata = RuleMetadata {
    id: "database-backup-retention",
    severity: Severity::Medium,
    category: Category::Resilience,
    title: "Database without automated backups",
    description: "Backup retention is zero or unset, so the database has no \
                  automated recovery point.",
    recommendation: "Set a backup retention window of at least 7 days and \
                     verify restores periodically.",
    compliance: &["CIS 2.3.3", "SOC2 A1.2"],
    autofix: true,
};

pub struct DatabaseBackupRule;

impl SecurityRule for DatabaseBackupRule {
    fn metadata(&self) -> &RuleMetadata {
        &METADATA
    }

    fn check(&self, ctx: &SecurityContext) -> Result<Vec<Finding>> {
        let mut findings = vec![];
        for database in ctx.nodes_of_type(kind::DATABASE) {
            if database.attributes.backup_retention_days.unwrap_or(0) == 0 {
                let mut finding = METADATA.finding_for(database);
                finding.description = format!(
                    "Database '{}' has backup retention zero or unset, so it \
                     has no automated recovery point.",
                    database.display_name()
                );
                findings.push(finding);
            }
        }
        Ok(findings)
    }
}
