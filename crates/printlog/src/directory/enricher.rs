//! Department enrichment: map directory accounts to department labels and
//! apply them to stored records.

use log::{info, warn};

use crate::config::OuMapping;
use crate::db::{log_repo, Database};

use super::DirectorySource;

/// One (account, department) pair collected from the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentAssignment {
    pub account: String,
    pub department: String,
}

/// Outcome of applying assignments to the store.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnrichSummary {
    pub assignments: usize,
    pub rows_updated: u64,
    pub failed_updates: usize,
}

/// Walks the configured organizational units in order and collects the
/// accounts found under each, labeled with that unit's department.
///
/// A failed search logs a warning and skips that unit; the remaining units
/// are still processed. An account appearing under more than one unit yields
/// one assignment per unit, in unit order.
pub fn collect_assignments(
    source: &mut dyn DirectorySource,
    units: &[OuMapping],
) -> Vec<DepartmentAssignment> {
    let mut assignments = Vec::new();

    for unit in units {
        match source.search_accounts(&unit.path) {
            Ok(accounts) => {
                for account in accounts {
                    assignments.push(DepartmentAssignment {
                        account,
                        department: unit.department.clone(),
                    });
                }
            }
            Err(e) => {
                warn!("Search failed for unit '{}': {}", unit.path, e);
            }
        }
    }

    assignments
}

/// Applies each assignment as an UPDATE against `printer_logs`, matching the
/// stored user field exactly. Processed in order, so when the same account
/// carries two departments the last update wins. A failed update is logged
/// and skipped; there is no rollback or retry.
pub fn apply_assignments(db: &Database, assignments: &[DepartmentAssignment]) -> EnrichSummary {
    let mut summary = EnrichSummary {
        assignments: assignments.len(),
        ..Default::default()
    };

    for assignment in assignments {
        match log_repo::update_department(db, &assignment.account, &assignment.department) {
            Ok(changed) => summary.rows_updated += changed as u64,
            Err(e) => {
                warn!(
                    "Failed to update department for {}: {}",
                    assignment.account, e
                );
                summary.failed_updates += 1;
            }
        }
    }

    info!(
        "Applied {} department assignments ({} rows updated, {} failed)",
        summary.assignments, summary.rows_updated, summary.failed_updates
    );

    summary
}
