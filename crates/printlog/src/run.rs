//! Run orchestration: stage archives, load log files, enrich departments.

use std::path::Path;

use log::{error, info};

use crate::config::{Config, OuMapping};
use crate::db::Database;
use crate::directory::{self, DirectorySource, EnrichSummary, LdapDirectory};
use crate::error::Result;
use crate::{loader, stager, storage};

/// Counters for one complete run, logged by the entry point.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunSummary {
    pub archives_staged: usize,
    pub files_loaded: usize,
    pub rows_inserted: usize,
    pub rows_skipped: usize,
    pub assignments: usize,
    pub rows_updated: u64,
    pub failed_updates: usize,
}

/// Executes one full run.
///
/// Phases are strictly sequential: stage, then load every input file, then
/// enrich. A store-open failure aborts before anything is loaded. A failed
/// directory bind skips enrichment and leaves the loaded rows standing.
pub fn run(config: &Config) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    if let Some(archive) = &config.archive {
        summary.archives_staged = stager::stage_archives(
            Path::new(&archive.source_directory),
            Path::new(&archive.destination_directory),
        )?;
    }

    let db = Database::open(Path::new(&config.database.path))?;

    load_phase(&db, config, &mut summary)?;

    match &config.directory {
        Some(directory_config) => match LdapDirectory::connect(directory_config) {
            Ok(mut ldap) => {
                let enriched = enrich(&db, &mut ldap, &directory_config.organizational_units);
                summary.assignments = enriched.assignments;
                summary.rows_updated = enriched.rows_updated;
                summary.failed_updates = enriched.failed_updates;
                ldap.unbind();
            }
            Err(e) => {
                error!(
                    "Failed to bind to directory service; skipping enrichment: {}",
                    e
                );
            }
        },
        None => info!("No directory service configured; skipping enrichment"),
    }

    Ok(summary)
}

fn load_phase(db: &Database, config: &Config, summary: &mut RunSummary) -> Result<()> {
    let processed_dir = Path::new(&config.processed_directory);

    for path in loader::find_log_files(Path::new(&config.input_directory)) {
        let file_summary = loader::load_file(db, &path)?;
        summary.files_loaded += 1;
        summary.rows_inserted += file_summary.inserted;
        summary.rows_skipped += file_summary.skipped;

        storage::relocate_processed(&path, processed_dir)?;
    }

    Ok(())
}

/// Runs the enrichment phase against any directory source: collect the
/// (account, department) pairs for the configured units, then apply them
/// to the store.
pub fn enrich(
    db: &Database,
    source: &mut dyn DirectorySource,
    units: &[OuMapping],
) -> EnrichSummary {
    let assignments = directory::collect_assignments(source, units);
    directory::apply_assignments(db, &assignments)
}
