//! Log loading: parse delimited files and append their rows to the store.

pub mod record;

use std::path::{Path, PathBuf};

use log::{info, warn};
use walkdir::WalkDir;

use crate::db::{log_repo, Database};
use crate::error::LoadError;
use record::{parse_record, ColumnMap};

pub use record::normalize_timestamp;

/// Outcome of loading one file.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSummary {
    pub inserted: usize,
    pub skipped: usize,
}

/// Finds `.csv` log files at the top level of the input folder, in a
/// stable order.
pub fn find_log_files(input_dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(input_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| !e.path().is_dir())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("csv"))
                .unwrap_or(false)
        })
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

/// Parses one log file and appends its valid rows to `printer_logs` in a
/// single committed batch.
///
/// A malformed row is logged with its content and skipped; the rest of the
/// file keeps loading. The file itself is left in place; the caller decides
/// when to relocate it.
pub fn load_file(db: &Database, path: &Path) -> Result<FileSummary, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| LoadError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    // Exported logs often carry a UTF-8 byte-order mark.
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| LoadError::ParseCsv {
            path: path.to_path_buf(),
            source: e,
        })?
        .clone();
    let columns = ColumnMap::from_headers(&headers);

    let mut records = Vec::new();
    let mut skipped = 0;

    for result in reader.records() {
        match result {
            Ok(row) => match parse_record(&columns, &row) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!("Skipping row {:?}: {}", row, e);
                    skipped += 1;
                }
            },
            Err(e) => {
                warn!("Skipping malformed row in {}: {}", path.display(), e);
                skipped += 1;
            }
        }
    }

    let inserted = log_repo::insert_batch(db, &records)?;
    info!(
        "Inserted {} rows from {} ({} skipped)",
        inserted,
        path.display(),
        skipped
    );

    Ok(FileSummary { inserted, skipped })
}
