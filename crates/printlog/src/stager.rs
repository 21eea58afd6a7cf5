//! Archive staging: expand delivered log bundles into the input folder.

use std::path::{Path, PathBuf};

use log::{debug, info};
use walkdir::WalkDir;

use crate::error::StageError;

/// Scans `source` (top level only) for `.zip` bundles, extracts each into
/// `destination`, and deletes the original bundle. Any open, extract, or
/// remove failure aborts the run.
pub fn stage_archives(source: &Path, destination: &Path) -> Result<usize, StageError> {
    let mut staged = 0;

    for archive_path in find_archives(source) {
        extract_archive(&archive_path, destination)?;
        info!(
            "Unzipped {} into {}",
            archive_path.display(),
            destination.display()
        );

        std::fs::remove_file(&archive_path).map_err(|e| StageError::RemoveArchive {
            path: archive_path.clone(),
            source: e,
        })?;
        debug!("Deleted {} after extraction", archive_path.display());

        staged += 1;
    }

    Ok(staged)
}

fn find_archives(source: &Path) -> Vec<PathBuf> {
    WalkDir::new(source)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| !e.path().is_dir())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("zip"))
                .unwrap_or(false)
        })
        .map(|e| e.into_path())
        .collect()
}

fn extract_archive(archive_path: &Path, destination: &Path) -> Result<(), StageError> {
    let file = std::fs::File::open(archive_path).map_err(|e| StageError::OpenArchive {
        path: archive_path.to_path_buf(),
        source: e,
    })?;

    let mut archive = zip::ZipArchive::new(file).map_err(|e| StageError::ReadArchive {
        path: archive_path.to_path_buf(),
        source: e,
    })?;

    archive
        .extract(destination)
        .map_err(|e| StageError::Extract {
            path: archive_path.to_path_buf(),
            source: e,
        })
}
