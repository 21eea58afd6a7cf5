//! Filesystem helpers for relocating loaded log files.

use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::StorageError;

/// Move a file from `src` to `dst`. Uses `rename` first (fast, atomic on same
/// filesystem). Falls back to copy + delete when rename fails, which handles
/// cross-device moves.
fn move_file(src: &Path, dst: &Path) -> Result<(), StorageError> {
    // Fast path: atomic rename
    if std::fs::rename(src, dst).is_ok() {
        return Ok(());
    }

    // Slow path: copy then remove original
    std::fs::copy(src, dst).map_err(|e| StorageError::MoveFile {
        from: src.to_path_buf(),
        to: dst.to_path_buf(),
        source: e,
    })?;
    std::fs::remove_file(src).map_err(|e| StorageError::MoveFile {
        from: src.to_path_buf(),
        to: dst.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

fn ensure_directory(path: &Path) -> Result<(), StorageError> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| StorageError::CreateDirectory {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    Ok(())
}

/// Moves a loaded log file into the processed folder, suffixing the filename
/// with the current timestamp so repeated deliveries of the same filename do
/// not collide. The processed folder is created on demand.
pub fn relocate_processed(source: &Path, processed_dir: &Path) -> Result<PathBuf, StorageError> {
    ensure_directory(processed_dir)?;

    let original_name = source
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("log");

    let suffix = Local::now().format("%Y%m%d%H%M%S");
    let processed_name = format!("{}_{}", original_name, suffix);
    let processed_path = resolve_conflict(processed_dir, &processed_name)?;

    move_file(source, &processed_path)?;

    log::info!(
        "Moved {} to {}",
        source.display(),
        processed_path.display()
    );

    Ok(processed_path)
}

/// Resolves filename conflicts by appending a counter until an unused
/// name is found.
fn resolve_conflict(directory: &Path, filename: &str) -> Result<PathBuf, StorageError> {
    let path = directory.join(filename);
    if std::fs::symlink_metadata(&path).is_err() {
        return Ok(path);
    }

    for counter in 2..=1000 {
        let candidate = directory.join(format!("{}_{}", filename, counter));
        if std::fs::symlink_metadata(&candidate).is_err() {
            return Ok(candidate);
        }
    }

    Err(StorageError::FileExists(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_relocate_moves_file_with_timestamp_suffix() {
        let temp_dir = TempDir::new().unwrap();
        let input_dir = temp_dir.path().join("input");
        let processed_dir = temp_dir.path().join("processed");
        std::fs::create_dir_all(&input_dir).unwrap();

        let source = input_dir.join("logs.csv");
        std::fs::write(&source, b"Printer,User\n").unwrap();

        let moved = relocate_processed(&source, &processed_dir).unwrap();

        assert!(!source.exists());
        assert!(moved.exists());

        let name = moved.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("logs.csv_"));
        // Suffix is a 14-digit timestamp.
        let suffix = name.strip_prefix("logs.csv_").unwrap();
        assert_eq!(suffix.len(), 14);
        assert!(suffix.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_relocate_creates_processed_directory() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("logs.csv");
        std::fs::write(&source, b"data").unwrap();

        let processed_dir = temp_dir.path().join("deep").join("processed");
        let moved = relocate_processed(&source, &processed_dir).unwrap();

        assert!(processed_dir.exists());
        assert!(moved.starts_with(&processed_dir));
    }

    #[test]
    fn test_relocate_missing_source_error() {
        let temp_dir = TempDir::new().unwrap();
        let processed_dir = temp_dir.path().join("processed");

        let result = relocate_processed(&temp_dir.path().join("absent.csv"), &processed_dir);

        assert!(matches!(result, Err(StorageError::MoveFile { .. })));
    }

    #[test]
    fn test_conflict_resolution_numbering() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("logs.csv_20240301101500"), b"first").unwrap();

        let resolved = resolve_conflict(temp_dir.path(), "logs.csv_20240301101500").unwrap();
        assert!(resolved
            .file_name()
            .unwrap()
            .to_str()
            .unwrap()
            .ends_with("_2"));
    }
}
