use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrintlogError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Staging error: {0}")]
    Stage(#[from] StageError),

    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Database error: {0}")]
    Database(#[from] crate::db::DatabaseError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },

    #[error("Duplicate organizational unit path '{path}'")]
    DuplicateUnit { path: String },
}

#[derive(Error, Debug)]
pub enum StageError {
    #[error("Failed to open archive '{path}': {source}")]
    OpenArchive {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read archive '{path}': {source}")]
    ReadArchive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Failed to extract archive '{path}': {source}")]
    Extract {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Failed to remove archive '{path}': {source}")]
    RemoveArchive {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read log file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse log file '{path}': {source}")]
    ParseCsv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] crate::db::DatabaseError),
}

/// Failure affecting a single log row. Rows with these errors are
/// skipped; the rest of the file keeps loading.
#[derive(Error, Debug)]
pub enum RowError {
    #[error("Missing or empty field '{field}'")]
    MissingField { field: &'static str },

    #[error("Invalid page count '{value}'")]
    BadPageCount { value: String },

    #[error("Unparsable timestamp '{value}'")]
    BadTimestamp { value: String },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to create directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to move file from '{from}' to '{to}': {source}")]
    MoveFile {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File already exists: {0}")]
    FileExists(PathBuf),
}

pub type Result<T> = std::result::Result<T, PrintlogError>;
