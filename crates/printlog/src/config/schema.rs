use serde::{Deserialize, Serialize};

/// Top-level run configuration, loaded from a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub version: String,
    pub database: DatabaseConfig,
    /// Archive staging. When absent, the staging phase is skipped.
    #[serde(default)]
    pub archive: Option<ArchiveConfig>,
    pub input_directory: String,
    pub processed_directory: String,
    /// Directory service connection. When absent, enrichment is skipped.
    #[serde(default)]
    pub directory: Option<DirectoryConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file. Created on first run.
    pub path: String,
}

/// Where compressed log bundles arrive and where they are expanded to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    pub source_directory: String,
    pub destination_directory: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Directory server address, with or without an `ldap://` scheme.
    pub address: String,
    pub username: String,
    pub password: String,
    /// NetBIOS domain used to form the `DOMAIN\username` bind principal.
    pub domain: String,
    #[serde(default)]
    pub organizational_units: Vec<OuMapping>,
}

/// Pairs a directory search path with the department label assigned to
/// every account found under it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OuMapping {
    pub path: String,
    pub department: String,
}
