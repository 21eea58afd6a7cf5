use std::path::Path;

use crate::config::schema::Config;
use crate::error::ConfigError;

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<Config, ConfigError> {
    let config: Config = serde_json::from_str(content)?;

    validate_config(&config)?;

    Ok(config)
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.version != "1.0" {
        return Err(ConfigError::Validation {
            message: format!("Unsupported config version: {}", config.version),
        });
    }

    if config.database.path.is_empty() {
        return Err(ConfigError::Validation {
            message: "database.path must not be empty".to_string(),
        });
    }

    if config.input_directory.is_empty() {
        return Err(ConfigError::Validation {
            message: "input_directory must not be empty".to_string(),
        });
    }

    if config.processed_directory.is_empty() {
        return Err(ConfigError::Validation {
            message: "processed_directory must not be empty".to_string(),
        });
    }

    if let Some(archive) = &config.archive {
        if archive.source_directory.is_empty() || archive.destination_directory.is_empty() {
            return Err(ConfigError::Validation {
                message: "archive.source_directory and archive.destination_directory must not be empty"
                    .to_string(),
            });
        }
    }

    if let Some(directory) = &config.directory {
        if directory.address.is_empty() {
            return Err(ConfigError::Validation {
                message: "directory.address must not be empty".to_string(),
            });
        }

        let mut seen = std::collections::HashSet::new();
        for unit in &directory.organizational_units {
            if unit.path.is_empty() || unit.department.is_empty() {
                return Err(ConfigError::Validation {
                    message: "organizational unit entries need a path and a department"
                        .to_string(),
                });
            }
            if !seen.insert(&unit.path) {
                return Err(ConfigError::DuplicateUnit {
                    path: unit.path.clone(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_valid_config() {
        let config_json = r#"
        {
            "version": "1.0",
            "database": { "path": "/var/lib/printlog/logs.db" },
            "input_directory": "/print-logs",
            "processed_directory": "/print-logs/processed"
        }
        "#;

        let config = load_config_from_str(config_json).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.database.path, "/var/lib/printlog/logs.db");
        assert_eq!(config.input_directory, "/print-logs");
        assert!(config.archive.is_none());
        assert!(config.directory.is_none());
    }

    #[test]
    fn test_load_config_with_directory_section() {
        let config_json = r#"
        {
            "version": "1.0",
            "database": { "path": "logs.db" },
            "input_directory": "/print-logs",
            "processed_directory": "/print-logs/processed",
            "directory": {
                "address": "192.168.22.4",
                "username": "svc-printlog",
                "password": "secret",
                "domain": "CORP",
                "organizational_units": [
                    { "path": "OU=IT,OU=End Users,DC=corp,DC=local", "department": "IT" },
                    { "path": "OU=Finance,OU=End Users,DC=corp,DC=local", "department": "Finance" }
                ]
            }
        }
        "#;

        let config = load_config_from_str(config_json).unwrap();
        let directory = config.directory.unwrap();
        assert_eq!(directory.domain, "CORP");
        assert_eq!(directory.organizational_units.len(), 2);
        assert_eq!(directory.organizational_units[0].department, "IT");
    }

    #[test]
    fn test_load_config_with_archive_section() {
        let config_json = r#"
        {
            "version": "1.0",
            "database": { "path": "logs.db" },
            "archive": {
                "source_directory": "/drop",
                "destination_directory": "/print-logs"
            },
            "input_directory": "/print-logs",
            "processed_directory": "/print-logs/processed"
        }
        "#;

        let config = load_config_from_str(config_json).unwrap();
        let archive = config.archive.unwrap();
        assert_eq!(archive.source_directory, "/drop");
        assert_eq!(archive.destination_directory, "/print-logs");
    }

    #[test]
    fn test_invalid_version() {
        let config_json = r#"
        {
            "version": "2.0",
            "database": { "path": "logs.db" },
            "input_directory": "/print-logs",
            "processed_directory": "/print-logs/processed"
        }
        "#;

        assert!(load_config_from_str(config_json).is_err());
    }

    #[test]
    fn test_missing_database_section() {
        let config_json = r#"
        {
            "version": "1.0",
            "input_directory": "/print-logs",
            "processed_directory": "/print-logs/processed"
        }
        "#;

        assert!(load_config_from_str(config_json).is_err());
    }

    #[test]
    fn test_empty_input_directory() {
        let config_json = r#"
        {
            "version": "1.0",
            "database": { "path": "logs.db" },
            "input_directory": "",
            "processed_directory": "/print-logs/processed"
        }
        "#;

        assert!(load_config_from_str(config_json).is_err());
    }

    #[test]
    fn test_duplicate_unit_paths() {
        let config_json = r#"
        {
            "version": "1.0",
            "database": { "path": "logs.db" },
            "input_directory": "/print-logs",
            "processed_directory": "/print-logs/processed",
            "directory": {
                "address": "192.168.22.4",
                "username": "svc",
                "password": "secret",
                "domain": "CORP",
                "organizational_units": [
                    { "path": "OU=IT,DC=corp,DC=local", "department": "IT" },
                    { "path": "OU=IT,DC=corp,DC=local", "department": "Helpdesk" }
                ]
            }
        }
        "#;

        let result = load_config_from_str(config_json);
        assert!(matches!(
            result,
            Err(crate::error::ConfigError::DuplicateUnit { .. })
        ));
    }

    #[test]
    fn test_unit_missing_department() {
        let config_json = r#"
        {
            "version": "1.0",
            "database": { "path": "logs.db" },
            "input_directory": "/print-logs",
            "processed_directory": "/print-logs/processed",
            "directory": {
                "address": "192.168.22.4",
                "username": "svc",
                "password": "secret",
                "domain": "CORP",
                "organizational_units": [
                    { "path": "OU=IT,DC=corp,DC=local", "department": "" }
                ]
            }
        }
        "#;

        assert!(load_config_from_str(config_json).is_err());
    }
}
