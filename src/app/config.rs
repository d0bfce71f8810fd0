//! Configuration for the editor

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Editor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of spaces a tab expands to at load time
    pub tab_stop: usize,
    /// Terminal rows reserved for the status and message bars
    pub reserved_rows: usize,
    /// Seconds a status message stays visible
    pub message_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_stop: 4,
            reserved_rows: 2,
            message_ttl_secs: 5,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.tab_stop, 4);
        assert_eq!(config.reserved_rows, 2);
        assert_eq!(config.message_ttl_secs, 5);
    }

    #[test]
    fn test_config_load_partial_json() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"tab_stop": 8}}"#).expect("write");

        let config = Config::load(file.path()).expect("load");
        assert_eq!(config.tab_stop, 8);
        assert_eq!(config.reserved_rows, 2);
    }

    #[test]
    fn test_config_load_rejects_garbage() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "not json").expect("write");

        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_config_load_missing_file() {
        assert!(matches!(
            Config::load("/no/such/config.json"),
            Err(ConfigError::Read(_))
        ));
    }
}
