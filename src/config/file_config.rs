//! Configuration file discovery and generation.
//!
//! # Configuration File Format
//!
//! ```toml
//! [api]
//! key = "your-api-key"
//! base_url = "https://content.guardianapis.com"
//! timeout_secs = 30
//!
//! [defaults]
//! page_size = 50
//! order_by = "newest"
//! lang = "en"
//! pages = 100
//!
//! [logging]
//! level = "info"
//! ```

use std::path::{Path, PathBuf};

use super::Config;

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "guardian-content.toml";

/// Find a configuration file in the default locations.
///
/// Checks `./guardian-content.toml` first, then
/// `<config dir>/guardian-content/config.toml`.
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    let user = dirs::config_dir()?.join("guardian-content").join("config.toml");
    user.is_file().then_some(user)
}

/// Write a configuration file with default values.
///
/// The API key is never written out, even when one is set in the environment.
pub fn write_default_config(path: &Path) -> Result<(), ConfigFileError> {
    let mut config = Config::default();
    config.api.key = None;

    let content =
        toml::to_string_pretty(&config).map_err(|e| ConfigFileError::Serialize(e.to_string()))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigFileError::Io(e.to_string()))?;
        }
    }

    std::fs::write(path, content).map_err(|e| ConfigFileError::Io(e.to_string()))
}

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialize error: {0}")]
    Serialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use tempfile::tempdir;

    #[test]
    fn test_write_default_config_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        write_default_config(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("[api]"));
        assert!(!text.contains("key ="));

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.defaults.page_size, 50);
        assert_eq!(loaded.api.base_url, crate::config::DEFAULT_BASE_URL);
    }

    #[test]
    fn test_write_under_regular_file_fails() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file.txt");
        std::fs::write(&blocker, "not a directory").unwrap();

        let result = write_default_config(&blocker.join("config.toml"));
        assert!(matches!(result, Err(ConfigFileError::Io(_))));
        assert_eq!(std::fs::read_to_string(&blocker).unwrap(), "not a directory");
    }
}
