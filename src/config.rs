//! Configuration for opening a store
//!
//! Resolves where the data file lives and how the core logs.

use crate::error::{Result, TodoError};
use crate::logging::default_log_level;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Subdirectory of the per-user data directory owned by this application
pub const APP_DIR_NAME: &str = "simple-todo";

/// Environment variable that overrides the per-user base data directory
pub const DATA_HOME_ENV: &str = "XDG_DATA_HOME";

/// Store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding `data.json`; resolved from the environment when unset
    pub data_dir: Option<PathBuf>,
    /// Log level used by [`crate::logging::init_logging`]
    pub log_level: String,
    /// Write rolling log files under `<data_dir>/logs`
    pub log_to_file: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            log_level: default_log_level().to_string(),
            log_to_file: false,
        }
    }
}

impl StoreConfig {
    /// Uses `data_dir` directly, bypassing environment lookup
    pub fn with_data_dir(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: Some(data_dir.as_ref().to_path_buf()),
            ..Self::default()
        }
    }

    /// Resolves the data directory for this configuration
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        resolve_data_dir_from(std::env::var_os(DATA_HOME_ENV).map(PathBuf::from), dirs::data_dir())
    }

    /// Directory for rolling log files
    pub fn log_dir(&self) -> Result<PathBuf> {
        Ok(self.resolve_data_dir()?.join("logs"))
    }
}

/// Picks the application data directory from an override and an OS default.
///
/// An empty override is ignored.
pub fn resolve_data_dir_from(
    env_override: Option<PathBuf>,
    os_default: Option<PathBuf>,
) -> Result<PathBuf> {
    let base = env_override
        .filter(|p| !p.as_os_str().is_empty())
        .or(os_default)
        .ok_or_else(|| {
            TodoError::ConfigError("could not determine a per-user data directory".to_string())
        })?;
    Ok(base.join(APP_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert!(config.data_dir.is_none());
        assert_eq!(config.log_level, default_log_level());
        assert!(!config.log_to_file);
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let config = StoreConfig::with_data_dir("/tmp/custom");
        assert_eq!(config.resolve_data_dir().unwrap(), PathBuf::from("/tmp/custom"));
        assert_eq!(config.log_dir().unwrap(), PathBuf::from("/tmp/custom/logs"));
    }

    #[test]
    fn test_env_override_beats_os_default() {
        let dir = resolve_data_dir_from(
            Some(PathBuf::from("/env/data")),
            Some(PathBuf::from("/home/u/.local/share")),
        )
        .unwrap();
        assert_eq!(dir, PathBuf::from("/env/data/simple-todo"));
    }

    #[test]
    fn test_empty_env_override_is_ignored() {
        let dir = resolve_data_dir_from(
            Some(PathBuf::new()),
            Some(PathBuf::from("/home/u/.local/share")),
        )
        .unwrap();
        assert_eq!(dir, PathBuf::from("/home/u/.local/share/simple-todo"));
    }

    #[test]
    fn test_no_base_directory_is_a_config_error() {
        let err = resolve_data_dir_from(None, None).unwrap_err();
        assert!(matches!(err, TodoError::ConfigError(_)));
    }

    #[test]
    fn test_partial_config_deserialization() {
        let config: StoreConfig = serde_json::from_str(r#"{"log_to_file": true}"#).unwrap();
        assert!(config.log_to_file);
        assert!(config.data_dir.is_none());
        assert_eq!(config.log_level, default_log_level());
    }
}
