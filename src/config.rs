//! User configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::task::DEFAULT_DATA_FILE;

pub const APP_DIR_NAME: &str = "taskmgr";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// File read at startup and written at exit
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Directory exports are written to
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,

    /// Reject statuses and priorities outside the known sets
    #[serde(default)]
    pub strict: bool,

    #[serde(default = "default_true")]
    pub color: bool,

    /// Keep `<data_file>.bak` when saving
    #[serde(default = "default_true")]
    pub backup: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            export_dir: default_export_dir(),
            strict: false,
            color: true,
            backup: true,
        }
    }
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}

/// `None` when the platform has no user config directory
pub fn get_app_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_DIR_NAME))
}

pub fn config_path() -> Option<PathBuf> {
    get_app_dir().map(|dir| dir.join("config.toml"))
}

impl Config {
    /// Load from the default location, falling back to defaults
    pub fn load() -> Result<Self> {
        Self::load_at(config_path().as_deref())
    }

    /// Load from `path`, or use defaults when there is no path to look at
    pub fn load_at(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                debug!("No user config directory, using default config");
                Ok(Config::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.data_file, PathBuf::from("tasks.csv"));
        assert_eq!(config.export_dir, PathBuf::from("."));
        assert!(!config.strict);
        assert!(config.color);
        assert!(config.backup);
    }

    #[test]
    fn test_config_deserialize_empty_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_deserialize_partial_toml() {
        let toml = r#"
            strict = true
            data_file = "work/tasks.csv"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.strict);
        assert_eq!(config.data_file, PathBuf::from("work/tasks.csv"));
        // Other fields should have defaults
        assert!(config.color);
        assert_eq!(config.export_dir, PathBuf::from("."));
    }

    #[test]
    fn test_load_missing_file_gives_defaults() -> Result<()> {
        let temp = tempdir()?;
        let config = Config::load_from(&temp.path().join("missing.toml"))?;
        assert_eq!(config, Config::default());
        Ok(())
    }

    #[test]
    fn test_load_without_config_dir_gives_defaults() -> Result<()> {
        assert_eq!(Config::load_at(None)?, Config::default());
        Ok(())
    }

    #[test]
    fn test_load_at_reads_given_path() -> Result<()> {
        let temp = tempdir()?;
        let path = temp.path().join("config.toml");
        fs::write(&path, "strict = true")?;
        assert!(Config::load_at(Some(&path))?.strict);
        Ok(())
    }

    #[test]
    fn test_save_and_load() -> Result<()> {
        let temp = tempdir()?;
        let path = temp.path().join("nested").join("config.toml");

        let config = Config {
            color: false,
            backup: false,
            ..Config::default()
        };
        config.save_to(&path)?;

        assert_eq!(Config::load_from(&path)?, config);
        Ok(())
    }

    #[test]
    fn test_load_invalid_toml_errors() -> Result<()> {
        let temp = tempdir()?;
        let path = temp.path().join("config.toml");
        fs::write(&path, "strict = \"maybe\"")?;
        assert!(Config::load_from(&path).is_err());
        Ok(())
    }
}
