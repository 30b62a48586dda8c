//! Application configuration module
//!
//! Provides configuration management with TOML file support
//! and sensible defaults for every field.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Key-value store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_db_name")]
    pub db_name: String,
}

/// Color scheme used by the terminal UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

/// Display configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub theme: Theme,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_db_name() -> String {
    "store.db".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_file() -> String {
    "deskmate.log".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_name: default_db_name(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Reject anything that is not a bare file name.
fn plain_file_name(name: &str, what: &str) -> Result<()> {
    if name.is_empty() || name.contains("..") || name.contains('/') || name.contains('\\') {
        anyhow::bail!(
            "Invalid {} '{}': must be a simple filename without path separators",
            what,
            name
        );
    }
    Ok(())
}

impl Config {
    /// Returns the configuration directory path (~/.config/deskmate/)
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("deskmate");
        Ok(config_dir)
    }

    /// Returns the configuration file path (~/.config/deskmate/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the key-value store path (~/.config/deskmate/store.db)
    ///
    /// # Errors
    ///
    /// Returns an error if the database name contains path traversal sequences.
    pub fn store_path(&self) -> Result<PathBuf> {
        plain_file_name(&self.storage.db_name, "database name")?;
        Ok(Self::config_dir()?.join(&self.storage.db_name))
    }

    /// Returns the log file path used by the interactive UI.
    pub fn log_path(&self) -> Result<PathBuf> {
        plain_file_name(&self.logging.file, "log file name")?;
        Ok(Self::config_dir()?.join(&self.logging.file))
    }

    /// Load configuration from file, or return default if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Create the configuration directory if it is missing (0700 on Unix).
    pub fn ensure_config_dir() -> Result<PathBuf> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir.display()))?;

            #[cfg(unix)]
            {
                let dir_perms = std::fs::Permissions::from_mode(0o700);
                fs::set_permissions(&config_dir, dir_perms)
                    .with_context(|| format!("Failed to set permissions on config directory: {}", config_dir.display()))?;
            }
        }

        Ok(config_dir)
    }

    /// Save configuration to file, creating the directory if needed.
    ///
    /// On Unix systems the file is written with mode 0600.
    pub fn save(&self) -> Result<()> {
        Self::ensure_config_dir()?;
        let config_path = Self::config_path()?;

        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config to TOML")?;

        fs::write(&config_path, &content)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        #[cfg(unix)]
        {
            let file_perms = std::fs::Permissions::from_mode(0o600);
            fs::set_permissions(&config_path, file_perms)
                .with_context(|| format!("Failed to set permissions on config file: {}", config_path.display()))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_values() {
        let config = Config::default();

        assert_eq!(config.storage.db_name, "store.db");
        assert_eq!(config.display.theme, Theme::Dark);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.file, "deskmate.log");
    }

    #[test]
    fn test_config_load_from_toml() {
        let toml_content = r#"
[storage]
db_name = "my_store.db"

[display]
theme = "light"

[logging]
level = "debug"
file = "trace.log"
"#;

        let config: Config = toml::from_str(toml_content).expect("Failed to parse TOML");

        assert_eq!(config.storage.db_name, "my_store.db");
        assert_eq!(config.display.theme, Theme::Light);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, "trace.log");
    }

    #[test]
    fn test_config_partial_toml() {
        let toml_content = r#"
[display]
theme = "light"
"#;

        let config: Config = toml::from_str(toml_content).expect("Failed to parse TOML");

        assert_eq!(config.display.theme, Theme::Light);
        // Missing values should use defaults
        assert_eq!(config.storage.db_name, "store.db");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_config_rejects_unknown_theme() {
        let result: std::result::Result<Config, _> = toml::from_str("[display]\ntheme = \"sepia\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_config_dir_path() {
        let config_dir = Config::config_dir().expect("Failed to get config dir");
        assert!(config_dir.ends_with("deskmate"));
    }

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path().expect("Failed to get config path");
        assert!(config_path.ends_with("config.toml"));
    }

    #[test]
    fn test_store_path() {
        let config = Config::default();
        let path = config.store_path().expect("Failed to get store path");
        assert!(path.ends_with("store.db"));
    }

    #[test]
    fn test_log_path() {
        let config = Config::default();
        let path = config.log_path().expect("Failed to get log path");
        assert!(path.ends_with("deskmate.log"));
    }

    #[test]
    fn test_config_dir_follows_xdg_config_home() {
        let dir = tempfile::tempdir().unwrap();

        #[cfg(target_os = "linux")]
        temp_env::with_var("XDG_CONFIG_HOME", Some(dir.path()), || {
            let config_dir = Config::config_dir().expect("Failed to get config dir");
            assert_eq!(config_dir, dir.path().join("deskmate"));
        });
    }

    #[test]
    fn test_config_serialization() {
        let mut config = Config::default();
        config.display.theme = Theme::Light;
        let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");

        let parsed: Config = toml::from_str(&toml_str).expect("Failed to parse");
        assert_eq!(parsed.display.theme, Theme::Light);
        assert_eq!(parsed.storage.db_name, config.storage.db_name);
    }

    #[test]
    fn test_store_path_rejects_path_traversal() {
        let mut config = Config::default();
        config.storage.db_name = "../../../etc/passwd".to_string();
        assert!(config.store_path().is_err(), "Should reject path traversal");

        config.storage.db_name = "..\\..\\windows\\system32".to_string();
        assert!(config.store_path().is_err(), "Should reject Windows path traversal");
    }

    #[test]
    fn test_log_path_rejects_empty_name() {
        let mut config = Config::default();
        config.logging.file = String::new();
        assert!(config.log_path().is_err());
    }
}
