//! Layered configuration loading
//!
//! Precedence, lowest first:
//! 1. Built-in defaults
//! 2. `config.toml` (explicit path, else `<config dir>/mdvault/config.toml`)
//! 3. Environment (`MARKDOWN_VAULT_PATH`, `MDVAULT_DAILY_FORMAT`, `MDVAULT_CLI`)
//! 4. Explicit overrides such as a `--vault` flag

use crate::config::{CliConfig, FileConfig, VaultConfig, DEFAULT_DAILY_FORMAT};
use crate::error::{ConfigError, ConfigResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Vault root
pub const VAULT_PATH_ENV: &str = "MARKDOWN_VAULT_PATH";
/// Daily-note path template
pub const DAILY_FORMAT_ENV: &str = "MDVAULT_DAILY_FORMAT";
/// External notes CLI executable
pub const CLI_ENV: &str = "MDVAULT_CLI";

/// Builds a [`VaultConfig`] from file, environment and overrides
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    file: Option<PathBuf>,
    vault_override: Option<PathBuf>,
    use_env: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            file: None,
            vault_override: None,
            use_env: true,
        }
    }

    /// Load from an explicit file (or the default location) plus environment
    pub fn load(explicit_file: Option<&Path>) -> ConfigResult<VaultConfig> {
        let mut loader = Self::new();
        if let Some(path) = explicit_file {
            loader = loader.with_file(path);
        }
        loader.resolve()
    }

    /// Read this file instead of the default location; it must exist
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Vault root that wins over file and environment
    pub fn with_vault_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.vault_override = Some(path.into());
        self
    }

    /// Ignore environment variables
    pub fn without_env(mut self) -> Self {
        self.use_env = false;
        self
    }

    /// `<config dir>/mdvault/config.toml`, if the platform has a config dir
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("mdvault").join("config.toml"))
    }

    pub fn resolve(&self) -> ConfigResult<VaultConfig> {
        let file = self.read_file()?;

        let mut vault_path = file.vault_path;
        let mut daily_format = file.daily_format;
        let mut executable = file.cli.executable;

        if self.use_env {
            if let Some(value) = env_value(VAULT_PATH_ENV) {
                vault_path = Some(PathBuf::from(value));
            }
            if let Some(value) = env_value(DAILY_FORMAT_ENV) {
                daily_format = Some(value);
            }
            if let Some(value) = env_value(CLI_ENV) {
                executable = Some(value);
            }
        }

        if let Some(path) = &self.vault_override {
            vault_path = Some(path.clone());
        }

        let vault_path = vault_path
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(ConfigError::MissingVaultPath)?;

        let daily_format = daily_format.unwrap_or_else(|| DEFAULT_DAILY_FORMAT.to_string());
        if daily_format.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "daily_format".to_string(),
                value: "must not be empty".to_string(),
            });
        }

        let cli = match executable {
            Some(executable) if !executable.trim().is_empty() => CliConfig { executable },
            Some(_) => {
                return Err(ConfigError::InvalidValue {
                    field: "cli.executable".to_string(),
                    value: "must not be empty".to_string(),
                })
            }
            None => CliConfig::default(),
        };

        Ok(VaultConfig {
            vault_path: expand_home(vault_path),
            daily_format,
            cli,
        })
    }

    fn read_file(&self) -> ConfigResult<FileConfig> {
        let path = match &self.file {
            Some(path) => path.clone(),
            None => match Self::default_config_path() {
                Some(path) if path.is_file() => path,
                _ => {
                    debug!("No config file found, using defaults and environment");
                    return Ok(FileConfig::default());
                }
            },
        };

        debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Expand a leading `~` to the home directory
fn expand_home(path: PathBuf) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path;
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path,
    }
}
