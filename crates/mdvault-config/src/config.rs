//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default daily-note location, a strftime template relative to the vault
pub const DEFAULT_DAILY_FORMAT: &str = "Journal/Daily/%Y-%m-%d.md";

/// Default external notes CLI
pub const DEFAULT_CLI_EXECUTABLE: &str = "mdv";

/// External notes CLI settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Executable name or path of the notes CLI
    pub executable: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            executable: DEFAULT_CLI_EXECUTABLE.to_string(),
        }
    }
}

/// Fully resolved vault configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VaultConfig {
    /// Root directory of the vault
    pub vault_path: PathBuf,
    /// strftime template for today's daily note, relative to the vault
    pub daily_format: String,
    /// External notes CLI
    pub cli: CliConfig,
}

impl VaultConfig {
    /// Configuration for `vault_path` with every other field defaulted
    pub fn new(vault_path: impl Into<PathBuf>) -> Self {
        Self {
            vault_path: vault_path.into(),
            daily_format: DEFAULT_DAILY_FORMAT.to_string(),
            cli: CliConfig::default(),
        }
    }
}

/// `config.toml` contents; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub vault_path: Option<PathBuf>,
    pub daily_format: Option<String>,
    #[serde(default)]
    pub cli: FileCliConfig,
}

/// `[cli]` table of `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileCliConfig {
    pub executable: Option<String>,
}
