//! Error types for vault tools

use mdvault_core::VaultError;
use std::io;
use thiserror::Error;

/// Failure of a delegated notes CLI invocation
#[derive(Debug, Error)]
pub enum DelegateError {
    #[error("Error: '{executable}' executable not found in PATH.")]
    ExecutableNotFound { executable: String },

    #[error("Failed to execute {executable} command: {source}")]
    Spawn {
        executable: String,
        #[source]
        source: io::Error,
    },

    #[error("Error executing command: {command}\n{stderr}\n{stdout}")]
    Failed {
        command: String,
        status: Option<i32>,
        stderr: String,
        stdout: String,
    },

    #[error("Error executing macro '{name}':\n{stderr}\n{stdout}")]
    MacroFailed {
        name: String,
        stderr: String,
        stdout: String,
    },

    #[error("Unexpected output from '{command}': {reason}")]
    InvalidOutput { command: String, reason: String },
}

/// Error type for every tool operation
#[derive(Debug, Error)]
pub enum ToolError {
    #[error(transparent)]
    Vault(#[from] VaultError),

    #[error(transparent)]
    Delegate(#[from] DelegateError),

    #[error("{0}")]
    InvalidParams(String),
}

impl ToolError {
    pub fn invalid_params(msg: impl Into<String>) -> Self {
        Self::InvalidParams(msg.into())
    }
}

/// Result type for tool operations
pub type ToolResult<T> = Result<T, ToolError>;
