//! Error types for vault operations
//!
//! Every public operation in this crate returns a [`VaultResult`]. Failures
//! are values, never panics, so a caller embedding the engine can always turn
//! them into a message for its own user.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Rejection of a caller-supplied path
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Path resolves outside the vault root
    #[error("Invalid path, must be within vault: {}", path.display())]
    OutsideVault { path: PathBuf },

    /// Path is inside the vault but does not exist
    #[error("Path does not exist: {}", path.display())]
    NotFound { path: PathBuf },

    /// File exists but is not a supported document type
    #[error("Only markdown files are supported: {}", path.display())]
    UnsupportedExtension { path: PathBuf },

    /// Path was expected to be a folder
    #[error("Not a folder: {}", path.display())]
    NotAFolder { path: PathBuf },
}

/// Malformed frontmatter block
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FrontmatterError {
    /// Opening `---` with no closing delimiter line
    #[error("Frontmatter block is not terminated by a closing '---' line")]
    Unterminated,

    /// YAML inside the block failed to parse
    #[error("Frontmatter YAML parse error: {0}")]
    Yaml(String),

    /// YAML parsed but is not a key/value mapping
    #[error("Frontmatter must be a key/value mapping, found {0}")]
    NotAMapping(String),

    /// Metadata could not be written back as YAML
    #[error("Frontmatter YAML serialization error: {0}")]
    Emit(String),
}

/// Error type for every vault operation
#[derive(Debug, Error)]
pub enum VaultError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid frontmatter in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: FrontmatterError,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result type for vault operations
pub type VaultResult<T> = Result<T, VaultError>;

impl VaultError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Wrap a frontmatter error with the file it came from
    pub fn parse(path: impl AsRef<Path>, source: FrontmatterError) -> Self {
        Self::Parse {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a not-found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Whether the failure came from caller input rather than the environment
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::InvalidInput(_) | Self::NotFound(_)
        )
    }
}
