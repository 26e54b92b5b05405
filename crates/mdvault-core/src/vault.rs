//! Vault root, path containment and note enumeration
//!
//! Every caller-supplied path goes through [`Vault::resolve`] before the
//! filesystem is touched. Containment is checked lexically first, so a path
//! like `notes/../../secret.md` is rejected without being read, and then
//! again on the canonical path when the target exists, so a symlink inside
//! the vault cannot point outside it.

use crate::error::{ValidationError, VaultError, VaultResult};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// File extension of vault notes
pub const NOTE_EXTENSION: &str = "md";

/// A directory of Markdown notes
#[derive(Debug, Clone)]
pub struct Vault {
    root: PathBuf,
    canonical_root: PathBuf,
}

impl Vault {
    /// Open a vault rooted at an existing directory
    pub fn open(root: impl AsRef<Path>) -> VaultResult<Self> {
        let root = root.as_ref();
        let absolute = if root.is_absolute() {
            root.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(|e| VaultError::io(root, e))?
                .join(root)
        };
        let root = normalize_lexically(&absolute);
        let canonical_root = root.canonicalize().map_err(|e| VaultError::io(&root, e))?;
        if !canonical_root.is_dir() {
            return Err(ValidationError::NotAFolder { path: root }.into());
        }
        Ok(Self {
            root,
            canonical_root,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a candidate path to an absolute path inside the vault
    ///
    /// Relative candidates are taken relative to the root. Absolute
    /// candidates are accepted only if they already point inside it. The
    /// target does not need to exist.
    pub fn resolve(&self, candidate: impl AsRef<Path>) -> Result<PathBuf, ValidationError> {
        let candidate = candidate.as_ref();
        let outside = || ValidationError::OutsideVault {
            path: candidate.to_path_buf(),
        };

        let joined = normalize_lexically(&self.root.join(candidate));
        let relative = joined
            .strip_prefix(&self.root)
            .or_else(|_| joined.strip_prefix(&self.canonical_root))
            .map_err(|_| outside())?;
        let resolved = self.root.join(relative);

        if let Ok(canonical) = resolved.canonicalize() {
            if !canonical.starts_with(&self.canonical_root) {
                return Err(outside());
            }
        }
        Ok(resolved)
    }

    /// Resolve a path that must exist
    pub fn validate_path(&self, candidate: impl AsRef<Path>) -> VaultResult<PathBuf> {
        let candidate = candidate.as_ref();
        let path = self.resolve(candidate)?;
        if !path.exists() {
            return Err(ValidationError::NotFound {
                path: candidate.to_path_buf(),
            }
            .into());
        }
        Ok(path)
    }

    /// Resolve an existing Markdown note
    pub fn validate_note(&self, candidate: impl AsRef<Path>) -> VaultResult<PathBuf> {
        let candidate = candidate.as_ref();
        let path = self.validate_path(candidate)?;
        if !is_note(&path) || !path.is_file() {
            return Err(ValidationError::UnsupportedExtension {
                path: candidate.to_path_buf(),
            }
            .into());
        }
        Ok(path)
    }

    /// Resolve an existing folder; an empty string is the vault root
    pub fn validate_folder(&self, candidate: &str) -> VaultResult<PathBuf> {
        if candidate.trim().is_empty() {
            return Ok(self.root.clone());
        }
        let path = self.validate_path(candidate)?;
        if !path.is_dir() {
            return Err(ValidationError::NotAFolder {
                path: PathBuf::from(candidate),
            }
            .into());
        }
        Ok(path)
    }

    /// All notes under `folder` (or the whole vault), sorted
    ///
    /// Hidden directories such as `.git` or `.obsidian` are not descended.
    /// Entries that cannot be read are skipped.
    pub fn notes(&self, folder: Option<&str>) -> VaultResult<Vec<PathBuf>> {
        let base = self.validate_folder(folder.unwrap_or(""))?;
        let mut notes: Vec<PathBuf> = WalkDir::new(&base)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.file_name()))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug!("Skipping unreadable vault entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && is_note(entry.path()))
            .map(|entry| entry.into_path())
            .collect();
        notes.sort();
        Ok(notes)
    }

    /// Immediate, non-hidden sub-folders of `folder`, sorted
    pub fn folders(&self, folder: Option<&str>) -> VaultResult<Vec<PathBuf>> {
        let base = self.validate_folder(folder.unwrap_or(""))?;
        let entries = fs::read_dir(&base).map_err(|e| VaultError::io(&base, e))?;
        let mut folders: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .filter(|entry| !is_hidden(&entry.file_name()))
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        folders.sort();
        Ok(folders)
    }

    /// Vault-relative form of `path`, with `/` separators
    pub fn relative(&self, path: &Path) -> String {
        let relative = path
            .strip_prefix(&self.root)
            .or_else(|_| path.strip_prefix(&self.canonical_root))
            .unwrap_or(path);
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Read a note as UTF-8 text
    pub fn read_text(&self, path: &Path) -> VaultResult<String> {
        fs::read_to_string(path).map_err(|e| VaultError::io(path, e))
    }
}

fn is_note(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == NOTE_EXTENSION)
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

/// Resolve `.` and `..` without touching the filesystem
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
