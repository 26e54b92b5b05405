//! Read-modify-write pipeline for single notes
//!
//! [`NoteEditor`] is the only place that writes note files. Each mutation
//! reads the file once, stamps `updated_at`, and replaces the file in one
//! atomic rename, so the content change and the timestamp always land
//! together or not at all.

use crate::clock::{Clock, SystemClock};
use crate::error::{VaultError, VaultResult};
use crate::error::FrontmatterError;
use crate::frontmatter::{parse_document, serialize_document, Metadata, NoteDocument};
use crate::timestamp::Timestamp;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Metadata key holding the creation date
pub const CREATED_KEY: &str = "created";
/// Metadata key holding the last modification time
pub const UPDATED_KEY: &str = "updated_at";

/// Loads, mutates and persists notes
#[derive(Debug, Clone, Default)]
pub struct NoteEditor<C = SystemClock> {
    clock: C,
}

impl NoteEditor<SystemClock> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock> NoteEditor<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now())
    }

    /// Read and parse a note
    pub fn load(&self, path: &Path) -> VaultResult<NoteDocument> {
        let text = fs::read_to_string(path).map_err(|e| VaultError::io(path, e))?;
        parse_document(&text).map_err(|e| VaultError::parse(path, e))
    }

    /// Serialize a new note, filling `created` and `updated_at` if absent
    pub fn render_new(&self, mut metadata: Metadata, body: &str) -> Result<String, FrontmatterError> {
        if !metadata.contains_key(UPDATED_KEY) {
            metadata.insert(UPDATED_KEY, self.now());
        }
        if !metadata.contains_key(CREATED_KEY) {
            metadata.insert(CREATED_KEY, self.clock.today());
        }
        serialize_document(&metadata, body)
    }

    /// Write a whole note and return the text written
    ///
    /// If the file already exists its `created` value is kept, so rewriting a
    /// note never moves its creation date.
    pub fn write_note(&self, path: &Path, mut metadata: Metadata, body: &str) -> VaultResult<String> {
        if path.exists() {
            match self.load(path) {
                Ok(existing) => {
                    if let Some(created) = existing.metadata.get(CREATED_KEY) {
                        metadata.insert(CREATED_KEY, created.clone());
                    }
                }
                Err(e) => debug!("Not preserving creation date of {}: {}", path.display(), e),
            }
        }
        let text = self
            .render_new(metadata, body)
            .map_err(|e| VaultError::parse(path, e))?;
        self.save(path, &text)?;
        Ok(text)
    }

    /// Merge `updates` into a note's metadata and return the new text
    ///
    /// Later keys overwrite earlier ones and `updated_at` is always
    /// refreshed. Nothing is written; see [`NoteEditor::save`].
    pub fn update_metadata(&self, path: &Path, updates: Metadata) -> VaultResult<String> {
        let mut doc = self.load(path)?;
        doc.metadata.merge(updates);
        doc.metadata.insert(UPDATED_KEY, self.now());
        doc.to_text().map_err(|e| VaultError::parse(path, e))
    }

    /// Transform a note's body and persist it
    ///
    /// `mutate` receives the current body and returns the new body plus a
    /// value handed back to the caller. If it fails the file is untouched.
    pub fn update_body<F, R>(&self, path: &Path, mutate: F) -> VaultResult<R>
    where
        F: FnOnce(&str) -> VaultResult<(String, R)>,
    {
        let mut doc = self.load(path)?;
        let (body, result) = mutate(&doc.body)?;
        doc.body = body;
        doc.metadata.insert(UPDATED_KEY, self.now());
        let text = doc.to_text().map_err(|e| VaultError::parse(path, e))?;
        self.save(path, &text)?;
        Ok(result)
    }

    /// Replace a file's contents atomically
    ///
    /// An existing file keeps its permission bits.
    pub fn save(&self, path: &Path, text: &str) -> VaultResult<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|e| VaultError::io(parent, e))?;

        let mut tmp = NamedTempFile::new_in(parent).map_err(|e| VaultError::io(parent, e))?;
        tmp.write_all(text.as_bytes())
            .map_err(|e| VaultError::io(tmp.path(), e))?;
        if let Ok(existing) = fs::metadata(path) {
            tmp.as_file()
                .set_permissions(existing.permissions())
                .map_err(|e| VaultError::io(tmp.path(), e))?;
        }
        tmp.persist(path).map_err(|e| VaultError::io(path, e.error))?;

        info!("Wrote note {}", path.display());
        Ok(())
    }
}
