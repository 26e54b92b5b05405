//! Link graph tools
//!
//! The graph is rebuilt from current file contents on every call.

use crate::error::ToolResult;
use mdvault_core::{extract_links, links::resolve_links, LinkGraph, NoteIndex, OutgoingLink, Vault};

/// Default number of related notes returned
pub const DEFAULT_RELATED_LIMIT: usize = 10;

#[derive(Debug, Clone)]
pub struct LinkTools {
    vault: Vault,
}

impl LinkTools {
    pub fn new(vault: Vault) -> Self {
        Self { vault }
    }

    /// Vault-relative form of an existing note path
    fn note(&self, path: &str) -> ToolResult<String> {
        let abs = self.vault.validate_note(path)?;
        Ok(self.vault.relative(&abs))
    }

    pub fn find_backlinks(&self, path: &str) -> ToolResult<String> {
        let note = self.note(path)?;
        let backlinks = LinkGraph::build(&self.vault)?.backlinks(&note);
        if backlinks.is_empty() {
            return Ok(format!("No backlinks found for {path}"));
        }
        Ok(backlinks.join("\n"))
    }

    /// Links in a note, each resolved to a vault path or marked not found
    pub fn outgoing(&self, path: &str) -> ToolResult<Vec<OutgoingLink>> {
        let abs = self.vault.validate_note(path)?;
        let links = extract_links(&self.vault.read_text(&abs)?);
        if links.is_empty() {
            return Ok(Vec::new());
        }
        let index = NoteIndex::build(&self.vault)?;
        Ok(resolve_links(&index, &links))
    }

    pub fn find_outgoing_links(&self, path: &str) -> ToolResult<String> {
        let links = self.outgoing(path)?;
        if links.is_empty() {
            return Ok(format!("No outgoing links found in {path}"));
        }
        Ok(links
            .iter()
            .map(|link| match link {
                OutgoingLink::Resolved { path, .. } => path.clone(),
                OutgoingLink::NotFound { link } => format!("{link}.md (not found)"),
            })
            .collect::<Vec<_>>()
            .join("\n"))
    }

    pub fn find_orphans(&self, folder: Option<&str>) -> ToolResult<String> {
        // Scope by the resolved folder so `./inbox` and `inbox/` both match
        let scope = match folder {
            Some(folder) => {
                let abs = self.vault.validate_folder(folder)?;
                Some(self.vault.relative(&abs)).filter(|s| !s.is_empty())
            }
            None => None,
        };
        let orphans = LinkGraph::build(&self.vault)?.orphans(scope.as_deref());
        if orphans.is_empty() {
            return Ok("No orphan notes found".to_string());
        }
        Ok(orphans.join("\n"))
    }

    pub fn find_related_notes(&self, path: &str, limit: usize) -> ToolResult<String> {
        let note = self.note(path)?;
        let related = LinkGraph::build(&self.vault)?.related_notes(&note, limit);
        if related.is_empty() {
            return Ok(format!("No related notes found for {path}"));
        }
        Ok(related
            .iter()
            .map(|r| format!("{} ({} shared: {})", r.path, r.shared, r.shared_links.join(", ")))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}
