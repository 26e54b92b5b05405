//! Zettelkasten note creation
//!
//! The notes CLI renders the template and picks the file name. Body text,
//! connections and the source reference are then appended as sections of the
//! created note.

use crate::delegate::{CommandRunner, MdvArgs};
use crate::error::ToolResult;
use mdvault_core::{append_to_section, Clock, NoteEditor, SystemClock, Vault};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

/// Parameters for a new zettel
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ZettelParams {
    pub title: String,
    /// File-name slug, e.g. `attention-mechanism`
    pub short_title: String,
    /// Source reference, usually a wikilink to a literature note
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub connections: Vec<String>,
    #[serde(default)]
    pub extra_vars: Vec<(String, String)>,
}

/// Parameters for a new literature note
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LiteratureParams {
    pub title: String,
    pub short_title: String,
    #[serde(default)]
    pub authors: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// Kind of source: book, article, paper, video
    #[serde(default)]
    pub source_type: Option<String>,
    #[serde(default)]
    pub extra_vars: Vec<(String, String)>,
}

pub struct ZettelTools<C = SystemClock> {
    vault: Vault,
    editor: NoteEditor<C>,
    runner: Arc<dyn CommandRunner>,
}

impl<C: Clock> ZettelTools<C> {
    pub fn new(vault: Vault, editor: NoteEditor<C>, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            vault,
            editor,
            runner,
        }
    }

    pub fn create_zettel(&self, params: &ZettelParams) -> ToolResult<String> {
        let args = MdvArgs::new(["new", "zettel", params.title.as_str()])
            .flag("--batch")
            .arg("--var")
            .arg(format!("short_title={}", params.short_title))
            .var("source", params.source.as_deref())
            .vars(&params.extra_vars);
        let mut result = self.runner.run(args.as_slice())?;

        let body = params.body.as_deref().filter(|b| !b.trim().is_empty());
        if body.is_none() && params.connections.is_empty() {
            return Ok(result);
        }

        let Some(created) = self.created_note(&result) else {
            debug!("No created note path in output, skipping zettel sections");
            return Ok(result);
        };

        let appended = self.editor.update_body(&created, |current| {
            let mut text = current.to_string();
            if let Some(body) = body {
                text = append_to_section(&text, body, Some("Core Idea")).body;
            }
            if !params.connections.is_empty() {
                let list = params
                    .connections
                    .iter()
                    .map(|c| format!("- {c}"))
                    .collect::<Vec<_>>()
                    .join("\n");
                text = append_to_section(&text, &list, Some("Connections")).body;
            }
            if let Some(source) = params.source.as_deref().filter(|s| !s.trim().is_empty()) {
                let wikilink = format!("[[{}]]", source.trim_matches(|c| c == '[' || c == ']'));
                if !current.contains(&wikilink) {
                    text = append_to_section(&text, &format!("- {source}"), Some("Source")).body;
                }
            }
            Ok((text, ()))
        });

        if let Err(e) = appended {
            warn!("Zettel created but sections not appended: {}", e);
            result.push_str(&format!(
                "\n(Warning: created note but failed to append body/connections: {e})"
            ));
        }
        Ok(result)
    }

    pub fn create_literature_note(&self, params: &LiteratureParams) -> ToolResult<String> {
        let args = MdvArgs::new(["new", "literature", params.title.as_str()])
            .flag("--batch")
            .arg("--var")
            .arg(format!("short_title={}", params.short_title))
            .var("authors", params.authors.as_deref())
            .var("year", params.year.as_deref())
            .var("url", params.url.as_deref())
            .var("source_type", params.source_type.as_deref())
            .vars(&params.extra_vars);
        Ok(self.runner.run(args.as_slice())?)
    }

    /// First `.md` word in CLI output that names an existing note
    fn created_note(&self, output: &str) -> Option<PathBuf> {
        output
            .split_whitespace()
            .map(|word| word.trim_matches(|c: char| matches!(c, '\'' | '"' | '`' | ',' | '(' | ')')))
            .filter(|word| word.ends_with(".md"))
            .find_map(|word| self.vault.validate_note(word).ok())
    }
}
