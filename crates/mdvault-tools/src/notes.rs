//! Note read and edit tools
//!
//! Reads go straight to the filesystem. Every edit goes through
//! [`NoteEditor`], so a write always carries a fresh `updated_at`.

use crate::error::{ToolError, ToolResult};
use mdvault_core::{
    append_to_section, set_task_status, Clock, FrontmatterValue, Metadata, NoteEditor,
    SystemClock, Vault,
};
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Parameters for appending to a note
#[derive(Debug, Clone, Deserialize)]
pub struct AppendParams {
    pub path: String,
    pub content: String,
    /// Heading to append under; created as `## <subsection>` when missing
    #[serde(default)]
    pub subsection: Option<String>,
}

/// Parameters for toggling a checkbox task
#[derive(Debug, Clone, Deserialize)]
pub struct TaskStatusParams {
    pub path: String,
    pub task_pattern: String,
    #[serde(default = "default_true")]
    pub completed: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone)]
pub struct NoteTools<C = SystemClock> {
    vault: Vault,
    editor: NoteEditor<C>,
}

impl<C: Clock> NoteTools<C> {
    pub fn new(vault: Vault, editor: NoteEditor<C>) -> Self {
        Self { vault, editor }
    }

    pub fn vault(&self) -> &Vault {
        &self.vault
    }

    pub fn read_note(&self, path: &str) -> ToolResult<String> {
        let abs = self.vault.validate_note(path)?;
        Ok(self.vault.read_text(&abs)?)
    }

    /// First `max_lines` lines, with a count of what was left out
    pub fn read_note_excerpt(&self, path: &str, max_lines: usize) -> ToolResult<String> {
        let content = self.read_note(path)?;
        Ok(excerpt(&content, max_lines))
    }

    /// Frontmatter as pretty-printed JSON
    pub fn read_metadata(&self, path: &str) -> ToolResult<String> {
        let abs = self.vault.validate_note(path)?;
        let doc = self.editor.load(&abs)?;
        serde_json::to_string_pretty(&doc.metadata.to_json())
            .map_err(|e| ToolError::invalid_params(format!("metadata is not representable as JSON: {e}")))
    }

    pub fn list_notes(&self, folder: Option<&str>) -> ToolResult<String> {
        let notes = self.vault.notes(folder)?;
        if notes.is_empty() {
            return Ok("No notes found".to_string());
        }
        Ok(self.join_relative(&notes))
    }

    pub fn list_folders(&self, folder: Option<&str>) -> ToolResult<String> {
        let folders = self.vault.folders(folder)?;
        if folders.is_empty() {
            return Ok("No folders found".to_string());
        }
        Ok(self.join_relative(&folders))
    }

    /// Merge a JSON object into a note's frontmatter and persist it
    pub fn update_metadata(&self, path: &str, metadata_json: &str) -> ToolResult<String> {
        let updates = parse_metadata_json(metadata_json)?;
        let abs = self.vault.validate_note(path)?;
        let text = self.editor.update_metadata(&abs, updates)?;
        self.editor.save(&abs, &text)?;
        Ok(format!("Updated metadata in {path}"))
    }

    pub fn append_to_note(&self, params: &AppendParams) -> ToolResult<String> {
        let abs = self.vault.validate_note(&params.path)?;
        let subsection = params.subsection.as_deref().filter(|s| !s.trim().is_empty());
        let created = self.editor.update_body(&abs, |body| {
            let outcome = append_to_section(body, &params.content, subsection);
            Ok((outcome.body, outcome.created_section))
        })?;

        let path = &params.path;
        Ok(match subsection {
            Some(s) if created => {
                format!("Created subsection '{s}' and appended content in {path}")
            }
            Some(s) => format!("Appended content to subsection '{s}' in {path}"),
            None => format!("Appended content to {path}"),
        })
    }

    pub fn update_task_status(&self, params: &TaskStatusParams) -> ToolResult<String> {
        let abs = self.vault.validate_note(&params.path)?;
        self.editor.update_body(&abs, |body| {
            set_task_status(body, &params.task_pattern, params.completed)
        })?;
        let status = if params.completed {
            "completed"
        } else {
            "incomplete"
        };
        Ok(format!("Marked task as {status}: {}", params.task_pattern))
    }

    fn join_relative(&self, paths: &[std::path::PathBuf]) -> String {
        paths
            .iter()
            .map(|p| self.vault.relative(p))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn excerpt(content: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = content.lines().collect();
    if lines.len() <= max_lines {
        return content.to_string();
    }
    format!(
        "{}\n\n({} more lines)",
        lines[..max_lines].join("\n"),
        lines.len() - max_lines
    )
}

/// A JSON object payload as frontmatter updates
pub fn parse_metadata_json(raw: &str) -> ToolResult<Metadata> {
    let value: JsonValue = serde_json::from_str(raw)
        .map_err(|e| ToolError::invalid_params(format!("Invalid JSON: {e}")))?;
    let JsonValue::Object(map) = value else {
        return Err(ToolError::invalid_params("metadata_json must be a JSON object"));
    };
    Ok(map
        .into_iter()
        .map(|(key, value)| (key, FrontmatterValue::from(value)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use mdvault_core::FixedClock;
    use std::fs;
    use tempfile::TempDir;

    fn tools(dir: &TempDir) -> NoteTools<FixedClock> {
        let now = NaiveDate::from_ymd_opt(2026, 2, 18)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        NoteTools::new(
            Vault::open(dir.path()).unwrap(),
            NoteEditor::with_clock(FixedClock(now)),
        )
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("a\nb", 5), "a\nb");
        assert_eq!(excerpt("a\nb\nc\nd", 2), "a\nb\n\n(2 more lines)");
    }

    #[test]
    fn test_parse_metadata_json() {
        let meta = parse_metadata_json(r#"{"status": "done", "tags": ["a"]}"#).unwrap();
        assert_eq!(meta.get("status").and_then(|v| v.as_str()), Some("done"));

        let err = parse_metadata_json("[1, 2]").unwrap_err();
        assert_eq!(err.to_string(), "metadata_json must be a JSON object");

        let err = parse_metadata_json("{oops").unwrap_err();
        assert!(err.to_string().contains("Invalid JSON"));
    }

    #[test]
    fn test_list_notes_and_folders() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("Projects/sub")).unwrap();
        fs::create_dir_all(dir.path().join(".obsidian")).unwrap();
        fs::write(dir.path().join("b.md"), "b").unwrap();
        fs::write(dir.path().join("Projects/a.md"), "a").unwrap();
        fs::write(dir.path().join("Projects/notes.txt"), "x").unwrap();

        let tools = tools(&dir);
        assert_eq!(tools.list_notes(None).unwrap(), "Projects/a.md\nb.md");
        assert_eq!(tools.list_notes(Some("Projects")).unwrap(), "Projects/a.md");
        assert_eq!(tools.list_folders(None).unwrap(), "Projects");
        assert_eq!(tools.list_folders(Some("Projects/sub")).unwrap(), "No folders found");
    }

    #[test]
    fn test_append_messages() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("n.md"), "# Title\n").unwrap();
        let tools = tools(&dir);

        let params = AppendParams {
            path: "n.md".into(),
            content: "first".into(),
            subsection: Some("Log".into()),
        };
        assert_eq!(
            tools.append_to_note(&params).unwrap(),
            "Created subsection 'Log' and appended content in n.md"
        );
        let params = AppendParams {
            content: "second".into(),
            ..params
        };
        assert_eq!(
            tools.append_to_note(&params).unwrap(),
            "Appended content to subsection 'Log' in n.md"
        );

        let text = fs::read_to_string(dir.path().join("n.md")).unwrap();
        assert_eq!(text.matches("## Log").count(), 1);
        assert!(text.contains("updated_at: 2026-02-18 09:30:00"));
    }

    #[test]
    fn test_task_toggle_message() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("t.md"), "- [ ] ship it\n").unwrap();
        let tools = tools(&dir);

        let params = TaskStatusParams {
            path: "t.md".into(),
            task_pattern: "ship".into(),
            completed: true,
        };
        assert_eq!(
            tools.update_task_status(&params).unwrap(),
            "Marked task as completed: ship"
        );
        let text = fs::read_to_string(dir.path().join("t.md")).unwrap();
        assert!(text.contains("- [x] ship it"));
    }

    #[test]
    fn test_read_metadata_as_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("m.md"), "---\ntitle: T\n---\nbody\n").unwrap();
        let json = tools(&dir).read_metadata("m.md").unwrap();
        let value: JsonValue = serde_json::from_str(&json).unwrap();
        assert_eq!(value["title"], "T");
    }
}
