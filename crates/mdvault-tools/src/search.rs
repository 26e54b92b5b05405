//! Case-insensitive text search over vault notes

use crate::error::{ToolError, ToolResult};
use mdvault_core::Vault;
use serde::Serialize;
use tracing::debug;

/// One matching line and its surrounding context
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineMatch {
    /// 1-based line number of the match
    pub line: usize,
    /// The matching line plus up to `context_lines` on either side
    pub context: String,
}

/// Matches within a single note
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteMatches {
    pub path: String,
    pub matches: Vec<LineMatch>,
}

#[derive(Debug, Clone)]
pub struct SearchTools {
    vault: Vault,
}

impl SearchTools {
    pub fn new(vault: Vault) -> Self {
        Self { vault }
    }

    /// Notes containing `query`, each with its matching lines
    ///
    /// Unreadable notes are skipped.
    pub fn find(
        &self,
        query: &str,
        folder: Option<&str>,
        context_lines: usize,
    ) -> ToolResult<Vec<NoteMatches>> {
        if query.trim().is_empty() {
            return Err(ToolError::invalid_params("query must not be empty"));
        }
        let needle = query.to_lowercase();

        let mut results = Vec::new();
        for path in self.vault.notes(folder)? {
            let text = match self.vault.read_text(&path) {
                Ok(text) => text,
                Err(e) => {
                    debug!("Skipping note in search: {}", e);
                    continue;
                }
            };
            let matches = match_lines(&text, &needle, context_lines);
            if !matches.is_empty() {
                results.push(NoteMatches {
                    path: self.vault.relative(&path),
                    matches,
                });
            }
        }
        Ok(results)
    }

    /// Paths of matching notes, or per-line matches when `context_lines > 0`
    pub fn search_notes(
        &self,
        query: &str,
        folder: Option<&str>,
        context_lines: usize,
    ) -> ToolResult<String> {
        let results = self.find(query, folder, context_lines)?;
        if results.is_empty() {
            return Ok("No matches found".to_string());
        }
        if context_lines == 0 {
            return Ok(results
                .iter()
                .map(|r| r.path.as_str())
                .collect::<Vec<_>>()
                .join("\n"));
        }
        Ok(results
            .iter()
            .map(|r| {
                let matches = r
                    .matches
                    .iter()
                    .map(|m| format!("Line {}:\n{}", m.line, m.context))
                    .collect::<Vec<_>>()
                    .join("\n\n");
                format!("\n### {}\n{}", r.path, matches)
            })
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

/// Lines containing `needle` (already lowercased)
fn match_lines(text: &str, needle: &str, context_lines: usize) -> Vec<LineMatch> {
    let lines: Vec<&str> = text.lines().collect();
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.to_lowercase().contains(needle))
        .map(|(i, _)| {
            let start = i.saturating_sub(context_lines);
            let end = (i + context_lines + 1).min(lines.len());
            LineMatch {
                line: i + 1,
                context: lines[start..end].join("\n"),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn vault_with_notes() -> (TempDir, SearchTools) {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("Projects")).unwrap();
        fs::write(dir.path().join("a.md"), "intro\nRust is fun\noutro\n").unwrap();
        fs::write(dir.path().join("Projects/b.md"), "nothing here\n").unwrap();
        fs::write(dir.path().join("Projects/c.md"), "learning rust\n").unwrap();
        let tools = SearchTools::new(Vault::open(dir.path()).unwrap());
        (dir, tools)
    }

    #[test]
    fn test_match_lines_context() {
        let matches = match_lines("a\nfoo\nb\nc\nfoo", "foo", 1);
        assert_eq!(
            matches,
            vec![
                LineMatch {
                    line: 2,
                    context: "a\nfoo\nb".into()
                },
                LineMatch {
                    line: 5,
                    context: "c\nfoo".into()
                },
            ]
        );
    }

    #[test]
    fn test_search_paths_only() {
        let (_dir, tools) = vault_with_notes();
        assert_eq!(
            tools.search_notes("RUST", None, 0).unwrap(),
            "Projects/c.md\na.md"
        );
        assert_eq!(
            tools.search_notes("rust", Some("Projects"), 0).unwrap(),
            "Projects/c.md"
        );
        assert_eq!(tools.search_notes("python", None, 0).unwrap(), "No matches found");
    }

    #[test]
    fn test_search_with_context() {
        let (_dir, tools) = vault_with_notes();
        let out = tools.search_notes("fun", None, 1).unwrap();
        assert_eq!(out, "\n### a.md\nLine 2:\nintro\nRust is fun\noutro");
    }

    #[test]
    fn test_empty_query_rejected() {
        let (_dir, tools) = vault_with_notes();
        assert!(matches!(
            tools.search_notes("  ", None, 0),
            Err(ToolError::InvalidParams(_))
        ));
    }
}
