//! Daily notes
//!
//! Today's note lives at a strftime template relative to the vault. Creation
//! is delegated to the notes CLI so its template applies; appends go through
//! the local pipeline.

use crate::delegate::{CommandRunner, MdvArgs};
use crate::error::{ToolError, ToolResult};
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use mdvault_core::{append_to_section, Clock, Metadata, NoteEditor, SystemClock, Vault, VaultError};
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::{info, warn};

pub struct DailyTools<C = SystemClock> {
    vault: Vault,
    editor: NoteEditor<C>,
    runner: Arc<dyn CommandRunner>,
    daily_format: String,
}

impl<C: Clock> DailyTools<C> {
    pub fn new(
        vault: Vault,
        editor: NoteEditor<C>,
        runner: Arc<dyn CommandRunner>,
        daily_format: impl Into<String>,
    ) -> Self {
        Self {
            vault,
            editor,
            runner,
            daily_format: daily_format.into(),
        }
    }

    /// Vault-relative path of the daily note for `date`
    pub fn daily_note_path(&self, date: NaiveDate) -> ToolResult<String> {
        let items: Vec<Item<'_>> = StrftimeItems::new(&self.daily_format).collect();
        if items.iter().any(|item| matches!(item, Item::Error)) {
            return Err(ToolError::invalid_params(format!(
                "invalid daily note format: {}",
                self.daily_format
            )));
        }
        let mut path = String::new();
        write!(path, "{}", date.format_with_items(items.into_iter())).map_err(|_| {
            ToolError::invalid_params(format!("invalid daily note format: {}", self.daily_format))
        })?;
        Ok(path)
    }

    /// Append to today's daily note, creating it first if needed
    pub fn add_to_daily_note(&self, content: &str, subsection: Option<&str>) -> ToolResult<String> {
        let today = self.editor.clock().today();
        let relative = self.daily_note_path(today)?;
        let abs = self.vault.resolve(&relative).map_err(VaultError::from)?;

        if !abs.exists() {
            let args = MdvArgs::new(["new", "daily", "--batch"]);
            if let Err(e) = self.runner.run(args.as_slice()) {
                warn!("Daily note template failed, writing a stub: {}", e);
            }
            if !abs.exists() {
                let stub = format!("# {}\n\n", today.format("%Y-%m-%d"));
                self.editor.write_note(&abs, Metadata::new(), &stub)?;
                info!("Created daily note stub {}", relative);
            }
        }
        let abs = self.vault.validate_note(&relative)?;

        let subsection = subsection.filter(|s| !s.trim().is_empty());
        let created = self.editor.update_body(&abs, |body| {
            let outcome = append_to_section(body, content, subsection);
            Ok((outcome.body, outcome.created_section))
        })?;

        Ok(match subsection {
            Some(s) if created => {
                format!("Created subsection '{s}' and appended content to {relative}")
            }
            Some(s) => format!("Appended content to subsection '{s}' in {relative}"),
            None => format!("Appended content to {relative}"),
        })
    }

    /// Ask the notes CLI to create a daily note from its template
    pub fn create_daily_note(
        &self,
        date: Option<&str>,
        extra_vars: &[(String, String)],
    ) -> ToolResult<String> {
        let args = MdvArgs::new(["new", "daily", "--batch"])
            .var("date", date)
            .vars(extra_vars);
        Ok(self.runner.run(args.as_slice())?)
    }

    /// Today's dashboard from the notes CLI
    pub fn today(&self) -> ToolResult<String> {
        Ok(self.runner.run(MdvArgs::new(["today"]).as_slice())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DelegateError;
    use mdvault_core::{FixedClock, FrontmatterValue};
    use tempfile::TempDir;

    struct FailingRunner;

    impl CommandRunner for FailingRunner {
        fn run(&self, _args: &[String]) -> Result<String, DelegateError> {
            Err(DelegateError::ExecutableNotFound {
                executable: "mdv".into(),
            })
        }
    }

    fn tools(dir: &TempDir, format: &str) -> DailyTools<FixedClock> {
        let now = NaiveDate::from_ymd_opt(2026, 2, 18)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        DailyTools::new(
            Vault::open(dir.path()).unwrap(),
            NoteEditor::with_clock(FixedClock(now)),
            Arc::new(FailingRunner),
            format,
        )
    }

    #[test]
    fn test_daily_note_path() {
        let dir = TempDir::new().unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(
            tools(&dir, "Journal/%Y/%m-%d.md").daily_note_path(date).unwrap(),
            "Journal/2026/03-07.md"
        );
        assert!(matches!(
            tools(&dir, "daily/%Q.md").daily_note_path(date),
            Err(ToolError::InvalidParams(_))
        ));
    }

    #[test]
    fn test_stub_created_when_cli_unavailable() {
        let dir = TempDir::new().unwrap();
        let tools = tools(&dir, "Daily/%Y-%m-%d.md");

        let msg = tools.add_to_daily_note("did work", Some("Logs")).unwrap();
        assert_eq!(
            msg,
            "Created subsection 'Logs' and appended content to Daily/2026-02-18.md"
        );
        let text = std::fs::read_to_string(dir.path().join("Daily/2026-02-18.md")).unwrap();
        assert!(text.ends_with("# 2026-02-18\n\n## Logs\n\ndid work"));
    }

    #[test]
    fn test_stub_carries_creation_metadata() {
        let dir = TempDir::new().unwrap();
        let tools = tools(&dir, "Daily/%Y-%m-%d.md");

        tools.add_to_daily_note("did work", None).unwrap();
        let doc = tools
            .editor
            .load(&dir.path().join("Daily/2026-02-18.md"))
            .unwrap();
        assert_eq!(
            doc.metadata.get("created"),
            Some(&FrontmatterValue::Date(NaiveDate::from_ymd_opt(2026, 2, 18).unwrap()))
        );
        assert!(doc.metadata.get("updated_at").is_some_and(|v| v.is_timestamp()));
        assert!(doc.body.starts_with("# 2026-02-18\n"));
    }

    #[test]
    fn test_daily_path_cannot_escape_vault() {
        let dir = TempDir::new().unwrap();
        let tools = tools(&dir, "../%Y.md");
        assert!(tools.add_to_daily_note("x", None).is_err());
    }
}
