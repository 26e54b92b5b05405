//! # mdvault tools
//!
//! Caller-facing operations over a Markdown vault, grouped the way a tool
//! host exposes them:
//!
//! - [`NoteTools`]: read, list, metadata, append, task toggling
//! - [`SearchTools`]: case-insensitive text search
//! - [`LinkTools`]: backlinks, outgoing links, orphans, related notes
//! - [`DailyTools`]: today's note and daily templates
//! - [`ZettelTools`]: zettel and literature note creation
//! - [`WorkflowTools`]: projects, tasks, focus, context, reports and macros
//!
//! Operations return a human-readable `String` on success and a
//! [`ToolError`] otherwise. Anything the notes CLI owns goes through a
//! [`CommandRunner`].

pub mod daily;
pub mod delegate;
pub mod error;
pub mod links;
pub mod notes;
pub mod search;
pub mod workflow;
pub mod zettel;

pub use daily::DailyTools;
pub use delegate::{parse_var, CommandRunner, FocusContext, MdvArgs, MdvCli};
pub use error::{DelegateError, ToolError, ToolResult};
pub use links::{LinkTools, DEFAULT_RELATED_LIMIT};
pub use notes::{AppendParams, NoteTools, TaskStatusParams};
pub use search::{LineMatch, NoteMatches, SearchTools};
pub use workflow::{ProjectParams, ReportPeriod, TaskParams, WorkflowTools, DEFAULT_ACTIVITY_DAYS};
pub use zettel::{LiteratureParams, ZettelParams, ZettelTools};

use mdvault_config::VaultConfig;
use mdvault_core::{Clock, NoteEditor, SystemClock, Vault};
use std::sync::Arc;

/// Every tool set over one vault, sharing a clock and a notes CLI runner
pub struct VaultTools<C = SystemClock> {
    pub notes: NoteTools<C>,
    pub search: SearchTools,
    pub links: LinkTools,
    pub daily: DailyTools<C>,
    pub zettel: ZettelTools<C>,
    pub workflow: WorkflowTools,
}

impl VaultTools<SystemClock> {
    /// Open the configured vault and use the configured notes CLI
    pub fn from_config(config: &VaultConfig) -> ToolResult<Self> {
        let vault = Vault::open(&config.vault_path)?;
        let runner = Arc::new(MdvCli::from_config(config));
        Ok(Self::new(vault, &config.daily_format, runner, SystemClock))
    }
}

impl<C: Clock + Clone> VaultTools<C> {
    pub fn new(
        vault: Vault,
        daily_format: &str,
        runner: Arc<dyn CommandRunner>,
        clock: C,
    ) -> Self {
        let editor = NoteEditor::with_clock(clock);
        Self {
            notes: NoteTools::new(vault.clone(), editor.clone()),
            search: SearchTools::new(vault.clone()),
            links: LinkTools::new(vault.clone()),
            daily: DailyTools::new(vault.clone(), editor.clone(), runner.clone(), daily_format),
            zettel: ZettelTools::new(vault, editor, runner.clone()),
            workflow: WorkflowTools::new(runner),
        }
    }

    pub fn vault(&self) -> &Vault {
        self.notes.vault()
    }
}
