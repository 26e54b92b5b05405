use crate::cli::Commands;
use anyhow::{bail, Result};
use mdvault_core::Clock;
use mdvault_tools::{AppendParams, TaskStatusParams, VaultTools};

pub fn execute<C: Clock>(tools: &VaultTools<C>, command: Commands) -> Result<String> {
    let output = match command {
        Commands::Read {
            path,
            max_lines: Some(max),
        } => tools.notes.read_note_excerpt(&path, max)?,
        Commands::Read { path, .. } => tools.notes.read_note(&path)?,
        Commands::Meta { path } => tools.notes.read_metadata(&path)?,
        Commands::List { folder } => tools.notes.list_notes(folder.as_deref())?,
        Commands::Folders { folder } => tools.notes.list_folders(folder.as_deref())?,
        Commands::Search {
            query,
            folder,
            context,
        } => tools
            .search
            .search_notes(&query, folder.as_deref(), context)?,
        Commands::SetMeta { path, json } => tools.notes.update_metadata(&path, &json)?,
        Commands::Append {
            path,
            content,
            subsection,
        } => tools.notes.append_to_note(&AppendParams {
            path,
            content,
            subsection,
        })?,
        Commands::Task {
            path,
            pattern,
            undo,
        } => tools.notes.update_task_status(&TaskStatusParams {
            path,
            task_pattern: pattern,
            completed: !undo,
        })?,
        _ => bail!("not a note command"),
    };
    Ok(output)
}
