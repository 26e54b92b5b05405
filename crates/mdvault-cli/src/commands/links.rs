use crate::cli::Commands;
use anyhow::{bail, Result};
use mdvault_core::Clock;
use mdvault_tools::VaultTools;

pub fn execute<C: Clock>(tools: &VaultTools<C>, command: Commands) -> Result<String> {
    let output = match command {
        Commands::Backlinks { path } => tools.links.find_backlinks(&path)?,
        Commands::Links { path } => tools.links.find_outgoing_links(&path)?,
        Commands::Orphans { folder } => tools.links.find_orphans(folder.as_deref())?,
        Commands::Related { path, limit } => tools.links.find_related_notes(&path, limit)?,
        _ => bail!("not a link command"),
    };
    Ok(output)
}
