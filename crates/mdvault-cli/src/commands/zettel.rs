use crate::cli::ZettelCommand;
use anyhow::Result;
use mdvault_core::Clock;
use mdvault_tools::{LiteratureParams, VaultTools, ZettelParams};

pub fn execute<C: Clock>(tools: &VaultTools<C>, command: ZettelCommand) -> Result<String> {
    let output = match command {
        ZettelCommand::New {
            title,
            short_title,
            source,
            body,
            connections,
            vars,
        } => tools.zettel.create_zettel(&ZettelParams {
            title,
            short_title,
            source,
            body,
            connections,
            extra_vars: vars.vars,
        })?,
        ZettelCommand::Literature {
            title,
            short_title,
            authors,
            year,
            url,
            source_type,
            vars,
        } => tools.zettel.create_literature_note(&LiteratureParams {
            title,
            short_title,
            authors,
            year,
            url,
            source_type,
            extra_vars: vars.vars,
        })?,
    };
    Ok(output)
}
