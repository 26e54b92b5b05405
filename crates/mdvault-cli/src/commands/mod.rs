//! Subcommand handlers
//!
//! Each handler returns the text to print on stdout.

pub mod daily;
pub mod links;
pub mod notes;
pub mod workflow;
pub mod zettel;

use crate::cli::Commands;
use anyhow::Result;
use mdvault_core::Clock;
use mdvault_tools::VaultTools;

pub fn execute<C: Clock>(tools: &VaultTools<C>, command: Commands) -> Result<String> {
    match command {
        Commands::Read { .. }
        | Commands::Meta { .. }
        | Commands::List { .. }
        | Commands::Folders { .. }
        | Commands::Search { .. }
        | Commands::SetMeta { .. }
        | Commands::Append { .. }
        | Commands::Task { .. } => notes::execute(tools, command),

        Commands::Backlinks { .. }
        | Commands::Links { .. }
        | Commands::Orphans { .. }
        | Commands::Related { .. } => links::execute(tools, command),

        Commands::Daily(cmd) => daily::execute(tools, cmd),
        Commands::Zettel(cmd) => zettel::execute(tools, cmd),

        Commands::Focus(cmd) => workflow::focus(tools, cmd),
        Commands::Project(cmd) => workflow::project(tools, cmd),
        Commands::Context(cmd) => workflow::context(tools, cmd),
        Commands::Capture { name, text, vars } => {
            Ok(tools.workflow.capture(&name, &text, &vars.vars)?)
        }
        Commands::Report { month, week } => workflow::report(tools, month, week),
        Commands::Macro { name, args, vars } => {
            Ok(tools.workflow.run_macro(&name, &args, &vars.vars)?)
        }
    }
}
