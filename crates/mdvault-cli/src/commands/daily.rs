use crate::cli::DailyCommand;
use anyhow::Result;
use mdvault_core::Clock;
use mdvault_tools::VaultTools;

pub fn execute<C: Clock>(tools: &VaultTools<C>, command: DailyCommand) -> Result<String> {
    let output = match command {
        DailyCommand::Add {
            content,
            subsection,
        } => tools
            .daily
            .add_to_daily_note(&content, subsection.as_deref())?,
        DailyCommand::New { date, vars } => {
            tools.daily.create_daily_note(date.as_deref(), &vars.vars)?
        }
        DailyCommand::Today => tools.daily.today()?,
    };
    Ok(output)
}
