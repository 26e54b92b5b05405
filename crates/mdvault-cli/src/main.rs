use anyhow::Result;
use clap::Parser;
use tracing::debug;

use mdvault_cli::{cli::Cli, commands, init_logging, load_config};
use mdvault_tools::VaultTools;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let config = load_config(&cli)?;
    debug!("Using vault {}", config.vault_path.display());

    let tools = VaultTools::from_config(&config)?;
    let output = commands::execute(&tools, cli.command)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
