//! bcp CLI entry point.

use anyhow::Result;
use clap::Parser;

use bcp::cli::{commands, Cli, Commands};
use bcp::infrastructure::config::ConfigLoader;
use bcp::infrastructure::logging::LoggerImpl;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(&cli).await {
        bcp::cli::handle_error(err, cli.json);
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let config = ConfigLoader::load_from_file(&cli.config)?;
    let _logger = LoggerImpl::init(&config.logging)?;

    match &cli.command {
        None | Some(Commands::Select) => commands::select::execute(&config).await,
        Some(Commands::Run(args)) => commands::run::execute(args, &config, cli.json).await,
        Some(Commands::List) => commands::list::execute(&config, cli.json),
    }
}
