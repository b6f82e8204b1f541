//! taskmgr - Interactive terminal task tracker

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use taskmgr::cli::{self, Cli, Commands};

fn main() -> Result<()> {
    if std::env::var("TASKMGR_DEBUG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter("taskmgr=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = Cli::parse();

    if let Some(Commands::Completion { shell }) = &cli.command {
        generate(*shell, &mut Cli::command(), "taskmgr", &mut std::io::stdout());
        return Ok(());
    }

    let config = cli.resolve_config()?;
    cli::run_interactive(&config)
}
