//! Command-line definition and interactive session startup

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::io;
use std::path::PathBuf;
use tracing::debug;

use crate::config::Config;
use crate::menu::Menu;
use crate::task::{Storage, TaskStore};

/// Interactive task tracker. Run without a subcommand to open the menu.
#[derive(Parser)]
#[command(name = "taskmgr", version, about)]
pub struct Cli {
    /// Data file read at startup and written at exit
    #[arg(short, long, env = "TASKMGR_FILE")]
    pub file: Option<PathBuf>,

    /// Path to the config file
    #[arg(long, env = "TASKMGR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Reject statuses and priorities outside the known sets
    #[arg(long)]
    pub strict: bool,

    /// Disable coloured menu output
    #[arg(long)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Load the config file and apply command-line overrides
    pub fn resolve_config(&self) -> Result<Config> {
        let config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        Ok(self.apply_overrides(config))
    }

    pub fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(file) = &self.file {
            config.data_file = file.clone();
        }
        if self.strict {
            config.strict = true;
        }
        if self.no_color {
            config.color = false;
        }
        config
    }
}

/// Build the session from `config` and run the menu on stdin/stdout
pub fn run_interactive(config: &Config) -> Result<()> {
    debug!("Starting session with {:?}", config);

    let store = if config.strict {
        TaskStore::strict()
    } else {
        TaskStore::new()
    };
    let storage =
        Storage::new(&config.data_file, &config.export_dir).with_backup(config.backup);

    let stdin = io::stdin();
    let mut menu = Menu::new(store, storage, stdin.lock(), io::stdout()).with_color(config.color);
    menu.load()?;
    menu.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_no_arguments() {
        let cli = Cli::try_parse_from(["taskmgr"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.strict);
        assert!(!cli.no_color);
    }

    #[test]
    fn test_parse_completion() {
        let cli = Cli::try_parse_from(["taskmgr", "completion", "bash"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Completion { shell: Shell::Bash })
        ));
    }

    #[test]
    fn test_overrides_replace_config_values() {
        let cli = Cli::try_parse_from([
            "taskmgr",
            "--file",
            "other.csv",
            "--strict",
            "--no-color",
        ])
        .unwrap();
        let config = cli.apply_overrides(Config::default());
        assert_eq!(config.data_file, PathBuf::from("other.csv"));
        assert!(config.strict);
        assert!(!config.color);
    }

    #[test]
    fn test_absent_flags_keep_config_values() {
        let cli = Cli::try_parse_from(["taskmgr"]).unwrap();
        let base = Config {
            strict: true,
            ..Config::default()
        };
        let config = cli.apply_overrides(base.clone());
        assert_eq!(config, base);
    }
}
