use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "autosign")]
#[command(version)]
#[command(about = "Daily HayFrp sign-in for a list of accounts")]
pub struct Cli {
    /// TOML configuration file (defaults to ./config.toml when present)
    #[arg(short, long, global = true, env = "HAYFRP_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Run the cron schedule and the HTTP trigger (default)
    Serve,
    /// Sign every account once and exit
    Run,
}

impl Cli {
    pub fn subcommand(&self) -> Commands {
        self.command.unwrap_or(Commands::Serve)
    }
}
