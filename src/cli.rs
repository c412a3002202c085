use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_PATH: &str = ".env";

#[derive(Parser, Debug)]
#[command(author, version, about = "Currency rates API and refresh worker")]
pub struct Cli {
    /// Path to the env file holding the configuration
    #[arg(
        short,
        long,
        value_hint = ValueHint::FilePath,
        default_value = DEFAULT_CONFIG_PATH,
        global = true
    )]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Serve the HTTP API, with the refresh worker unless it is disabled
    Serve,

    /// Run only the refresh worker, without binding an HTTP port
    Worker,
}

impl Cli {
    /// The selected mode; `serve` when no subcommand is given
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }

    /// Loads the env file into the process environment
    ///
    /// A missing default `.env` is fine; an explicitly chosen file that cannot
    /// be read is returned as an error.
    pub fn load_config(&self) -> Result<(), dotenvy::Error> {
        let is_default = self.config == PathBuf::from(DEFAULT_CONFIG_PATH);

        match dotenvy::from_path(&self.config) {
            Err(e) if e.not_found() && is_default => Ok(()),
            result => result,
        }
    }
}
