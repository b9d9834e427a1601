//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `import`: Load translation files and reconcile them into the store
//! - `list`: Query stored translation keys
//! - `domains`: List the domains present in the store
//! - `init`: Initialize a configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Import(cmd)) => cmd.common.verbose,
            Some(Command::List(cmd)) => cmd.common.verbose,
            Some(Command::Domains(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all store commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Translation database path (overrides config file)
    #[arg(long, env = "TRANSLOADER_DATABASE")]
    pub database: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ImportCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Delete all stored translations before importing
    #[arg(short, long)]
    pub clear: bool,

    /// Overwrite stored messages with the ones from the files
    #[arg(short, long)]
    pub force: bool,

    /// Resource root to scan (overrides config file)
    /// Can be specified multiple times: --root app --root vendor
    #[arg(long = "root", value_name = "DIR")]
    pub roots: Vec<PathBuf>,

    /// Reconcile against an empty in-memory store; nothing is persisted
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct ListCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Locale to check (repeatable, default: managed locales)
    #[arg(long = "locale", value_name = "LOCALE")]
    pub locales: Vec<String>,

    /// Exact domain
    #[arg(long)]
    pub domain: Option<String>,

    /// Substring of the translation key
    #[arg(long, value_name = "TEXT")]
    pub key: Option<String>,

    /// Substring of a message
    #[arg(long, value_name = "TEXT")]
    pub label: Option<String>,

    /// Only keys missing a message in a checked locale
    #[arg(long)]
    pub untranslated: bool,
}

#[derive(Debug, Args)]
pub struct DomainsCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Import translation files into the translation store
    Import(ImportCommand),
    /// List stored translation keys matching a filter
    List(ListCommand),
    /// List the domains present in the translation store
    Domains(DomainsCommand),
    /// Initialize a new .transloaderrc.json configuration file
    Init,
}
