//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `validate-translations`: cross-check locales for missing keys and empty values
//! - `clean-unused-translations`: report unused keys, and remove them with `--clean`
//! - `init`: write a default configuration file

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
            Some(Command::Validate(cmd)) => cmd.args.common.verbose,
            Some(Command::Clean(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Directory holding `<locale>.json` catalogs (overrides config file)
    #[arg(long)]
    pub locales_root: Option<PathBuf>,

    /// Source corpus root directory (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Locale to process; repeat for several (overrides config file)
    #[arg(long = "locale", value_name = "CODE")]
    pub locales: Vec<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Where to write the JSON report
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Skip writing the JSON report
    #[arg(long, conflicts_with = "report")]
    pub no_report: bool,
}

#[derive(Debug, Args)]
pub struct ValidateCommand {
    #[command(flatten)]
    pub args: ValidateArgs,
}

#[derive(Debug, Parser)]
pub struct CleanArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Actually remove unused keys, after writing backups (default is dry-run)
    #[arg(long, visible_alias = "apply")]
    pub clean: bool,
}

#[derive(Debug, Args)]
pub struct CleanCommand {
    #[command(flatten)]
    pub args: CleanArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check that all locales define the same keys and no value is empty
    #[command(name = "validate-translations", visible_alias = "validate")]
    Validate(ValidateCommand),
    /// Find translation keys no source file references, and optionally remove them
    #[command(name = "clean-unused-translations", visible_alias = "clean")]
    Clean(CleanCommand),
    /// Initialize a new .lexicatrc.json configuration file
    Init,
}
