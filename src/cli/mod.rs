//! CLI argument parsing

mod targets;

use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::{CommandFactory, FromArgMatches, Parser};

use crate::config::defaults;

pub use targets::{find_target, register_targets, PatternSource, RunTarget, RUN_TARGETS};

/// Execute runs on specific sets of Terraform Cloud workspaces
#[derive(Parser, Debug)]
#[command(name = "tfc-dispatch")]
#[command(version)]
#[command(about = "CLI to execute runs on specific sets of Terraform Cloud workspaces", long_about = None)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = defaults::LOG_LEVEL)]
    pub log_level: String,
}

/// A fully parsed command line
#[derive(Debug)]
pub struct Invocation {
    pub cli: Cli,
    pub target: &'static RunTarget,
    /// Wildcard pattern workspaces are matched against
    pub pattern: String,
}

impl Cli {
    /// Root command with every run target registered as a subcommand
    pub fn command_with_targets() -> clap::Command {
        register_targets(Self::command(), RUN_TARGETS)
            .subcommand_required(true)
            .arg_required_else_help(true)
    }

    /// Parse process arguments, exiting with usage on error
    pub fn parse_invocation() -> Invocation {
        Self::try_parse_invocation_from(std::env::args_os()).unwrap_or_else(|e| e.exit())
    }

    /// Parse the given arguments into an invocation
    pub fn try_parse_invocation_from<I, T>(args: I) -> Result<Invocation, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut command = Self::command_with_targets();
        let matches = command.try_get_matches_from_mut(args)?;
        let cli = Cli::from_arg_matches(&matches)?;

        let Some((name, sub_matches)) = matches.subcommand() else {
            return Err(command.error(ErrorKind::MissingSubcommand, "a subcommand is required"));
        };

        let target = find_target(name).ok_or_else(|| {
            command.error(
                ErrorKind::InvalidSubcommand,
                format!("unknown subcommand '{}'", name),
            )
        })?;

        let pattern = target.pattern(sub_matches).ok_or_else(|| {
            command.error(
                ErrorKind::MissingRequiredArgument,
                format!("'{}' requires a workspace filter", name),
            )
        })?;

        Ok(Invocation {
            cli,
            target,
            pattern,
        })
    }
}
