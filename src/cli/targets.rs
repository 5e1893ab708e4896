//! Run targets: subcommand name to workspace pattern
//!
//! Every subcommand is a row in `RUN_TARGETS`; `register_targets` turns the
//! table into clap subcommands and `RunTarget::pattern` reads the wildcard
//! back out of the parsed matches.

use clap::builder::NonEmptyStringValueParser;
use clap::{Arg, ArgMatches, Command};

/// Where a target's wildcard pattern comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternSource {
    /// Pattern fixed by the subcommand
    Fixed(&'static str),
    /// Required flag whose value is used as a name prefix (`<value>*`)
    PrefixFlag {
        long: &'static str,
        short: char,
        help: &'static str,
    },
}

/// A subcommand that dispatches runs on a set of workspaces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunTarget {
    pub name: &'static str,
    pub about: &'static str,
    pub pattern: PatternSource,
}

/// All run targets, in the order they appear in `--help`
pub const RUN_TARGETS: &[RunTarget] = &[
    RunTarget {
        name: "baseline",
        about: "Execute a run on all baseline workspaces",
        pattern: PatternSource::Fixed("baseline-*"),
    },
    RunTarget {
        name: "inception",
        about: "Execute a run on all inception workspaces",
        pattern: PatternSource::Fixed("wl-inception-*"),
    },
    RunTarget {
        name: "custom",
        about: "Execute a run on all workspaces whose name starts with a prefix",
        pattern: PatternSource::PrefixFlag {
            long: "filter",
            short: 'b',
            help: "Use this filter to select workspaces (name prefix)",
        },
    },
];

impl RunTarget {
    /// Build the clap subcommand for this target
    pub fn subcommand(&self) -> Command {
        let cmd = Command::new(self.name).about(self.about);

        match self.pattern {
            PatternSource::Fixed(_) => cmd,
            PatternSource::PrefixFlag { long, short, help } => cmd.arg(
                Arg::new(long)
                    .long(long)
                    .short(short)
                    .help(help)
                    .value_name("PREFIX")
                    .required(true)
                    .value_parser(NonEmptyStringValueParser::new()),
            ),
        }
    }

    /// Wildcard pattern for this target given its parsed subcommand matches
    pub fn pattern(&self, matches: &ArgMatches) -> Option<String> {
        match self.pattern {
            PatternSource::Fixed(pattern) => Some(pattern.to_string()),
            PatternSource::PrefixFlag { long, .. } => matches
                .get_one::<String>(long)
                .map(|prefix| format!("{}*", prefix)),
        }
    }
}

/// Register every target as a subcommand of `root`
pub fn register_targets(root: Command, targets: &[RunTarget]) -> Command {
    targets
        .iter()
        .fold(root, |cmd, target| cmd.subcommand(target.subcommand()))
}

/// Look up a target by subcommand name
pub fn find_target(name: &str) -> Option<&'static RunTarget> {
    RUN_TARGETS.iter().find(|t| t.name == name)
}
