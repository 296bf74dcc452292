//! Command-line interface definitions.
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::prompt::ConflictDecision;

/// Top-level CLI entry point for the dotfile linker.
#[derive(Parser, Debug)]
#[command(
    name = "dotlink",
    about = "Link dotfiles into place, resolving conflicts interactively",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options accepted by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Directory holding the mapping file (defaults to $DOTLINK_ROOT, then the current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Path to the mapping file (overrides --root)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the links described by the mapping file
    Link(LinkOpts),
    /// Print an example mapping file
    Example,
    /// Print version information
    Version,
}

/// Options for the `link` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct LinkOpts {
    /// Resolve every existing destination the same way instead of asking
    #[arg(long, value_enum)]
    pub on_conflict: Option<ConflictChoice>,
}

/// Preselected answer for `--on-conflict`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictChoice {
    /// Remove the existing destination
    Overwrite,
    /// Leave the existing destination alone
    Skip,
    /// Move the existing destination to `<destination>.bak`
    Backup,
}

impl From<ConflictChoice> for ConflictDecision {
    fn from(choice: ConflictChoice) -> Self {
        match choice {
            ConflictChoice::Overwrite => Self::Overwrite,
            ConflictChoice::Skip => Self::Skip,
            ConflictChoice::Backup => Self::Backup,
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_link_defaults_to_asking() {
        let cli = Cli::parse_from(["dotlink", "link"]);
        assert!(
            matches!(&cli.command, Command::Link(_)),
            "Expected Link command"
        );
        if let Command::Link(opts) = cli.command {
            assert_eq!(opts.on_conflict, None);
        }
        assert!(!cli.global.dry_run);
    }

    #[test]
    fn parse_link_on_conflict() {
        let cli = Cli::parse_from(["dotlink", "link", "--on-conflict", "backup"]);
        assert!(
            matches!(&cli.command, Command::Link(_)),
            "Expected Link command"
        );
        if let Command::Link(opts) = cli.command {
            assert_eq!(opts.on_conflict, Some(ConflictChoice::Backup));
        }
    }

    #[test]
    fn parse_rejects_unknown_conflict_choice() {
        let result = Cli::try_parse_from(["dotlink", "link", "--on-conflict", "merge"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_dry_run_short() {
        let cli = Cli::parse_from(["dotlink", "-d", "link"]);
        assert!(cli.global.dry_run);
    }

    #[test]
    fn parse_config_after_subcommand() {
        let cli = Cli::parse_from(["dotlink", "link", "--config", "/tmp/links.toml"]);
        assert_eq!(cli.global.config, Some(PathBuf::from("/tmp/links.toml")));
    }

    #[test]
    fn parse_root_override() {
        let cli = Cli::parse_from(["dotlink", "--root", "/tmp/dotfiles", "link"]);
        assert_eq!(cli.global.root, Some(PathBuf::from("/tmp/dotfiles")));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::parse_from(["dotlink", "-v", "link"]);
        assert!(cli.verbose);
    }

    #[test]
    fn parse_example_and_version() {
        assert!(matches!(
            Cli::parse_from(["dotlink", "example"]).command,
            Command::Example
        ));
        assert!(matches!(
            Cli::parse_from(["dotlink", "version"]).command,
            Command::Version
        ));
    }

    #[test]
    fn choice_maps_to_decision() {
        assert_eq!(
            ConflictDecision::from(ConflictChoice::Overwrite),
            ConflictDecision::Overwrite
        );
        assert_eq!(
            ConflictDecision::from(ConflictChoice::Skip),
            ConflictDecision::Skip
        );
        assert_eq!(
            ConflictDecision::from(ConflictChoice::Backup),
            ConflictDecision::Backup
        );
    }
}
