//! `dotlink` binary: parses the command line and dispatches to a command.
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use dotlink_cli::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();

    match args.command {
        cli::Command::Link(opts) => {
            logging::init_subscriber(args.verbose, "link");
            let log = Arc::new(logging::Logger::new("link"));
            commands::link::run(&args.global, &opts, &log)
        }
        cli::Command::Example => {
            commands::example::run();
            Ok(())
        }
        cli::Command::Version => {
            commands::version::run();
            Ok(())
        }
    }
}
