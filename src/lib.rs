//! Dotfile linker.
//!
//! Reads a declarative mapping of source paths to destinations and links
//! each destination to its source, asking what to do when something is
//! already in the way: overwrite it, skip it, or move it aside to a `.bak`
//! backup.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: load and validate the TOML mapping
//! - **[`resources`]**: resolve one link request, from conflict handling to link creation
//! - **[`tasks`]**: walk a mapping and record every outcome
//! - **[`commands`]**: top-level subcommand orchestration (`link`, `example`, `version`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod platform;
pub mod prompt;
pub mod resources;
pub mod tasks;
