//! Top-level subcommand orchestration.
pub mod example;
pub mod link;
pub mod version;
