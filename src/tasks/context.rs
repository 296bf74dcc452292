//! Collaborators shared by every link request in a run.
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use crate::logging::Log;
use crate::prompt::{Prompter, StdinPrompter};
use crate::resources::symlink::{ConflictPolicy, LinkResolver, Linker, SystemLinker};

/// Shared context for link processing.
pub struct Context {
    /// Logger for output and link recording.
    pub log: Arc<dyn Log>,
    /// User's home directory, substituted for a leading `~`.
    pub home: PathBuf,
    /// Source of answers for conflict prompts.
    pub prompter: Box<dyn Prompter>,
    /// Platform link operations (injectable for testing).
    pub linker: Box<dyn Linker>,
    /// Whether to perform a dry run (preview changes without applying).
    pub dry_run: bool,
    /// How existing destinations are handled.
    pub policy: ConflictPolicy,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("log", &"<dyn Log>")
            .field("home", &self.home)
            .field("prompter", &"<dyn Prompter>")
            .field("linker", &"<dyn Linker>")
            .field("dry_run", &self.dry_run)
            .field("policy", &self.policy)
            .finish()
    }
}

impl Context {
    /// Creates a context that prompts on the terminal and links on the
    /// real filesystem.
    ///
    /// # Errors
    ///
    /// Returns an error if the HOME (or USERPROFILE on Windows) environment
    /// variable is not set.
    pub fn new(log: Arc<dyn Log>, dry_run: bool, policy: ConflictPolicy) -> Result<Self> {
        Ok(Self {
            log,
            home: home_dir()?,
            prompter: Box::new(StdinPrompter),
            linker: Box::new(SystemLinker::default()),
            dry_run,
            policy,
        })
    }

    /// Replace the home directory.
    #[must_use]
    pub fn with_home(mut self, home: PathBuf) -> Self {
        self.home = home;
        self
    }

    /// Replace the prompt source.
    #[must_use]
    pub fn with_prompter(mut self, prompter: Box<dyn Prompter>) -> Self {
        self.prompter = prompter;
        self
    }

    /// Replace the platform link operations.
    #[must_use]
    pub fn with_linker(mut self, linker: Box<dyn Linker>) -> Self {
        self.linker = linker;
        self
    }

    /// A resolver borrowing this context's collaborators.
    #[must_use]
    pub fn resolver(&self) -> LinkResolver<'_> {
        LinkResolver::new(
            self.log.as_ref(),
            self.prompter.as_ref(),
            self.linker.as_ref(),
        )
        .with_policy(self.policy)
        .with_dry_run(self.dry_run)
    }
}

/// Resolve the user's home directory from the environment.
///
/// # Errors
///
/// Returns an error if the HOME (or USERPROFILE on Windows) environment
/// variable is not set.
pub fn home_dir() -> Result<PathBuf> {
    let home = if cfg!(target_os = "windows") {
        std::env::var("USERPROFILE")
            .or_else(|_| std::env::var("HOME"))
            .map_err(|_| {
                anyhow::anyhow!("neither USERPROFILE nor HOME environment variable is set")
            })?
    } else {
        std::env::var("HOME")
            .map_err(|_| anyhow::anyhow!("HOME environment variable is not set"))?
    };
    Ok(PathBuf::from(home))
}
