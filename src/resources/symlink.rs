//! Symlink resolution: one `(source, destination)` request from existence
//! check through conflict handling to link creation.
use std::io;
use std::path::{Path, PathBuf};

use super::helpers::{fs, path};
use super::{LinkKind, LinkOutcome};
use crate::error::{LinkError, PromptError};
use crate::logging::Log;
use crate::platform::Platform;
use crate::prompt::{self, ConflictDecision, Prompter};

/// Platform link operations, injectable for testing.
///
/// The directory hint is a capability query rather than a compile-time
/// branch so resolver logic can be exercised for both kinds of platform
/// on any host.
#[cfg_attr(test, mockall::automock)]
pub trait Linker {
    /// Whether directory links must be created with [`Linker::symlink_dir`].
    fn requires_directory_hint(&self) -> bool;

    /// Create a plain symlink at `link` pointing to `source`.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the link cannot be created.
    fn symlink(&self, source: &Path, link: &Path) -> io::Result<()>;

    /// Create a symlink at `link` pointing to the directory `source`, passing
    /// the platform's "target is a directory" flag.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the link cannot be created.
    fn symlink_dir(&self, source: &Path, link: &Path) -> io::Result<()>;
}

/// Production [`Linker`] backed by `std::os::*::fs`.
#[derive(Debug, Clone, Copy)]
pub struct SystemLinker {
    platform: Platform,
}

impl SystemLinker {
    /// Create a linker for `platform`.
    #[must_use]
    pub const fn new(platform: Platform) -> Self {
        Self { platform }
    }
}

impl Default for SystemLinker {
    fn default() -> Self {
        Self::new(Platform::detect())
    }
}

impl Linker for SystemLinker {
    fn requires_directory_hint(&self) -> bool {
        self.platform.requires_directory_hint()
    }

    fn symlink(&self, source: &Path, link: &Path) -> io::Result<()> {
        #[cfg(unix)]
        {
            std::os::unix::fs::symlink(source, link)
        }
        #[cfg(windows)]
        {
            std::os::windows::fs::symlink_file(source, link)
        }
        #[cfg(not(any(unix, windows)))]
        {
            let _ = (source, link);
            Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "symlinks are not supported on this platform",
            ))
        }
    }

    fn symlink_dir(&self, source: &Path, link: &Path) -> io::Result<()> {
        #[cfg(windows)]
        {
            std::os::windows::fs::symlink_dir(source, link)
        }
        #[cfg(not(windows))]
        {
            self.symlink(source, link)
        }
    }
}

/// A fully resolved link request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRequest {
    /// Absolute path the link will point at.
    pub source: PathBuf,
    /// Path where the link will be created, with `~` expanded.
    pub destination: PathBuf,
}

impl LinkRequest {
    /// Resolve a mapping entry: join `source` onto `base_dir` and expand `~`
    /// in `destination` to `home`.
    #[must_use]
    pub fn new(base_dir: &Path, source: &str, destination: &str, home: &Path) -> Self {
        Self {
            source: base_dir.join(source),
            destination: path::expand_home(destination, home),
        }
    }

    /// Human-readable description used in the summary.
    #[must_use]
    pub fn description(&self) -> String {
        format!(
            "{} -> {}",
            self.destination.display(),
            self.source.display()
        )
    }
}

/// How existing destinations are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    /// Ask the operator for every conflict.
    #[default]
    Ask,
    /// Apply the same decision to every conflict without asking.
    Always(ConflictDecision),
}

/// Resolves single link requests against the filesystem.
pub struct LinkResolver<'a> {
    log: &'a dyn Log,
    prompter: &'a dyn Prompter,
    linker: &'a dyn Linker,
    policy: ConflictPolicy,
    dry_run: bool,
}

impl std::fmt::Debug for LinkResolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkResolver")
            .field("log", &"<dyn Log>")
            .field("prompter", &"<dyn Prompter>")
            .field("linker", &"<dyn Linker>")
            .field("policy", &self.policy)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl<'a> LinkResolver<'a> {
    /// Create an interactive resolver that applies changes.
    #[must_use]
    pub const fn new(
        log: &'a dyn Log,
        prompter: &'a dyn Prompter,
        linker: &'a dyn Linker,
    ) -> Self {
        Self {
            log,
            prompter,
            linker,
            policy: ConflictPolicy::Ask,
            dry_run: false,
        }
    }

    /// Use `policy` for existing destinations.
    #[must_use]
    pub const fn with_policy(mut self, policy: ConflictPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Report what would happen without touching the filesystem.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Resolve one request to a terminal outcome.
    ///
    /// Never returns an error: every failure is logged and folded into
    /// [`LinkOutcome::Failed`] so the caller can move on to the next request.
    pub fn resolve(&self, request: &LinkRequest) -> LinkOutcome {
        let LinkRequest {
            source,
            destination,
        } = request;

        if !source.exists() {
            let missing = LinkError::MissingSource(source.clone());
            self.log.info(&format!("{missing}. Skipping."));
            return LinkOutcome::SourceMissing;
        }

        let mut backup = None;
        if fs::entry_exists(destination) {
            self.log.info(&format!(
                "Destination {} already exists.",
                destination.display()
            ));
            if self.dry_run {
                self.preview_conflict(request);
                return LinkOutcome::DryRun;
            }

            let decision = match self.decide(destination) {
                Ok(decision) => decision,
                Err(e) => {
                    let reason = format!("no decision for {}: {e}", destination.display());
                    self.log.error(&reason);
                    return LinkOutcome::Failed { reason };
                }
            };

            match decision {
                ConflictDecision::Overwrite => {
                    if let Err(e) = fs::remove_existing(destination) {
                        return self.fail(&e);
                    }
                    self.log.debug(&format!("removed {}", destination.display()));
                }
                ConflictDecision::Skip => {
                    self.log
                        .info(&format!("Skipping {}", destination.display()));
                    return LinkOutcome::Skipped;
                }
                ConflictDecision::Backup => match fs::backup_existing(destination) {
                    Ok(path) => {
                        self.log
                            .info(&format!("Backup created at {}", path.display()));
                        backup = Some(path);
                    }
                    Err(e) => return self.fail(&e),
                },
            }
        } else if self.dry_run {
            self.log.dry_run(&format!(
                "would create symlink from {} to {}",
                source.display(),
                destination.display()
            ));
            return LinkOutcome::DryRun;
        }

        match self.create(request) {
            Ok(kind) => LinkOutcome::Created { kind, backup },
            Err(e) => self.fail(&e),
        }
    }

    fn decide(&self, destination: &Path) -> Result<ConflictDecision, PromptError> {
        match self.policy {
            ConflictPolicy::Always(decision) => {
                self.log.debug(&format!(
                    "{}: {decision} (preselected)",
                    destination.display()
                ));
                Ok(decision)
            }
            ConflictPolicy::Ask => prompt::ask_decision(self.prompter, self.log, destination),
        }
    }

    fn preview_conflict(&self, request: &LinkRequest) {
        let action = match self.policy {
            ConflictPolicy::Ask => "would ask whether to overwrite, skip, or backup".to_string(),
            ConflictPolicy::Always(decision) => format!("would {decision}"),
        };
        self.log.dry_run(&format!(
            "{action} {}, then link it to {}",
            request.destination.display(),
            request.source.display()
        ));
    }

    fn create(&self, request: &LinkRequest) -> Result<LinkKind, LinkError> {
        fs::ensure_parent_dir(&request.destination)?;
        if request.source.is_dir() {
            create_directory_link(self.linker, self.log, &request.source, &request.destination)
        } else {
            create_file_link(self.linker, self.log, &request.source, &request.destination)
        }
    }

    fn fail(&self, error: &LinkError) -> LinkOutcome {
        let reason = error.to_string();
        self.log.error(&reason);
        LinkOutcome::Failed { reason }
    }
}

/// Create a plain symlink at `destination` pointing to the file `source`.
///
/// # Errors
///
/// Returns [`LinkError::Create`] carrying the OS error.
pub fn create_file_link(
    linker: &dyn Linker,
    log: &dyn Log,
    source: &Path,
    destination: &Path,
) -> Result<LinkKind, LinkError> {
    log.info(&format!(
        "Creating symlink from {} to {}",
        source.display(),
        destination.display()
    ));
    linker
        .symlink(source, destination)
        .map_err(|e| create_error(source, destination, e))?;
    Ok(LinkKind::File)
}

/// Create a symlink at `destination` pointing to the directory `source`,
/// using the directory hint where the platform requires one.
///
/// # Errors
///
/// Returns [`LinkError::Create`] carrying the OS error.
pub fn create_directory_link(
    linker: &dyn Linker,
    log: &dyn Log,
    source: &Path,
    destination: &Path,
) -> Result<LinkKind, LinkError> {
    let hinted = linker.requires_directory_hint();
    let result = if hinted {
        log.info(&format!(
            "Creating directory symlink (Windows) from {} to {}",
            source.display(),
            destination.display()
        ));
        linker.symlink_dir(source, destination)
    } else {
        log.info(&format!(
            "Creating symlink from {} to {}",
            source.display(),
            destination.display()
        ));
        linker.symlink(source, destination)
    };
    result.map_err(|e| create_error(source, destination, e))?;
    Ok(LinkKind::Directory { hinted })
}

fn create_error(source: &Path, destination: &Path, error: io::Error) -> LinkError {
    LinkError::Create {
        from: source.to_path_buf(),
        to: destination.to_path_buf(),
        source: error,
    }
}
