//! Domain-specific error types for the link engine.
//!
//! Internal modules return typed errors (e.g. [`ConfigError`], [`LinkError`])
//! while the command handlers at the CLI boundary convert them to
//! [`anyhow::Error`] via the standard `?` operator.
//!
//! [`ConfigError`] is fatal to a run. [`LinkError`] and [`PromptError`] are
//! contained to the request that raised them and reported as its outcome.
//!
//! [`InvalidResponse`] only drives the re-prompt loop and never leaves it.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise while loading the link mapping.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No mapping file exists at the expected location.
    #[error("Could not find mapping file {}", .path.display())]
    NotFound {
        /// Location that was checked.
        path: PathBuf,
    },

    /// The file exists but is not a table of tables of strings.
    #[error("Illegal format in {}: {message}", .path.display())]
    Malformed {
        /// Path to the offending file.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },

    /// An I/O error occurred while reading the mapping file.
    #[error("IO error reading mapping file {}: {source}", .path.display())]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// Errors that arise while resolving a single link request.
#[derive(Error, Debug)]
pub enum LinkError {
    /// The resolved source path does not exist.
    #[error("Source {} does not exist", .0.display())]
    MissingSource(PathBuf),

    /// The symlink itself could not be created.
    #[error("Failed to create symlink from {} to {}: {source}", .from.display(), .to.display())]
    Create {
        /// Path the link should point at.
        from: PathBuf,
        /// Path where the link should have been created.
        to: PathBuf,
        /// Underlying OS error.
        source: io::Error,
    },

    /// The parent directory of the destination could not be created.
    #[error("Failed to create parent directory {}: {source}", .path.display())]
    ParentDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying OS error.
        source: io::Error,
    },

    /// An existing destination could not be removed for overwrite.
    #[error("Failed to remove {}: {source}", .path.display())]
    Remove {
        /// Destination that could not be removed.
        path: PathBuf,
        /// Underlying OS error.
        source: io::Error,
    },

    /// An existing destination could not be renamed to its backup path.
    #[error("Failed to back up {} to {}: {source}", .path.display(), .backup.display())]
    Backup {
        /// Destination that should have been moved.
        path: PathBuf,
        /// Intended backup location.
        backup: PathBuf,
        /// Underlying OS error.
        source: io::Error,
    },

    /// The backup path is already occupied; nothing was moved.
    #[error("Backup path {} already exists", .0.display())]
    BackupExists(PathBuf),
}

/// Errors that prevent the conflict prompt from producing a decision.
#[derive(Error, Debug)]
pub enum PromptError {
    /// Standard input reached end-of-file before a valid answer was given.
    #[error("input closed before a decision was made")]
    InputClosed,

    /// Reading from or writing to the terminal failed.
    #[error("prompt I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// A conflict response that is not one of `o`, `s`, or `b`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid input. Please enter 'o', 's', or 'b'.")]
pub struct InvalidResponse {
    /// The raw text the operator entered.
    pub input: String,
}
