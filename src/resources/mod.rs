//! Link primitives: request resolution, conflict handling, link creation.
pub mod helpers;
pub mod symlink;

use std::path::PathBuf;

use crate::logging::LinkStatus;

/// Kind of link that was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// A plain symlink to a file.
    File,
    /// A symlink to a directory.
    Directory {
        /// Whether the platform's explicit directory hint was used.
        hinted: bool,
    },
}

/// Terminal state of one link request.
///
/// # Examples
///
/// ```
/// use dotlink_cli::logging::LinkStatus;
/// use dotlink_cli::resources::{LinkKind, LinkOutcome};
///
/// let created = LinkOutcome::Created { kind: LinkKind::File, backup: None };
/// assert_eq!(created.status(), LinkStatus::Created);
/// assert_eq!(LinkOutcome::Skipped.status(), LinkStatus::Skipped);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// The link now exists.
    Created {
        /// File or directory link.
        kind: LinkKind,
        /// Where the previous destination was moved, if it was backed up.
        backup: Option<PathBuf>,
    },
    /// The destination existed and was left alone.
    Skipped,
    /// The source does not exist; nothing was touched.
    SourceMissing,
    /// Dry-run mode; nothing was touched.
    DryRun,
    /// Removal, backup, prompt, or link creation failed.
    Failed {
        /// Description of the underlying error.
        reason: String,
    },
}

impl LinkOutcome {
    /// Summary status for this outcome.
    #[must_use]
    pub const fn status(&self) -> LinkStatus {
        match self {
            Self::Created { backup: None, .. } => LinkStatus::Created,
            Self::Created {
                backup: Some(_), ..
            } => LinkStatus::BackedUp,
            Self::Skipped => LinkStatus::Skipped,
            Self::SourceMissing => LinkStatus::Missing,
            Self::DryRun => LinkStatus::DryRun,
            Self::Failed { .. } => LinkStatus::Failed,
        }
    }

    /// Extra detail for the summary line, if any.
    #[must_use]
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::Created {
                backup: Some(path), ..
            } => Some(format!("backup: {}", path.display())),
            Self::Failed { reason } => Some(reason.clone()),
            _ => None,
        }
    }
}
