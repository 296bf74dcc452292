//! Core logging types: link entries, status, and the [`Log`] trait.

/// Result of one link request, kept for the run summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntry {
    /// Human-readable description, usually `destination -> source`.
    pub name: String,
    /// Final status of the request.
    pub status: LinkStatus,
    /// Optional detail message (e.g. backup path or error description).
    pub message: Option<String>,
}

/// Final status of a link request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    /// A link was created at a previously free destination, or after overwrite.
    Created,
    /// The old destination was moved aside and a link created in its place.
    BackedUp,
    /// The operator chose to keep the existing destination.
    Skipped,
    /// The source path does not exist.
    Missing,
    /// Dry-run mode; nothing was changed.
    DryRun,
    /// Removal, backup, or link creation failed.
    Failed,
}

impl LinkStatus {
    /// Every status, in summary order.
    pub const ALL: [Self; 6] = [
        Self::Created,
        Self::BackedUp,
        Self::Skipped,
        Self::Missing,
        Self::DryRun,
        Self::Failed,
    ];

    /// Short lowercase label used in log files and structured events.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::BackedUp => "backed up",
            Self::Skipped => "skipped",
            Self::Missing => "missing",
            Self::DryRun => "dry-run",
            Self::Failed => "failed",
        }
    }

    /// Inverse of [`LinkStatus::label`].
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }

    /// Console icon and ANSI colour for this status.
    #[must_use]
    pub const fn style(self) -> (&'static str, &'static str) {
        match self {
            Self::Created => ("✓", "\x1b[32m"),
            Self::BackedUp => ("⤴", "\x1b[36m"),
            Self::Skipped => ("○", "\x1b[33m"),
            Self::Missing => ("·", "\x1b[2m"),
            Self::DryRun => ("~", "\x1b[37m"),
            Self::Failed => ("✗", "\x1b[31m"),
        }
    }
}

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) is the production implementation;
/// tests substitute a capturing implementation so resolver output can be
/// asserted on without a global subscriber.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str);
    /// Record a link result for the summary.
    fn record_link(&self, name: &str, status: LinkStatus, message: Option<&str>);
}
