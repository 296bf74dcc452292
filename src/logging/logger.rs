//! Structured logger with dry-run awareness and summary collection.
use std::path::PathBuf;
use std::sync::Mutex;

use super::subscriber::{DRY_RUN_TARGET, OUTCOME_TARGET, STAGE_TARGET};
use super::types::{Log, LinkEntry, LinkStatus};
use super::utils::log_file_path;

/// Implement the display methods of [`Log`] by delegating to inherent methods
/// of the same name on the implementing type.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Per-status totals over all recorded link requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkSummary {
    /// Links created without a backup.
    pub created: u32,
    /// Links created after moving the old destination aside.
    pub backed_up: u32,
    /// Conflicts the operator chose to keep.
    pub skipped: u32,
    /// Requests whose source does not exist.
    pub missing: u32,
    /// Requests evaluated in dry-run mode.
    pub dry_run: u32,
    /// Requests that failed.
    pub failed: u32,
}

impl LinkSummary {
    /// Tally a list of entries.
    #[must_use]
    pub fn from_entries(entries: &[LinkEntry]) -> Self {
        let mut summary = Self::default();
        for entry in entries {
            let slot = match entry.status {
                LinkStatus::Created => &mut summary.created,
                LinkStatus::BackedUp => &mut summary.backed_up,
                LinkStatus::Skipped => &mut summary.skipped,
                LinkStatus::Missing => &mut summary.missing,
                LinkStatus::DryRun => &mut summary.dry_run,
                LinkStatus::Failed => &mut summary.failed,
            };
            *slot += 1;
        }
        summary
    }

    /// Total number of requests.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.created + self.backed_up + self.skipped + self.missing + self.dry_run + self.failed
    }

    /// One-line totals, without colour codes.
    #[must_use]
    pub fn plain_line(&self) -> String {
        format!(
            "{} links: {} created, {} backed up, {} skipped, {} missing, {} dry-run, {} failed",
            self.total(),
            self.created,
            self.backed_up,
            self.skipped,
            self.missing,
            self.dry_run,
            self.failed
        )
    }
}

/// Structured logger with dry-run awareness and summary collection.
///
/// Console and file output both go through [`tracing`]; see
/// [`init_subscriber`](super::subscriber::init_subscriber).
#[derive(Debug)]
pub struct Logger {
    links: Mutex<Vec<LinkEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger.
    ///
    /// Stores the log file path for display in the run summary; the file
    /// itself is created by the subscriber's file layer.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self::with_log_file(log_file_path(command))
    }

    /// Create a logger that reports `log_file` in its summary.
    #[must_use]
    pub const fn with_log_file(log_file: Option<PathBuf>) -> Self {
        Self {
            links: Mutex::new(Vec::new()),
            log_file,
        }
    }

    /// Return the log file path, if available.
    #[must_use]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Return a clone of all recorded link entries.
    #[must_use]
    pub fn link_entries(&self) -> Vec<LinkEntry> {
        self.links.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose; always
    /// written to the log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run action message.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    /// Record a link result for the summary.
    ///
    /// The outcome is also emitted as a `debug` event so that it reaches the
    /// log file as it happens.
    pub fn record_link(&self, name: &str, status: LinkStatus, message: Option<&str>) {
        tracing::debug!(
            target: OUTCOME_TARGET,
            status = status.label(),
            detail = message.unwrap_or_default(),
            "{name}"
        );
        if let Ok(mut guard) = self.links.lock() {
            guard.push(LinkEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Totals over everything recorded so far.
    #[must_use]
    pub fn summary(&self) -> LinkSummary {
        LinkSummary::from_entries(&self.link_entries())
    }

    /// Count the number of failed requests.
    #[must_use]
    pub fn failure_count(&self) -> u32 {
        self.summary().failed
    }

    /// Print the summary of all recorded link requests.
    pub fn print_summary(&self) {
        let entries = self.link_entries();
        if entries.is_empty() {
            return;
        }

        blank_line();
        self.stage("Summary");

        for entry in &entries {
            let (icon, color) = entry.status.style();

            let suffix = entry
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));

            self.info(&format!("{color}{icon} {}{suffix}\x1b[0m", entry.name));
        }

        blank_line();
        let s = LinkSummary::from_entries(&entries);
        self.info(&format!(
            "{} links: \x1b[32m{} created\x1b[0m, \x1b[36m{} backed up\x1b[0m, \x1b[33m{} skipped\x1b[0m, \x1b[2m{} missing\x1b[0m, \x1b[37m{} dry-run\x1b[0m, \x1b[31m{} failed\x1b[0m",
            s.total(),
            s.created,
            s.backed_up,
            s.skipped,
            s.missing,
            s.dry_run,
            s.failed
        ));

        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}

#[allow(clippy::print_stdout)]
fn blank_line() {
    println!();
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error, dry_run);

    fn record_link(&self, name: &str, status: LinkStatus, message: Option<&str>) {
        self.record_link(name, status, message);
    }
}
