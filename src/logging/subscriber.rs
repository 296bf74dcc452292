//! Tracing subscriber setup: console formatter, file layer, and initialisation.
//!
//! Events are classified once into a [`LineKind`] and rendered either for
//! the terminal (colour, status icons) or for the log file (timestamps,
//! bracketed tags, no ANSI codes).
use std::fs;
use std::io::Write as _;
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;

use super::types::LinkStatus;
use super::utils::{format_utc_datetime, format_utc_time, log_file_path, strip_ansi};

/// Target of stage headers (one per mapping group, plus the summary).
pub(super) const STAGE_TARGET: &str = "dotlink::stage";
/// Target of actions previewed during a dry run.
pub(super) const DRY_RUN_TARGET: &str = "dotlink::dry_run";
/// Target of per-request link outcomes, carrying `status` and `detail`.
pub(super) const OUTCOME_TARGET: &str = "dotlink::outcome";

/// Fields read from a [`tracing::Event`].
#[derive(Debug, Default)]
struct EventFields {
    message: String,
    status: Option<String>,
    detail: Option<String>,
}

impl EventFields {
    fn from_event(event: &tracing::Event<'_>) -> Self {
        let mut fields = Self::default();
        event.record(&mut fields);
        fields
    }

    fn set(&mut self, name: &str, value: String) {
        match name {
            "message" => self.message = value,
            "status" => self.status = Some(value),
            "detail" if !value.is_empty() => self.detail = Some(value),
            _ => {}
        }
    }
}

impl tracing::field::Visit for EventFields {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.set(field.name(), format!("{value:?}"));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.set(field.name(), value.to_string());
    }
}

/// What an event represents, independent of where it is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Stage,
    DryRun,
    Outcome(LinkStatus),
    Error,
    Warn,
    Debug,
    Info,
}

fn classify(level: Level, target: &str, fields: &EventFields) -> LineKind {
    if target == OUTCOME_TARGET
        && let Some(status) = fields.status.as_deref().and_then(LinkStatus::from_label)
    {
        return LineKind::Outcome(status);
    }
    match (level, target) {
        (Level::ERROR, _) => LineKind::Error,
        (Level::WARN, _) => LineKind::Warn,
        (Level::INFO, STAGE_TARGET) => LineKind::Stage,
        (Level::INFO, DRY_RUN_TARGET) => LineKind::DryRun,
        (Level::INFO, _) => LineKind::Info,
        _ => LineKind::Debug,
    }
}

fn with_detail(msg: &str, detail: Option<&str>) -> String {
    detail.map_or_else(|| msg.to_string(), |d| format!("{msg} ({d})"))
}

/// Render a line for the terminal.
fn console_line(kind: LineKind, fields: &EventFields) -> String {
    let msg = &fields.message;
    match kind {
        LineKind::Error => format!("\x1b[31mERROR\x1b[0m {msg}"),
        LineKind::Warn => format!("\x1b[33mWARN\x1b[0m  {msg}"),
        LineKind::Stage => format!("\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m"),
        LineKind::DryRun => format!("  \x1b[33m[DRY RUN]\x1b[0m {msg}"),
        LineKind::Outcome(status) => {
            let (icon, color) = status.style();
            let text = with_detail(msg, fields.detail.as_deref());
            format!("  {color}{icon} {text}\x1b[0m")
        }
        LineKind::Info => format!("  {msg}"),
        LineKind::Debug => format!("  \x1b[2m{msg}\x1b[0m"),
    }
}

/// Render a line for the log file, with `ts` as the timestamp.
fn file_line(kind: LineKind, fields: &EventFields, ts: &str) -> String {
    let msg = strip_ansi(&fields.message);
    match kind {
        LineKind::Stage => format!("[{ts}] ==> {msg}"),
        LineKind::DryRun => format!("[{ts}]     [dry run] {msg}"),
        LineKind::Outcome(status) => format!(
            "[{ts}]     [{}] {}",
            status.label(),
            with_detail(&msg, fields.detail.as_deref())
        ),
        LineKind::Error => format!("[{ts}]     [error] {msg}"),
        LineKind::Warn => format!("[{ts}]     [warn] {msg}"),
        LineKind::Debug => format!("[{ts}]     [debug] {msg}"),
        LineKind::Info => format!("[{ts}]     {msg}"),
    }
}

/// A [`tracing_subscriber::Layer`] that appends all events to the persistent
/// log file with timestamps and ANSI codes stripped.
///
/// Always captures events at `DEBUG` level and above regardless of the
/// console verbosity setting.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Open the log file for `command` under the cache directory.
    ///
    /// Returns `None` if the cache directory cannot be created or the file
    /// cannot be opened.
    pub(super) fn new(command: &str) -> Option<Self> {
        Self::at(&log_file_path(command)?)
    }

    /// Truncate `path`, write a run header, and return a layer appending to it.
    pub(super) fn at(path: &Path) -> Option<Self> {
        let version =
            option_env!("DOTLINK_VERSION").unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")));
        let header = format!(
            "==========================================\n\
             dotlink {version} {}\n\
             ==========================================\n",
            format_utc_datetime(),
        );
        fs::write(path, header).ok()?;
        let file = fs::OpenOptions::new().append(true).open(path).ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let metadata = event.metadata();
        let fields = EventFields::from_event(event);
        let kind = classify(*metadata.level(), metadata.target(), &fields);
        let line = file_line(kind, &fields, &format_utc_time());

        if let Ok(mut f) = self.file.lock() {
            writeln!(f, "{line}").ok();
        }
    }
}

/// A [`tracing_subscriber::fmt::FormatEvent`] that emits dotlink-style
/// console output.
struct ConsoleFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ConsoleFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let fields = EventFields::from_event(event);
        let kind = classify(*metadata.level(), metadata.target(), &fields);
        writeln!(writer, "{}", console_line(kind, &fields))
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Every console line goes to standard output, errors included, so status
/// and prompts interleave in one stream. Link outcomes are emitted at
/// `debug` and therefore reach the console only with `--verbose`; the
/// file layer writes all events to `$XDG_CACHE_HOME/dotlink/<command>.log`.
/// Must be called once at program startup, before any logging.
pub fn init_subscriber(verbose: bool, command: &str) {
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let console_layer = fmt::layer()
        .event_format(ConsoleFormatter)
        .with_writer(std::io::stdout)
        .with_filter(console_level);

    let file_layer = FileLayer::new(command).map(|l| l.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
