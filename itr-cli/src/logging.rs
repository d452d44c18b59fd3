//! Console and file logging for the `itr` binary.
//!
//! Console records go to stderr so report output on stdout can be piped.
//! A log file can be attached, swapped or detached while the subscriber is
//! live, and the filter can be replaced from the shell with `log <level>`.

use std::fmt;
use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use chrono::Local;
use thiserror::Error;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::{FmtContext, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, reload};

#[derive(Debug, Error)]
pub enum LogError {
    #[error("logging is not initialized")]
    NotInitialized,

    #[error("invalid log filter '{directive}': {source}")]
    InvalidFilter {
        directive: String,
        source: ParseError,
    },

    #[error("failed to apply log filter: {0}")]
    Reload(#[from] reload::Error),

    #[error("cannot open log file '{}': {source}", path.display())]
    OpenFile { path: PathBuf, source: io::Error },
}

/// `2026-04-01 10:15:02.117  WARN itr_core::aggregation: message key=value`
struct CliFormat;

fn level_colour(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

impl<S, N> FormatEvent<S, N> for CliFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");

        if writer.has_ansi_escapes() {
            write!(
                writer,
                "\x1b[2m{stamp}\x1b[0m {}{:>5}\x1b[0m \x1b[36m{}:\x1b[0m ",
                level_colour(meta.level()),
                meta.level(),
                meta.target()
            )?;
        } else {
            write!(writer, "{stamp} {:>5} {}: ", meta.level(), meta.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Destination of the file layer. Records are dropped while it is empty.
#[derive(Clone, Default)]
struct LogFile(Arc<Mutex<Option<File>>>);

impl LogFile {
    fn lock(&self) -> MutexGuard<'_, Option<File>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn replace(
        &self,
        file: Option<File>,
    ) {
        *self.lock() = file;
    }
}

struct LogFileWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for LogFileWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        self.0.as_mut().map_or(Ok(buf.len()), |file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.as_mut().map_or(Ok(()), |file| file.flush())
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogFileWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileWriter(self.lock())
    }
}

/// Runtime handles into the installed subscriber.
struct LogControl {
    filter: reload::Handle<EnvFilter, Registry>,
    file: LogFile,
}

static CONTROL: OnceLock<LogControl> = OnceLock::new();

fn control() -> Result<&'static LogControl, LogError> {
    CONTROL.get().ok_or(LogError::NotInitialized)
}

fn parse_filter(directive: &str) -> Result<EnvFilter, LogError> {
    EnvFilter::try_new(directive).map_err(|source| LogError::InvalidFilter {
        directive: directive.to_string(),
        source,
    })
}

/// Installs the global subscriber. Only the first call has any effect.
///
/// The starting filter is `RUST_LOG` when set, else `default_level`, else
/// `info`. The file layer stays silent until [`enable_file_logging`].
pub fn init_logging(default_level: &str) {
    CONTROL.get_or_init(|| install(default_level));
}

fn install(default_level: &str) -> LogControl {
    let initial = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter, handle) = reload::Layer::new(initial);
    let file = LogFile::default();

    let console = tracing_subscriber::fmt::layer()
        .event_format(CliFormat)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);
    let to_file = tracing_subscriber::fmt::layer()
        .event_format(CliFormat)
        .with_ansi(false)
        .with_writer(file.clone());

    // A subscriber installed elsewhere keeps precedence; reloads then fail.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(to_file)
        .try_init();

    LogControl {
        filter: handle,
        file,
    }
}

/// Replaces the active filter. Takes a bare level such as `debug` or any
/// `EnvFilter` directive list such as `warn,itr_core=trace`.
pub fn set_log_level(directive: &str) -> Result<(), LogError> {
    let control = control()?;
    control.filter.reload(parse_filter(directive)?)?;
    Ok(())
}

/// Appends records to `path`, replacing any file already attached. The
/// parent directory must exist.
pub fn enable_file_logging(path: &Path) -> Result<(), LogError> {
    let control = control()?;
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LogError::OpenFile {
            path: path.to_path_buf(),
            source,
        })?;
    control.file.replace(Some(file));
    tracing::debug!(path = %path.display(), "file logging enabled");
    Ok(())
}

pub fn disable_file_logging() {
    if let Some(control) = CONTROL.get() {
        control.file.replace(None);
    }
}
