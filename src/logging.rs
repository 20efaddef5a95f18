//! Tracing setup shared by the desktop app and the CLI.
//!
//! The app logs to stdout and to `.matsel/logs/matsel_<launch time>.log`,
//! keeping the newest [`MAX_LOG_FILES`] launch logs. The CLI logs to stderr
//! so its stdout stays clean for results.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::SystemTime;

use time::{
    OffsetDateTime, UtcOffset, format_description::BorrowedFormatItem,
    macros::format_description,
};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

use crate::app_dirs::{self, AppDirError};

/// Launch logs kept in the logs folder; older ones are removed at startup.
pub const MAX_LOG_FILES: usize = 10;
const LOG_FILE_PREFIX: &str = "matsel_";
const FILE_STAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
const LINE_STAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

type LocalTimer = fmt::time::OffsetTime<BorrowedFormatItem<'static>>;

static FILE_WRITER: OnceLock<WorkerGuard> = OnceLock::new();

/// Why logging could not be installed.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The logs folder could not be resolved or created.
    #[error(transparent)]
    Dir(#[from] AppDirError),
    /// The launch time could not be turned into a file name.
    #[error("Failed to format log file name: {0}")]
    FileStamp(#[from] time::error::Format),
    /// The launch log file could not be opened.
    #[error("Failed to open log file {path}: {source}")]
    OpenFile {
        /// Log file path.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// Another global subscriber is already installed.
    #[error("Failed to install tracing subscriber: {0}")]
    Install(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Log to stdout and to a new file for this launch.
///
/// Returns the new log file path, or `None` when logging is already set up.
pub fn init() -> Result<Option<PathBuf>, LoggingError> {
    if FILE_WRITER.get().is_some() {
        return Ok(None);
    }
    let dir = app_dirs::logs_dir()?;
    let file_name = launch_log_name(launch_time())?;
    let path = dir.join(&file_name);
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| LoggingError::OpenFile {
            path: path.clone(),
            source,
        })?;

    let (file_writer, guard) = tracing_appender::non_blocking(rolling::never(&dir, file_name));
    let timer = local_timer();
    tracing::subscriber::set_global_default(
        Registry::default()
            .with(env_filter())
            .with(fmt::layer().with_timer(timer.clone()).with_writer(std::io::stdout))
            .with(
                fmt::layer()
                    .with_ansi(false)
                    .with_timer(timer)
                    .with_writer(file_writer),
            ),
    )?;
    let _ = FILE_WRITER.set(guard);

    let removed = prune_launch_logs(&dir, MAX_LOG_FILES);
    tracing::info!(removed, "Logging to {}", path.display());
    Ok(Some(path))
}

/// Log to stderr only, for command-line tools.
pub fn init_stderr() -> Result<(), LoggingError> {
    tracing::subscriber::set_global_default(
        Registry::default()
            .with(env_filter())
            .with(fmt::layer().with_timer(local_timer()).with_writer(std::io::stderr)),
    )?;
    Ok(())
}

/// Delete the oldest `matsel_*.log` files beyond `keep`, returning how many went.
///
/// Files that cannot be inspected or removed are skipped with a warning.
fn prune_launch_logs(dir: &Path, keep: usize) -> usize {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::warn!("Cannot list {} for pruning: {err}", dir.display());
            return 0;
        }
    };
    let mut logs: Vec<(SystemTime, PathBuf)> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| is_launch_log(path))
        .map(|path| {
            let modified = fs::metadata(&path)
                .and_then(|meta| meta.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            (modified, path)
        })
        .collect();
    if logs.len() <= keep {
        return 0;
    }
    logs.sort();
    let excess = logs.len() - keep;
    logs.into_iter()
        .take(excess)
        .filter(|(_, path)| match fs::remove_file(path) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!("Cannot remove old log {}: {err}", path.display());
                false
            }
        })
        .count()
}

fn is_launch_log(path: &Path) -> bool {
    path.is_file()
        && path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(LOG_FILE_PREFIX) && name.ends_with(".log"))
}

fn launch_log_name(at: OffsetDateTime) -> Result<String, LoggingError> {
    Ok(format!("{LOG_FILE_PREFIX}{}.log", at.format(FILE_STAMP)?))
}

fn launch_time() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

fn local_timer() -> LocalTimer {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    fmt::time::OffsetTime::new(offset, LINE_STAMP.into())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}
