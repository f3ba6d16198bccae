// src/util/log.rs

//! Logger Utility - file-based logging, since the terminal belongs to the
//! clock face.
//!
//! Severity logs go to `error.log`, `warn.log`, `info.log` and `debug.log`
//! through the `log_*!` macros. Per-frame `tracing` events go to
//! `trace.log` once [`init_tracing`] has run.
use std::fs::{create_dir_all, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::{LazyLock, OnceLock};

use chrono::Local;
use tracing::Level;

use crate::error::{ClockError, Result};

pub const DEFAULT_LOG_DIR: &str = "./logs";

pub static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

static LOG_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Global logger instance. `None` when the log directory is not writable;
/// logging then becomes a no-op instead of taking the clock down.
pub static LOGGER: LazyLock<Option<Logger>> = LazyLock::new(|| {
    let dir = LOG_DIR.get_or_init(default_log_dir);
    Logger::new(dir).ok()
});

/// Log directory used when none was set. Unit tests log under the system
/// temp dir so they never write into the crate.
fn default_log_dir() -> PathBuf {
    if cfg!(test) {
        std::env::temp_dir().join("glyph-clock-test-logs")
    } else {
        PathBuf::from(DEFAULT_LOG_DIR)
    }
}

/// Choose the log directory. Only effective before the first log line.
pub fn set_log_dir(dir: impl Into<PathBuf>) -> bool {
    LOG_DIR.set(dir.into()).is_ok()
}

pub fn debug_enabled() -> bool {
    *DEBUG_ENABLED.get_or_init(|| std::env::var("DEBUG").unwrap_or_default() == "true")
}

/// Route `tracing` output to `<log_dir>/trace.log`.
pub fn init_tracing(log_dir: &Path) -> Result<()> {
    create_dir_all(log_dir)?;
    let file = File::create(log_dir.join("trace.log"))?;
    let level = if debug_enabled() { Level::TRACE } else { Level::INFO };

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .try_init()
        .map_err(|e| ClockError::Logging(e.to_string()))
}

/// Log severity levels
#[derive(Debug, Clone, Copy)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    fn as_str(&self) -> &str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    fn filename(&self) -> &str {
        match self {
            LogLevel::Error => "error.log",
            LogLevel::Warn => "warn.log",
            LogLevel::Info => "info.log",
            LogLevel::Debug => "debug.log",
        }
    }
}

/// Logger that writes to separate files by severity
pub struct Logger {
    error_file: Mutex<File>,
    warn_file: Mutex<File>,
    info_file: Mutex<File>,
    debug_file: Mutex<File>,
}

impl Logger {
    /// Create a new logger in `log_dir`, truncating any previous session.
    pub fn new(log_dir: &Path) -> std::io::Result<Self> {
        create_dir_all(log_dir)?;

        let open = |level: LogLevel| File::create(log_dir.join(level.filename())).map(Mutex::new);

        Ok(Self {
            error_file: open(LogLevel::Error)?,
            warn_file: open(LogLevel::Warn)?,
            info_file: open(LogLevel::Info)?,
            debug_file: open(LogLevel::Debug)?,
        })
    }

    /// Write a log entry to the appropriate file
    fn write_log(&self, level: LogLevel, message: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let formatted = format!("[{}] [{}] {}\n", timestamp, level.as_str(), message);

        let file = match level {
            LogLevel::Error => &self.error_file,
            LogLevel::Warn => &self.warn_file,
            LogLevel::Info => &self.info_file,
            LogLevel::Debug => &self.debug_file,
        };

        if let Ok(mut file) = file.lock() {
            let _ = file.write_all(formatted.as_bytes());
            let _ = file.flush();
        }
    }

    pub fn error(&self, message: &str) {
        self.write_log(LogLevel::Error, message);
    }

    pub fn warn(&self, message: &str) {
        self.write_log(LogLevel::Warn, message);
    }

    pub fn info(&self, message: &str) {
        self.write_log(LogLevel::Info, message);
    }

    pub fn debug(&self, message: &str) {
        self.write_log(LogLevel::Debug, message);
    }
}

/// Convenience macro for error logging with formatting
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        if let Some(logger) = $crate::util::log::LOGGER.as_ref() {
            logger.error(&format!($($arg)*));
        }
    }};
}

/// Convenience macro for warning logging with formatting
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        if let Some(logger) = $crate::util::log::LOGGER.as_ref() {
            logger.warn(&format!($($arg)*));
        }
    }};
}

/// Convenience macro for info logging with formatting
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        if let Some(logger) = $crate::util::log::LOGGER.as_ref() {
            logger.info(&format!($($arg)*));
        }
    }};
}

/// Convenience macro for debug logging with formatting
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        if $crate::util::log::debug_enabled() {
            if let Some(logger) = $crate::util::log::LOGGER.as_ref() {
                logger.debug(&format!($($arg)*));
            }
        }
    }};
}
