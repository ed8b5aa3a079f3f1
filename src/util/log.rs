// src/util/log.rs

//! File-based logging for the TUI. Writing to stdout would corrupt the
//! alternate screen, so each severity gets its own file under the log
//! directory (`FIELDBOARD_LOG_DIR`, default `./logs`). Debug entries are
//! gated behind `DEBUG=true`.
use std::fs::{create_dir_all, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::{LazyLock, OnceLock};

use chrono::Local;

pub static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

/// Global logger instance.
pub static LOGGER: LazyLock<Logger> = LazyLock::new(|| {
    let dir = std::env::var("FIELDBOARD_LOG_DIR").unwrap_or_else(|_| "./logs".to_string());
    Logger::new(&dir).expect("Failed to initialize logger")
});

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
}

/// Logger that writes to separate files by severity.
pub struct Logger {
    error_file: Mutex<File>,
    warn_file: Mutex<File>,
    info_file: Mutex<File>,
    debug_file: Mutex<File>,
}

impl Logger {
    /// Creates a logger rooted at `log_dir`, appending to existing files so
    /// history survives restarts. Each run starts with a session marker.
    pub fn new(log_dir: &str) -> std::io::Result<Self> {
        DEBUG_ENABLED.get_or_init(|| std::env::var("DEBUG").unwrap_or_default() == "true");

        let log_dir = PathBuf::from(log_dir);
        create_dir_all(&log_dir)?;

        let open = |name: &str| -> std::io::Result<File> {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_dir.join(name))
        };

        let logger = Self {
            error_file: Mutex::new(open("error.log")?),
            warn_file: Mutex::new(open("warn.log")?),
            info_file: Mutex::new(open("info.log")?),
            debug_file: Mutex::new(open("debug.log")?),
        };
        logger.write_log(
            LogLevel::Info,
            &format!("---- session started (pid {}) ----", std::process::id()),
        );
        Ok(logger)
    }

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
        let message = format!($($arg)*);
        $crate::util::log::LOGGER.error(&message);
    }};
}

/// Convenience macro for warning logging with formatting
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::util::log::LOGGER.warn(&message);
    }};
}

/// Convenience macro for info logging with formatting
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::util::log::LOGGER.info(&message);
    }};
}

/// Convenience macro for debug logging with formatting, gated on `DEBUG=true`
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        if *$crate::util::log::DEBUG_ENABLED.get().unwrap_or(&false) {
            let message = format!($($arg)*);
            $crate::util::log::LOGGER.debug(&message);
        }
    }};
}
