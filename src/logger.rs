//! Custom logging module.
//!
//! This module provides a logger implementation that formats log entries
//! and forwards them over a channel to the application state for display
//! in the log view.

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::sync::{mpsc, Mutex};

/// Format a log record into a string for display
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
    let level_str = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!("{} {} {}", timestamp, level_str, record.args())
}

/// Logger that forwards formatted entries over a channel. The receiving
/// end is drained into state by the render loop.
///
pub struct ChannelLogger {
    sender: Mutex<mpsc::Sender<String>>,
}

impl ChannelLogger {
    pub fn new(sender: mpsc::Sender<String>) -> Self {
        ChannelLogger {
            sender: Mutex::new(sender),
        }
    }

    /// Install this logger as the global logger.
    ///
    pub fn init(sender: mpsc::Sender<String>) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(ChannelLogger::new(sender)))?;
        log::set_max_level(LevelFilter::Debug);
        Ok(())
    }
}

impl Log for ChannelLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(sender) = self.sender.lock() {
                // A disconnected receiver means the app is shutting down
                let _ = sender.send(format_log(record));
            }
        }
    }

    fn flush(&self) {
        // No-op
    }
}
