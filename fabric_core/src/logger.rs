//! Stderr backend for the `log` facade.

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Global stderr lock to avoid interleaved output from multiple threads.
static LOGGER_LOCK: Mutex<()> = Mutex::new(());

static LOGGER: StderrLogger = StderrLogger;

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record.level(), record.args());
        // A poisoned lock only means another thread panicked mid-write.
        let _guard = LOGGER_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let _ = io::stderr().write_all(line.as_bytes());
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

/// `[unix-millis] [LEVEL] ThreadId: message`
fn format_line(level: log::Level, args: &std::fmt::Arguments<'_>) -> String {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let millis = ts.as_secs() * 1000 + (ts.subsec_millis() as u64);
    let tid = std::thread::current().id();
    format!("[{}] [{}] {:?}: {}\n", millis, level, tid, args)
}

/// Install the stderr logger with the given maximum level.
///
/// Only the first call installs; later calls return the facade's error and
/// leave the existing logger in place.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}
