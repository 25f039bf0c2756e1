//! Small leaf helpers: clock, timed condition wait, one-line file reads.

use crate::os::OsError;
use std::fs;
use std::path::Path;
use std::sync::{Condvar, MutexGuard};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Wall-clock milliseconds since the Unix epoch.
pub fn gettime_ms() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    now.as_secs() * 1000 + now.subsec_millis() as u64
}

/// Wait on `cond` for at most `timeout_ms`, or without limit if negative.
///
/// Returns the re-acquired guard and whether the wait timed out. A poisoned
/// mutex is recovered rather than propagated.
pub fn wait_cond<'a, T>(cond: &Condvar, guard: MutexGuard<'a, T>, timeout_ms: i32) -> (MutexGuard<'a, T>, bool) {
    if timeout_ms < 0 {
        let guard = cond.wait(guard).unwrap_or_else(|e| e.into_inner());
        return (guard, false);
    }
    let (guard, res) = cond
        .wait_timeout(guard, Duration::from_millis(timeout_ms as u64))
        .unwrap_or_else(|e| e.into_inner());
    (guard, res.timed_out())
}

/// Read `dir/file`, dropping one trailing newline.
pub fn read_file<P: AsRef<Path>>(dir: P, file: &str) -> Result<String, OsError> {
    let mut text = fs::read_to_string(dir.as_ref().join(file))?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}
