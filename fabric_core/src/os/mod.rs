//! OS-level readiness plumbing for the fabric.
//! Built on the linear poll(2) primitive so it works wherever a scalable
//! facility (epoll/kqueue) is missing.

use std::fmt;
use std::io;

pub mod fd;
pub mod interest;
pub mod multiplexer;
pub mod poller;

pub use interest::{Interest, Readiness};
pub use multiplexer::EventMultiplexer;
pub use poller::{PollFd, Poller, SysPoll};

/// Default opaque context handed back by the multiplexer.
pub type Token = usize;

/// Common error type for the OS layer.
#[derive(Debug)]
pub enum OsError {
    /// Backing storage could not be allocated.
    OutOfMemory,
    /// Argument did not name anything known to the callee.
    InvalidArgument,
    /// Raw errno reported by a libc call.
    Sys(i32),
    /// I/O failure that carries no errno.
    Io(io::Error),
}

impl OsError {
    /// Capture `errno` of the last failed libc call.
    pub fn last_os_error() -> Self {
        let err = io::Error::last_os_error();
        match err.raw_os_error() {
            Some(code) => OsError::Sys(code),
            None => OsError::Io(err),
        }
    }

    /// True for an interrupted system call (EINTR).
    pub fn is_interrupted(&self) -> bool {
        matches!(self, OsError::Sys(code) if *code == libc::EINTR)
    }
}

impl fmt::Display for OsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OsError::OutOfMemory => write!(f, "out of memory"),
            OsError::InvalidArgument => write!(f, "invalid argument"),
            OsError::Sys(code) => write!(f, "os error {}: {}", code, io::Error::from_raw_os_error(*code)),
            OsError::Io(e) => write!(f, "i/o error: {}", e),
        }
    }
}

impl std::error::Error for OsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OsError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for OsError {
    fn from(e: io::Error) -> Self {
        match e.raw_os_error() {
            Some(code) => OsError::Sys(code),
            None => OsError::Io(e),
        }
    }
}

impl From<std::collections::TryReserveError> for OsError {
    fn from(_: std::collections::TryReserveError) -> Self {
        OsError::OutOfMemory
    }
}
