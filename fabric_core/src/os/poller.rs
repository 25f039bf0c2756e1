//! The linear readiness-poll primitive the multiplexer is built on.

use super::interest::{Interest, Readiness};
use super::OsError;
use std::os::unix::io::RawFd;

/// One (descriptor, interest, observed readiness) entry handed to a poller.
///
/// Layout-transparent over `libc::pollfd` so a slice of these can be passed
/// straight to poll(2).
#[repr(transparent)]
#[derive(Clone, Copy)]
pub struct PollFd(libc::pollfd);

impl PollFd {
    pub fn new(fd: RawFd, interest: Interest) -> Self {
        PollFd(libc::pollfd {
            fd,
            events: interest.readiness().bits(),
            revents: 0,
        })
    }

    pub fn fd(&self) -> RawFd {
        self.0.fd
    }

    /// Event mask requested from the OS.
    pub fn interest(&self) -> Readiness {
        Readiness::from_bits_retain(self.0.events)
    }

    /// Readiness observed by the most recent poll.
    pub fn revents(&self) -> Readiness {
        Readiness::from_bits_retain(self.0.revents)
    }

    pub fn set_revents(&mut self, revents: Readiness) {
        self.0.revents = revents.bits();
    }

    pub fn is_ready(&self) -> bool {
        self.0.revents != 0
    }
}

impl std::fmt::Debug for PollFd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollFd")
            .field("fd", &self.fd())
            .field("interest", &self.interest())
            .field("revents", &self.revents())
            .finish()
    }
}

/// A one-shot readiness check over an array of descriptors.
///
/// Implementations must overwrite `revents` of every entry and return the
/// number of entries with nonzero `revents`. `timeout_ms < 0` blocks without
/// limit, `0` returns immediately.
pub trait Poller {
    fn poll(&mut self, fds: &mut [PollFd], timeout_ms: i32) -> Result<usize, OsError>;
}

/// poll(2) backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct SysPoll;

impl Poller for SysPoll {
    fn poll(&mut self, fds: &mut [PollFd], timeout_ms: i32) -> Result<usize, OsError> {
        // SAFETY: PollFd is repr(transparent) over libc::pollfd and the slice
        // stays borrowed for the duration of the call.
        let n = unsafe {
            libc::poll(
                fds.as_mut_ptr() as *mut libc::pollfd,
                fds.len() as libc::nfds_t,
                timeout_ms,
            )
        };
        if n < 0 {
            return Err(OsError::last_os_error());
        }
        Ok(n as usize)
    }
}
