//! Descriptor helpers used when preparing fds for the multiplexer.

use super::interest::Interest;
use super::poller::{PollFd, Poller, SysPoll};
use super::OsError;
use std::os::unix::io::RawFd;

/// Put `fd` into non-blocking mode, keeping its other status flags.
pub fn set_nonblocking(fd: RawFd) -> Result<(), OsError> {
    // SAFETY: fcntl on an arbitrary integer is safe; a bad fd yields EBADF.
    let flags = unsafe { libc::fcntl(fd, libc::F_GETFL) };
    if flags < 0 {
        return Err(OsError::last_os_error());
    }
    if flags & libc::O_NONBLOCK != 0 {
        return Ok(());
    }
    let res = unsafe { libc::fcntl(fd, libc::F_SETFL, flags | libc::O_NONBLOCK) };
    if res < 0 {
        return Err(OsError::last_os_error());
    }
    Ok(())
}

/// Wait up to `timeout_ms` for `fd` to become readable.
pub fn poll_fd(fd: RawFd, timeout_ms: i32) -> Result<bool, OsError> {
    let mut fds = [PollFd::new(fd, Interest::Readable)];
    let n = SysPoll.poll(&mut fds, timeout_ms)?;
    Ok(n > 0)
}
