//! Interest and readiness types shared by the poller and the multiplexer.

use bitflags::bitflags;

/// What a registered descriptor is watched for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Interest {
    #[default]
    Readable,
    Writable,
    ReadWrite,
}

impl Interest {
    /// poll(2) event mask requested for this interest.
    pub fn readiness(self) -> Readiness {
        match self {
            Interest::Readable => Readiness::READABLE,
            Interest::Writable => Readiness::WRITABLE,
            Interest::ReadWrite => Readiness::READABLE | Readiness::WRITABLE,
        }
    }
}

bitflags! {
    /// Readiness bits as reported in `pollfd.revents`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Readiness: i16 {
        const READABLE = libc::POLLIN;
        const PRIORITY = libc::POLLPRI;
        const WRITABLE = libc::POLLOUT;
        const ERROR = libc::POLLERR;
        const HANGUP = libc::POLLHUP;
        const INVALID = libc::POLLNVAL;
    }
}

impl Readiness {
    pub fn is_readable(self) -> bool {
        self.contains(Readiness::READABLE)
    }

    pub fn is_writable(self) -> bool {
        self.contains(Readiness::WRITABLE)
    }
}
