//! Portable event multiplexer on top of poll(2).
//!
//! Offers the create / register / deregister / wait surface of a scalable
//! readiness facility while only needing the linear poll primitive. Each
//! `wait` reports a single ready descriptor and rotates the scan start past
//! it, so descriptors late in the table are not starved by early ones.
//!
//! The handle is not internally synchronized; callers sharing it between
//! threads must provide their own locking.

use super::interest::{Interest, Readiness};
use super::poller::{PollFd, Poller, SysPoll};
use super::{OsError, Token};
use crate::config::MuxConfig;
use log::{debug, trace, warn};
use std::os::unix::io::RawFd;

/// One occupied table entry. Descriptor and context live in the same record
/// so they can never drift apart.
#[derive(Clone, Copy, Debug)]
struct Slot<C> {
    pfd: PollFd,
    context: C,
}

/// Fallback readiness multiplexer.
///
/// `C` is an opaque caller-owned token returned by [`wait`](Self::wait); the
/// multiplexer never inspects it. `P` is the poll backend.
#[derive(Debug)]
pub struct EventMultiplexer<C = Token, P = SysPoll> {
    slots: Vec<Slot<C>>,
    /// Contiguous array handed to the poller, rebuilt on every wait.
    scratch: Vec<PollFd>,
    cursor: usize,
    grow_step: usize,
    poller: P,
}

impl<C: Copy> EventMultiplexer<C, SysPoll> {
    /// Create an empty multiplexer backed by poll(2).
    pub fn new() -> Result<Self, OsError> {
        Self::with_config(&MuxConfig::default())
    }

    pub fn with_config(cfg: &MuxConfig) -> Result<Self, OsError> {
        Self::with_poller(SysPoll, cfg)
    }
}

impl<C: Copy, P: Poller> EventMultiplexer<C, P> {
    /// Create an empty multiplexer driven by `poller`.
    ///
    /// Fails with `OutOfMemory` if `cfg.initial_capacity` slots cannot be
    /// allocated up front.
    pub fn with_poller(poller: P, cfg: &MuxConfig) -> Result<Self, OsError> {
        let mut slots = Vec::new();
        let mut scratch = Vec::new();
        if cfg.initial_capacity > 0 {
            slots.try_reserve_exact(cfg.initial_capacity)?;
            scratch.try_reserve_exact(cfg.initial_capacity)?;
        }
        Ok(EventMultiplexer {
            slots,
            scratch,
            cursor: 0,
            grow_step: cfg.grow_step.max(1),
            poller,
        })
    }

    /// Watch `fd` for readability and associate it with `context`.
    ///
    /// Registering the same descriptor twice is not detected; callers must
    /// not do it.
    pub fn register(&mut self, fd: RawFd, context: C) -> Result<(), OsError> {
        self.register_interest(fd, Interest::Readable, context)
    }

    /// Watch `fd` for `interest` and associate it with `context`.
    ///
    /// On `OutOfMemory` the table is left exactly as it was.
    pub fn register_interest(&mut self, fd: RawFd, interest: Interest, context: C) -> Result<(), OsError> {
        if self.slots.len() == self.slots.capacity() {
            self.grow()?;
        }
        self.slots.push(Slot {
            pfd: PollFd::new(fd, interest),
            context,
        });
        trace!("mux: registered fd {} at slot {}", fd, self.slots.len() - 1);
        Ok(())
    }

    fn grow(&mut self) -> Result<(), OsError> {
        self.slots.try_reserve_exact(self.grow_step)?;
        let want = self.slots.capacity();
        if self.scratch.capacity() < want {
            self.scratch.try_reserve_exact(want - self.scratch.len())?;
        }
        debug!("mux: grew table to {} slots", self.slots.capacity());
        Ok(())
    }

    /// Stop watching `fd`.
    ///
    /// The last slot is moved into the freed one, so slot order is not
    /// preserved. Fails with `InvalidArgument` if `fd` is not registered.
    pub fn deregister(&mut self, fd: RawFd) -> Result<(), OsError> {
        let Some(idx) = self.position(fd) else {
            debug!("mux: deregister of unknown fd {}", fd);
            return Err(OsError::InvalidArgument);
        };
        self.slots.swap_remove(idx);
        if self.cursor >= self.slots.len() {
            self.cursor = 0;
        }
        trace!("mux: deregistered fd {} from slot {}", fd, idx);
        Ok(())
    }

    /// Wait for one registered descriptor to become ready and return its
    /// context.
    ///
    /// `timeout_ms < 0` blocks without limit, `0` polls once. Returns `None`
    /// on timeout and also when the underlying poll fails; use
    /// [`try_wait`](Self::try_wait) to tell the two apart.
    pub fn wait(&mut self, timeout_ms: i32) -> Option<C> {
        match self.try_wait(timeout_ms) {
            Ok(ctx) => ctx,
            Err(e) if e.is_interrupted() => {
                debug!("mux: poll interrupted");
                None
            }
            Err(e) => {
                warn!("mux: poll failed: {}", e);
                None
            }
        }
    }

    /// Like [`wait`](Self::wait) but reports a failed poll as an error.
    pub fn try_wait(&mut self, timeout_ms: i32) -> Result<Option<C>, OsError> {
        self.scratch.clear();
        self.scratch.extend(self.slots.iter().map(|slot| {
            let mut pfd = slot.pfd;
            pfd.set_revents(Readiness::empty());
            pfd
        }));

        let polled = self.poller.poll(&mut self.scratch, timeout_ms);
        for (slot, pfd) in self.slots.iter_mut().zip(self.scratch.iter()) {
            slot.pfd.set_revents(pfd.revents());
        }
        if polled? == 0 {
            return Ok(None);
        }

        let len = self.slots.len();
        let found = (self.cursor..len)
            .chain(0..self.cursor)
            .find(|&i| self.slots[i].pfd.is_ready());
        Ok(found.map(|i| {
            self.cursor = (i + 1) % len;
            self.slots[i].context
        }))
    }

    /// Number of registered descriptors.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Allocated slot count. Never shrinks.
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Slot the next wait starts scanning from.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn contains(&self, fd: RawFd) -> bool {
        self.position(fd).is_some()
    }

    pub fn context_of(&self, fd: RawFd) -> Option<C> {
        self.position(fd).map(|i| self.slots[i].context)
    }

    /// Readiness `fd` showed on the most recent poll.
    pub fn last_readiness(&self, fd: RawFd) -> Option<Readiness> {
        self.position(fd).map(|i| self.slots[i].pfd.revents())
    }

    /// Registered `(fd, context)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (RawFd, C)> + '_ {
        self.slots.iter().map(|slot| (slot.pfd.fd(), slot.context))
    }

    pub fn poller(&self) -> &P {
        &self.poller
    }

    pub fn poller_mut(&mut self) -> &mut P {
        &mut self.poller
    }

    /// Release the table. Equivalent to dropping the handle.
    pub fn close(self) {
        debug!("mux: closing with {} registered fds", self.slots.len());
    }

    /// Close a handle that may never have been created.
    pub fn close_opt(mux: Option<Self>) {
        if let Some(mux) = mux {
            mux.close();
        }
    }

    fn position(&self, fd: RawFd) -> Option<usize> {
        self.slots.iter().position(|slot| slot.pfd.fd() == fd)
    }
}
