//! Capability bits negotiated for an endpoint, and the rules deciding which
//! transfer directions they implicitly allow.
//!
//! Each predicate follows the same order: no transfer class means no; the
//! direction's own flag means yes; only the opposite flag means no; neither
//! flag means both directions are allowed.

use bitflags::bitflags;

bitflags! {
    /// Endpoint capability mask. Bit positions follow the fabric's published
    /// flag values; bits not named here are kept but ignored.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Caps: u64 {
        const MSG = 1 << 1;
        const RMA = 1 << 2;
        const TAGGED = 1 << 3;
        const ATOMICS = 1 << 4;
        const READ = 1 << 8;
        const WRITE = 1 << 9;
        const RECV = 1 << 10;
        const SEND = 1 << 11;
        const REMOTE_READ = 1 << 12;
        const REMOTE_WRITE = 1 << 13;
    }
}

impl Caps {
    const MESSAGING: Caps = Caps::MSG.union(Caps::TAGGED);
    const MEMORY: Caps = Caps::RMA.union(Caps::ATOMICS);
    const LOCAL_ACCESS: Caps = Caps::WRITE.union(Caps::READ);
    const REMOTE_ACCESS: Caps = Caps::REMOTE_WRITE.union(Caps::REMOTE_READ);

    pub fn send_allowed(self) -> bool {
        self.direction_allowed(Caps::MESSAGING, Caps::SEND, Caps::RECV)
    }

    pub fn recv_allowed(self) -> bool {
        self.direction_allowed(Caps::MESSAGING, Caps::RECV, Caps::SEND)
    }

    /// May this endpoint issue RMA or atomic operations.
    pub fn rma_initiate_allowed(self) -> bool {
        self.direction_allowed(Caps::MEMORY, Caps::LOCAL_ACCESS, Caps::REMOTE_ACCESS)
    }

    /// May this endpoint be the target of RMA or atomic operations.
    pub fn rma_target_allowed(self) -> bool {
        self.direction_allowed(Caps::MEMORY, Caps::REMOTE_ACCESS, Caps::LOCAL_ACCESS)
    }

    fn direction_allowed(self, class: Caps, own: Caps, opposite: Caps) -> bool {
        if !self.intersects(class) {
            return false;
        }
        if self.intersects(own) {
            return true;
        }
        !self.intersects(opposite)
    }
}

pub fn send_allowed(caps: u64) -> bool {
    Caps::from_bits_retain(caps).send_allowed()
}

pub fn recv_allowed(caps: u64) -> bool {
    Caps::from_bits_retain(caps).recv_allowed()
}

pub fn rma_initiate_allowed(caps: u64) -> bool {
    Caps::from_bits_retain(caps).rma_initiate_allowed()
}

pub fn rma_target_allowed(caps: u64) -> bool {
    Caps::from_bits_retain(caps).rma_target_allowed()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_four(caps: Caps) -> [bool; 4] {
        [
            caps.send_allowed(),
            caps.recv_allowed(),
            caps.rma_initiate_allowed(),
            caps.rma_target_allowed(),
        ]
    }

    #[test]
    fn explicit_send_declines_recv() {
        let caps = Caps::TAGGED | Caps::SEND;
        assert!(caps.send_allowed());
        assert!(!caps.recv_allowed());
    }

    #[test]
    fn explicit_recv_declines_send() {
        let caps = Caps::MSG | Caps::RECV;
        assert!(!caps.send_allowed());
        assert!(caps.recv_allowed());
    }

    #[test]
    fn no_direction_allows_both() {
        let caps = Caps::TAGGED;
        assert!(caps.send_allowed());
        assert!(caps.recv_allowed());

        let caps = Caps::ATOMICS;
        assert!(caps.rma_initiate_allowed());
        assert!(caps.rma_target_allowed());
    }

    #[test]
    fn both_directions_requested() {
        let caps = Caps::MSG | Caps::SEND | Caps::RECV;
        assert!(caps.send_allowed());
        assert!(caps.recv_allowed());
    }

    #[test]
    fn local_and_remote_access_allow_both() {
        let caps = Caps::RMA | Caps::WRITE | Caps::REMOTE_READ;
        assert!(caps.rma_initiate_allowed());
        assert!(caps.rma_target_allowed());

        let caps = Caps::ATOMICS | Caps::READ | Caps::REMOTE_WRITE;
        assert!(caps.rma_initiate_allowed());
        assert!(caps.rma_target_allowed());
    }

    #[test]
    fn remote_write_makes_target_only() {
        let caps = Caps::RMA | Caps::REMOTE_WRITE;
        assert!(!caps.rma_initiate_allowed());
        assert!(caps.rma_target_allowed());
    }

    #[test]
    fn local_read_makes_initiator_only() {
        let caps = Caps::ATOMICS | Caps::READ;
        assert!(caps.rma_initiate_allowed());
        assert!(!caps.rma_target_allowed());
    }

    #[test]
    fn no_transfer_class_allows_nothing() {
        assert_eq!(all_four(Caps::empty()), [false; 4]);
        let directions = Caps::SEND | Caps::RECV | Caps::READ | Caps::WRITE | Caps::REMOTE_READ | Caps::REMOTE_WRITE;
        assert_eq!(all_four(directions), [false; 4]);
    }

    #[test]
    fn messaging_bits_do_not_enable_rma() {
        let caps = Caps::MSG | Caps::TAGGED;
        assert_eq!(all_four(caps), [true, true, false, false]);
    }

    #[test]
    fn raw_mask_helpers_ignore_unknown_bits() {
        let raw = (Caps::TAGGED | Caps::SEND).bits() | (1 << 40);
        assert!(send_allowed(raw));
        assert!(!recv_allowed(raw));
        assert!(!rma_initiate_allowed(raw));
        assert!(!rma_target_allowed(raw));
        assert!(rma_target_allowed((Caps::RMA | Caps::REMOTE_WRITE).bits()));
    }
}
