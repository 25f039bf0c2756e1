#![no_main]
use fabric_core::os::{EventMultiplexer, OsError, PollFd, Poller, Readiness};
use libfuzzer_sys::fuzz_target;
use std::collections::HashMap;

/// Marks every fd with an odd number readable.
struct OddReady;

impl Poller for OddReady {
    fn poll(&mut self, fds: &mut [PollFd], _timeout_ms: i32) -> Result<usize, OsError> {
        let mut n = 0;
        for pfd in fds.iter_mut() {
            if pfd.fd() % 2 == 1 {
                pfd.set_revents(Readiness::READABLE);
                n += 1;
            }
        }
        Ok(n)
    }
}

// Each byte is one operation: high bits pick register/deregister/wait,
// low bits pick the fd. A shadow map checks the table after every step.
fuzz_target!(|data: &[u8]| {
    let cfg = fabric_core::MuxConfig { grow_step: 3, ..Default::default() };
    let Ok(mut mux) = EventMultiplexer::<u8, OddReady>::with_poller(OddReady, &cfg) else {
        return;
    };
    let mut shadow: HashMap<i32, u8> = HashMap::new();

    for &op in data {
        let fd = (op & 0x3f) as i32;
        match op >> 6 {
            0 | 1 => {
                if !shadow.contains_key(&fd) {
                    mux.register(fd, op).unwrap();
                    shadow.insert(fd, op);
                }
            }
            2 => {
                let expected = shadow.remove(&fd).is_some();
                assert_eq!(mux.deregister(fd).is_ok(), expected);
            }
            _ => {
                let any_odd = shadow.keys().any(|fd| fd % 2 == 1);
                match mux.wait(0) {
                    Some(ctx) => assert!(shadow.values().any(|v| *v == ctx)),
                    None => assert!(!any_odd),
                }
            }
        }
        assert_eq!(mux.len(), shadow.len());
        assert!(mux.cursor() < mux.len().max(1));
    }
});
