#![no_main]
use fabric_core::caps::{self, Caps};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|raw: u64| {
    let caps = Caps::from_bits_retain(raw);
    let messaging = caps.intersects(Caps::MSG | Caps::TAGGED);
    let memory = caps.intersects(Caps::RMA | Caps::ATOMICS);

    // at least one direction survives whenever the class is present
    assert_eq!(caps::send_allowed(raw) || caps::recv_allowed(raw), messaging);
    assert_eq!(caps::rma_initiate_allowed(raw) || caps::rma_target_allowed(raw), memory);
});
