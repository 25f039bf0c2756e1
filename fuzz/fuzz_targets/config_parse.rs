#![no_main]
use fabric_core::config::MuxConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(cfg) = MuxConfig::parse(text) {
            assert!(cfg.grow_step > 0);
        }
    }
});
