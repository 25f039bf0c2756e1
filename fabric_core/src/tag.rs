//! Conversions between a tag format word and the usable tag bits.
//!
//! Both operate on the network-order representation of their argument, so
//! results match peers regardless of host endianness.

/// Tag format with alternating ignore/match bits.
pub const TAG_GENERIC: u64 = 0xAAAA_AAAA_AAAA_AAAA;

fn shift_of(word: u64) -> Option<u32> {
    let be = word.to_be();
    (be != 0).then(|| be.trailing_zeros())
}

/// Mask of the tag bits a memory tag format leaves available.
pub fn tag_bits(mem_tag_format: u64) -> u64 {
    match shift_of(mem_tag_format) {
        Some(shift) => u64::MAX >> shift,
        None => u64::MAX,
    }
}

/// Generic tag format covering `tag_bits`.
pub fn tag_format(tag_bits: u64) -> u64 {
    match shift_of(tag_bits) {
        Some(shift) => TAG_GENERIC >> shift,
        None => TAG_GENERIC,
    }
}
