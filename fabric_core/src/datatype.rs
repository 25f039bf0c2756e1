//! Atomic operand datatypes and their byte widths.

use crate::os::OsError;
use std::mem::size_of;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Datatype {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float,
    Double,
    FloatComplex,
    DoubleComplex,
    LongDouble,
    LongDoubleComplex,
}

// C `long double` width on the targets we build for.
#[cfg(any(target_arch = "x86_64", target_arch = "aarch64", target_arch = "riscv64"))]
const LONG_DOUBLE_SIZE: usize = 16;
#[cfg(target_arch = "x86")]
const LONG_DOUBLE_SIZE: usize = 12;
#[cfg(not(any(
    target_arch = "x86_64",
    target_arch = "aarch64",
    target_arch = "riscv64",
    target_arch = "x86"
)))]
const LONG_DOUBLE_SIZE: usize = 8;

impl Datatype {
    const ALL: [Datatype; 14] = [
        Datatype::Int8,
        Datatype::UInt8,
        Datatype::Int16,
        Datatype::UInt16,
        Datatype::Int32,
        Datatype::UInt32,
        Datatype::Int64,
        Datatype::UInt64,
        Datatype::Float,
        Datatype::Double,
        Datatype::FloatComplex,
        Datatype::DoubleComplex,
        Datatype::LongDouble,
        Datatype::LongDoubleComplex,
    ];

    /// Width in bytes of one element.
    pub fn size(self) -> usize {
        match self {
            Datatype::Int8 => size_of::<i8>(),
            Datatype::UInt8 => size_of::<u8>(),
            Datatype::Int16 => size_of::<i16>(),
            Datatype::UInt16 => size_of::<u16>(),
            Datatype::Int32 => size_of::<i32>(),
            Datatype::UInt32 => size_of::<u32>(),
            Datatype::Int64 => size_of::<i64>(),
            Datatype::UInt64 => size_of::<u64>(),
            Datatype::Float => size_of::<f32>(),
            Datatype::Double => size_of::<f64>(),
            Datatype::FloatComplex => 2 * size_of::<f32>(),
            Datatype::DoubleComplex => 2 * size_of::<f64>(),
            Datatype::LongDouble => LONG_DOUBLE_SIZE,
            Datatype::LongDoubleComplex => 2 * LONG_DOUBLE_SIZE,
        }
    }
}

impl TryFrom<u32> for Datatype {
    type Error = OsError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Datatype::ALL
            .get(code as usize)
            .copied()
            .ok_or(OsError::InvalidArgument)
    }
}

/// Byte width of the datatype with wire code `code`.
pub fn datatype_size(code: u32) -> Result<usize, OsError> {
    Datatype::try_from(code).map(Datatype::size)
}
