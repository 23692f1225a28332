//! Data type system for evalkern tensors
//!
//! Network evaluation only ever runs in full (f32) or reduced (f16) precision,
//! so the dtype set is deliberately the two IEEE 754 float formats.

mod element;

pub use element::Element;

use std::fmt;

/// Data types supported by evalkern tensors
///
/// # Discriminant Values (Serialization Stability)
///
/// Discriminants follow the float range of the wider numeric dtype numbering
/// (F32=1, F16=2) and are never changed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DType {
    /// 32-bit floating point (full precision)
    F32 = 1,
    /// 16-bit floating point (IEEE 754 half, reduced precision)
    F16 = 2,
}

impl DType {
    /// Size of one element in bytes
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            Self::F32 => 4,
            Self::F16 => 2,
        }
    }

    /// Returns true for the reduced-precision type
    #[inline]
    pub const fn is_reduced_precision(self) -> bool {
        matches!(self, Self::F16)
    }

    /// Short name used in kernel symbols and messages
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::F32 => "f32",
            Self::F16 => "f16",
        }
    }

    /// Get the dtype from its stable discriminant
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::F32),
            2 => Some(Self::F16),
            _ => None,
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}
