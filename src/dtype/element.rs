//! Element trait for mapping Rust types to DType

use super::DType;
use bytemuck::{Pod, Zeroable};

/// Trait for types that can be elements of a tensor
///
/// This is the capability every generic kernel is written against: a plain
/// old data float that can be promoted to `f32` for arithmetic and narrowed
/// back on store. Kernels never do arithmetic in the storage type itself, so
/// an `f16` pooling sum over a large board cannot overflow midway.
///
/// # Bounds
/// - `Copy + Send + Sync + 'static` - Basic trait requirements
/// - `Pod + Zeroable` - Safe memory transmutation (bytemuck)
/// - `PartialOrd` - Comparison for max operations
pub trait Element:
    Copy + Clone + Send + Sync + Pod + Zeroable + PartialOrd + std::fmt::Debug + 'static
{
    /// The corresponding DType for this Rust type
    const DTYPE: DType;

    /// Widen to f32 for computation
    fn to_f32(self) -> f32;

    /// Narrow from f32 (round to nearest even for reduced precision)
    fn from_f32(v: f32) -> Self;
}

impl Element for f32 {
    const DTYPE: DType = DType::F32;

    #[inline]
    fn to_f32(self) -> f32 {
        self
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        v
    }
}

impl Element for half::f16 {
    const DTYPE: DType = DType::F16;

    #[inline]
    fn to_f32(self) -> f32 {
        half::f16::to_f32(self)
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        half::f16::from_f32(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use half::f16;

    #[test]
    fn test_element_dtype() {
        assert_eq!(f32::DTYPE, DType::F32);
        assert_eq!(f16::DTYPE, DType::F16);
    }

    #[test]
    fn test_element_conversions() {
        assert_eq!(<f32 as Element>::from_f32(2.5).to_f32(), 2.5);
        assert_eq!(<f16 as Element>::from_f32(2.5).to_f32(), 2.5);
    }

    #[test]
    fn test_f16_narrowing_rounds() {
        // 1 + 2^-11 is exactly halfway between two f16 values; ties go to even.
        let v = 1.0f32 + 2.0f32.powi(-11);
        assert_eq!(<f16 as Element>::from_f32(v).to_f32(), 1.0);
        // f16 max is 65504; anything well above overflows to infinity.
        assert!(<f16 as Element>::from_f32(1.0e6).to_f32().is_infinite());
    }
}
