//! Precision conversion kernel

use crate::dtype::Element;

/// Convert `len` elements from `S` to `D` through f32
///
/// Narrowing to f16 rounds to nearest even. When `S == D` this is a copy and
/// `src` may equal `dst`.
///
/// # Safety
/// - `src` and `dst` must be valid for `len` elements
/// - Distinct element types must not overlap
#[inline]
pub unsafe fn cast_kernel<S: Element, D: Element>(src: *const S, dst: *mut D, len: usize) {
    for i in 0..len {
        *dst.add(i) = D::from_f32((*src.add(i)).to_f32());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use half::f16;

    #[test]
    fn test_cast_round_trip_is_exact_for_halves() {
        let values: Vec<f16> = [0.0f32, -1.5, 65504.0, 6.1e-5]
            .iter()
            .map(|&v| f16::from_f32(v))
            .collect();
        let mut wide = vec![0.0f32; values.len()];
        let mut back = vec![f16::ZERO; values.len()];
        unsafe {
            cast_kernel(values.as_ptr(), wide.as_mut_ptr(), values.len());
            cast_kernel(wide.as_ptr(), back.as_mut_ptr(), values.len());
        }
        assert_eq!(values, back);
    }
}
