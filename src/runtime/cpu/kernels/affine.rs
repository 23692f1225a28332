//! Bias and scale-bias kernels

use crate::dtype::Element;
use crate::ops::affine::scale_bias_value;
use crate::ops::{RowBiasPlan, ScaleBiasPlan};
use crate::tensor::{DataFormat, PlaneDims};

/// `buf[i] += bias[i]` for `i in start..start + len`
///
/// # Safety
/// - `buf` and `bias` must be valid for `start + len` elements
/// - `bias` may equal `buf` but must not partially overlap it
#[inline]
pub unsafe fn add_tensor_kernel<T: Element>(buf: *mut T, bias: *const T, start: usize, len: usize) {
    for i in start..start + len {
        let v = (*buf.add(i)).to_f32() + (*bias.add(i)).to_f32();
        *buf.add(i) = T::from_f32(v);
    }
}

/// `buf[row, ch] += bias[ch]`
///
/// # Safety
/// - `buf` must hold `plan.rows * plan.c` elements, `bias` `plan.c`
#[inline]
pub unsafe fn add_c_bias_row_kernel<T: Element>(
    buf: *mut T,
    bias: *const T,
    plan: &RowBiasPlan,
    row: usize,
) {
    let dst = buf.add(row * plan.c);
    for ch in 0..plan.c {
        let v = (*dst.add(ch)).to_f32() + (*bias.add(ch)).to_f32();
        *dst.add(ch) = T::from_f32(v);
    }
}

/// Add the `[n, c]` bias to one row of `buf`
///
/// NCHW rows are `(b, ch)` planes of `xy` values; NHWC rows are `(b, pos)`
/// positions of `c` values.
///
/// # Safety
/// - `buf` must hold `dims.numel()` elements, `bias` `dims.n * dims.c`
#[inline]
pub unsafe fn add_nc_bias_row_kernel<T: Element>(
    buf: *mut T,
    bias: *const T,
    dims: PlaneDims,
    format: DataFormat,
    row: usize,
) {
    match format {
        DataFormat::Nchw => {
            let b = (*bias.add(row)).to_f32();
            let dst = buf.add(row * dims.xy);
            for i in 0..dims.xy {
                *dst.add(i) = T::from_f32((*dst.add(i)).to_f32() + b);
            }
        }
        DataFormat::Nhwc => {
            let bias_row = bias.add((row / dims.xy) * dims.c);
            let dst = buf.add(row * dims.c);
            for ch in 0..dims.c {
                let v = (*dst.add(ch)).to_f32() + (*bias_row.add(ch)).to_f32();
                *dst.add(ch) = T::from_f32(v);
            }
        }
    }
}

/// Apply the fused affine/ReLU/mask transform to one row
///
/// Rows follow the same decomposition as [`add_nc_bias_row_kernel`]. `mask`
/// is ignored unless `plan.masked`.
///
/// # Safety
/// - `input` and `out` must hold `plan.dims.numel()` elements; they may be
///   the same buffer
/// - `scale` and `bias` must hold `plan.dims.c` elements
/// - When `plan.masked`, `mask` must hold `plan.dims.n * plan.dims.xy` elements
#[inline]
#[allow(clippy::too_many_arguments)]
pub unsafe fn scale_bias_row_kernel<T: Element>(
    input: *const T,
    out: *mut T,
    scale: *const T,
    bias: *const T,
    mask: *const T,
    plan: &ScaleBiasPlan,
    row: usize,
) {
    let PlaneDims { c, xy, .. } = plan.dims;

    match plan.format {
        DataFormat::Nchw => {
            let b = row / c;
            let ch = row % c;
            let s = (*scale.add(ch)).to_f32();
            let t = (*bias.add(ch)).to_f32();
            for i in 0..xy {
                let idx = row * xy + i;
                let m = mask_value(mask, plan.masked, b * xy + i);
                let v = scale_bias_value((*input.add(idx)).to_f32(), s, t, plan.apply_relu, m);
                *out.add(idx) = T::from_f32(v);
            }
        }
        DataFormat::Nhwc => {
            let m = mask_value(mask, plan.masked, row);
            for ch in 0..c {
                let idx = row * c + ch;
                let v = scale_bias_value(
                    (*input.add(idx)).to_f32(),
                    (*scale.add(ch)).to_f32(),
                    (*bias.add(ch)).to_f32(),
                    plan.apply_relu,
                    m,
                );
                *out.add(idx) = T::from_f32(v);
            }
        }
    }
}

#[inline]
unsafe fn mask_value<T: Element>(mask: *const T, masked: bool, idx: usize) -> f32 {
    if masked {
        (*mask.add(idx)).to_f32()
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_bias_row_in_place_nhwc() {
        // one position, c = 2, applied in place
        let mut data = [1.0f32, -3.0];
        let scale = [2.0f32, 1.0];
        let bias = [0.5f32, 1.0];
        let mask = [0.5f32];
        let plan = ScaleBiasPlan {
            dims: PlaneDims { n: 1, c: 2, xy: 1 },
            format: DataFormat::Nhwc,
            apply_relu: true,
            masked: true,
        };
        let ptr = data.as_mut_ptr();
        unsafe {
            scale_bias_row_kernel(
                ptr,
                ptr,
                scale.as_ptr(),
                bias.as_ptr(),
                mask.as_ptr(),
                &plan,
                0,
            )
        };
        assert_eq!(data, [1.25, 0.0]);
    }
}
