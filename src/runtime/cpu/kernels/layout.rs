//! Transpose and mirror kernels

use crate::dtype::Element;
use crate::ops::{MirrorPlan, TransposePlan};

/// Gather output row `out_row` (of `batch * cols`) of a batched transpose
///
/// The output row holds `rows` blocks of `inner` values.
///
/// # Safety
/// - `input` and `out` must hold `plan.numel()` elements and must not overlap
#[inline]
pub unsafe fn transpose_row_kernel<T: Element>(
    input: *const T,
    out: *mut T,
    plan: &TransposePlan,
    out_row: usize,
) {
    let b = out_row / plan.cols;
    let col = out_row % plan.cols;
    let mut dst = out.add(out_row * plan.rows * plan.inner);
    for row in 0..plan.rows {
        std::ptr::copy_nonoverlapping(input.add(plan.src_offset(b, col, row)), dst, plan.inner);
        dst = dst.add(plan.inner);
    }
}

/// Gather output row `out_row` (of `outer * h`) of a reflection
///
/// # Safety
/// - `input` and `out` must hold `plan.numel()` elements and must not overlap
#[inline]
pub unsafe fn mirror_row_kernel<T: Element>(
    input: *const T,
    out: *mut T,
    plan: &MirrorPlan,
    out_row: usize,
) {
    let o = out_row / plan.h;
    let y = out_row % plan.h;
    let row_len = plan.w * plan.inner;
    let dst = out.add(out_row * row_len);

    if !plan.mirror_x {
        std::ptr::copy_nonoverlapping(input.add(plan.src_offset(o, y, 0)), dst, row_len);
        return;
    }
    for x in 0..plan.w {
        std::ptr::copy_nonoverlapping(
            input.add(plan.src_offset(o, y, x)),
            dst.add(x * plan.inner),
            plan.inner,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transpose_rows() {
        // [1, 2, 3] -> [1, 3, 2]
        let input = [0.0f32, 1.0, 2.0, 3.0, 4.0, 5.0];
        let mut out = [0.0f32; 6];
        let plan = TransposePlan {
            batch: 1,
            rows: 2,
            cols: 3,
            inner: 1,
        };
        for r in 0..3 {
            unsafe { transpose_row_kernel(input.as_ptr(), out.as_mut_ptr(), &plan, r) };
        }
        assert_eq!(out, [0.0, 3.0, 1.0, 4.0, 2.0, 5.0]);
    }

    #[test]
    fn test_mirror_rows_with_inner_block() {
        // h = 1, w = 3, inner = 2
        let input = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mut out = [0.0f32; 6];
        let plan = MirrorPlan {
            outer: 1,
            h: 1,
            w: 3,
            inner: 2,
            mirror_y: false,
            mirror_x: true,
        };
        unsafe { mirror_row_kernel(input.as_ptr(), out.as_mut_ptr(), &plan, 0) };
        assert_eq!(out, [5.0, 6.0, 3.0, 4.0, 1.0, 2.0]);
    }
}
