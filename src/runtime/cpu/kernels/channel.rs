//! Channel concatenation and slicing kernels

use crate::dtype::Element;
use crate::ops::{ConcatPlan, SlicePlan};

/// Write output row `row` of a concatenation: A's row then B's row
///
/// # Safety
/// - `a` must hold `plan.rows * plan.a_len` elements, `b` `plan.rows * plan.b_len`
/// - `out` must hold `plan.rows * plan.out_len()` elements and not overlap `a` or `b`
#[inline]
pub unsafe fn concat_row_kernel<T: Element>(
    a: *const T,
    b: *const T,
    out: *mut T,
    plan: &ConcatPlan,
    row: usize,
) {
    let dst = out.add(row * plan.out_len());
    // A zero-channel operand has no allocation to read from
    if plan.a_len > 0 {
        std::ptr::copy_nonoverlapping(a.add(row * plan.a_len), dst, plan.a_len);
    }
    if plan.b_len > 0 {
        std::ptr::copy_nonoverlapping(b.add(row * plan.b_len), dst.add(plan.a_len), plan.b_len);
    }
}

/// Copy the channel window of input row `row`
///
/// # Safety
/// - `input` must hold `plan.rows * plan.in_len` elements
/// - `out` must hold `plan.rows * plan.out_len` elements and not overlap `input`
#[inline]
pub unsafe fn slice_row_kernel<T: Element>(
    input: *const T,
    out: *mut T,
    plan: &SlicePlan,
    row: usize,
) {
    std::ptr::copy_nonoverlapping(
        input.add(row * plan.in_len + plan.offset),
        out.add(row * plan.out_len),
        plan.out_len,
    );
}
