//! Channel concatenation and extraction helpers
//!
//! Both layouts reduce to the same row-wise copy. In NCHW a row is one batch
//! item (`c * xy` values, channel-major); in NHWC a row is one spatial position
//! (`c` values). Concatenation writes an A row followed by a B row; slicing
//! copies a contiguous window out of each row.

use crate::error::{Error, Result};
use crate::ops::common::{ensure_disjoint, ensure_same_dtype, ensure_shape, plane_dims};
use crate::runtime::Runtime;
use crate::tensor::{DataFormat, PlaneDims, Tensor};

/// Row decomposition of a channel concatenation
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ConcatPlan {
    /// Number of independent rows
    pub rows: usize,
    /// Values taken from A per row
    pub a_len: usize,
    /// Values taken from B per row
    pub b_len: usize,
}

impl ConcatPlan {
    fn new(dims_a: PlaneDims, c_b: usize, format: DataFormat) -> Self {
        match format {
            DataFormat::Nchw => Self {
                rows: dims_a.n,
                a_len: dims_a.c * dims_a.xy,
                b_len: c_b * dims_a.xy,
            },
            DataFormat::Nhwc => Self {
                rows: dims_a.n * dims_a.xy,
                a_len: dims_a.c,
                b_len: c_b,
            },
        }
    }

    /// Length of one output row
    #[inline]
    pub fn out_len(&self) -> usize {
        self.a_len + self.b_len
    }
}

/// Row decomposition of a channel window copy
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SlicePlan {
    /// Number of independent rows
    pub rows: usize,
    /// Length of one input row
    pub in_len: usize,
    /// Offset of the window inside an input row
    pub offset: usize,
    /// Length of the window (and of one output row)
    pub out_len: usize,
}

impl SlicePlan {
    fn new(dims: PlaneDims, start: usize, count: usize, format: DataFormat) -> Self {
        match format {
            DataFormat::Nchw => Self {
                rows: dims.n,
                in_len: dims.c * dims.xy,
                offset: start * dims.xy,
                out_len: count * dims.xy,
            },
            DataFormat::Nhwc => Self {
                rows: dims.n * dims.xy,
                in_len: dims.c,
                offset: start,
                out_len: count,
            },
        }
    }
}

/// Validate `channel_concat` operands and plan the copy
pub fn validate_concat<R: Runtime>(
    a: &Tensor<R>,
    b: &Tensor<R>,
    out: &Tensor<R>,
    format: DataFormat,
) -> Result<ConcatPlan> {
    ensure_same_dtype(a, b)?;
    ensure_same_dtype(a, out)?;

    let dims_a = plane_dims("channel_concat", a, format)?;
    let dims_b = plane_dims("channel_concat", b, format)?;
    ensure_shape(b, &format.with_channels(a.shape(), dims_b.c))?;
    ensure_shape(out, &format.with_channels(a.shape(), dims_a.c + dims_b.c))?;

    ensure_disjoint("out", out, a)?;
    ensure_disjoint("out", out, b)?;

    Ok(ConcatPlan::new(dims_a, dims_b.c, format))
}

/// Validate `channel0_extract` operands
///
/// The output drops the channel axis: `[n, xy]` from a rank-3 view,
/// `[n, h, w]` from a rank-4 view.
pub fn validate_channel0_extract<R: Runtime>(
    input: &Tensor<R>,
    out: &Tensor<R>,
    format: DataFormat,
) -> Result<SlicePlan> {
    ensure_same_dtype(input, out)?;
    let dims = plane_dims("channel0_extract", input, format)?;
    if dims.c == 0 {
        return Err(Error::invalid_argument("input", "tensor has no channels"));
    }

    let mut expected = vec![dims.n];
    expected.extend_from_slice(format.spatial(input.shape()));
    ensure_shape(out, &expected)?;
    ensure_disjoint("out", out, input)?;

    Ok(SlicePlan::new(dims, 0, 1, format))
}

/// Validate `channel_slice` operands
///
/// The window length is the output's channel count.
pub fn validate_channel_slice<R: Runtime>(
    input: &Tensor<R>,
    out: &Tensor<R>,
    format: DataFormat,
    start: usize,
) -> Result<SlicePlan> {
    ensure_same_dtype(input, out)?;
    let dims = plane_dims("channel_slice", input, format)?;
    let out_dims = plane_dims("channel_slice", out, format)?;
    ensure_shape(out, &format.with_channels(input.shape(), out_dims.c))?;

    if start + out_dims.c > dims.c {
        return Err(Error::invalid_argument(
            "start",
            format!(
                "channels [{}, {}) out of range for {} channels",
                start,
                start + out_dims.c,
                dims.c
            ),
        ));
    }
    ensure_disjoint("out", out, input)?;

    Ok(SlicePlan::new(dims, start, out_dims.c, format))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat_plan_layouts() {
        let dims = PlaneDims { n: 2, c: 3, xy: 5 };
        assert_eq!(
            ConcatPlan::new(dims, 4, DataFormat::Nchw),
            ConcatPlan {
                rows: 2,
                a_len: 15,
                b_len: 20
            }
        );
        assert_eq!(
            ConcatPlan::new(dims, 4, DataFormat::Nhwc),
            ConcatPlan {
                rows: 10,
                a_len: 3,
                b_len: 4
            }
        );
    }

    #[test]
    fn test_slice_plan_layouts() {
        let dims = PlaneDims { n: 2, c: 6, xy: 4 };
        let nchw = SlicePlan::new(dims, 2, 3, DataFormat::Nchw);
        assert_eq!((nchw.rows, nchw.in_len, nchw.offset, nchw.out_len), (2, 24, 8, 12));
        let nhwc = SlicePlan::new(dims, 2, 3, DataFormat::Nhwc);
        assert_eq!((nhwc.rows, nhwc.in_len, nhwc.offset, nhwc.out_len), (8, 6, 2, 3));
    }
}
