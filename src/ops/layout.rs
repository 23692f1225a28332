//! Layout transform helpers
//!
//! Format conversion and spatial transposition are the same batched
//! transpose: `[batch, rows, cols, inner] -> [batch, cols, rows, inner]`.
//! Every mirror is a reflection of a `[outer, h, w, inner]` view.

use crate::error::{Error, Result};
use crate::ops::common::{ensure_disjoint, ensure_same_dtype, ensure_shape, image_dims, plane_dims};
use crate::runtime::Runtime;
use crate::tensor::{DataFormat, Tensor};

/// Geometry of a batched transpose with an untouched inner block
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TransposePlan {
    /// Independent matrices
    pub batch: usize,
    /// Rows of each input matrix
    pub rows: usize,
    /// Columns of each input matrix
    pub cols: usize,
    /// Contiguous values moved together
    pub inner: usize,
}

impl TransposePlan {
    /// Total element count
    #[inline]
    pub fn numel(&self) -> usize {
        self.batch * self.rows * self.cols * self.inner
    }

    /// Input offset of the block that lands at output `(b, col, row)`
    #[inline]
    pub fn src_offset(&self, b: usize, col: usize, row: usize) -> usize {
        ((b * self.rows + row) * self.cols + col) * self.inner
    }
}

/// Geometry of a reflection over a `[outer, h, w, inner]` view
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MirrorPlan {
    /// Leading extent (not reflected)
    pub outer: usize,
    /// Y extent
    pub h: usize,
    /// X extent
    pub w: usize,
    /// Trailing extent (not reflected)
    pub inner: usize,
    /// Reflect along Y
    pub mirror_y: bool,
    /// Reflect along X
    pub mirror_x: bool,
}

impl MirrorPlan {
    /// Total element count
    #[inline]
    pub fn numel(&self) -> usize {
        self.outer * self.h * self.w * self.inner
    }

    /// Input offset of the block that lands at output `(o, y, x)`
    #[inline]
    pub fn src_offset(&self, o: usize, y: usize, x: usize) -> usize {
        let sy = if self.mirror_y { self.h - 1 - y } else { y };
        let sx = if self.mirror_x { self.w - 1 - x } else { x };
        ((o * self.h + sy) * self.w + sx) * self.inner
    }
}

/// Validate `convert_format` operands
///
/// `from` is the layout of `input`; `out` must hold the same `(n, c, spatial)`
/// in the other layout.
pub fn validate_convert_format<R: Runtime>(
    input: &Tensor<R>,
    out: &Tensor<R>,
    from: DataFormat,
) -> Result<TransposePlan> {
    ensure_same_dtype(input, out)?;
    let dims = plane_dims("convert_format", input, from)?;
    let expected = from
        .flipped()
        .shape(dims.n, dims.c, from.spatial(input.shape()));
    ensure_shape(out, &expected)?;
    ensure_disjoint("out", out, input)?;

    let (rows, cols) = match from {
        DataFormat::Nchw => (dims.c, dims.xy),
        DataFormat::Nhwc => (dims.xy, dims.c),
    };
    Ok(TransposePlan {
        batch: dims.n,
        rows,
        cols,
        inner: 1,
    })
}

/// Validate `transpose_spatial` operands (`h` and `w` swap)
pub fn validate_transpose_spatial<R: Runtime>(
    input: &Tensor<R>,
    out: &Tensor<R>,
    format: DataFormat,
) -> Result<TransposePlan> {
    ensure_same_dtype(input, out)?;
    let dims = image_dims("transpose_spatial", input, format)?;
    ensure_shape(out, &format.shape(dims.n, dims.c, &[dims.w, dims.h]))?;
    ensure_disjoint("out", out, input)?;

    let (batch, inner) = match format {
        DataFormat::Nchw => (dims.n * dims.c, 1),
        DataFormat::Nhwc => (dims.n, dims.c),
    };
    Ok(TransposePlan {
        batch,
        rows: dims.h,
        cols: dims.w,
        inner,
    })
}

/// Validate a generic single-axis `mirror`
pub fn validate_mirror<R: Runtime>(
    input: &Tensor<R>,
    out: &Tensor<R>,
    axis: usize,
) -> Result<MirrorPlan> {
    ensure_same_dtype(input, out)?;
    let shape = input.shape();
    if axis >= shape.len() {
        return Err(Error::invalid_argument(
            "axis",
            format!("axis {} out of range for rank {}", axis, shape.len()),
        ));
    }
    ensure_shape(out, shape)?;
    ensure_disjoint("out", out, input)?;

    Ok(MirrorPlan {
        outer: shape[..axis].iter().product(),
        h: shape[axis],
        w: 1,
        inner: shape[axis + 1..].iter().product(),
        mirror_y: true,
        mirror_x: false,
    })
}

/// Validate `mirror_spatial` operands
pub fn validate_mirror_spatial<R: Runtime>(
    input: &Tensor<R>,
    out: &Tensor<R>,
    format: DataFormat,
    mirror_y: bool,
    mirror_x: bool,
) -> Result<MirrorPlan> {
    ensure_same_dtype(input, out)?;
    let dims = image_dims("mirror_spatial", input, format)?;
    ensure_shape(out, input.shape())?;
    ensure_disjoint("out", out, input)?;

    let (outer, inner) = match format {
        DataFormat::Nchw => (dims.n * dims.c, 1),
        DataFormat::Nhwc => (dims.n, dims.c),
    };
    Ok(MirrorPlan {
        outer,
        h: dims.h,
        w: dims.w,
        inner,
        mirror_y,
        mirror_x,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transpose_src_offset() {
        // [c=2, xy=3] -> [xy=3, c=2]; output (pos 2, channel 1) reads input (1, 2)
        let plan = TransposePlan {
            batch: 1,
            rows: 2,
            cols: 3,
            inner: 1,
        };
        assert_eq!(plan.src_offset(0, 2, 1), 5);
        assert_eq!(plan.numel(), 6);
    }

    #[test]
    fn test_mirror_src_offset() {
        let plan = MirrorPlan {
            outer: 2,
            h: 3,
            w: 4,
            inner: 1,
            mirror_y: false,
            mirror_x: true,
        };
        assert_eq!(plan.src_offset(0, 0, 0), 3);
        assert_eq!(plan.src_offset(1, 2, 3), 12 + 8);

        let both = MirrorPlan {
            mirror_y: true,
            ..plan
        };
        assert_eq!(both.src_offset(0, 0, 0), 11);
    }
}
