//! Bias and scale-bias helpers

use crate::error::{Error, Result};
use crate::ops::common::{
    ensure_disjoint, ensure_disjoint_or_same, ensure_same_dtype, ensure_shape, plane_dims,
    validate_mask,
};
use crate::runtime::Runtime;
use crate::tensor::{DataFormat, PlaneDims, Tensor};

/// `buf [rows, c]` plus a `[c]` bias broadcast over rows
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RowBiasPlan {
    /// Collapsed leading extent
    pub rows: usize,
    /// Channel count
    pub c: usize,
}

/// Validated `apply_c_scale_bias` call
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScaleBiasPlan {
    /// Data geometry
    pub dims: PlaneDims,
    /// Layout of input and output
    pub format: DataFormat,
    /// Clamp negatives to zero after the affine step
    pub apply_relu: bool,
    /// A spatial mask is applied last
    pub masked: bool,
}

/// Validate `add_tensor_inplace`
pub fn validate_add_tensor<R: Runtime>(buf: &Tensor<R>, bias: &Tensor<R>) -> Result<usize> {
    ensure_same_dtype(buf, bias)?;
    ensure_shape(bias, buf.shape())?;
    ensure_disjoint_or_same("bias", buf, bias)?;
    Ok(buf.numel())
}

/// Validate `add_c_bias_inplace`
///
/// The last axis of `buf` is the channel axis; all leading axes collapse into
/// rows.
pub fn validate_add_c_bias<R: Runtime>(buf: &Tensor<R>, bias: &Tensor<R>) -> Result<RowBiasPlan> {
    ensure_same_dtype(buf, bias)?;
    let Some(&c) = buf.shape().last() else {
        return Err(Error::RankMismatch {
            op: "add_c_bias_inplace",
            expected: ">= 1",
            got: 0,
        });
    };
    ensure_shape(bias, &[c])?;
    ensure_disjoint("bias", buf, bias)?;

    let rows = if c == 0 { 0 } else { buf.numel() / c };
    Ok(RowBiasPlan { rows, c })
}

/// Validate `add_nc_bias_inplace`
pub fn validate_add_nc_bias<R: Runtime>(
    buf: &Tensor<R>,
    bias: &Tensor<R>,
    format: DataFormat,
) -> Result<PlaneDims> {
    ensure_same_dtype(buf, bias)?;
    let dims = plane_dims("add_nc_bias_inplace", buf, format)?;
    ensure_shape(bias, &[dims.n, dims.c])?;
    ensure_disjoint("bias", buf, bias)?;
    Ok(dims)
}

/// Validate `apply_c_scale_bias`
///
/// `out` may be the input buffer itself; any other overlap is rejected.
pub fn validate_scale_bias<R: Runtime>(
    input: &Tensor<R>,
    out: &Tensor<R>,
    scale: &Tensor<R>,
    bias: &Tensor<R>,
    mask: Option<&Tensor<R>>,
    format: DataFormat,
    apply_relu: bool,
) -> Result<ScaleBiasPlan> {
    ensure_same_dtype(input, out)?;
    ensure_same_dtype(input, scale)?;
    ensure_same_dtype(input, bias)?;

    let dims = plane_dims("apply_c_scale_bias", input, format)?;
    ensure_shape(out, input.shape())?;
    ensure_shape(scale, &[dims.c])?;
    ensure_shape(bias, &[dims.c])?;
    if let Some(mask) = mask {
        validate_mask(mask, input, dims)?;
        ensure_disjoint("out", out, mask)?;
    }

    ensure_disjoint_or_same("out", out, input)?;
    ensure_disjoint("out", out, scale)?;
    ensure_disjoint("out", out, bias)?;

    Ok(ScaleBiasPlan {
        dims,
        format,
        apply_relu,
        masked: mask.is_some(),
    })
}

/// `x * scale + bias`, rectified and masked in that order
#[inline]
pub fn scale_bias_value(x: f32, scale: f32, bias: f32, apply_relu: bool, mask: f32) -> f32 {
    let mut v = x * scale + bias;
    if apply_relu && v < 0.0 {
        v = 0.0;
    }
    v * mask
}
