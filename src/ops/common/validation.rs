//! Boundary checks shared by every backend.
//!
//! Operations call these before any kernel runs, so a rejected call never
//! leaves a partially written output behind.

use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::runtime::Runtime;
use crate::tensor::{DataFormat, ImageDims, PlaneDims, Tensor};

/// Check that two operands share a dtype
pub fn ensure_same_dtype<R: Runtime>(a: &Tensor<R>, b: &Tensor<R>) -> Result<()> {
    if a.dtype() != b.dtype() {
        return Err(Error::DTypeMismatch {
            lhs: a.dtype(),
            rhs: b.dtype(),
        });
    }
    Ok(())
}

/// Check that a tensor has one specific dtype
pub fn ensure_dtype<R: Runtime>(t: &Tensor<R>, dtype: DType, op: &'static str) -> Result<()> {
    if t.dtype() != dtype {
        return Err(Error::unsupported_dtype(t.dtype(), op));
    }
    Ok(())
}

/// Check that a tensor has exactly the expected shape
pub fn ensure_shape<R: Runtime>(t: &Tensor<R>, expected: &[usize]) -> Result<()> {
    if t.shape() != expected {
        return Err(Error::shape_mismatch(expected, t.shape()));
    }
    Ok(())
}

/// Reject an output that overlaps an input
///
/// Gather-style kernels read from positions they have not yet written, so any
/// overlap corrupts the result.
pub fn ensure_disjoint<R: Runtime>(
    arg: &'static str,
    out: &Tensor<R>,
    input: &Tensor<R>,
) -> Result<()> {
    if out.aliases(input) {
        return Err(Error::invalid_argument(arg, "output overlaps an input buffer"));
    }
    Ok(())
}

/// Allow an output that is either disjoint from the input or exactly the
/// same buffer (elementwise in-place)
pub fn ensure_disjoint_or_same<R: Runtime>(
    arg: &'static str,
    out: &Tensor<R>,
    input: &Tensor<R>,
) -> Result<()> {
    if !out.aliases(input) {
        return Ok(());
    }
    if out.ptr() == input.ptr() && out.numel() == input.numel() {
        return Ok(());
    }
    Err(Error::invalid_argument(arg, "output partially overlaps the input buffer"))
}

/// Interpret a rank-3/4 tensor as `(n, c, xy)` under `format`
pub fn plane_dims<R: Runtime>(
    op: &'static str,
    t: &Tensor<R>,
    format: DataFormat,
) -> Result<PlaneDims> {
    format.plane_dims(t.shape()).ok_or(Error::RankMismatch {
        op,
        expected: "3 or 4",
        got: t.ndim(),
    })
}

/// Interpret a rank-4 tensor as `(n, c, h, w)` under `format`
pub fn image_dims<R: Runtime>(
    op: &'static str,
    t: &Tensor<R>,
    format: DataFormat,
) -> Result<ImageDims> {
    format.image_dims(t.shape()).ok_or(Error::RankMismatch {
        op,
        expected: "4",
        got: t.ndim(),
    })
}

/// Check a spatial mask: `[n, xy]` or `[n, h, w]`, same dtype as the data
pub fn validate_mask<R: Runtime>(
    mask: &Tensor<R>,
    data: &Tensor<R>,
    dims: PlaneDims,
) -> Result<()> {
    ensure_same_dtype(data, mask)?;
    let shape = mask.shape();
    if shape.len() < 2 || shape[0] != dims.n || mask.numel() != dims.n * dims.xy {
        return Err(Error::shape_mismatch(&[dims.n, dims.xy], shape));
    }
    Ok(())
}

/// Check a per-batch valid-position count: F32, `[n]` or `[n, 1]`
pub fn validate_mask_sum<R: Runtime>(
    op: &'static str,
    mask_sum: &Tensor<R>,
    n: usize,
) -> Result<()> {
    ensure_dtype(mask_sum, DType::F32, op)?;
    match mask_sum.shape() {
        [len] if *len == n => Ok(()),
        [len, 1] if *len == n => Ok(()),
        other => Err(Error::shape_mismatch(&[n], other)),
    }
}

#[cfg(all(test, feature = "cpu"))]
mod tests {
    use super::*;
    use crate::runtime::cpu::{CpuDevice, CpuRuntime};

    #[test]
    fn test_plane_dims_rank_error() {
        let device = CpuDevice::new();
        let t = Tensor::<CpuRuntime>::zeros(&[4, 4], DType::F32, &device);
        let err = plane_dims("pool_rows_sum", &t, DataFormat::Nchw).unwrap_err();
        assert!(matches!(err, Error::RankMismatch { got: 2, .. }));
    }

    #[test]
    fn test_disjoint_checks() {
        let device = CpuDevice::new();
        let a = Tensor::<CpuRuntime>::zeros(&[2, 8], DType::F32, &device);
        let view = a.reshape(&[16]).unwrap();
        let b = Tensor::<CpuRuntime>::zeros(&[2, 8], DType::F32, &device);

        assert!(ensure_disjoint("out", &b, &a).is_ok());
        assert!(ensure_disjoint("out", &view, &a).is_err());
        assert!(ensure_disjoint_or_same("out", &view, &a).is_ok());
    }

    #[test]
    fn test_mask_sum_shapes() {
        let device = CpuDevice::new();
        let ok = Tensor::<CpuRuntime>::zeros(&[3, 1], DType::F32, &device);
        assert!(validate_mask_sum("global_pool", &ok, 3).is_ok());

        let wrong_len = Tensor::<CpuRuntime>::zeros(&[2], DType::F32, &device);
        assert!(matches!(
            validate_mask_sum("global_pool", &wrong_len, 3),
            Err(Error::ShapeMismatch { .. })
        ));

        let half = Tensor::<CpuRuntime>::zeros(&[3], DType::F16, &device);
        assert!(matches!(
            validate_mask_sum("global_pool", &half, 3),
            Err(Error::UnsupportedDType { .. })
        ));
    }
}
