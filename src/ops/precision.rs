//! Precision conversion helpers

use crate::error::{Error, Result};
use crate::ops::common::ensure_disjoint_or_same;
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Validate `convert_precision` and return the element count
///
/// Shapes may differ as long as both sides hold the same number of values.
/// A same-precision conversion copies and may run in place.
pub fn validate_convert_precision<R: Runtime>(input: &Tensor<R>, out: &Tensor<R>) -> Result<usize> {
    if input.numel() != out.numel() {
        return Err(Error::shape_mismatch(&[input.numel()], &[out.numel()]));
    }
    if input.dtype() == out.dtype() {
        ensure_disjoint_or_same("out", out, input)?;
    } else if out.aliases(input) {
        return Err(Error::invalid_argument(
            "out",
            "precision conversion cannot run in place",
        ));
    }
    Ok(input.numel())
}
