//! Spatial pooling trait.

use crate::error::Result;
use crate::runtime::Runtime;
use crate::tensor::{DataFormat, Tensor};

/// Per-(batch, channel) spatial reductions
///
/// Inputs are `[n, c, xy]`/`[n, c, h, w]` (NCHW) or `[n, xy, c]`/`[n, h, w, c]`
/// (NHWC). Outputs are `[n, k * c]`, one `c`-wide block per statistic. Sums are
/// accumulated in f32 for both precisions.
///
/// The *positive max* of a plane is its largest strictly positive value, or
/// exactly 0 when no value is positive.
pub trait PoolingOps<R: Runtime> {
    /// `out[b, ch] = scale_sum * sum(input[b, ch, :])`
    fn pool_rows_sum(
        &self,
        input: &Tensor<R>,
        out: &mut Tensor<R>,
        format: DataFormat,
        scale_sum: f32,
    ) -> Result<()>;

    /// `out[b, ch]` = positive max of plane `(b, ch)`
    fn pool_rows_max_positive(
        &self,
        input: &Tensor<R>,
        out: &mut Tensor<R>,
        format: DataFormat,
    ) -> Result<()>;

    /// Fused scaled sum and positive max in a single pass
    ///
    /// `out` is `[n, 2c]`: the sum block, then the positive-max block. Both
    /// blocks equal what the standalone operations produce.
    fn pool_rows_sum_and_max_positive(
        &self,
        input: &Tensor<R>,
        out: &mut Tensor<R>,
        format: DataFormat,
        scale_sum: f32,
    ) -> Result<()>;

    /// Global pooling for the trunk's pooled-bias layers
    ///
    /// `out` is `[n, 3c]`: sum, positive max, `sum / mask_sum[b]`.
    ///
    /// # Arguments
    ///
    /// * `mask_sum` - Per-batch count of valid positions, F32 `[n]` or `[n, 1]`.
    ///   `None` means every position is valid (divisor `xy`). A zero entry
    ///   produces inf/NaN in the mean block.
    fn global_pool(
        &self,
        input: &Tensor<R>,
        out: &mut Tensor<R>,
        format: DataFormat,
        mask_sum: Option<&Tensor<R>>,
    ) -> Result<()>;

    /// Value-head pooling
    ///
    /// Produces the same `[sum, positive max, sum / mask_sum]` triple as
    /// [`PoolingOps::global_pool`]; a separate entry point keeps the value
    /// head's call site distinct.
    fn value_head_pool(
        &self,
        input: &Tensor<R>,
        out: &mut Tensor<R>,
        format: DataFormat,
        mask_sum: Option<&Tensor<R>>,
    ) -> Result<()>;
}
