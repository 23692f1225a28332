//! Channel concatenation and extraction trait.

use crate::error::Result;
use crate::runtime::Runtime;
use crate::tensor::{DataFormat, Tensor};

/// Channel-axis data movement
pub trait ChannelOps<R: Runtime> {
    /// Concatenate two tensors along the channel axis
    ///
    /// `a` fills output channels `[0, cA)` and `b` fills `[cA, cA + cB)`.
    /// Values are copied unchanged.
    ///
    /// # Arguments
    ///
    /// * `a` - `[n, cA, spatial..]` (NCHW) or `[n, spatial.., cA]` (NHWC)
    /// * `b` - Same non-channel extents as `a`, with `cB` channels
    /// * `out` - Same non-channel extents, `cA + cB` channels
    /// * `format` - Layout of all three tensors
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` if the non-channel extents disagree or `out` has the
    /// wrong shape; `InvalidArgument` if `out` overlaps an input.
    fn channel_concat(
        &self,
        a: &Tensor<R>,
        b: &Tensor<R>,
        out: &mut Tensor<R>,
        format: DataFormat,
    ) -> Result<()>;

    /// Copy channel 0 into a tensor without a channel axis
    ///
    /// `out` is `[n, xy]` for a rank-3 input and `[n, h, w]` for a rank-4 input.
    fn channel0_extract(
        &self,
        input: &Tensor<R>,
        out: &mut Tensor<R>,
        format: DataFormat,
    ) -> Result<()>;

    /// Copy channels `[start, start + c_out)` where `c_out` is the channel
    /// extent of `out`
    ///
    /// `out` has the same rank and non-channel extents as `input`.
    fn channel_slice(
        &self,
        input: &Tensor<R>,
        out: &mut Tensor<R>,
        format: DataFormat,
        start: usize,
    ) -> Result<()>;
}
