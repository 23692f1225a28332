//! Layout transform and mirroring trait.

use crate::error::Result;
use crate::runtime::Runtime;
use crate::tensor::{DataFormat, Tensor};

/// Pure data movement between layouts and board symmetries
///
/// All operations are out of place; an `out` overlapping `input` is rejected
/// with `InvalidArgument`.
pub trait LayoutOps<R: Runtime> {
    /// Convert between NCHW and NHWC
    ///
    /// `from` is the layout of `input`. `[n, c, h, w] -> [n, h, w, c]` when
    /// `from` is NCHW, the inverse when it is NHWC. Rank-3 views
    /// (`[n, c, xy]` / `[n, xy, c]`) are accepted too. The round trip is
    /// bit-exact.
    fn convert_format(
        &self,
        input: &Tensor<R>,
        out: &mut Tensor<R>,
        from: DataFormat,
    ) -> Result<()>;

    /// Swap the two spatial axes of a rank-4 tensor
    ///
    /// `[n, c, h, w] -> [n, c, w, h]` (NHWC likewise). Self-inverse.
    fn transpose_spatial(
        &self,
        input: &Tensor<R>,
        out: &mut Tensor<R>,
        format: DataFormat,
    ) -> Result<()>;

    /// Reverse the order of one axis
    ///
    /// The tensor is viewed as `[batch, m, sub]` with `m = shape[axis]`.
    fn mirror(&self, input: &Tensor<R>, out: &mut Tensor<R>, axis: usize) -> Result<()>;

    /// Reflect a rank-4 tensor along Y and/or X
    ///
    /// With both flags false this is a copy. Applying the same flags twice
    /// reproduces the input.
    fn mirror_spatial(
        &self,
        input: &Tensor<R>,
        out: &mut Tensor<R>,
        format: DataFormat,
        mirror_y: bool,
        mirror_x: bool,
    ) -> Result<()>;
}
