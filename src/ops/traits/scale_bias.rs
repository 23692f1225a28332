//! Fused scale-bias-activation trait.

use crate::error::Result;
use crate::runtime::Runtime;
use crate::tensor::{DataFormat, Tensor};

/// Fused per-channel affine transform (folded batch norm)
pub trait ScaleBiasOps<R: Runtime> {
    /// `out = in * scale[c] + bias[c]`, then ReLU if `apply_relu`, then
    /// multiplied by `mask[b, xy]` if a mask is given
    ///
    /// `out` may share `input`'s buffer (pass a clone of the output tensor as
    /// `input` to run in place). A `None` mask is an all-ones mask.
    ///
    /// # Arguments
    ///
    /// * `input` - `[n, c, xy]`/`[n, c, h, w]` or `[n, xy, c]`/`[n, h, w, c]`
    /// * `out` - Same shape as `input`
    /// * `scale`, `bias` - `[c]`
    /// * `mask` - `[n, xy]` or `[n, h, w]`, same dtype as `input`
    #[allow(clippy::too_many_arguments)]
    fn apply_c_scale_bias(
        &self,
        input: &Tensor<R>,
        out: &mut Tensor<R>,
        scale: &Tensor<R>,
        bias: &Tensor<R>,
        mask: Option<&Tensor<R>>,
        format: DataFormat,
        apply_relu: bool,
    ) -> Result<()>;
}
