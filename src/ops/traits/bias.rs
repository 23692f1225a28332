//! In-place bias addition trait.

use crate::error::Result;
use crate::runtime::Runtime;
use crate::tensor::{DataFormat, Tensor};

/// In-place bias additions
pub trait BiasOps<R: Runtime> {
    /// `buf += bias`, elementwise over equal shapes
    fn add_tensor_inplace(&self, buf: &mut Tensor<R>, bias: &Tensor<R>) -> Result<()>;

    /// `buf[.., ch] += bias[ch]`
    ///
    /// The last axis of `buf` is the channel axis; leading axes are collapsed.
    fn add_c_bias_inplace(&self, buf: &mut Tensor<R>, bias: &Tensor<R>) -> Result<()>;

    /// Per-(batch, channel) bias broadcast over spatial positions
    ///
    /// # Arguments
    ///
    /// * `buf` - `[n, c, xy]`/`[n, c, h, w]` or `[n, xy, c]`/`[n, h, w, c]`
    /// * `bias` - `[n, c]`
    /// * `format` - Layout of `buf`
    fn add_nc_bias_inplace(
        &self,
        buf: &mut Tensor<R>,
        bias: &Tensor<R>,
        format: DataFormat,
    ) -> Result<()>;
}
