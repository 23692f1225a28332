//! Precision conversion trait.

use crate::error::Result;
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Element precision conversion
pub trait PrecisionOps<R: Runtime> {
    /// Convert every element of `input` to the dtype of `out`
    ///
    /// F32 -> F16 rounds to nearest even (values beyond the f16 range become
    /// infinity); F16 -> F32 is exact. Equal dtypes copy. Both tensors must hold
    /// the same number of elements.
    fn convert_precision(&self, input: &Tensor<R>, out: &mut Tensor<R>) -> Result<()>;
}
