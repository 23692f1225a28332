//! CUDA implementation of precision conversion.

use crate::error::Result;
use crate::ops::PrecisionOps;
use crate::ops::precision::validate_convert_precision;
use crate::runtime::cuda::kernels::launch_cast;
use crate::runtime::cuda::{CudaClient, CudaRuntime};
use crate::tensor::Tensor;

impl PrecisionOps<CudaRuntime> for CudaClient {
    fn convert_precision(
        &self,
        input: &Tensor<CudaRuntime>,
        out: &mut Tensor<CudaRuntime>,
    ) -> Result<()> {
        let len = validate_convert_precision(input, out)?;
        if len == 0 || input.ptr() == out.ptr() {
            return Ok(());
        }

        unsafe {
            launch_cast(
                &self.context,
                &self.stream,
                self.device.index,
                input.dtype(),
                out.dtype(),
                input.ptr(),
                out.ptr(),
                len,
            )
        }
    }
}
