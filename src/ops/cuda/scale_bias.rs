//! CUDA implementation of the fused scale-bias-activation.

use crate::error::Result;
use crate::ops::ScaleBiasOps;
use crate::ops::affine::validate_scale_bias;
use crate::runtime::cuda::kernels::{ScaleBiasPtrs, launch_scale_bias};
use crate::runtime::cuda::{CudaClient, CudaRuntime};
use crate::tensor::{DataFormat, Tensor};

impl ScaleBiasOps<CudaRuntime> for CudaClient {
    fn apply_c_scale_bias(
        &self,
        input: &Tensor<CudaRuntime>,
        out: &mut Tensor<CudaRuntime>,
        scale: &Tensor<CudaRuntime>,
        bias: &Tensor<CudaRuntime>,
        mask: Option<&Tensor<CudaRuntime>>,
        format: DataFormat,
        apply_relu: bool,
    ) -> Result<()> {
        let plan = validate_scale_bias(input, out, scale, bias, mask, format, apply_relu)?;
        if plan.dims.numel() == 0 {
            return Ok(());
        }

        let ptrs = ScaleBiasPtrs {
            input: input.ptr(),
            out: out.ptr(),
            scale: scale.ptr(),
            bias: bias.ptr(),
            mask: mask.map_or(0, |m| m.ptr()),
        };
        unsafe {
            launch_scale_bias(
                &self.context,
                &self.stream,
                self.device.index,
                input.dtype(),
                ptrs,
                &plan,
            )
        }
    }
}
