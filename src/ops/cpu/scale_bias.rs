//! CPU implementation of the fused scale-bias-activation.

use crate::dispatch_dtype;
use crate::error::Result;
use crate::ops::ScaleBiasOps;
use crate::ops::affine::validate_scale_bias;
use crate::runtime::cpu::helpers::for_each_row;
use crate::runtime::cpu::{CpuClient, CpuRuntime, kernels};
use crate::tensor::{DataFormat, Tensor};

impl ScaleBiasOps<CpuRuntime> for CpuClient {
    fn apply_c_scale_bias(
        &self,
        input: &Tensor<CpuRuntime>,
        out: &mut Tensor<CpuRuntime>,
        scale: &Tensor<CpuRuntime>,
        bias: &Tensor<CpuRuntime>,
        mask: Option<&Tensor<CpuRuntime>>,
        format: DataFormat,
        apply_relu: bool,
    ) -> Result<()> {
        let plan = validate_scale_bias(input, out, scale, bias, mask, format, apply_relu)?;
        if plan.dims.numel() == 0 {
            return Ok(());
        }

        let rows = match format {
            DataFormat::Nchw => plan.dims.n * plan.dims.c,
            DataFormat::Nhwc => plan.dims.n * plan.dims.xy,
        };
        let in_addr = input.ptr() as usize;
        let out_addr = out.ptr() as usize;
        let scale_addr = scale.ptr() as usize;
        let bias_addr = bias.ptr() as usize;
        let mask_addr = mask.map_or(0, |m| m.ptr() as usize);
        dispatch_dtype!(input.dtype(), T => {
            for_each_row(self, rows, |row| unsafe {
                kernels::scale_bias_row_kernel(
                    in_addr as *const T,
                    out_addr as *mut T,
                    scale_addr as *const T,
                    bias_addr as *const T,
                    mask_addr as *const T,
                    &plan,
                    row,
                );
            });
        });
        Ok(())
    }
}
