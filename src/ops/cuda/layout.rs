//! CUDA implementation of layout transforms and mirroring.

use crate::error::Result;
use crate::ops::LayoutOps;
use crate::ops::layout::{
    validate_convert_format, validate_mirror, validate_mirror_spatial, validate_transpose_spatial,
};
use crate::ops::{MirrorPlan, TransposePlan};
use crate::runtime::cuda::kernels::{launch_mirror, launch_transpose};
use crate::runtime::cuda::{CudaClient, CudaRuntime};
use crate::tensor::{DataFormat, Tensor};

impl LayoutOps<CudaRuntime> for CudaClient {
    fn convert_format(
        &self,
        input: &Tensor<CudaRuntime>,
        out: &mut Tensor<CudaRuntime>,
        from: DataFormat,
    ) -> Result<()> {
        let plan = validate_convert_format(input, out, from)?;
        transpose(self, input, out, plan)
    }

    fn transpose_spatial(
        &self,
        input: &Tensor<CudaRuntime>,
        out: &mut Tensor<CudaRuntime>,
        format: DataFormat,
    ) -> Result<()> {
        let plan = validate_transpose_spatial(input, out, format)?;
        transpose(self, input, out, plan)
    }

    fn mirror(
        &self,
        input: &Tensor<CudaRuntime>,
        out: &mut Tensor<CudaRuntime>,
        axis: usize,
    ) -> Result<()> {
        let plan = validate_mirror(input, out, axis)?;
        mirror(self, input, out, plan)
    }

    fn mirror_spatial(
        &self,
        input: &Tensor<CudaRuntime>,
        out: &mut Tensor<CudaRuntime>,
        format: DataFormat,
        mirror_y: bool,
        mirror_x: bool,
    ) -> Result<()> {
        let plan = validate_mirror_spatial(input, out, format, mirror_y, mirror_x)?;
        mirror(self, input, out, plan)
    }
}

fn transpose(
    client: &CudaClient,
    input: &Tensor<CudaRuntime>,
    out: &mut Tensor<CudaRuntime>,
    plan: TransposePlan,
) -> Result<()> {
    if plan.numel() == 0 {
        return Ok(());
    }
    unsafe {
        launch_transpose(
            &client.context,
            &client.stream,
            client.device.index,
            input.dtype(),
            input.ptr(),
            out.ptr(),
            &plan,
        )
    }
}

fn mirror(
    client: &CudaClient,
    input: &Tensor<CudaRuntime>,
    out: &mut Tensor<CudaRuntime>,
    plan: MirrorPlan,
) -> Result<()> {
    if plan.numel() == 0 {
        return Ok(());
    }
    unsafe {
        launch_mirror(
            &client.context,
            &client.stream,
            client.device.index,
            input.dtype(),
            input.ptr(),
            out.ptr(),
            &plan,
        )
    }
}
