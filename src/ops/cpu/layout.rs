//! CPU implementation of layout transforms and mirroring.

use crate::dispatch_dtype;
use crate::error::Result;
use crate::ops::LayoutOps;
use crate::ops::layout::{
    validate_convert_format, validate_mirror, validate_mirror_spatial, validate_transpose_spatial,
};
use crate::ops::{MirrorPlan, TransposePlan};
use crate::runtime::cpu::helpers::for_each_row;
use crate::runtime::cpu::{CpuClient, CpuRuntime, kernels};
use crate::tensor::{DataFormat, Tensor};

impl LayoutOps<CpuRuntime> for CpuClient {
    fn convert_format(
        &self,
        input: &Tensor<CpuRuntime>,
        out: &mut Tensor<CpuRuntime>,
        from: DataFormat,
    ) -> Result<()> {
        let plan = validate_convert_format(input, out, from)?;
        transpose(self, input, out, plan);
        Ok(())
    }

    fn transpose_spatial(
        &self,
        input: &Tensor<CpuRuntime>,
        out: &mut Tensor<CpuRuntime>,
        format: DataFormat,
    ) -> Result<()> {
        let plan = validate_transpose_spatial(input, out, format)?;
        transpose(self, input, out, plan);
        Ok(())
    }

    fn mirror(
        &self,
        input: &Tensor<CpuRuntime>,
        out: &mut Tensor<CpuRuntime>,
        axis: usize,
    ) -> Result<()> {
        let plan = validate_mirror(input, out, axis)?;
        mirror(self, input, out, plan);
        Ok(())
    }

    fn mirror_spatial(
        &self,
        input: &Tensor<CpuRuntime>,
        out: &mut Tensor<CpuRuntime>,
        format: DataFormat,
        mirror_y: bool,
        mirror_x: bool,
    ) -> Result<()> {
        let plan = validate_mirror_spatial(input, out, format, mirror_y, mirror_x)?;
        mirror(self, input, out, plan);
        Ok(())
    }
}

fn transpose(
    client: &CpuClient,
    input: &Tensor<CpuRuntime>,
    out: &mut Tensor<CpuRuntime>,
    plan: TransposePlan,
) {
    if plan.numel() == 0 {
        return;
    }
    let in_addr = input.ptr() as usize;
    let out_addr = out.ptr() as usize;
    dispatch_dtype!(input.dtype(), T => {
        for_each_row(client, plan.batch * plan.cols, |row| unsafe {
            kernels::transpose_row_kernel(in_addr as *const T, out_addr as *mut T, &plan, row);
        });
    });
}

fn mirror(
    client: &CpuClient,
    input: &Tensor<CpuRuntime>,
    out: &mut Tensor<CpuRuntime>,
    plan: MirrorPlan,
) {
    if plan.numel() == 0 {
        return;
    }
    let in_addr = input.ptr() as usize;
    let out_addr = out.ptr() as usize;
    dispatch_dtype!(input.dtype(), T => {
        for_each_row(client, plan.outer * plan.h, |row| unsafe {
            kernels::mirror_row_kernel(in_addr as *const T, out_addr as *mut T, &plan, row);
        });
    });
}
