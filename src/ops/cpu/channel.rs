//! CPU implementation of channel concatenation and extraction.

use crate::dispatch_dtype;
use crate::error::Result;
use crate::ops::ChannelOps;
use crate::ops::channel::{validate_channel_slice, validate_channel0_extract, validate_concat};
use crate::ops::SlicePlan;
use crate::runtime::cpu::helpers::for_each_row;
use crate::runtime::cpu::{CpuClient, CpuRuntime, kernels};
use crate::tensor::{DataFormat, Tensor};

impl ChannelOps<CpuRuntime> for CpuClient {
    fn channel_concat(
        &self,
        a: &Tensor<CpuRuntime>,
        b: &Tensor<CpuRuntime>,
        out: &mut Tensor<CpuRuntime>,
        format: DataFormat,
    ) -> Result<()> {
        let plan = validate_concat(a, b, out, format)?;
        if out.numel() == 0 {
            return Ok(());
        }

        let a_addr = a.ptr() as usize;
        let b_addr = b.ptr() as usize;
        let out_addr = out.ptr() as usize;
        dispatch_dtype!(out.dtype(), T => {
            for_each_row(self, plan.rows, |row| unsafe {
                kernels::concat_row_kernel(
                    a_addr as *const T,
                    b_addr as *const T,
                    out_addr as *mut T,
                    &plan,
                    row,
                );
            });
        });
        Ok(())
    }

    fn channel0_extract(
        &self,
        input: &Tensor<CpuRuntime>,
        out: &mut Tensor<CpuRuntime>,
        format: DataFormat,
    ) -> Result<()> {
        let plan = validate_channel0_extract(input, out, format)?;
        slice_rows(self, input, out, plan);
        Ok(())
    }

    fn channel_slice(
        &self,
        input: &Tensor<CpuRuntime>,
        out: &mut Tensor<CpuRuntime>,
        format: DataFormat,
        start: usize,
    ) -> Result<()> {
        let plan = validate_channel_slice(input, out, format, start)?;
        slice_rows(self, input, out, plan);
        Ok(())
    }
}

fn slice_rows(
    client: &CpuClient,
    input: &Tensor<CpuRuntime>,
    out: &mut Tensor<CpuRuntime>,
    plan: SlicePlan,
) {
    if out.numel() == 0 {
        return;
    }
    let in_addr = input.ptr() as usize;
    let out_addr = out.ptr() as usize;
    dispatch_dtype!(out.dtype(), T => {
        for_each_row(client, plan.rows, |row| unsafe {
            kernels::slice_row_kernel(in_addr as *const T, out_addr as *mut T, &plan, row);
        });
    });
}
