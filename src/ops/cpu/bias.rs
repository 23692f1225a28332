//! CPU implementation of in-place bias additions.

use crate::dispatch_dtype;
use crate::error::Result;
use crate::ops::BiasOps;
use crate::ops::affine::{validate_add_c_bias, validate_add_nc_bias, validate_add_tensor};
use crate::runtime::cpu::helpers::{for_each_chunk, for_each_row};
use crate::runtime::cpu::{CpuClient, CpuRuntime, kernels};
use crate::tensor::{DataFormat, Tensor};

impl BiasOps<CpuRuntime> for CpuClient {
    fn add_tensor_inplace(
        &self,
        buf: &mut Tensor<CpuRuntime>,
        bias: &Tensor<CpuRuntime>,
    ) -> Result<()> {
        let len = validate_add_tensor(buf, bias)?;
        if len == 0 {
            return Ok(());
        }

        let buf_addr = buf.ptr() as usize;
        let bias_addr = bias.ptr() as usize;
        dispatch_dtype!(buf.dtype(), T => {
            for_each_chunk(self, len, |start, n| unsafe {
                kernels::add_tensor_kernel(buf_addr as *mut T, bias_addr as *const T, start, n);
            });
        });
        Ok(())
    }

    fn add_c_bias_inplace(
        &self,
        buf: &mut Tensor<CpuRuntime>,
        bias: &Tensor<CpuRuntime>,
    ) -> Result<()> {
        let plan = validate_add_c_bias(buf, bias)?;
        if buf.numel() == 0 {
            return Ok(());
        }

        let buf_addr = buf.ptr() as usize;
        let bias_addr = bias.ptr() as usize;
        dispatch_dtype!(buf.dtype(), T => {
            for_each_row(self, plan.rows, |row| unsafe {
                kernels::add_c_bias_row_kernel(buf_addr as *mut T, bias_addr as *const T, &plan, row);
            });
        });
        Ok(())
    }

    fn add_nc_bias_inplace(
        &self,
        buf: &mut Tensor<CpuRuntime>,
        bias: &Tensor<CpuRuntime>,
        format: DataFormat,
    ) -> Result<()> {
        let dims = validate_add_nc_bias(buf, bias, format)?;
        if dims.numel() == 0 {
            return Ok(());
        }

        let rows = match format {
            DataFormat::Nchw => dims.n * dims.c,
            DataFormat::Nhwc => dims.n * dims.xy,
        };
        let buf_addr = buf.ptr() as usize;
        let bias_addr = bias.ptr() as usize;
        dispatch_dtype!(buf.dtype(), T => {
            for_each_row(self, rows, |row| unsafe {
                kernels::add_nc_bias_row_kernel(
                    buf_addr as *mut T,
                    bias_addr as *const T,
                    dims,
                    format,
                    row,
                );
            });
        });
        Ok(())
    }
}
