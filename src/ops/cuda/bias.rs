//! CUDA implementation of in-place bias additions.

use crate::error::Result;
use crate::ops::BiasOps;
use crate::ops::affine::{validate_add_c_bias, validate_add_nc_bias, validate_add_tensor};
use crate::runtime::cuda::kernels::{launch_add_c_bias, launch_add_nc_bias, launch_add_tensor};
use crate::runtime::cuda::{CudaClient, CudaRuntime};
use crate::tensor::{DataFormat, Tensor};

impl BiasOps<CudaRuntime> for CudaClient {
    fn add_tensor_inplace(
        &self,
        buf: &mut Tensor<CudaRuntime>,
        bias: &Tensor<CudaRuntime>,
    ) -> Result<()> {
        let len = validate_add_tensor(buf, bias)?;
        if len == 0 {
            return Ok(());
        }

        unsafe {
            launch_add_tensor(
                &self.context,
                &self.stream,
                self.device.index,
                buf.dtype(),
                buf.ptr(),
                bias.ptr(),
                len,
            )
        }
    }

    fn add_c_bias_inplace(
        &self,
        buf: &mut Tensor<CudaRuntime>,
        bias: &Tensor<CudaRuntime>,
    ) -> Result<()> {
        let plan = validate_add_c_bias(buf, bias)?;
        if buf.numel() == 0 {
            return Ok(());
        }

        unsafe {
            launch_add_c_bias(
                &self.context,
                &self.stream,
                self.device.index,
                buf.dtype(),
                buf.ptr(),
                bias.ptr(),
                &plan,
            )
        }
    }

    fn add_nc_bias_inplace(
        &self,
        buf: &mut Tensor<CudaRuntime>,
        bias: &Tensor<CudaRuntime>,
        format: DataFormat,
    ) -> Result<()> {
        let dims = validate_add_nc_bias(buf, bias, format)?;
        if dims.numel() == 0 {
            return Ok(());
        }

        unsafe {
            launch_add_nc_bias(
                &self.context,
                &self.stream,
                self.device.index,
                buf.dtype(),
                buf.ptr(),
                bias.ptr(),
                dims,
                format,
            )
        }
    }
}
