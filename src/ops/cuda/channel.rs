//! CUDA implementation of channel concatenation and extraction.

use crate::error::Result;
use crate::ops::ChannelOps;
use crate::ops::channel::{validate_channel_slice, validate_channel0_extract, validate_concat};
use crate::runtime::cuda::kernels::{launch_channel_concat, launch_channel_slice};
use crate::runtime::cuda::{CudaClient, CudaRuntime};
use crate::tensor::{DataFormat, Tensor};

impl ChannelOps<CudaRuntime> for CudaClient {
    fn channel_concat(
        &self,
        a: &Tensor<CudaRuntime>,
        b: &Tensor<CudaRuntime>,
        out: &mut Tensor<CudaRuntime>,
        format: DataFormat,
    ) -> Result<()> {
        let plan = validate_concat(a, b, out, format)?;
        if out.numel() == 0 {
            return Ok(());
        }

        unsafe {
            launch_channel_concat(
                &self.context,
                &self.stream,
                self.device.index,
                out.dtype(),
                a.ptr(),
                b.ptr(),
                out.ptr(),
                &plan,
            )
        }
    }

    fn channel0_extract(
        &self,
        input: &Tensor<CudaRuntime>,
        out: &mut Tensor<CudaRuntime>,
        format: DataFormat,
    ) -> Result<()> {
        let plan = validate_channel0_extract(input, out, format)?;
        if out.numel() == 0 {
            return Ok(());
        }

        unsafe {
            launch_channel_slice(
                &self.context,
                &self.stream,
                self.device.index,
                out.dtype(),
                input.ptr(),
                out.ptr(),
                &plan,
            )
        }
    }

    fn channel_slice(
        &self,
        input: &Tensor<CudaRuntime>,
        out: &mut Tensor<CudaRuntime>,
        format: DataFormat,
        start: usize,
    ) -> Result<()> {
        let plan = validate_channel_slice(input, out, format, start)?;
        if out.numel() == 0 {
            return Ok(());
        }

        unsafe {
            launch_channel_slice(
                &self.context,
                &self.stream,
                self.device.index,
                out.dtype(),
                input.ptr(),
                out.ptr(),
                &plan,
            )
        }
    }
}
