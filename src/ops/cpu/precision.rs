//! CPU implementation of precision conversion.

use crate::dispatch_dtype;
use crate::error::Result;
use crate::ops::PrecisionOps;
use crate::ops::precision::validate_convert_precision;
use crate::runtime::cpu::helpers::for_each_chunk;
use crate::runtime::cpu::{CpuClient, CpuRuntime, kernels};
use crate::tensor::Tensor;

impl PrecisionOps<CpuRuntime> for CpuClient {
    fn convert_precision(
        &self,
        input: &Tensor<CpuRuntime>,
        out: &mut Tensor<CpuRuntime>,
    ) -> Result<()> {
        let len = validate_convert_precision(input, out)?;
        if len == 0 || input.ptr() == out.ptr() {
            return Ok(());
        }

        let src_addr = input.ptr() as usize;
        let dst_addr = out.ptr() as usize;
        dispatch_dtype!(input.dtype(), S => {
            dispatch_dtype!(out.dtype(), D => {
                for_each_chunk(self, len, |start, n| unsafe {
                    kernels::cast_kernel(
                        (src_addr as *const S).add(start),
                        (dst_addr as *mut D).add(start),
                        n,
                    );
                });
            });
        });
        Ok(())
    }
}
