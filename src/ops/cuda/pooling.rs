//! CUDA implementation of spatial pooling.

use crate::error::Result;
use crate::ops::PoolingOps;
use crate::ops::pooling::{PoolKind, validate_pool};
use crate::runtime::cuda::kernels::launch_pool;
use crate::runtime::cuda::{CudaClient, CudaRuntime};
use crate::tensor::{DataFormat, Tensor};

impl PoolingOps<CudaRuntime> for CudaClient {
    fn pool_rows_sum(
        &self,
        input: &Tensor<CudaRuntime>,
        out: &mut Tensor<CudaRuntime>,
        format: DataFormat,
        scale_sum: f32,
    ) -> Result<()> {
        pool_impl(self, "pool_rows_sum", PoolKind::Sum, input, out, format, scale_sum, None)
    }

    fn pool_rows_max_positive(
        &self,
        input: &Tensor<CudaRuntime>,
        out: &mut Tensor<CudaRuntime>,
        format: DataFormat,
    ) -> Result<()> {
        pool_impl(
            self,
            "pool_rows_max_positive",
            PoolKind::MaxPositive,
            input,
            out,
            format,
            1.0,
            None,
        )
    }

    fn pool_rows_sum_and_max_positive(
        &self,
        input: &Tensor<CudaRuntime>,
        out: &mut Tensor<CudaRuntime>,
        format: DataFormat,
        scale_sum: f32,
    ) -> Result<()> {
        pool_impl(
            self,
            "pool_rows_sum_and_max_positive",
            PoolKind::SumAndMaxPositive,
            input,
            out,
            format,
            scale_sum,
            None,
        )
    }

    fn global_pool(
        &self,
        input: &Tensor<CudaRuntime>,
        out: &mut Tensor<CudaRuntime>,
        format: DataFormat,
        mask_sum: Option<&Tensor<CudaRuntime>>,
    ) -> Result<()> {
        pool_impl(self, "global_pool", PoolKind::Global, input, out, format, 1.0, mask_sum)
    }

    fn value_head_pool(
        &self,
        input: &Tensor<CudaRuntime>,
        out: &mut Tensor<CudaRuntime>,
        format: DataFormat,
        mask_sum: Option<&Tensor<CudaRuntime>>,
    ) -> Result<()> {
        pool_impl(self, "value_head_pool", PoolKind::Global, input, out, format, 1.0, mask_sum)
    }
}

#[allow(clippy::too_many_arguments)]
fn pool_impl(
    client: &CudaClient,
    op: &'static str,
    kind: PoolKind,
    input: &Tensor<CudaRuntime>,
    out: &mut Tensor<CudaRuntime>,
    format: DataFormat,
    scale_sum: f32,
    mask_sum: Option<&Tensor<CudaRuntime>>,
) -> Result<()> {
    let dims = validate_pool(op, kind, input, out, format, mask_sum)?;
    if out.numel() == 0 {
        return Ok(());
    }

    unsafe {
        launch_pool(
            &client.context,
            &client.stream,
            client.device.index,
            input.dtype(),
            input.ptr(),
            out.ptr(),
            mask_sum.map_or(0, |m| m.ptr()),
            dims,
            format,
            kind,
            scale_sum,
        )
    }
}
