//! CPU implementation of spatial pooling.

use crate::dispatch_dtype;
use crate::dtype::Element;
use crate::error::Result;
use crate::ops::PoolingOps;
use crate::ops::pooling::{PoolKind, validate_pool};
use crate::runtime::cpu::helpers::for_each_row;
use crate::runtime::cpu::{CpuClient, CpuRuntime, kernels};
use crate::tensor::{DataFormat, Tensor};

impl PoolingOps<CpuRuntime> for CpuClient {
    fn pool_rows_sum(
        &self,
        input: &Tensor<CpuRuntime>,
        out: &mut Tensor<CpuRuntime>,
        format: DataFormat,
        scale_sum: f32,
    ) -> Result<()> {
        pool_impl(self, "pool_rows_sum", PoolKind::Sum, input, out, format, scale_sum, None)
    }

    fn pool_rows_max_positive(
        &self,
        input: &Tensor<CpuRuntime>,
        out: &mut Tensor<CpuRuntime>,
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
        input: &Tensor<CpuRuntime>,
        out: &mut Tensor<CpuRuntime>,
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
        input: &Tensor<CpuRuntime>,
        out: &mut Tensor<CpuRuntime>,
        format: DataFormat,
        mask_sum: Option<&Tensor<CpuRuntime>>,
    ) -> Result<()> {
        pool_impl(self, "global_pool", PoolKind::Global, input, out, format, 1.0, mask_sum)
    }

    fn value_head_pool(
        &self,
        input: &Tensor<CpuRuntime>,
        out: &mut Tensor<CpuRuntime>,
        format: DataFormat,
        mask_sum: Option<&Tensor<CpuRuntime>>,
    ) -> Result<()> {
        pool_impl(self, "value_head_pool", PoolKind::Global, input, out, format, 1.0, mask_sum)
    }
}

/// Shared body of every pooling entry point: one task per `(batch, channel)` plane.
#[allow(clippy::too_many_arguments)]
fn pool_impl(
    client: &CpuClient,
    op: &'static str,
    kind: PoolKind,
    input: &Tensor<CpuRuntime>,
    out: &mut Tensor<CpuRuntime>,
    format: DataFormat,
    scale_sum: f32,
    mask_sum: Option<&Tensor<CpuRuntime>>,
) -> Result<()> {
    let dims = validate_pool(op, kind, input, out, format, mask_sum)?;
    if out.numel() == 0 {
        return Ok(());
    }

    let divisors = match mask_sum {
        Some(mask_sum) => mask_sum.try_to_vec::<f32>()?,
        None => vec![dims.xy as f32; dims.n],
    };

    let blocks = kind.blocks();
    let in_addr = input.ptr() as usize;
    let out_addr = out.ptr() as usize;
    dispatch_dtype!(input.dtype(), T => {
        for_each_row(client, dims.n * dims.c, |plane| unsafe {
            let b = plane / dims.c;
            let ch = plane % dims.c;
            let (base, stride) = match format {
                DataFormat::Nchw => (plane * dims.xy, 1),
                DataFormat::Nhwc => (b * dims.xy * dims.c + ch, dims.c),
            };
            let stats = kernels::pool_plane_kernel(in_addr as *const T, base, stride, dims.xy);
            let (values, count) = stats.emit(kind, scale_sum, divisors[b]);

            let dst = (out_addr as *mut T).add(b * blocks * dims.c + ch);
            for (k, &v) in values[..count].iter().enumerate() {
                *dst.add(k * dims.c) = T::from_f32(v);
            }
        });
    });
    Ok(())
}
