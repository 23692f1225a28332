//! Spatial pooling kernel launcher

use cudarc::driver::PushKernelArg;
use cudarc::driver::safe::{CudaContext, CudaStream};
use std::sync::Arc;

use super::loader::{
    BLOCK_SIZE, get_kernel_function, get_or_load_module, index_u32, kernel_name, launch_config,
    launch_error,
};
use crate::dtype::DType;
use crate::error::Result;
use crate::ops::PoolKind;
use crate::tensor::{DataFormat, PlaneDims};

/// Pooling module name
pub const POOL_MODULE: &str = "pool";

/// Launch `pool_planes_{dtype}`: one block of [`BLOCK_SIZE`] threads per plane.
///
/// `mask_sum_ptr` is either 0 (divide by `xy`) or an F32 buffer of `n` counts,
/// only read for [`PoolKind::Global`].
///
/// # Safety
///
/// - `in_ptr` must hold `dims.numel()` elements of `dtype`
/// - `out_ptr` must hold `n * kind.blocks() * c` elements and not overlap the input
#[allow(clippy::too_many_arguments)]
pub unsafe fn launch_pool(
    context: &Arc<CudaContext>,
    stream: &CudaStream,
    device_index: usize,
    dtype: DType,
    in_ptr: u64,
    out_ptr: u64,
    mask_sum_ptr: u64,
    dims: PlaneDims,
    format: DataFormat,
    kind: PoolKind,
    scale_sum: f32,
) -> Result<()> {
    index_u32("input", dims.numel())?;
    let planes = index_u32("input", dims.n * dims.c)?;
    let c = index_u32("input", dims.c)?;
    let xy = index_u32("input", dims.xy)?;
    let nhwc: i32 = (format == DataFormat::Nhwc).into();
    let kind_code = kind.code() as i32;

    let module = get_or_load_module(context, device_index, POOL_MODULE)?;
    let func_name = kernel_name("pool_planes", dtype);
    let func = get_kernel_function(&module, &func_name)?;

    log::trace!(
        "{} over {} planes of {} positions ({})",
        kind.name(),
        planes,
        xy,
        format
    );

    let cfg = launch_config((planes, 1, 1), (BLOCK_SIZE, 1, 1), 0);
    let mut builder = stream.launch_builder(&func);
    builder.arg(&in_ptr);
    builder.arg(&out_ptr);
    builder.arg(&mask_sum_ptr);
    builder.arg(&c);
    builder.arg(&xy);
    builder.arg(&nhwc);
    builder.arg(&kind_code);
    builder.arg(&scale_sum);

    unsafe { builder.launch(cfg) }.map_err(|e| launch_error(&func_name, e))?;
    Ok(())
}
