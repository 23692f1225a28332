//! Transpose and mirror kernel launchers

use cudarc::driver::PushKernelArg;
use cudarc::driver::safe::{CudaContext, CudaStream};
use std::sync::Arc;

use super::loader::{
    BLOCK_SIZE, elementwise_launch_config, get_kernel_function, get_or_load_module, index_u32,
    kernel_name, launch_config, launch_error,
};
use crate::dtype::DType;
use crate::error::Result;
use crate::ops::{MirrorPlan, TransposePlan};

/// Layout module name
pub const LAYOUT_MODULE: &str = "layout";

/// Launch `transpose_{dtype}`.
///
/// # Safety
///
/// `in_ptr` and `out_ptr` must each hold `plan.numel()` elements of `dtype`
/// and must not overlap.
pub unsafe fn launch_transpose(
    context: &Arc<CudaContext>,
    stream: &CudaStream,
    device_index: usize,
    dtype: DType,
    in_ptr: u64,
    out_ptr: u64,
    plan: &TransposePlan,
) -> Result<()> {
    let total = index_u32("input", plan.numel())?;
    let batch = plan.batch as u32;
    let rows = plan.rows as u32;
    let cols = plan.cols as u32;
    let inner = plan.inner as u32;

    let module = get_or_load_module(context, device_index, LAYOUT_MODULE)?;
    let func_name = kernel_name("transpose", dtype);
    let func = get_kernel_function(&module, &func_name)?;

    let cfg = launch_config(elementwise_launch_config(total), (BLOCK_SIZE, 1, 1), 0);
    let mut builder = stream.launch_builder(&func);
    builder.arg(&in_ptr);
    builder.arg(&out_ptr);
    builder.arg(&batch);
    builder.arg(&rows);
    builder.arg(&cols);
    builder.arg(&inner);

    unsafe { builder.launch(cfg) }.map_err(|e| launch_error(&func_name, e))?;
    Ok(())
}

/// Launch `mirror_{dtype}`.
///
/// # Safety
///
/// `in_ptr` and `out_ptr` must each hold `plan.numel()` elements of `dtype`
/// and must not overlap.
pub unsafe fn launch_mirror(
    context: &Arc<CudaContext>,
    stream: &CudaStream,
    device_index: usize,
    dtype: DType,
    in_ptr: u64,
    out_ptr: u64,
    plan: &MirrorPlan,
) -> Result<()> {
    let total = index_u32("input", plan.numel())?;
    // Every extent divides a non-empty total that fits in 32 bits.
    let outer = plan.outer as u32;
    let h = plan.h as u32;
    let w = plan.w as u32;
    let inner = plan.inner as u32;
    let mirror_y: i32 = plan.mirror_y.into();
    let mirror_x: i32 = plan.mirror_x.into();

    let module = get_or_load_module(context, device_index, LAYOUT_MODULE)?;
    let func_name = kernel_name("mirror", dtype);
    let func = get_kernel_function(&module, &func_name)?;

    let cfg = launch_config(elementwise_launch_config(total), (BLOCK_SIZE, 1, 1), 0);
    let mut builder = stream.launch_builder(&func);
    builder.arg(&in_ptr);
    builder.arg(&out_ptr);
    builder.arg(&outer);
    builder.arg(&h);
    builder.arg(&w);
    builder.arg(&inner);
    builder.arg(&mirror_y);
    builder.arg(&mirror_x);

    unsafe { builder.launch(cfg) }.map_err(|e| launch_error(&func_name, e))?;
    Ok(())
}
