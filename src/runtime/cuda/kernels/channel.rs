//! Channel concatenation and slicing kernel launchers

use cudarc::driver::PushKernelArg;
use cudarc::driver::safe::{CudaContext, CudaStream};
use std::sync::Arc;

use super::loader::{
    BLOCK_SIZE, elementwise_launch_config, get_kernel_function, get_or_load_module, index_u32,
    kernel_name, launch_config, launch_error,
};
use crate::dtype::DType;
use crate::error::Result;
use crate::ops::{ConcatPlan, SlicePlan};

/// Channel module name
pub const CHANNEL_MODULE: &str = "channel";

/// Launch `channel_concat_{dtype}`.
///
/// # Safety
///
/// - `a_ptr`, `b_ptr` must hold `rows * a_len`, `rows * b_len` elements of `dtype`
/// - `out_ptr` must hold `rows * (a_len + b_len)` elements and overlap neither input
#[allow(clippy::too_many_arguments)]
pub unsafe fn launch_channel_concat(
    context: &Arc<CudaContext>,
    stream: &CudaStream,
    device_index: usize,
    dtype: DType,
    a_ptr: u64,
    b_ptr: u64,
    out_ptr: u64,
    plan: &ConcatPlan,
) -> Result<()> {
    let total = index_u32("out", plan.rows * plan.out_len())?;
    let rows = index_u32("out", plan.rows)?;
    let a_len = index_u32("a", plan.a_len)?;
    let b_len = index_u32("b", plan.b_len)?;

    let module = get_or_load_module(context, device_index, CHANNEL_MODULE)?;
    let func_name = kernel_name("channel_concat", dtype);
    let func = get_kernel_function(&module, &func_name)?;

    let cfg = launch_config(elementwise_launch_config(total), (BLOCK_SIZE, 1, 1), 0);
    let mut builder = stream.launch_builder(&func);
    builder.arg(&a_ptr);
    builder.arg(&b_ptr);
    builder.arg(&out_ptr);
    builder.arg(&rows);
    builder.arg(&a_len);
    builder.arg(&b_len);

    unsafe { builder.launch(cfg) }.map_err(|e| launch_error(&func_name, e))?;
    Ok(())
}

/// Launch `channel_slice_{dtype}`.
///
/// # Safety
///
/// - `in_ptr` must hold `rows * in_len` elements of `dtype`
/// - `out_ptr` must hold `rows * out_len` elements and not overlap the input
pub unsafe fn launch_channel_slice(
    context: &Arc<CudaContext>,
    stream: &CudaStream,
    device_index: usize,
    dtype: DType,
    in_ptr: u64,
    out_ptr: u64,
    plan: &SlicePlan,
) -> Result<()> {
    let total = index_u32("out", plan.rows * plan.out_len)?;
    index_u32("input", plan.rows * plan.in_len)?;
    let rows = index_u32("out", plan.rows)?;
    let in_len = index_u32("input", plan.in_len)?;
    let offset = index_u32("start", plan.offset)?;
    let out_len = index_u32("out", plan.out_len)?;

    let module = get_or_load_module(context, device_index, CHANNEL_MODULE)?;
    let func_name = kernel_name("channel_slice", dtype);
    let func = get_kernel_function(&module, &func_name)?;

    let cfg = launch_config(elementwise_launch_config(total), (BLOCK_SIZE, 1, 1), 0);
    let mut builder = stream.launch_builder(&func);
    builder.arg(&in_ptr);
    builder.arg(&out_ptr);
    builder.arg(&rows);
    builder.arg(&in_len);
    builder.arg(&offset);
    builder.arg(&out_len);

    unsafe { builder.launch(cfg) }.map_err(|e| launch_error(&func_name, e))?;
    Ok(())
}
