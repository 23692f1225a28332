//! Bias and scale-bias kernel launchers

use cudarc::driver::PushKernelArg;
use cudarc::driver::safe::{CudaContext, CudaStream};
use std::sync::Arc;

use super::loader::{
    BLOCK_SIZE, elementwise_launch_config, get_kernel_function, get_or_load_module, index_u32,
    kernel_name, launch_config, launch_error,
};
use crate::dtype::DType;
use crate::error::Result;
use crate::ops::{RowBiasPlan, ScaleBiasPlan};
use crate::tensor::{DataFormat, PlaneDims};

/// Affine module name
pub const AFFINE_MODULE: &str = "affine";

/// Launch `add_tensor_{dtype}`: `buf[i] += bias[i]`.
///
/// # Safety
///
/// Both pointers must hold `numel` elements of `dtype`; `bias_ptr` may equal
/// `buf_ptr` but must not partially overlap it.
pub unsafe fn launch_add_tensor(
    context: &Arc<CudaContext>,
    stream: &CudaStream,
    device_index: usize,
    dtype: DType,
    buf_ptr: u64,
    bias_ptr: u64,
    numel: usize,
) -> Result<()> {
    let n = index_u32("buf", numel)?;

    let module = get_or_load_module(context, device_index, AFFINE_MODULE)?;
    let func_name = kernel_name("add_tensor", dtype);
    let func = get_kernel_function(&module, &func_name)?;

    let cfg = launch_config(elementwise_launch_config(n), (BLOCK_SIZE, 1, 1), 0);
    let mut builder = stream.launch_builder(&func);
    builder.arg(&buf_ptr);
    builder.arg(&bias_ptr);
    builder.arg(&n);

    unsafe { builder.launch(cfg) }.map_err(|e| launch_error(&func_name, e))?;
    Ok(())
}

/// Launch `add_c_bias_{dtype}`: `buf[row, ch] += bias[ch]`.
///
/// # Safety
///
/// `buf_ptr` must hold `plan.rows * plan.c` elements, `bias_ptr` `plan.c`.
pub unsafe fn launch_add_c_bias(
    context: &Arc<CudaContext>,
    stream: &CudaStream,
    device_index: usize,
    dtype: DType,
    buf_ptr: u64,
    bias_ptr: u64,
    plan: &RowBiasPlan,
) -> Result<()> {
    let numel = index_u32("buf", plan.rows * plan.c)?;
    let c = plan.c as u32;

    let module = get_or_load_module(context, device_index, AFFINE_MODULE)?;
    let func_name = kernel_name("add_c_bias", dtype);
    let func = get_kernel_function(&module, &func_name)?;

    let cfg = launch_config(elementwise_launch_config(numel), (BLOCK_SIZE, 1, 1), 0);
    let mut builder = stream.launch_builder(&func);
    builder.arg(&buf_ptr);
    builder.arg(&bias_ptr);
    builder.arg(&numel);
    builder.arg(&c);

    unsafe { builder.launch(cfg) }.map_err(|e| launch_error(&func_name, e))?;
    Ok(())
}

/// Launch `add_nc_bias_{dtype}`: `buf[b, ch, ..] += bias[b, ch]`.
///
/// # Safety
///
/// `buf_ptr` must hold `dims.numel()` elements, `bias_ptr` `n * c`.
#[allow(clippy::too_many_arguments)]
pub unsafe fn launch_add_nc_bias(
    context: &Arc<CudaContext>,
    stream: &CudaStream,
    device_index: usize,
    dtype: DType,
    buf_ptr: u64,
    bias_ptr: u64,
    dims: PlaneDims,
    format: DataFormat,
) -> Result<()> {
    let numel = index_u32("buf", dims.numel())?;
    let c = dims.c as u32;
    let xy = dims.xy as u32;
    let nhwc: i32 = (format == DataFormat::Nhwc).into();

    let module = get_or_load_module(context, device_index, AFFINE_MODULE)?;
    let func_name = kernel_name("add_nc_bias", dtype);
    let func = get_kernel_function(&module, &func_name)?;

    let cfg = launch_config(elementwise_launch_config(numel), (BLOCK_SIZE, 1, 1), 0);
    let mut builder = stream.launch_builder(&func);
    builder.arg(&buf_ptr);
    builder.arg(&bias_ptr);
    builder.arg(&numel);
    builder.arg(&c);
    builder.arg(&xy);
    builder.arg(&nhwc);

    unsafe { builder.launch(cfg) }.map_err(|e| launch_error(&func_name, e))?;
    Ok(())
}

/// Device pointers of a scale-bias call; `mask` is 0 when unmasked
#[derive(Copy, Clone, Debug)]
pub struct ScaleBiasPtrs {
    /// Input values
    pub input: u64,
    /// Output values (may equal `input`)
    pub out: u64,
    /// Per-channel scale
    pub scale: u64,
    /// Per-channel bias
    pub bias: u64,
    /// Spatial mask or 0
    pub mask: u64,
}

/// Launch `scale_bias_{dtype}`.
///
/// # Safety
///
/// - `ptrs.input` and `ptrs.out` must hold `plan.dims.numel()` elements and be
///   either the same buffer or disjoint
/// - `ptrs.scale`, `ptrs.bias` must hold `c` elements; `ptrs.mask` `n * xy`
pub unsafe fn launch_scale_bias(
    context: &Arc<CudaContext>,
    stream: &CudaStream,
    device_index: usize,
    dtype: DType,
    ptrs: ScaleBiasPtrs,
    plan: &ScaleBiasPlan,
) -> Result<()> {
    let numel = index_u32("input", plan.dims.numel())?;
    let c = plan.dims.c as u32;
    let xy = plan.dims.xy as u32;
    let nhwc: i32 = (plan.format == DataFormat::Nhwc).into();
    let apply_relu: i32 = plan.apply_relu.into();
    let mask_ptr = if plan.masked { ptrs.mask } else { 0 };

    let module = get_or_load_module(context, device_index, AFFINE_MODULE)?;
    let func_name = kernel_name("scale_bias", dtype);
    let func = get_kernel_function(&module, &func_name)?;

    let cfg = launch_config(elementwise_launch_config(numel), (BLOCK_SIZE, 1, 1), 0);
    let mut builder = stream.launch_builder(&func);
    builder.arg(&ptrs.input);
    builder.arg(&ptrs.out);
    builder.arg(&ptrs.scale);
    builder.arg(&ptrs.bias);
    builder.arg(&mask_ptr);
    builder.arg(&numel);
    builder.arg(&c);
    builder.arg(&xy);
    builder.arg(&nhwc);
    builder.arg(&apply_relu);

    unsafe { builder.launch(cfg) }.map_err(|e| launch_error(&func_name, e))?;
    Ok(())
}
