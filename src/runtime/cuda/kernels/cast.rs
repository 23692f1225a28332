//! Precision conversion kernel launcher

use cudarc::driver::PushKernelArg;
use cudarc::driver::safe::{CudaContext, CudaStream};
use std::sync::Arc;

use super::loader::{
    BLOCK_SIZE, dtype_suffix, elementwise_launch_config, get_kernel_function, get_or_load_module,
    index_u32, launch_config, launch_error,
};
use crate::dtype::DType;
use crate::error::Result;

/// Cast module name
pub const CAST_MODULE: &str = "cast";

/// Launch `cast_{src}_{dst}` over `numel` elements.
///
/// Same-dtype calls copy between two disjoint buffers.
///
/// # Safety
///
/// - `input_ptr` must hold `numel` elements of `src_dtype`
/// - `output_ptr` must hold `numel` elements of `dst_dtype` and not overlap the input
#[allow(clippy::too_many_arguments)]
pub unsafe fn launch_cast(
    context: &Arc<CudaContext>,
    stream: &CudaStream,
    device_index: usize,
    src_dtype: DType,
    dst_dtype: DType,
    input_ptr: u64,
    output_ptr: u64,
    numel: usize,
) -> Result<()> {
    let n = index_u32("input", numel)?;

    let module = get_or_load_module(context, device_index, CAST_MODULE)?;
    let func_name = format!(
        "cast_{}_{}",
        dtype_suffix(src_dtype),
        dtype_suffix(dst_dtype)
    );
    let func = get_kernel_function(&module, &func_name)?;

    let cfg = launch_config(elementwise_launch_config(n), (BLOCK_SIZE, 1, 1), 0);
    let mut builder = stream.launch_builder(&func);
    builder.arg(&input_ptr);
    builder.arg(&output_ptr);
    builder.arg(&n);

    unsafe { builder.launch(cfg) }.map_err(|e| launch_error(&func_name, e))?;
    Ok(())
}
