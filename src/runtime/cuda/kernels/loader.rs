//! PTX module cache and launch geometry shared by every kernel family
//!
//! `build.rs` drops one `<family>.ptx` per `.cu` file into `CUDA_KERNEL_DIR`.
//! Modules are loaded lazily, once per device, and shared by all clients
//! of that device.

pub use cudarc::driver::safe::LaunchConfig;
use cudarc::driver::safe::{CudaContext, CudaFunction, CudaModule};
use cudarc::nvrtc::Ptx;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use crate::dtype::DType;
use crate::error::{Error, Result};

type ModuleMap = HashMap<(usize, &'static str), Arc<CudaModule>>;

static MODULES: OnceLock<Mutex<ModuleMap>> = OnceLock::new();

fn ptx_for(family: &str) -> Ptx {
    Ptx::from_file(format!("{}/{family}.ptx", env!("CUDA_KERNEL_DIR")))
}

/// Module for kernel `family` on `device_index`, loading it on first request
pub fn get_or_load_module(
    context: &Arc<CudaContext>,
    device_index: usize,
    family: &'static str,
) -> Result<Arc<CudaModule>> {
    let mut modules = MODULES
        .get_or_init(Default::default)
        .lock()
        .map_err(|_| Error::Internal("kernel module cache poisoned".into()))?;
    if let Some(loaded) = modules.get(&(device_index, family)) {
        return Ok(Arc::clone(loaded));
    }

    let module = context
        .load_module(ptx_for(family))
        .map_err(|e| Error::Backend(format!("loading {family}.ptx on cuda:{device_index}: {e:?}")))?;
    log::debug!("loaded kernel module {family} on cuda:{device_index}");
    modules.insert((device_index, family), Arc::clone(&module));
    Ok(module)
}

pub fn get_kernel_function(module: &Arc<CudaModule>, name: &str) -> Result<CudaFunction> {
    module
        .load_function(name)
        .map_err(|e| Error::Internal(format!("no kernel named {name} in module: {e:?}")))
}

/// Threads per block; the pooling kernel's shared arrays are sized to match
pub const BLOCK_SIZE: u32 = 256;

/// One thread per element, rounded up to whole blocks
#[inline]
pub fn elementwise_launch_config(numel: u32) -> (u32, u32, u32) {
    (numel.div_ceil(BLOCK_SIZE), 1, 1)
}

#[inline]
pub fn launch_config(grid: (u32, u32, u32), block: (u32, u32, u32), shared_mem: u32) -> LaunchConfig {
    LaunchConfig {
        grid_dim: grid,
        block_dim: block,
        shared_mem_bytes: shared_mem,
    }
}

/// Largest extent a kernel may index
///
/// Grid-stride loops step an `unsigned int` by up to `numel + BLOCK_SIZE - 1`;
/// keeping `numel` below 2^31 means `i + stride` never wraps back into range.
pub const MAX_KERNEL_INDEX: usize = i32::MAX as usize;

/// Narrow an extent to the index space the kernels use.
pub fn index_u32(arg: &'static str, value: usize) -> Result<u32> {
    if value > MAX_KERNEL_INDEX {
        return Err(Error::invalid_argument(
            arg,
            format!("{} exceeds the kernel index range ({})", value, MAX_KERNEL_INDEX),
        ));
    }
    Ok(value as u32)
}

pub fn launch_error(kernel: &str, e: cudarc::driver::DriverError) -> Error {
    Error::Backend(format!("launching {kernel}: {e:?}"))
}

/// Kernel entry points carry their element type, e.g. `mirror_f16`
#[inline]
pub fn dtype_suffix(dtype: DType) -> &'static str {
    dtype.short_name()
}

#[inline]
pub fn kernel_name(base: &str, dtype: DType) -> String {
    format!("{base}_{}", dtype_suffix(dtype))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_names() {
        assert_eq!(kernel_name("pool_planes", DType::F32), "pool_planes_f32");
        assert_eq!(kernel_name("mirror", DType::F16), "mirror_f16");
    }

    #[test]
    fn test_launch_geometry() {
        assert_eq!(elementwise_launch_config(1), (1, 1, 1));
        assert_eq!(elementwise_launch_config(BLOCK_SIZE), (1, 1, 1));
        assert_eq!(elementwise_launch_config(BLOCK_SIZE + 1), (2, 1, 1));
    }

    #[test]
    fn test_index_range_leaves_stride_headroom() {
        assert_eq!(index_u32("numel", MAX_KERNEL_INDEX).unwrap(), i32::MAX as u32);
        assert!(index_u32("numel", MAX_KERNEL_INDEX + 1).is_err());
        assert!(index_u32("numel", 3_000_000_000).is_err());

        // Last thread index plus one full grid stride must stay representable
        let numel = MAX_KERNEL_INDEX as u64;
        let (grid, _, _) = elementwise_launch_config(numel as u32);
        let stride = grid as u64 * BLOCK_SIZE as u64;
        assert!(numel - 1 + stride <= u32::MAX as u64);
    }
}
